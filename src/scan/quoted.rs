//! Pattern finder that ignores matches inside quoted regions.

use super::pattern::{PatternFinder, clamp_window};
use super::quote::QuoteMode;

/// Wraps a [`PatternFinder`] so that candidates inside single, double,
/// backtick or bracket quoted regions are skipped.
///
/// All scan state lives on the stack, so a shared instance is reentrant.
#[derive(Debug, Clone)]
pub struct QuoteAwareFinder<F> {
    delegate: F,
}

impl<F: PatternFinder> QuoteAwareFinder<F> {
    pub fn new(delegate: F) -> Self {
        Self { delegate }
    }

    pub fn delegate(&self) -> &F {
        &self.delegate
    }
}

impl<F: PatternFinder> PatternFinder for QuoteAwareFinder<F> {
    fn index_in_range(&self, text: &[u8], start: usize, end: usize) -> Option<usize> {
        let (mut start, mut end) = clamp_window(text.len(), start, end);

        loop {
            let found = self.delegate.index_in_range(text, start, end)?;
            if found == start {
                return Some(found);
            }

            let (mut mode, opened_at) = replay_with_opening(&text[start..found]);
            if !mode.is_quoted() {
                return Some(found);
            }

            if self.delegate.searches_backwards() {
                // Retry in front of the literal that encloses the candidate
                tracing::trace!(candidate = found, end = start + opened_at, "skipping quoted match");
                end = start + opened_at;
                continue;
            }

            // Move past the end of the literal that encloses the candidate
            let mut i = found;
            while mode.is_quoted() && i < end {
                mode = mode.on_char(text[i]);
                i += 1;
            }
            if i >= end {
                return None;
            }

            tracing::trace!(candidate = found, resume = i, "skipping quoted match");
            start = i;
        }
    }

    fn searches_backwards(&self) -> bool {
        self.delegate.searches_backwards()
    }
}

/// Quote mode after `text`, plus the offset at which the region still open
/// at the end was entered.
fn replay_with_opening(text: &[u8]) -> (QuoteMode, usize) {
    let mut mode = QuoteMode::None;
    let mut opened_at = 0;
    for (i, &c) in text.iter().enumerate() {
        let next = mode.on_char(c);
        if !mode.is_quoted() && next.is_quoted() {
            opened_at = i;
        }
        mode = next;
    }
    (mode, opened_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::pattern::{BoyerMooreFirstFinder, BoyerMooreLastFinder};

    fn finder(pattern: &str) -> QuoteAwareFinder<BoyerMooreFirstFinder> {
        QuoteAwareFinder::new(BoyerMooreFirstFinder::new(pattern))
    }

    #[test]
    fn test_skips_match_in_string_literal() {
        let text = b"select 'from the start' x from t";
        assert_eq!(finder("from").index_in(text), Some(26));
        assert_eq!(BoyerMooreFirstFinder::new("from").index_in(text), Some(8));
    }

    #[test]
    fn test_only_quoted_occurrence_is_not_found() {
        assert_eq!(finder("from").index_in(b"select 'from' x"), None);
        assert_eq!(finder("from").index_in(b"select \"from\" x"), None);
        assert_eq!(finder("from").index_in(b"select `from` x"), None);
        assert_eq!(finder("from").index_in(b"select [from] x"), None);
    }

    #[test]
    fn test_match_at_window_start_is_returned() {
        let text = b"x 'a' from";
        assert_eq!(finder("from").index_from(text, 6), Some(6));
    }

    #[test]
    fn test_multiple_literals_before_match() {
        let text = b"'where' \"where\" [where] where";
        assert_eq!(finder("where").index_in(text), Some(24));
    }

    #[test]
    fn test_unterminated_literal() {
        assert_eq!(finder("from").index_in(b"select 'from t"), None);
    }

    #[test]
    fn test_last_finder_skips_trailing_literal() {
        let inner = BoyerMooreLastFinder::new("x");
        let aware = QuoteAwareFinder::new(&inner);
        assert!(aware.searches_backwards());
        assert_eq!(aware.index_in(b"x 'x'"), Some(0));
        assert_eq!(aware.index_in(b"x"), Some(0));
        assert_eq!(aware.index_in(b"a x \"x\" [x] 'b''x'"), Some(2));
        assert_eq!(aware.index_in(b"'x' [x]"), None);
        assert_eq!(aware.index_in_range(b"'a' x 'x' x", 0, 9), Some(4));
    }
}
