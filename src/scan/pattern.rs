//! Case-insensitive Boyer–Moore pattern finders.
//!
//! Both finders lower the pattern and every inspected text byte with ASCII
//! rules only. Non-ASCII bytes are scanned like any other byte and simply
//! never match a lowered ASCII pattern byte.

/// Size of the bad-character skip table (one entry per byte value).
const RADIX: usize = 256;

/// Locates a preconfigured pattern within a byte window of some text.
///
/// Implementations are immutable after construction, so one compiled
/// finder can be shared by any number of concurrent scans.
pub trait PatternFinder {
    /// Index of a match within `text[start..end]`, or `None`.
    ///
    /// The window is clamped to the text: `end` is capped at `text.len()`
    /// and a `start` beyond `end` yields an empty window.
    fn index_in_range(&self, text: &[u8], start: usize, end: usize) -> Option<usize>;

    /// Index of a match anywhere in `text`.
    fn index_in(&self, text: &[u8]) -> Option<usize> {
        self.index_in_range(text, 0, text.len())
    }

    /// Index of a match in `text[start..]`.
    fn index_from(&self, text: &[u8], start: usize) -> Option<usize> {
        self.index_in_range(text, start, text.len())
    }

    /// Whether the finder reports the highest index match instead of the lowest.
    fn searches_backwards(&self) -> bool {
        false
    }
}

impl<F: PatternFinder + ?Sized> PatternFinder for &F {
    fn index_in_range(&self, text: &[u8], start: usize, end: usize) -> Option<usize> {
        (**self).index_in_range(text, start, end)
    }
    fn searches_backwards(&self) -> bool {
        (**self).searches_backwards()
    }
}

impl<F: PatternFinder + ?Sized> PatternFinder for Box<F> {
    fn index_in_range(&self, text: &[u8], start: usize, end: usize) -> Option<usize> {
        (**self).index_in_range(text, start, end)
    }
    fn searches_backwards(&self) -> bool {
        (**self).searches_backwards()
    }
}

pub(crate) fn clamp_window(len: usize, start: usize, end: usize) -> (usize, usize) {
    let end = end.min(len);
    (start.min(end), end)
}

fn lowered(pattern: &str) -> Box<[u8]> {
    pattern.bytes().map(|b| b.to_ascii_lowercase()).collect()
}

/// Finds the first (lowest index) case-insensitive occurrence of a pattern.
#[derive(Debug, Clone)]
pub struct BoyerMooreFirstFinder {
    pattern: Box<[u8]>,
    /// Rightmost position of each byte in the pattern, `-1` if absent.
    right: [isize; RADIX],
}

impl BoyerMooreFirstFinder {
    pub fn new(pattern: &str) -> Self {
        let pattern = lowered(pattern);
        let mut right = [-1isize; RADIX];
        for (j, &b) in pattern.iter().enumerate() {
            right[b as usize] = j as isize;
        }
        Self { pattern, right }
    }

    /// The lowered pattern bytes.
    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }
}

impl PatternFinder for BoyerMooreFirstFinder {
    fn index_in_range(&self, text: &[u8], start: usize, end: usize) -> Option<usize> {
        let (start, end) = clamp_window(text.len(), start, end);
        let m = self.pattern.len();
        if end - start < m {
            return None;
        }

        let mut i = start;
        while i <= end - m {
            let mut skip = 0;
            for j in (0..m).rev() {
                let c = text[i + j].to_ascii_lowercase();
                if self.pattern[j] != c {
                    skip = (j as isize - self.right[c as usize]).max(1) as usize;
                    break;
                }
            }
            if skip == 0 {
                return Some(i);
            }
            i += skip;
        }

        None
    }
}

/// Finds the last (highest index) case-insensitive occurrence of a pattern.
///
/// The window slides from `end - pattern.len()` down to `start`, comparing
/// the pattern left to right.
#[derive(Debug, Clone)]
pub struct BoyerMooreLastFinder {
    pattern: Box<[u8]>,
    /// Leftmost position of each byte in the pattern, pattern length if absent.
    left: [usize; RADIX],
}

impl BoyerMooreLastFinder {
    pub fn new(pattern: &str) -> Self {
        let pattern = lowered(pattern);
        let mut left = [pattern.len(); RADIX];
        for (j, &b) in pattern.iter().enumerate().rev() {
            left[b as usize] = j;
        }
        Self { pattern, left }
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }
}

impl PatternFinder for BoyerMooreLastFinder {
    fn searches_backwards(&self) -> bool {
        true
    }

    fn index_in_range(&self, text: &[u8], start: usize, end: usize) -> Option<usize> {
        let (start, end) = clamp_window(text.len(), start, end);
        let m = self.pattern.len();
        if end - start < m {
            return None;
        }

        let mut i = end - m;
        loop {
            let mut skip = 0;
            for j in 0..m {
                let c = text[i + j].to_ascii_lowercase();
                if self.pattern[j] != c {
                    skip = self.left[c as usize].saturating_sub(j).max(1);
                    break;
                }
            }
            if skip == 0 {
                return Some(i);
            }
            if i < start + skip {
                return None;
            }
            i -= skip;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_finder_is_case_insensitive() {
        let finder = BoyerMooreFirstFinder::new("FROM");
        assert_eq!(finder.index_in(b"select a From t"), Some(9));
        assert_eq!(finder.index_in(b"select a frm t"), None);
    }

    #[test]
    fn test_first_and_last_on_repeated_pattern() {
        let text = b"from x from y from z";
        let first = BoyerMooreFirstFinder::new("from");
        let last = BoyerMooreLastFinder::new("from");
        assert_eq!(first.index_in(text), Some(0));
        assert_eq!(last.index_in(text), Some(14));
        assert_eq!(first.index_from(text, 1), Some(7));
        assert_eq!(last.index_in_range(text, 0, 14), Some(7));
    }

    #[test]
    fn test_window_shorter_than_pattern() {
        let first = BoyerMooreFirstFinder::new("select");
        let last = BoyerMooreLastFinder::new("select");
        assert_eq!(first.index_in_range(b"select", 1, 6), None);
        assert_eq!(last.index_in_range(b"select", 0, 5), None);
        assert_eq!(first.index_in_range(b"select", 4, 2), None);
        assert_eq!(first.index_in(b""), None);
    }

    #[test]
    fn test_window_bounds_are_respected() {
        let text = b"abc abc abc";
        let first = BoyerMooreFirstFinder::new("abc");
        let last = BoyerMooreLastFinder::new("abc");
        assert_eq!(first.index_in_range(text, 1, 7), Some(4));
        assert_eq!(last.index_in_range(text, 1, 7), Some(4));
        assert_eq!(first.index_in_range(text, 1, 100), Some(4));
        assert_eq!(last.index_in_range(text, 5, 11), Some(8));
    }

    #[test]
    fn test_non_ascii_text_is_scanned_through() {
        let finder = BoyerMooreFirstFinder::new("from");
        let text = "select 'ÄÖÜ' from t".as_bytes();
        let idx = finder.index_in(text).unwrap();
        assert_eq!(&text[idx..idx + 4], b"from");

        let last = BoyerMooreLastFinder::new("ü");
        assert_eq!(last.index_in("ÜÜ".as_bytes()), None);
    }

    #[test]
    fn test_every_occurrence_is_reachable() {
        let text = b"xxAbAbxabABab";
        let first = BoyerMooreFirstFinder::new("ab");
        let last = BoyerMooreLastFinder::new("ab");

        let mut forward = Vec::new();
        let mut pos = 0;
        while let Some(i) = first.index_from(text, pos) {
            forward.push(i);
            pos = i + 1;
        }

        let mut backward = Vec::new();
        let mut end = text.len();
        while let Some(i) = last.index_in_range(text, 0, end) {
            backward.push(i);
            // shrink the window so the match at `i` no longer fits
            end = i + 1;
        }
        backward.reverse();

        assert_eq!(forward, vec![2, 4, 7, 9, 11]);
        assert_eq!(backward, forward);
    }
}
