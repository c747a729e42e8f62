//! Quoting context tracked while scanning query text.

/// The quoting context of the current scan position.
///
/// Quote kinds do not nest and doubled quote characters are not treated as
/// escapes: `''` leaves single-quote mode and immediately re-enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMode {
    #[default]
    None,
    /// Inside `'...'`
    Single,
    /// Inside `"..."`
    Double,
    /// Inside `` `...` ``
    Backtick,
    /// Inside `[...]`
    Bracket,
}

impl QuoteMode {
    /// Transition for a character read in text order.
    pub fn on_char(self, c: u8) -> Self {
        match self {
            QuoteMode::None => match c {
                b'\'' => QuoteMode::Single,
                b'"' => QuoteMode::Double,
                b'`' => QuoteMode::Backtick,
                b'[' => QuoteMode::Bracket,
                _ => QuoteMode::None,
            },
            QuoteMode::Bracket if c == b']' => QuoteMode::None,
            _ => self.on_closing(c),
        }
    }

    /// Transition for a character read in reverse text order.
    ///
    /// Bracket roles swap: `]` opens and `[` closes.
    pub fn on_char_backwards(self, c: u8) -> Self {
        match self {
            QuoteMode::None => match c {
                b'\'' => QuoteMode::Single,
                b'"' => QuoteMode::Double,
                b'`' => QuoteMode::Backtick,
                b']' => QuoteMode::Bracket,
                _ => QuoteMode::None,
            },
            QuoteMode::Bracket if c == b'[' => QuoteMode::None,
            _ => self.on_closing(c),
        }
    }

    fn on_closing(self, c: u8) -> Self {
        match (self, c) {
            (QuoteMode::Single, b'\'') | (QuoteMode::Double, b'"') | (QuoteMode::Backtick, b'`') => {
                QuoteMode::None
            }
            _ => self,
        }
    }

    /// Replay the forward transitions over `text`.
    pub fn replay(self, text: &[u8]) -> Self {
        text.iter().fold(self, |mode, &c| mode.on_char(c))
    }

    pub fn is_quoted(self) -> bool {
        self != QuoteMode::None
    }
}
