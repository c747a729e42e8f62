//! Allocation-free text scanning primitives.
//!
//! - [`PatternFinder`] and its Boyer–Moore implementations locate fixed keywords.
//! - [`QuoteMode`] tracks quoting context one character at a time.
//! - [`QuoteAwareFinder`] combines both so keywords inside literals are ignored.

pub mod pattern;
pub mod quote;
pub mod quoted;

pub use pattern::{BoyerMooreFirstFinder, BoyerMooreLastFinder, PatternFinder};
pub use quote::QuoteMode;
pub use quoted::QuoteAwareFinder;
