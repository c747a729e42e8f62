//! Supporting utilities shared by the parser and generator.

pub mod accessor;
pub mod keywords;
pub mod literal;
pub mod priority;

pub use accessor::AttributeAccessor;
pub use keywords::is_keyword;
pub use priority::{Prioritized, compare_priority};
