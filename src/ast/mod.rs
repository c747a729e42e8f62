//! Expression and predicate AST.

pub mod builders;
pub mod expr;
pub mod operators;
pub mod predicate;
pub mod values;

pub use expr::*;
pub use operators::*;
pub use predicate::*;
pub use values::*;
