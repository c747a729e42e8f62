//! # criteria-core
//!
//! Building blocks for criteria query builders: a composable predicate and
//! expression tree, a generator that renders it as query text, a parser
//! that reads that text back, and quote-aware scanning of SQL/JPQL strings.
//!
//! ## Quick Example
//!
//! ```
//! use criteria_core::prelude::*;
//!
//! let p = and(vec![
//!     ge(path("e.age"), param("min")),
//!     or(vec![like(path("e.name"), string("A%"), None), is_empty(path("e.tags"))]),
//! ]);
//! let text = p.to_string();
//! assert_eq!(text, "e.age >= :min AND (e.name LIKE 'A%' OR e.tags IS EMPTY)");
//!
//! // generated text parses back into the same tree
//! assert_eq!(parse_predicate(&text).unwrap(), p);
//! ```
//!
//! ## Scanning
//!
//! ```
//! use criteria_core::sql;
//!
//! let query = "select e.name, (select max(x.a) from X x) from Emp e where e.id = 1";
//! assert_eq!(sql::count_select_items("e.name, (select max(x.a) from X x)"), 2);
//! assert_eq!(sql::index_of_from(query), Some(41));
//! assert_eq!(sql::index_of_where(query), Some(52));
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod generator;
pub mod parser;
pub mod scan;
pub mod sql;
pub mod util;
pub mod visit;

pub use parser::{parse_expression, parse_predicate};

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::config::{CriteriaConfig, DialectConfig, GeneratorConfig, ParameterRenderingMode};
    pub use crate::error::*;
    pub use crate::generator::{BooleanLiteralRenderingContext, QueryGenerator};
    pub use crate::parser::{parse_expression, parse_predicate};
    pub use crate::visit::{ExpressionOptimizer, PathCollector, ResultVisitor, Visitor};
}
