//! Criteria parser using nom.
//!
//! Reads the text [`QueryGenerator`](crate::generator::QueryGenerator)
//! writes back into a tree, so generated text round-trips.
//!
//! # Syntax Overview
//!
//! ```text
//! e.age >= :min AND (e.name LIKE 'A%' OR e.tags IS EMPTY)
//! UPPER(e.name) LIKE UPPER(?1) ESCAPE UPPER('!')
//! e.id NOT IN :ids
//! NOT EXISTS (select 1 from Other o where o.owner = e)
//! CASE WHEN e.age > 18 THEN 'adult' ELSE 'minor' END
//! ```
//!
//! Keywords are case-insensitive. Subquery bodies are kept verbatim.

pub mod grammar;

#[cfg(test)]
mod tests;

use crate::ast::*;
use crate::error::{CriteriaError, CriteriaResult};
use nom::IResult;

/// Parse a complete predicate string.
pub fn parse_predicate(input: &str) -> CriteriaResult<Predicate> {
    let input = input.trim();
    finish(input, grammar::parse_predicate_root(input))
}

/// Parse a complete expression string.
///
/// Text that only reads as a predicate, such as `a = 1`, comes back as
/// [`Expression::Predicate`].
pub fn parse_expression(input: &str) -> CriteriaResult<Expression> {
    let input = input.trim();
    match grammar::parse_expression_root(input) {
        Ok(("", expression)) => Ok(expression),
        _ => finish(input, grammar::parse_predicate_root(input)).map(Expression::from),
    }
}

fn finish<T>(input: &str, result: IResult<&str, T>) -> CriteriaResult<T> {
    match result {
        Ok(("", value)) => Ok(value),
        Ok((remaining, _)) => Err(CriteriaError::parse(
            input.len() - remaining.len(),
            format!("Unexpected trailing content: '{}'", remaining),
        )),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(CriteriaError::parse(
            input.len() - e.input.len(),
            format!("Parse failed: {:?}", e.code),
        )),
        Err(nom::Err::Incomplete(_)) => Err(CriteriaError::parse(
            input.len(),
            "Parse failed: incomplete input",
        )),
    }
}
