pub mod base;
pub mod binary_ops;
pub mod expressions;
pub mod predicates;

use crate::ast::*;
use nom::{IResult, Parser, character::complete::multispace0, sequence::delimited};

/// Parse a predicate (root entry point).
pub fn parse_predicate_root(input: &str) -> IResult<&str, Predicate> {
    delimited(multispace0, predicates::parse_or, multispace0).parse(input)
}

/// Parse a scalar expression (root entry point).
pub fn parse_expression_root(input: &str) -> IResult<&str, Expression> {
    delimited(multispace0, expressions::parse_expression, multispace0).parse(input)
}
