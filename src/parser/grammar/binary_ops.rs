//! Arithmetic operator chains.
//!
//! Precedence, loosest first:
//! - `+ -`
//! - `* /`
//! - unary `-` and `+`

use super::expressions::parse_primary;
use crate::ast::*;
use nom::{
    IResult, Parser,
    bytes::complete::tag,
    character::complete::{multispace0, one_of},
    error::Error,
};

/// Parse additive: expr + expr, expr - expr
pub fn parse_additive_expr(input: &str) -> IResult<&str, Expression> {
    let (input, left) = parse_multiplicative_expr(input)?;
    parse_binary_chain(
        input,
        left,
        parse_multiplicative_expr,
        &[("+", ArithmeticOperator::Add), ("-", ArithmeticOperator::Sub)],
    )
}

/// Parse multiplicative: expr * expr, expr / expr
pub fn parse_multiplicative_expr(input: &str) -> IResult<&str, Expression> {
    let (input, left) = parse_unary_expr(input)?;
    parse_binary_chain(
        input,
        left,
        parse_unary_expr,
        &[("*", ArithmeticOperator::Mul), ("/", ArithmeticOperator::Div)],
    )
}

/// Parse a signed operand. A leading `+` is dropped.
pub fn parse_unary_expr(input: &str) -> IResult<&str, Expression> {
    if let Ok((rest, sign)) = one_of::<_, _, Error<&str>>("+-").parse(input) {
        let (rest, _) = multispace0(rest)?;
        let (rest, expression) = parse_unary_expr(rest)?;
        let expression = match sign {
            '-' => Expression::negative(expression),
            _ => expression,
        };
        return Ok((rest, expression));
    }
    parse_primary(input)
}

/// Generic left-associative binary chain parser
pub fn parse_binary_chain<'a, F>(
    mut input: &'a str,
    mut left: Expression,
    parse_operand: F,
    operators: &[(&str, ArithmeticOperator)],
) -> IResult<&'a str, Expression>
where
    F: Fn(&'a str) -> IResult<&'a str, Expression>,
{
    loop {
        let (remaining, _) = multispace0(input)?;

        let mut matched = None;
        for (op_str, op_enum) in operators {
            if let Ok((after_op, _)) = tag::<_, _, Error<&str>>(*op_str).parse(remaining) {
                matched = Some((after_op, *op_enum));
                break;
            }
        }

        let Some((after_op, op)) = matched else {
            break;
        };
        let (after_ws, _) = multispace0(after_op)?;
        let (after_right, right) = parse_operand(after_ws)?;
        left = Expression::arithmetic(left, op, right);
        input = after_right;
    }

    Ok((input, left))
}
