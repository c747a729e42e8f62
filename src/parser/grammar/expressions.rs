//! Scalar expression parsing: paths, literals, parameters, functions,
//! CASE, qualified paths and subqueries.

use super::base::*;
use super::binary_ops::parse_additive_expr;
use super::predicates::parse_or;
use crate::ast::*;
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, value},
    error::{Error, ErrorKind},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded},
};

/// Parse a full scalar expression.
pub fn parse_expression(input: &str) -> IResult<&str, Expression> {
    parse_additive_expr(input)
}

/// Parse an operand of the arithmetic operators.
pub fn parse_primary(input: &str) -> IResult<&str, Expression> {
    alt((
        map(parse_subquery, Expression::Subquery),
        parse_parenthesized,
        parse_case,
        map(parse_temporal_literal, Expression::Literal),
        map(parse_string_literal, |s| Expression::Literal(Literal::String(s))),
        map(parse_number, Expression::Literal),
        map(parse_parameter, Expression::Parameter),
        parse_constant,
        parse_qualified,
        parse_function,
        map(parse_path, Expression::Path),
    ))
    .parse(input)
}

fn parse_parenthesized(input: &str) -> IResult<&str, Expression> {
    delimited(
        (char('('), multispace0),
        parse_expression,
        (multispace0, char(')')),
    )
    .parse(input)
}

/// `NULL`, `TRUE`, `FALSE`
fn parse_constant(input: &str) -> IResult<&str, Expression> {
    alt((
        value(Expression::Null, keyword("null")),
        map(keyword("true"), |_| Expression::from(Predicate::Boolean(BooleanLiteral::new(true)))),
        map(keyword("false"), |_| Expression::from(Predicate::Boolean(BooleanLiteral::new(false)))),
    ))
    .parse(input)
}

/// Parse KEY(path), VALUE(path), ENTRY(path), INDEX(path)
pub fn parse_qualified(input: &str) -> IResult<&str, Expression> {
    let (input, kind) = alt((
        value(QualifiedKind::Key, keyword("key")),
        value(QualifiedKind::Value, keyword("value")),
        value(QualifiedKind::Entry, keyword("entry")),
        value(QualifiedKind::Index, keyword("index")),
    ))
    .parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(').parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, path) = parse_path(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')').parse(input)?;

    Ok((input, Expression::Qualified(QualifiedPath { kind, path })))
}

/// Parse function call or aggregate: name(arg1, arg2), COUNT(DISTINCT x), COUNT(*)
pub fn parse_function(input: &str) -> IResult<&str, Expression> {
    let (rest, name) = parse_name(input)?;
    let function = FunctionExpression::new(name, Vec::new());
    if function.omits_parentheses() {
        return Ok((rest, Expression::Function(function)));
    }

    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char('(').parse(rest)?;
    let (rest, _) = multispace0(rest)?;

    let aggregate = AGGREGATE_FUNCTIONS.iter().any(|a| a.eq_ignore_ascii_case(name));
    let (rest, distinct) = if aggregate {
        let (rest, distinct) = opt((keyword("distinct"), multispace1)).parse(rest)?;
        (rest, distinct.is_some())
    } else {
        (rest, false)
    };

    let (rest, args) = if let Ok((after_star, _)) = char::<_, Error<&str>>('*').parse(rest) {
        if !name.eq_ignore_ascii_case("count") {
            return error(rest, ErrorKind::Char);
        }
        (after_star, Vec::new())
    } else {
        separated_list0((multispace0, char(','), multispace0), parse_expression).parse(rest)?
    };

    let (rest, _) = multispace0(rest)?;
    let (rest, _) = char(')').parse(rest)?;

    let function = if aggregate {
        FunctionExpression::aggregate(name, args, distinct)
    } else {
        FunctionExpression::new(name, args)
    };
    Ok((rest, Expression::Function(function)))
}

/// Parse a dotted path with optional `[index]` on any segment.
///
/// The first segment must not be a reserved word.
pub fn parse_path(input: &str) -> IResult<&str, PathExpression> {
    let (mut rest, first) = parse_path_element(input, true)?;
    let mut path = PathExpression::new(vec![first]);
    while let Ok((after_dot, _)) = char::<_, Error<&str>>('.').parse(rest) {
        let (after, element) = parse_path_element(after_dot, false)?;
        path.push(element);
        rest = after;
    }
    Ok((rest, path))
}

fn parse_path_element(input: &str, first: bool) -> IResult<&str, PathElement> {
    let (input, name) = if first {
        parse_name(input)?
    } else {
        parse_identifier(input)?
    };
    let (input, index) = opt(delimited(
        (char('['), multispace0),
        parse_expression,
        (multispace0, char(']')),
    ))
    .parse(input)?;

    let element = match index {
        Some(index) => PathElement::Array {
            name: name.to_string(),
            index: Box::new(index),
        },
        None => PathElement::Property(name.to_string()),
    };
    Ok((input, element))
}

/// Parse CASE [operand] WHEN ... THEN ... [ELSE ...] END
///
/// `ELSE NULL` is the implicit default and is not kept.
pub fn parse_case(input: &str) -> IResult<&str, Expression> {
    let (input, _) = keyword("case")(input)?;
    let (input, _) = multispace1(input)?;

    let (input, operand) = if keyword("when")(input).is_ok() {
        (input, None)
    } else {
        let (input, operand) = parse_expression(input)?;
        let (input, _) = multispace1(input)?;
        (input, Some(Box::new(operand)))
    };
    let (input, when_clauses) = if operand.is_some() {
        separated_list1(multispace1, parse_simple_when).parse(input)?
    } else {
        separated_list1(multispace1, parse_searched_when).parse(input)?
    };

    let (input, _) = multispace0(input)?;
    let (input, default) =
        opt(preceded((keyword("else"), multispace1), parse_expression)).parse(input)?;

    let (input, _) = multispace0(input)?;
    let (input, _) = keyword("end")(input)?;

    let default = match default {
        None | Some(Expression::Null) => None,
        Some(default) => Some(Box::new(default)),
    };
    Ok((
        input,
        Expression::Case(CaseExpression {
            operand,
            when_clauses,
            default,
        }),
    ))
}

fn parse_simple_when(input: &str) -> IResult<&str, WhenClause> {
    parse_when(input, true)
}

fn parse_searched_when(input: &str) -> IResult<&str, WhenClause> {
    parse_when(input, false)
}

/// Parse a single WHEN ... THEN ... clause. Simple cases compare values,
/// general cases test predicates.
fn parse_when(input: &str, simple: bool) -> IResult<&str, WhenClause> {
    let (input, _) = keyword("when")(input)?;
    let (input, _) = multispace1(input)?;

    let (input, condition) = if simple {
        parse_expression(input)?
    } else {
        let (input, predicate) = parse_or(input)?;
        (input, Expression::Predicate(Box::new(predicate)))
    };

    let (input, _) = multispace0(input)?;
    let (input, _) = keyword("then")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, result) = parse_expression(input)?;

    Ok((input, WhenClause { condition, result }))
}
