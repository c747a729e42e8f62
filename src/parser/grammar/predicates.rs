//! Predicate parsing.
//!
//! Precedence, loosest first: `OR`, `AND`, `NOT`, then the comparison-like
//! forms (`=`, `BETWEEN`, `LIKE`, `IN`, `IS NULL`, `MEMBER OF`, ...).

use super::base::*;
use super::expressions::parse_expression;
use crate::ast::*;
use crate::util::literal::unescape_like_escape;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, multispace1},
    combinator::{opt, recognize, value},
    error::ErrorKind,
    multi::separated_list1,
    sequence::{delimited, preceded, terminated},
};

/// Parse OR-separated terms
pub fn parse_or(input: &str) -> IResult<&str, Predicate> {
    parse_junction(input, CompoundOperator::Or, "or", parse_and)
}

/// Parse AND-separated terms
pub fn parse_and(input: &str) -> IResult<&str, Predicate> {
    parse_junction(input, CompoundOperator::And, "and", parse_not)
}

/// One operand stays as is, more become a single multinary node.
fn parse_junction<'a, F>(
    input: &'a str,
    operator: CompoundOperator,
    word: &'static str,
    parse_operand: F,
) -> IResult<&'a str, Predicate>
where
    F: Fn(&'a str) -> IResult<&'a str, Predicate>,
{
    let (mut input, first) = parse_operand(input)?;
    let mut children = vec![first];

    while let Ok((after_op, _)) = (multispace0, keyword(word), multispace0).parse(input) {
        let (after_operand, child) = parse_operand(after_op)?;
        children.push(child);
        input = after_operand;
    }

    if children.len() == 1
        && let Some(only) = children.pop()
    {
        return Ok((input, only));
    }
    Ok((input, Predicate::Multinary(MultinaryPredicate::new(operator, children))))
}

/// Parse `NOT p`. Negatable predicates flip their flag, anything else
/// is kept as a `NOT` over the expression.
pub fn parse_not(input: &str) -> IResult<&str, Predicate> {
    let Ok((rest, _)) = keyword("not")(input) else {
        return parse_primary_predicate(input);
    };
    let (rest, _) = multispace0(rest)?;

    if let Ok((rest, predicate)) = parse_not(rest) {
        return Ok((rest, predicate.not()));
    }
    let (rest, expression) = parse_expression(rest)?;
    Ok((rest, Predicate::Not(NotPredicate::new(expression))))
}

pub fn parse_primary_predicate(input: &str) -> IResult<&str, Predicate> {
    alt((
        parse_exists,
        parse_expression_predicate,
        parse_parenthesized_predicate,
        parse_boolean,
    ))
    .parse(input)
}

fn parse_exists(input: &str) -> IResult<&str, Predicate> {
    let (input, _) = keyword("exists")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, subquery) = parse_subquery(input)?;
    Ok((
        input,
        Predicate::Exists(ExistsPredicate {
            expression: Expression::Subquery(subquery),
            negated: false,
        }),
    ))
}

fn parse_parenthesized_predicate(input: &str) -> IResult<&str, Predicate> {
    delimited((char('('), multispace0), parse_or, (multispace0, char(')'))).parse(input)
}

fn parse_boolean(input: &str) -> IResult<&str, Predicate> {
    alt((
        value(Predicate::Boolean(BooleanLiteral::new(true)), keyword("true")),
        value(Predicate::Boolean(BooleanLiteral::new(false)), keyword("false")),
    ))
    .parse(input)
}

/// An operand followed by a comparison-like suffix.
fn parse_expression_predicate(input: &str) -> IResult<&str, Predicate> {
    let (input, left) = parse_expression(input)?;
    let (input, _) = multispace0(input)?;
    parse_predicate_suffix(input, left)
}

fn parse_predicate_suffix(input: &str, left: Expression) -> IResult<&str, Predicate> {
    if let Ok((rest, _)) = keyword("is")(input) {
        let (rest, _) = multispace1(rest)?;
        let (rest, negated) = opt_not(rest)?;
        if let Ok((rest, _)) = keyword("null")(rest) {
            let predicate = IsNullPredicate {
                expression: left,
                negated,
            };
            return Ok((rest, Predicate::IsNull(predicate)));
        }
        let (rest, _) = keyword("empty")(rest)?;
        let predicate = IsEmptyPredicate {
            expression: left,
            negated,
        };
        return Ok((rest, Predicate::IsEmpty(predicate)));
    }

    let (rest, negated) = opt_not(input)?;
    if let Ok((rest, _)) = keyword("between")(rest) {
        return parse_between(rest, left, negated);
    }
    if let Ok((rest, _)) = keyword("like")(rest) {
        return parse_like(rest, left, negated);
    }
    if let Ok((rest, _)) = keyword("in")(rest) {
        return parse_in(rest, left, negated);
    }
    if let Ok((rest, _)) = keyword("member")(rest) {
        return parse_member_of(rest, left, negated);
    }
    if negated {
        return error(rest, ErrorKind::Tag);
    }
    parse_comparison(input, left)
}

fn parse_between(input: &str, left: Expression, negated: bool) -> IResult<&str, Predicate> {
    let (input, _) = multispace1(input)?;
    let (input, start) = parse_expression(input)?;
    let (input, _) = (multispace0, keyword("and"), multispace0).parse(input)?;
    let (input, end) = parse_expression(input)?;
    Ok((
        input,
        Predicate::Between(BetweenPredicate {
            left,
            start,
            end,
            negated,
        }),
    ))
}

/// `l LIKE r [ESCAPE 'c']`, or the case-insensitive
/// `UPPER(l) LIKE UPPER(r) [ESCAPE UPPER('c')]`.
fn parse_like(input: &str, left: Expression, negated: bool) -> IResult<&str, Predicate> {
    let (input, _) = multispace0(input)?;
    let (input, pattern) = parse_expression(input)?;
    let (input, escape) =
        opt(preceded((multispace0, keyword("escape"), multispace0), parse_escape)).parse(input)?;

    let insensitive = match (upper_operand(&left), upper_operand(&pattern)) {
        (Some(l), Some(r)) => Some((l.clone(), r.clone())),
        _ => None,
    };
    let (left, right, case_sensitive) = match insensitive {
        Some((l, r)) => (l, r, false),
        None => (left, pattern, true),
    };

    Ok((
        input,
        Predicate::Like(LikePredicate {
            left,
            right,
            case_sensitive,
            escape,
            negated,
        }),
    ))
}

fn upper_operand(expression: &Expression) -> Option<&Expression> {
    match expression {
        Expression::Function(function)
            if !function.aggregate && function.name.eq_ignore_ascii_case("upper") =>
        {
            match function.args.as_slice() {
                [arg] => Some(arg),
                _ => None,
            }
        }
        _ => None,
    }
}

fn parse_escape(input: &str) -> IResult<&str, char> {
    let (rest, quoted) = alt((
        recognize(parse_string_literal),
        delimited(
            (keyword("upper"), multispace0, char('('), multispace0),
            recognize(parse_string_literal),
            (multispace0, char(')')),
        ),
    ))
    .parse(input)?;

    match unescape_like_escape(quoted) {
        Some(escape) => Ok((rest, escape)),
        None => failure(input, ErrorKind::Verify),
    }
}

/// `IN (a, b)`, `IN (select ...)` or `IN :collection`
fn parse_in(input: &str, left: Expression, negated: bool) -> IResult<&str, Predicate> {
    let (input, _) = multispace0(input)?;

    let (input, right) = if let Ok((rest, subquery)) = parse_subquery(input) {
        (rest, vec![Expression::Subquery(subquery)])
    } else if let Ok((rest, parameter)) = parse_parameter(input) {
        (rest, vec![Expression::Parameter(parameter.collection_valued())])
    } else {
        delimited(
            (char('('), multispace0),
            separated_list1((multispace0, char(','), multispace0), parse_expression),
            (multispace0, char(')')),
        )
        .parse(input)?
    };

    Ok((
        input,
        Predicate::In(InPredicate {
            left,
            right,
            negated,
        }),
    ))
}

fn parse_member_of(input: &str, left: Expression, negated: bool) -> IResult<&str, Predicate> {
    let (input, _) = multispace1(input)?;
    let (input, _) = opt((keyword("of"), multispace1)).parse(input)?;
    let (input, right) = parse_expression(input)?;
    Ok((
        input,
        Predicate::MemberOf(MemberOfPredicate {
            left,
            right,
            negated,
        }),
    ))
}

fn parse_comparison(input: &str, left: Expression) -> IResult<&str, Predicate> {
    let (input, (kind, negated)) = parse_comparison_operator(input)?;
    let (input, _) = multispace0(input)?;
    let (input, quantifier) = opt(terminated(
        alt((
            value(PredicateQuantifier::All, keyword("all")),
            value(PredicateQuantifier::Any, keyword("any")),
            value(PredicateQuantifier::Any, keyword("some")),
        )),
        multispace0,
    ))
    .parse(input)?;
    let (input, right) = parse_expression(input)?;

    let mut comparison = ComparisonPredicate::new(kind, left, right)
        .quantified(quantifier.unwrap_or_default());
    comparison.negated = negated;
    Ok((input, Predicate::Comparison(comparison)))
}

/// `<>` and `!=` come back as a negated equality.
fn parse_comparison_operator(input: &str) -> IResult<&str, (ComparisonKind, bool)> {
    alt((
        value((ComparisonKind::Eq, true), tag("<>")),
        value((ComparisonKind::Eq, true), tag("!=")),
        value((ComparisonKind::Le, false), tag("<=")),
        value((ComparisonKind::Ge, false), tag(">=")),
        value((ComparisonKind::Lt, false), tag("<")),
        value((ComparisonKind::Gt, false), tag(">")),
        value((ComparisonKind::Eq, false), tag("=")),
    ))
    .parse(input)
}
