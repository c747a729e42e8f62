//! Shorthand constructors for building predicate trees in code.
//!
//! ```
//! use criteria_core::ast::builders::*;
//!
//! let p = and(vec![eq(path("e.age"), number(30)), is_null(path("e.name"))]);
//! assert_eq!(p.to_string(), "e.age = 30 AND e.name IS NULL");
//! ```

use crate::ast::*;

pub fn path(dotted: &str) -> Expression {
    Expression::path(dotted)
}

/// Named (`:name`) or positional (`?1` as `"1"`) parameter
pub fn param(name: &str) -> Expression {
    Expression::parameter(name)
}

pub fn string(value: &str) -> Expression {
    Expression::literal(value)
}

/// Numeric constant; negative values come out as a unary minus
pub fn number(value: impl Into<Literal>) -> Expression {
    Expression::from(value.into())
}

pub fn subquery(query: &str) -> Expression {
    Expression::subquery(query)
}

fn compare(kind: ComparisonKind, left: Expression, right: Expression) -> Predicate {
    Predicate::Comparison(ComparisonPredicate::new(kind, left, right))
}

pub fn eq(left: Expression, right: Expression) -> Predicate {
    compare(ComparisonKind::Eq, left, right)
}

/// Negated equality (`<>`)
pub fn ne(left: Expression, right: Expression) -> Predicate {
    compare(ComparisonKind::Eq, left, right).not()
}

pub fn gt(left: Expression, right: Expression) -> Predicate {
    compare(ComparisonKind::Gt, left, right)
}

pub fn ge(left: Expression, right: Expression) -> Predicate {
    compare(ComparisonKind::Ge, left, right)
}

pub fn lt(left: Expression, right: Expression) -> Predicate {
    compare(ComparisonKind::Lt, left, right)
}

pub fn le(left: Expression, right: Expression) -> Predicate {
    compare(ComparisonKind::Le, left, right)
}

pub fn and(children: Vec<Predicate>) -> Predicate {
    Predicate::Multinary(MultinaryPredicate::new(CompoundOperator::And, children))
}

pub fn or(children: Vec<Predicate>) -> Predicate {
    Predicate::Multinary(MultinaryPredicate::new(CompoundOperator::Or, children))
}

pub fn like(left: Expression, pattern: Expression, escape: Option<char>) -> Predicate {
    Predicate::Like(LikePredicate {
        left,
        right: pattern,
        case_sensitive: true,
        escape,
        negated: false,
    })
}

/// Case-insensitive LIKE
pub fn ilike(left: Expression, pattern: Expression) -> Predicate {
    Predicate::Like(LikePredicate {
        left,
        right: pattern,
        case_sensitive: false,
        escape: None,
        negated: false,
    })
}

pub fn between(left: Expression, start: Expression, end: Expression) -> Predicate {
    Predicate::Between(BetweenPredicate {
        left,
        start,
        end,
        negated: false,
    })
}

pub fn in_list(left: Expression, right: Vec<Expression>) -> Predicate {
    Predicate::In(InPredicate {
        left,
        right,
        negated: false,
    })
}

pub fn is_null(expression: Expression) -> Predicate {
    Predicate::IsNull(IsNullPredicate {
        expression,
        negated: false,
    })
}

pub fn is_empty(expression: Expression) -> Predicate {
    Predicate::IsEmpty(IsEmptyPredicate {
        expression,
        negated: false,
    })
}

pub fn member_of(left: Expression, collection: Expression) -> Predicate {
    Predicate::MemberOf(MemberOfPredicate {
        left,
        right: collection,
        negated: false,
    })
}

pub fn exists(query: &str) -> Predicate {
    Predicate::Exists(ExistsPredicate {
        expression: subquery(query),
        negated: false,
    })
}

pub fn boolean(value: bool) -> Predicate {
    Predicate::Boolean(BooleanLiteral::new(value))
}
