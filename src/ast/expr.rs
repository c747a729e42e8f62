use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ast::{
    ArithmeticOperator, BooleanLiteral, Literal, ParameterValue, Predicate, QualifiedKind,
};
use crate::error::{CriteriaError, CriteriaResult};
use crate::util::accessor::AttributeAccessor;
use crate::visit::{ResultVisitor, Visitor};

/// A scalar or boolean expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    /// Dotted attribute path (`e.address.city`)
    Path(PathExpression),
    /// `:name` or `?1`
    Parameter(ParameterExpression),
    Null,
    Literal(Literal),
    Function(FunctionExpression),
    Arithmetic(ArithmeticExpression),
    /// Unary sign applied to an expression
    Factor(ArithmeticFactor),
    Subquery(SubqueryExpression),
    Case(CaseExpression),
    /// `KEY(path)`, `VALUE(path)`, `ENTRY(path)`, `INDEX(path)`
    Qualified(QualifiedPath),
    /// A predicate in expression position, e.g. a CASE WHEN condition
    Predicate(Box<Predicate>),
}

impl Expression {
    pub fn path(dotted: &str) -> Self {
        Expression::Path(PathExpression::from_dotted(dotted))
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Expression::Parameter(ParameterExpression::named(name))
    }

    /// Constant expression. Booleans become [`BooleanLiteral`] predicates
    /// and negative numbers a unary minus over the magnitude, which is
    /// how the parser reads them back.
    pub fn literal(value: impl Into<Expression>) -> Self {
        value.into()
    }

    pub fn subquery(query: impl Into<String>) -> Self {
        Expression::Subquery(SubqueryExpression { query: query.into() })
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function(FunctionExpression::new(name, args))
    }

    pub fn arithmetic(left: Expression, op: ArithmeticOperator, right: Expression) -> Self {
        Expression::Arithmetic(ArithmeticExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// Unary minus
    pub fn negative(expression: Expression) -> Self {
        Expression::Factor(ArithmeticFactor {
            expression: Box::new(expression),
            invert_signum: true,
        })
    }

    pub fn is_subquery(&self) -> bool {
        matches!(self, Expression::Subquery(_))
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_expression(self);
    }

    pub fn accept_result<T, V: ResultVisitor<T> + ?Sized>(&self, visitor: &mut V) -> T {
        visitor.visit_expression(self)
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Numeric(text) if text.starts_with('-') => {
                Expression::negative(Expression::Literal(Literal::Numeric(text[1..].to_string())))
            }
            other => Expression::Literal(other),
        }
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Predicate(Box::new(Predicate::Boolean(BooleanLiteral::new(value))))
    }
}

macro_rules! impl_from_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expression {
                fn from(value: $ty) -> Self {
                    Expression::from(Literal::from(value))
                }
            }
        )*
    };
}

impl_from_literal!(&str, String, i32, i64, f64, NaiveDate, NaiveTime, NaiveDateTime);

impl From<PathExpression> for Expression {
    fn from(path: PathExpression) -> Self {
        Expression::Path(path)
    }
}

impl From<ParameterExpression> for Expression {
    fn from(parameter: ParameterExpression) -> Self {
        Expression::Parameter(parameter)
    }
}

impl From<Predicate> for Expression {
    fn from(predicate: Predicate) -> Self {
        Expression::Predicate(Box::new(predicate))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathElement {
    Property(String),
    /// Indexed access `name[index]`
    Array { name: String, index: Box<Expression> },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PathExpression {
    pub elements: Vec<PathElement>,
}

impl PathExpression {
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// Splits on `.`; every segment becomes a property.
    pub fn from_dotted(dotted: &str) -> Self {
        Self {
            elements: dotted
                .split('.')
                .map(|segment| PathElement::Property(segment.to_string()))
                .collect(),
        }
    }

    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Accessor resolving this path against a JSON object graph.
    ///
    /// Only plain property paths are supported.
    pub fn attribute_accessor(&self) -> CriteriaResult<AttributeAccessor> {
        let mut segments = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            match element {
                PathElement::Property(name) => segments.push(name.clone()),
                PathElement::Array { name, .. } => {
                    return Err(CriteriaError::unsupported_path(
                        self.to_dotted(),
                        format!("indexed element '{}' cannot be resolved by an attribute accessor", name),
                    ));
                }
            }
        }
        AttributeAccessor::from_segments(segments)
    }

    /// Path text without index expressions (`a.b.c`)
    pub fn to_dotted(&self) -> String {
        self.elements
            .iter()
            .map(|element| match element {
                PathElement::Property(name) | PathElement::Array { name, .. } => name.as_str(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ParameterExpression {
    /// Digit-leading names are positional
    pub name: Option<String>,
    pub value: Option<ParameterValue>,
    pub collection_valued: bool,
}

impl ParameterExpression {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: None,
            collection_valued: false,
        }
    }

    pub fn with_value(mut self, value: ParameterValue) -> Self {
        self.collection_valued = matches!(value, ParameterValue::Collection(_));
        self.value = Some(value);
        self
    }

    pub fn collection_valued(mut self) -> Self {
        self.collection_valued = true;
        self
    }

    pub fn is_positional(&self) -> bool {
        self.name
            .as_deref()
            .and_then(|name| name.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
    }
}

/// Functions written without an argument list.
pub const NO_PARENTHESIS_FUNCTIONS: &[&str] = &["CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP"];

pub const AGGREGATE_FUNCTIONS: &[&str] = &["COUNT", "SUM", "AVG", "MIN", "MAX"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionExpression {
    pub name: String,
    pub args: Vec<Expression>,
    pub aggregate: bool,
    pub distinct: bool,
}

impl FunctionExpression {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
            aggregate: false,
            distinct: false,
        }
    }

    pub fn aggregate(name: impl Into<String>, args: Vec<Expression>, distinct: bool) -> Self {
        Self {
            name: name.into(),
            args,
            aggregate: true,
            distinct,
        }
    }

    pub fn omits_parentheses(&self) -> bool {
        NO_PARENTHESIS_FUNCTIONS
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&self.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArithmeticExpression {
    pub left: Box<Expression>,
    pub op: ArithmeticOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArithmeticFactor {
    pub expression: Box<Expression>,
    pub invert_signum: bool,
}

/// Subquery text kept verbatim, without the enclosing parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubqueryExpression {
    pub query: String,
}

/// Simple (`CASE operand WHEN value ...`) or general (`CASE WHEN condition ...`) case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseExpression {
    pub operand: Option<Box<Expression>>,
    pub when_clauses: Vec<WhenClause>,
    pub default: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhenClause {
    pub condition: Expression,
    pub result: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedPath {
    pub kind: QualifiedKind,
    pub path: PathExpression,
}
