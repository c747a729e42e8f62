use serde::{Deserialize, Serialize};

/// Logical operator of a compound predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CompoundOperator {
    #[default]
    And,
    Or,
}

impl CompoundOperator {
    /// De Morgan dual
    pub fn invert(self) -> Self {
        match self {
            CompoundOperator::And => CompoundOperator::Or,
            CompoundOperator::Or => CompoundOperator::And,
        }
    }
}

impl std::fmt::Display for CompoundOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompoundOperator::And => write!(f, "AND"),
            CompoundOperator::Or => write!(f, "OR"),
        }
    }
}

/// Operator of a quantifiable comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonKind {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl ComparisonKind {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonKind::Eq => "=",
            ComparisonKind::Gt => ">",
            ComparisonKind::Ge => ">=",
            ComparisonKind::Lt => "<",
            ComparisonKind::Le => "<=",
        }
    }
}

impl std::fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Quantifier applied to the right operand of a comparison (`a = ALL (...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PredicateQuantifier {
    /// No quantifier
    #[default]
    One,
    Any,
    All,
}

impl std::fmt::Display for PredicateQuantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredicateQuantifier::One => Ok(()),
            PredicateQuantifier::Any => write!(f, "ANY"),
            PredicateQuantifier::All => write!(f, "ALL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
        }
    }

    pub fn is_add_or_subtract(self) -> bool {
        matches!(self, ArithmeticOperator::Add | ArithmeticOperator::Sub)
    }
}

impl std::fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Collection qualifier applied to a path: `KEY(m)`, `VALUE(m)`, `ENTRY(m)`, `INDEX(l)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualifiedKind {
    Key,
    Value,
    Entry,
    Index,
}

impl std::fmt::Display for QualifiedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualifiedKind::Key => write!(f, "KEY"),
            QualifiedKind::Value => write!(f, "VALUE"),
            QualifiedKind::Entry => write!(f, "ENTRY"),
            QualifiedKind::Index => write!(f, "INDEX"),
        }
    }
}
