//! Boolean predicate tree.
//!
//! Every node owns its children, so `clone()` yields an independent deep
//! copy and equality/hashing are structural.

use serde::{Deserialize, Serialize};

use crate::ast::{CompoundOperator, ComparisonKind, Expression, PredicateQuantifier};
use crate::visit::optimizer::ExpressionOptimizer;
use crate::visit::{ResultVisitor, Visitor};

/// Negation capability shared by every negatable predicate node.
pub trait Negatable {
    fn is_negated(&self) -> bool;

    fn set_negated(&mut self, negated: bool);

    /// Toggle the negation flag.
    fn negate(&mut self) {
        let negated = self.is_negated();
        self.set_negated(!negated);
    }
}

macro_rules! impl_negatable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Negatable for $ty {
                fn is_negated(&self) -> bool {
                    self.negated
                }

                fn set_negated(&mut self, negated: bool) {
                    self.negated = negated;
                }
            }
        )*
    };
}

impl_negatable!(
    MultinaryPredicate,
    CompoundPredicate,
    ComparisonPredicate,
    BetweenPredicate,
    LikePredicate,
    InPredicate,
    IsNullPredicate,
    IsEmptyPredicate,
    MemberOfPredicate,
    BooleanLiteral,
    ExistsPredicate,
);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// N-ary AND/OR, the primary compound form
    Multinary(MultinaryPredicate),
    /// Two-operand AND/OR
    Compound(CompoundPredicate),
    /// `NOT <expression>` for expressions that carry no negation flag
    Not(NotPredicate),
    Comparison(ComparisonPredicate),
    Between(BetweenPredicate),
    Like(LikePredicate),
    In(InPredicate),
    IsNull(IsNullPredicate),
    IsEmpty(IsEmptyPredicate),
    MemberOf(MemberOfPredicate),
    Boolean(BooleanLiteral),
    Exists(ExistsPredicate),
}

impl Predicate {
    pub fn as_negatable(&self) -> Option<&dyn Negatable> {
        match self {
            Predicate::Multinary(p) => Some(p),
            Predicate::Compound(p) => Some(p),
            Predicate::Not(_) => None,
            Predicate::Comparison(p) => Some(p),
            Predicate::Between(p) => Some(p),
            Predicate::Like(p) => Some(p),
            Predicate::In(p) => Some(p),
            Predicate::IsNull(p) => Some(p),
            Predicate::IsEmpty(p) => Some(p),
            Predicate::MemberOf(p) => Some(p),
            Predicate::Boolean(p) => Some(p),
            Predicate::Exists(p) => Some(p),
        }
    }

    pub fn as_negatable_mut(&mut self) -> Option<&mut dyn Negatable> {
        match self {
            Predicate::Multinary(p) => Some(p),
            Predicate::Compound(p) => Some(p),
            Predicate::Not(_) => None,
            Predicate::Comparison(p) => Some(p),
            Predicate::Between(p) => Some(p),
            Predicate::Like(p) => Some(p),
            Predicate::In(p) => Some(p),
            Predicate::IsNull(p) => Some(p),
            Predicate::IsEmpty(p) => Some(p),
            Predicate::MemberOf(p) => Some(p),
            Predicate::Boolean(p) => Some(p),
            Predicate::Exists(p) => Some(p),
        }
    }

    /// A `NOT` wrapper reports `false`; its negation is structural.
    pub fn is_negated(&self) -> bool {
        self.as_negatable().is_some_and(|p| p.is_negated())
    }

    /// Logically negate the predicate in place.
    ///
    /// Negatable nodes toggle their flag. A `NOT` wrapper around a
    /// predicate is unwrapped; around any other expression it gets wrapped
    /// once more.
    pub fn negate(&mut self) {
        if let Some(negatable) = self.as_negatable_mut() {
            negatable.negate();
            return;
        }

        let taken = std::mem::replace(self, Predicate::Boolean(BooleanLiteral::new(true)));
        *self = match taken {
            Predicate::Not(not) => match *not.expression {
                Expression::Predicate(inner) => *inner,
                other => Predicate::Not(NotPredicate::new(Expression::Predicate(Box::new(
                    Predicate::Not(NotPredicate::new(other)),
                )))),
            },
            other => other,
        };
    }

    /// Consuming variant of [`Predicate::negate`]
    pub fn not(mut self) -> Self {
        self.negate();
        self
    }

    /// Operator of a multinary or compound node.
    pub fn compound_operator(&self) -> Option<CompoundOperator> {
        match self {
            Predicate::Multinary(p) => Some(p.operator),
            Predicate::Compound(p) => Some(p.operator),
            _ => None,
        }
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_predicate(self);
    }

    pub fn accept_result<T, V: ResultVisitor<T> + ?Sized>(&self, visitor: &mut V) -> T {
        visitor.visit_predicate(self)
    }

    /// Simplified copy of this predicate, see [`ExpressionOptimizer`].
    pub fn optimize(&self) -> Predicate {
        ExpressionOptimizer.optimize_predicate(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultinaryPredicate {
    pub operator: CompoundOperator,
    pub children: Vec<Predicate>,
    pub negated: bool,
}

impl MultinaryPredicate {
    pub fn new(operator: CompoundOperator, children: Vec<Predicate>) -> Self {
        Self {
            operator,
            children,
            negated: false,
        }
    }

    pub fn push(&mut self, child: Predicate) {
        self.children.push(child);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundPredicate {
    pub operator: CompoundOperator,
    pub left: Box<Predicate>,
    pub right: Box<Predicate>,
    pub negated: bool,
}

impl CompoundPredicate {
    pub fn new(operator: CompoundOperator, left: Predicate, right: Predicate) -> Self {
        Self {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            negated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotPredicate {
    pub expression: Box<Expression>,
}

impl NotPredicate {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression: Box::new(expression),
        }
    }
}

/// `left <kind> [quantifier] right`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComparisonPredicate {
    pub kind: ComparisonKind,
    pub left: Expression,
    pub right: Expression,
    pub quantifier: PredicateQuantifier,
    pub negated: bool,
}

impl ComparisonPredicate {
    pub fn new(kind: ComparisonKind, left: Expression, right: Expression) -> Self {
        Self {
            kind,
            left,
            right,
            quantifier: PredicateQuantifier::One,
            negated: false,
        }
    }

    pub fn quantified(mut self, quantifier: PredicateQuantifier) -> Self {
        self.quantifier = quantifier;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetweenPredicate {
    pub left: Expression,
    pub start: Expression,
    pub end: Expression,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LikePredicate {
    pub left: Expression,
    pub right: Expression,
    pub case_sensitive: bool,
    pub escape: Option<char>,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InPredicate {
    pub left: Expression,
    pub right: Vec<Expression>,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsNullPredicate {
    pub expression: Expression,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsEmptyPredicate {
    pub expression: Expression,
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberOfPredicate {
    pub left: Expression,
    pub right: Expression,
    pub negated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub negated: bool,
}

impl BooleanLiteral {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            negated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExistsPredicate {
    pub expression: Expression,
    pub negated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;

    #[test]
    fn test_negate_twice_restores() {
        let original = eq(path("e.age"), number(30));
        let mut p = original.clone();
        p.negate();
        assert!(p.is_negated());
        assert_ne!(p, original);
        p.negate();
        assert_eq!(p, original);
    }

    #[test]
    fn test_between_is_negatable() {
        let mut p = between(path("e.age"), number(1), number(9));
        assert!(!p.is_negated());
        p.negate();
        assert!(p.is_negated());
        if let Predicate::Between(b) = &p {
            assert!(b.negated);
        } else {
            panic!("Expected between predicate");
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = and(vec![eq(path("a"), number(1)), eq(path("b"), number(2))]);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        if let Predicate::Multinary(m) = &mut copy {
            m.children[0].negate();
            m.push(is_null(path("c")));
        }
        assert_ne!(copy, original);
        if let Predicate::Multinary(m) = &original {
            assert_eq!(m.children.len(), 2);
            assert!(!m.children[0].is_negated());
        }
    }

    #[test]
    fn test_not_wrapper_negation() {
        let wrapped = Predicate::Not(NotPredicate::new(Expression::from(eq(path("a"), number(1)))));
        assert!(!wrapped.is_negated());
        assert_eq!(wrapped.not(), eq(path("a"), number(1)));

        let bare = Predicate::Not(NotPredicate::new(path("e.active")));
        let twice = bare.clone().not();
        match twice {
            Predicate::Not(outer) => match *outer.expression {
                Expression::Predicate(inner) => assert_eq!(*inner, bare),
                other => panic!("Expected predicate expression, got {:?}", other),
            },
            other => panic!("Expected not predicate, got {:?}", other),
        }
    }

    #[test]
    fn test_quantifier_takes_part_in_equality() {
        let plain = ComparisonPredicate::new(ComparisonKind::Eq, path("a"), subquery("select 1"));
        let all = plain.clone().quantified(PredicateQuantifier::All);
        assert_ne!(plain, all);
    }

    #[test]
    fn test_like_escape_equality() {
        let a = like(path("name"), string("a!%"), Some('!'));
        let b = like(path("name"), string("a!%"), Some('!'));
        let c = like(path("name"), string("a!%"), None);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
