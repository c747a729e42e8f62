//! Operator binding priority.

use std::cmp::Ordering;

use crate::ast::{ArithmeticOperator, CompoundOperator};

/// An operator with a binding priority; lower values bind tighter.
pub trait Prioritized {
    fn priority(&self) -> Option<u8>;
}

impl Prioritized for ArithmeticOperator {
    fn priority(&self) -> Option<u8> {
        match self {
            ArithmeticOperator::Mul | ArithmeticOperator::Div => Some(1),
            ArithmeticOperator::Add | ArithmeticOperator::Sub => Some(2),
        }
    }
}

impl Prioritized for CompoundOperator {
    fn priority(&self) -> Option<u8> {
        match self {
            CompoundOperator::And => Some(3),
            CompoundOperator::Or => Some(4),
        }
    }
}

impl<T: Prioritized> Prioritized for Option<T> {
    fn priority(&self) -> Option<u8> {
        self.as_ref().and_then(Prioritized::priority)
    }
}

/// Orders by priority; items without one sort last.
pub fn compare_priority<A: Prioritized + ?Sized, B: Prioritized + ?Sized>(a: &A, b: &B) -> Ordering {
    match (a.priority(), b.priority()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `inner` binds looser than `outer` and needs parentheses beneath it.
pub fn binds_looser<A: Prioritized + ?Sized, B: Prioritized + ?Sized>(inner: &A, outer: &B) -> bool {
    compare_priority(inner, outer) == Ordering::Greater
}
