//! Traversal over predicate and expression trees.
//!
//! [`Visitor`] is the side-effecting form. Every method defaults to the
//! matching `walk_*` function, which recurses into the children of
//! structural nodes and into array index expressions of paths. Leaf methods
//! (parameters, literals, subqueries, `EXISTS`, boolean literals) do nothing. Implementors override only the
//! node kinds they care about and call the `walk_*` function to keep
//! descending.
//!
//! [`ResultVisitor`] folds a tree into a value.

pub mod collect;
pub mod optimizer;

pub use collect::PathCollector;
pub use optimizer::ExpressionOptimizer;

use crate::ast::*;

pub trait Visitor {
    fn visit_predicate(&mut self, predicate: &Predicate) {
        walk_predicate(self, predicate);
    }

    fn visit_multinary(&mut self, predicate: &MultinaryPredicate) {
        walk_multinary(self, predicate);
    }

    fn visit_compound(&mut self, predicate: &CompoundPredicate) {
        walk_compound(self, predicate);
    }

    fn visit_not(&mut self, predicate: &NotPredicate) {
        self.visit_expression(&predicate.expression);
    }

    fn visit_comparison(&mut self, predicate: &ComparisonPredicate) {
        self.visit_expression(&predicate.left);
        self.visit_expression(&predicate.right);
    }

    fn visit_between(&mut self, predicate: &BetweenPredicate) {
        self.visit_expression(&predicate.left);
        self.visit_expression(&predicate.start);
        self.visit_expression(&predicate.end);
    }

    fn visit_like(&mut self, predicate: &LikePredicate) {
        self.visit_expression(&predicate.left);
        self.visit_expression(&predicate.right);
    }

    fn visit_in(&mut self, predicate: &InPredicate) {
        self.visit_expression(&predicate.left);
        for expression in &predicate.right {
            self.visit_expression(expression);
        }
    }

    fn visit_is_null(&mut self, predicate: &IsNullPredicate) {
        self.visit_expression(&predicate.expression);
    }

    fn visit_is_empty(&mut self, predicate: &IsEmptyPredicate) {
        self.visit_expression(&predicate.expression);
    }

    fn visit_member_of(&mut self, predicate: &MemberOfPredicate) {
        self.visit_expression(&predicate.left);
        self.visit_expression(&predicate.right);
    }

    fn visit_boolean(&mut self, _literal: &BooleanLiteral) {}

    fn visit_exists(&mut self, _predicate: &ExistsPredicate) {}

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    fn visit_path(&mut self, path: &PathExpression) {
        walk_path(self, path);
    }

    fn visit_parameter(&mut self, _parameter: &ParameterExpression) {}

    fn visit_null(&mut self) {}

    fn visit_literal(&mut self, _literal: &Literal) {}

    fn visit_function(&mut self, function: &FunctionExpression) {
        for arg in &function.args {
            self.visit_expression(arg);
        }
    }

    fn visit_arithmetic(&mut self, expression: &ArithmeticExpression) {
        self.visit_expression(&expression.left);
        self.visit_expression(&expression.right);
    }

    fn visit_factor(&mut self, factor: &ArithmeticFactor) {
        self.visit_expression(&factor.expression);
    }

    fn visit_subquery(&mut self, _subquery: &SubqueryExpression) {}

    fn visit_case(&mut self, expression: &CaseExpression) {
        walk_case(self, expression);
    }

    fn visit_qualified(&mut self, qualified: &QualifiedPath) {
        self.visit_path(&qualified.path);
    }
}

pub fn walk_predicate<V: Visitor + ?Sized>(visitor: &mut V, predicate: &Predicate) {
    match predicate {
        Predicate::Multinary(p) => visitor.visit_multinary(p),
        Predicate::Compound(p) => visitor.visit_compound(p),
        Predicate::Not(p) => visitor.visit_not(p),
        Predicate::Comparison(p) => visitor.visit_comparison(p),
        Predicate::Between(p) => visitor.visit_between(p),
        Predicate::Like(p) => visitor.visit_like(p),
        Predicate::In(p) => visitor.visit_in(p),
        Predicate::IsNull(p) => visitor.visit_is_null(p),
        Predicate::IsEmpty(p) => visitor.visit_is_empty(p),
        Predicate::MemberOf(p) => visitor.visit_member_of(p),
        Predicate::Boolean(p) => visitor.visit_boolean(p),
        Predicate::Exists(p) => visitor.visit_exists(p),
    }
}

pub fn walk_multinary<V: Visitor + ?Sized>(visitor: &mut V, predicate: &MultinaryPredicate) {
    for child in &predicate.children {
        visitor.visit_predicate(child);
    }
}

pub fn walk_compound<V: Visitor + ?Sized>(visitor: &mut V, predicate: &CompoundPredicate) {
    visitor.visit_predicate(&predicate.left);
    visitor.visit_predicate(&predicate.right);
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, expression: &Expression) {
    match expression {
        Expression::Path(path) => visitor.visit_path(path),
        Expression::Parameter(parameter) => visitor.visit_parameter(parameter),
        Expression::Null => visitor.visit_null(),
        Expression::Literal(literal) => visitor.visit_literal(literal),
        Expression::Function(function) => visitor.visit_function(function),
        Expression::Arithmetic(arithmetic) => visitor.visit_arithmetic(arithmetic),
        Expression::Factor(factor) => visitor.visit_factor(factor),
        Expression::Subquery(subquery) => visitor.visit_subquery(subquery),
        Expression::Case(case) => visitor.visit_case(case),
        Expression::Qualified(qualified) => visitor.visit_qualified(qualified),
        Expression::Predicate(predicate) => visitor.visit_predicate(predicate),
    }
}

/// Visits the index expressions of `name[index]` elements.
pub fn walk_path<V: Visitor + ?Sized>(visitor: &mut V, path: &PathExpression) {
    for element in &path.elements {
        if let PathElement::Array { index, .. } = element {
            visitor.visit_expression(index);
        }
    }
}

pub fn walk_case<V: Visitor + ?Sized>(visitor: &mut V, expression: &CaseExpression) {
    if let Some(operand) = &expression.operand {
        visitor.visit_expression(operand);
    }
    for clause in &expression.when_clauses {
        visitor.visit_expression(&clause.condition);
        visitor.visit_expression(&clause.result);
    }
    if let Some(default) = &expression.default {
        visitor.visit_expression(default);
    }
}

/// Value-producing traversal.
pub trait ResultVisitor<T> {
    fn visit_predicate(&mut self, predicate: &Predicate) -> T;

    fn visit_expression(&mut self, expression: &Expression) -> T;
}
