//! Structural simplification of predicate and expression trees.

use crate::ast::*;
use crate::visit::ResultVisitor;

/// Produces simplified copies of trees:
///
/// - an AND/OR with one child becomes that child, carrying the negation
/// - a negated AND/OR is rewritten with De Morgan's laws
/// - children with the same operator as their parent are flattened into it
/// - `NOT <predicate>` becomes the negated predicate
/// - `-(-x)` becomes `x`, and an unsigned factor around a number is dropped
///
/// Two-operand compound nodes come out in the multinary form.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionOptimizer;

impl ExpressionOptimizer {
    pub fn optimize_predicate(&mut self, predicate: &Predicate) -> Predicate {
        match predicate {
            Predicate::Multinary(p) => {
                let children: Vec<&Predicate> = p.children.iter().collect();
                self.optimize_compound(p.operator, &children, p.negated)
            }
            Predicate::Compound(p) => {
                self.optimize_compound(p.operator, &[p.left.as_ref(), p.right.as_ref()], p.negated)
            }
            Predicate::Not(p) => match p.expression.as_ref() {
                Expression::Predicate(inner) if !matches!(inner.as_ref(), Predicate::Not(_)) => {
                    let negated = inner.as_ref().clone().not();
                    self.optimize_predicate(&negated)
                }
                other => Predicate::Not(NotPredicate::new(self.optimize_expression(other))),
            },
            Predicate::Comparison(p) => Predicate::Comparison(ComparisonPredicate {
                left: self.optimize_expression(&p.left),
                right: self.optimize_expression(&p.right),
                ..p.clone()
            }),
            Predicate::Between(p) => Predicate::Between(BetweenPredicate {
                left: self.optimize_expression(&p.left),
                start: self.optimize_expression(&p.start),
                end: self.optimize_expression(&p.end),
                negated: p.negated,
            }),
            Predicate::Like(p) => Predicate::Like(LikePredicate {
                left: self.optimize_expression(&p.left),
                right: self.optimize_expression(&p.right),
                ..p.clone()
            }),
            Predicate::In(p) => Predicate::In(InPredicate {
                left: self.optimize_expression(&p.left),
                right: p.right.iter().map(|e| self.optimize_expression(e)).collect(),
                negated: p.negated,
            }),
            Predicate::IsNull(p) => Predicate::IsNull(IsNullPredicate {
                expression: self.optimize_expression(&p.expression),
                negated: p.negated,
            }),
            Predicate::IsEmpty(p) => Predicate::IsEmpty(IsEmptyPredicate {
                expression: self.optimize_expression(&p.expression),
                negated: p.negated,
            }),
            Predicate::MemberOf(p) => Predicate::MemberOf(MemberOfPredicate {
                left: self.optimize_expression(&p.left),
                right: self.optimize_expression(&p.right),
                negated: p.negated,
            }),
            Predicate::Exists(p) => Predicate::Exists(ExistsPredicate {
                expression: self.optimize_expression(&p.expression),
                negated: p.negated,
            }),
            Predicate::Boolean(p) => Predicate::Boolean(*p),
        }
    }

    fn optimize_compound(
        &mut self,
        operator: CompoundOperator,
        children: &[&Predicate],
        negated: bool,
    ) -> Predicate {
        if let [only] = children {
            let child = if negated { (*only).clone().not() } else { (*only).clone() };
            return self.optimize_predicate(&child);
        }

        let operator = if negated { operator.invert() } else { operator };
        let mut flattened = Vec::with_capacity(children.len());
        for child in children {
            let child = if negated { (*child).clone().not() } else { (*child).clone() };
            let optimized = self.optimize_predicate(&child);
            if optimized.is_negated() || optimized.compound_operator() != Some(operator) {
                flattened.push(optimized);
                continue;
            }
            match optimized {
                Predicate::Multinary(nested) => flattened.extend(nested.children),
                Predicate::Compound(nested) => {
                    flattened.push(*nested.left);
                    flattened.push(*nested.right);
                }
                other => flattened.push(other),
            }
        }

        Predicate::Multinary(MultinaryPredicate::new(operator, flattened))
    }

    pub fn optimize_expression(&mut self, expression: &Expression) -> Expression {
        match expression {
            Expression::Factor(factor) => self.optimize_factor(factor),
            Expression::Path(path) => Expression::Path(self.optimize_path(path)),
            Expression::Function(function) => Expression::Function(FunctionExpression {
                args: function.args.iter().map(|arg| self.optimize_expression(arg)).collect(),
                ..function.clone()
            }),
            Expression::Arithmetic(arithmetic) => Expression::Arithmetic(ArithmeticExpression {
                left: Box::new(self.optimize_expression(&arithmetic.left)),
                op: arithmetic.op,
                right: Box::new(self.optimize_expression(&arithmetic.right)),
            }),
            Expression::Case(case) => Expression::Case(CaseExpression {
                operand: case
                    .operand
                    .as_ref()
                    .map(|operand| Box::new(self.optimize_expression(operand))),
                when_clauses: case
                    .when_clauses
                    .iter()
                    .map(|clause| WhenClause {
                        condition: self.optimize_expression(&clause.condition),
                        result: self.optimize_expression(&clause.result),
                    })
                    .collect(),
                default: case
                    .default
                    .as_ref()
                    .map(|default| Box::new(self.optimize_expression(default))),
            }),
            Expression::Predicate(predicate) => {
                Expression::Predicate(Box::new(self.optimize_predicate(predicate)))
            }
            Expression::Parameter(_)
            | Expression::Null
            | Expression::Literal(_)
            | Expression::Subquery(_)
            | Expression::Qualified(_) => expression.clone(),
        }
    }

    fn optimize_factor(&mut self, factor: &ArithmeticFactor) -> Expression {
        match factor.expression.as_ref() {
            Expression::Factor(inner) => {
                let collapsed = ArithmeticFactor {
                    expression: inner.expression.clone(),
                    invert_signum: factor.invert_signum != inner.invert_signum,
                };
                self.optimize_factor(&collapsed)
            }
            Expression::Literal(literal) if literal.is_numeric() && !factor.invert_signum => {
                Expression::Literal(literal.clone())
            }
            inner => Expression::Factor(ArithmeticFactor {
                expression: Box::new(self.optimize_expression(inner)),
                invert_signum: factor.invert_signum,
            }),
        }
    }

    fn optimize_path(&mut self, path: &PathExpression) -> PathExpression {
        PathExpression::new(
            path.elements
                .iter()
                .map(|element| match element {
                    PathElement::Property(name) => PathElement::Property(name.clone()),
                    PathElement::Array { name, index } => PathElement::Array {
                        name: name.clone(),
                        index: Box::new(self.optimize_expression(index)),
                    },
                })
                .collect(),
        )
    }
}

impl ResultVisitor<Expression> for ExpressionOptimizer {
    fn visit_predicate(&mut self, predicate: &Predicate) -> Expression {
        Expression::Predicate(Box::new(self.optimize_predicate(predicate)))
    }

    fn visit_expression(&mut self, expression: &Expression) -> Expression {
        self.optimize_expression(expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_child_collapses_with_negation() {
        let mut wrapper = and(vec![eq(path("a"), number(1))]);
        wrapper.negate();
        assert_eq!(wrapper.optimize(), ne(path("a"), number(1)));
    }

    #[test]
    fn test_de_morgan() {
        let mut p = and(vec![eq(path("a"), number(1)), gt(path("b"), number(2))]);
        p.negate();
        let expected = or(vec![ne(path("a"), number(1)), gt(path("b"), number(2)).not()]);
        assert_eq!(p.optimize(), expected);
    }

    #[test]
    fn test_flattens_same_operator() {
        let p = and(vec![
            eq(path("a"), number(1)),
            and(vec![eq(path("b"), number(2)), eq(path("c"), number(3))]),
            or(vec![eq(path("d"), number(4)), eq(path("e"), number(5))]),
        ]);
        let expected = and(vec![
            eq(path("a"), number(1)),
            eq(path("b"), number(2)),
            eq(path("c"), number(3)),
            or(vec![eq(path("d"), number(4)), eq(path("e"), number(5))]),
        ]);
        assert_eq!(p.optimize(), expected);
    }

    #[test]
    fn test_compound_becomes_multinary() {
        let p = Predicate::Compound(CompoundPredicate::new(
            CompoundOperator::Or,
            is_null(path("a")),
            is_null(path("b")),
        ));
        assert_eq!(p.optimize(), or(vec![is_null(path("a")), is_null(path("b"))]));
    }

    #[test]
    fn test_not_of_predicate_is_negated_predicate() {
        let p = Predicate::Not(NotPredicate::new(Expression::from(like(
            path("name"),
            string("A%"),
            None,
        ))));
        assert_eq!(p.optimize(), like(path("name"), string("A%"), None).not());

        let bare = Predicate::Not(NotPredicate::new(path("e.active")));
        assert_eq!(bare.optimize(), bare);
    }

    #[test]
    fn test_factor_simplification() {
        let mut optimizer = ExpressionOptimizer;
        let double = Expression::negative(Expression::negative(path("x")));
        let optimized = optimizer.optimize_expression(&double);
        assert_eq!(
            optimized,
            Expression::Factor(ArithmeticFactor {
                expression: Box::new(path("x")),
                invert_signum: false,
            })
        );

        let double_number = Expression::negative(Expression::negative(number(5)));
        assert_eq!(optimizer.optimize_expression(&double_number), number(5));

        let single = Expression::negative(number(5));
        assert_eq!(optimizer.optimize_expression(&single), single);
    }

    #[test]
    fn test_result_visitor_dispatch() {
        let mut optimizer = ExpressionOptimizer;
        let p = or(vec![boolean(true)]);
        let result = p.accept_result(&mut optimizer);
        assert_eq!(result, Expression::from(boolean(true)));
    }
}
