//! Query text generation for predicate and expression trees.
//!
//! The output is the canonical form accepted by [`crate::parser`], so
//! generate → parse → generate is stable.

use std::fmt;

use crate::ast::*;
use crate::config::{GeneratorConfig, ParameterRenderingMode};
use crate::error::{CriteriaError, CriteriaResult};
use crate::util::literal::quote;
use crate::util::priority::binds_looser;
use crate::visit::Visitor;


/// Selects how boolean literals are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanLiteralRenderingContext {
    /// `TRUE` / `FALSE`
    #[default]
    Plain,
    /// Inside a conditional clause, uses the configured conditional text
    Predicate,
    /// As a CASE WHEN result, uses the configured boolean text
    CaseWhen,
}

pub struct QueryGenerator {
    buffer: String,
    config: GeneratorConfig,
    boolean_context: BooleanLiteralRenderingContext,
    parameter_mode: ParameterRenderingMode,
    error: Option<CriteriaError>,
}

impl Default for QueryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryGenerator {
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            buffer: String::new(),
            parameter_mode: config.parameter_rendering,
            config,
            boolean_context: BooleanLiteralRenderingContext::default(),
            error: None,
        }
    }

    /// Returns the previous context.
    pub fn set_boolean_literal_rendering_context(
        &mut self,
        context: BooleanLiteralRenderingContext,
    ) -> BooleanLiteralRenderingContext {
        std::mem::replace(&mut self.boolean_context, context)
    }

    /// Returns the previous mode.
    pub fn set_parameter_rendering_mode(&mut self, mode: ParameterRenderingMode) -> ParameterRenderingMode {
        std::mem::replace(&mut self.parameter_mode, mode)
    }

    pub fn generate_predicate(mut self, predicate: &Predicate) -> CriteriaResult<String> {
        predicate.accept(&mut self);
        self.finish()
    }

    pub fn generate_expression(mut self, expression: &Expression) -> CriteriaResult<String> {
        expression.accept(&mut self);
        self.finish()
    }

    /// Text rendered so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.error = None;
        self.boolean_context = BooleanLiteralRenderingContext::default();
        self.parameter_mode = self.config.parameter_rendering;
    }

    fn finish(self) -> CriteriaResult<String> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.buffer),
        }
    }

    fn fail(&mut self, err: CriteriaError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Renders with both rendering states replaced, restoring them afterwards.
    fn scoped(
        &mut self,
        context: BooleanLiteralRenderingContext,
        mode: ParameterRenderingMode,
        render: impl FnOnce(&mut Self),
    ) {
        let old_context = self.set_boolean_literal_rendering_context(context);
        let old_mode = self.set_parameter_rendering_mode(mode);
        render(self);
        self.set_boolean_literal_rendering_context(old_context);
        self.set_parameter_rendering_mode(old_mode);
    }

    fn placeholders(&mut self, render: impl FnOnce(&mut Self)) {
        self.scoped(self.boolean_context, ParameterRenderingMode::Placeholder, render);
    }

    fn wrapped_in(&mut self, function: Option<&str>, render: impl FnOnce(&mut Self)) {
        match function {
            Some(name) => {
                self.buffer.push_str(name);
                self.buffer.push('(');
                render(self);
                self.buffer.push(')');
            }
            None => render(self),
        }
    }

    fn parenthesized(&mut self, required: bool, expression: &Expression) {
        if required {
            self.buffer.push('(');
        }
        self.visit_expression(expression);
        if required {
            self.buffer.push(')');
        }
    }

    fn keyword(&mut self, negated: bool, keyword: &str) {
        self.buffer.push(' ');
        if negated {
            self.buffer.push_str("NOT ");
        }
        self.buffer.push_str(keyword);
        self.buffer.push(' ');
    }

    fn render_compound(&mut self, operator: CompoundOperator, children: &[&Predicate], negated: bool) {
        if children.is_empty() {
            return;
        }

        self.scoped(
            BooleanLiteralRenderingContext::Predicate,
            ParameterRenderingMode::Placeholder,
            |g| {
                let parenthesis_required = children.len() > 1;
                if negated {
                    g.buffer.push_str("NOT ");
                    if parenthesis_required {
                        g.buffer.push('(');
                    }
                }

                let separator = format!(" {} ", operator);
                let mut first = true;
                for child in children {
                    let mark = g.buffer.len();
                    if !first {
                        g.buffer.push_str(&separator);
                    }
                    let nested = child.compound_operator().is_some_and(|op| op != operator)
                        && !child.is_negated();
                    if nested {
                        g.buffer.push('(');
                    }
                    let content_start = g.buffer.len();
                    g.visit_predicate(child);
                    if g.buffer.len() == content_start {
                        // nothing rendered, drop separator and parenthesis again
                        g.buffer.truncate(mark);
                        continue;
                    }
                    if nested {
                        g.buffer.push(')');
                    }
                    first = false;
                }

                if negated && parenthesis_required {
                    g.buffer.push(')');
                }
            },
        );
    }

    fn render_in(&mut self, predicate: &InPredicate) {
        if let [single] = predicate.right.as_slice() {
            match single {
                Expression::Parameter(parameter)
                    if parameter.collection_valued
                        && parameter.value.as_ref().is_some_and(ParameterValue::is_empty_collection) =>
                {
                    // an empty IN list cannot be rendered, use its constant outcome
                    let text = match self.boolean_context {
                        BooleanLiteralRenderingContext::Predicate => self.config.conditional(predicate.negated),
                        _ => self.config.boolean(predicate.negated),
                    };
                    self.buffer.push_str(text);
                    return;
                }
                Expression::Path(_) => {
                    self.scoped(BooleanLiteralRenderingContext::Plain, self.parameter_mode, |g| {
                        g.visit_expression(&predicate.left);
                        g.buffer.push_str(if predicate.negated { " <> " } else { " = " });
                        g.visit_expression(single);
                    });
                    return;
                }
                _ => {}
            }
        }

        self.scoped(
            BooleanLiteralRenderingContext::Plain,
            ParameterRenderingMode::Placeholder,
            |g| {
                g.visit_expression(&predicate.left);
                g.keyword(predicate.negated, "IN");

                let parenthesis_required = match predicate.right.as_slice() {
                    [Expression::Parameter(parameter)] => !parameter.collection_valued,
                    [Expression::Subquery(_)] => false,
                    _ => true,
                };
                if parenthesis_required {
                    g.buffer.push('(');
                }
                for (i, expression) in predicate.right.iter().enumerate() {
                    if i > 0 {
                        g.buffer.push_str(", ");
                    }
                    g.visit_expression(expression);
                }
                if parenthesis_required {
                    g.buffer.push(')');
                }
            },
        );
    }

    fn render_case(&mut self, case: &CaseExpression) {
        self.buffer.push_str("CASE ");
        if let Some(operand) = &case.operand {
            self.placeholders(|g| g.visit_expression(operand));
            self.buffer.push(' ');
        }

        for clause in &case.when_clauses {
            self.buffer.push_str("WHEN ");
            self.scoped(
                BooleanLiteralRenderingContext::Predicate,
                ParameterRenderingMode::Placeholder,
                |g| g.visit_expression(&clause.condition),
            );
            self.buffer.push_str(" THEN ");
            self.scoped(BooleanLiteralRenderingContext::Plain, self.parameter_mode, |g| {
                g.visit_expression(&clause.result)
            });
            self.buffer.push(' ');
        }

        self.buffer.push_str("ELSE ");
        match &case.default {
            Some(default) => {
                self.scoped(BooleanLiteralRenderingContext::Plain, self.parameter_mode, |g| {
                    g.visit_expression(default)
                });
            }
            None => self.visit_null(),
        }
        self.buffer.push_str(" END");
    }
}

impl Visitor for QueryGenerator {
    fn visit_multinary(&mut self, predicate: &MultinaryPredicate) {
        let children: Vec<&Predicate> = predicate.children.iter().collect();
        self.render_compound(predicate.operator, &children, predicate.negated);
    }

    fn visit_compound(&mut self, predicate: &CompoundPredicate) {
        self.render_compound(
            predicate.operator,
            &[predicate.left.as_ref(), predicate.right.as_ref()],
            predicate.negated,
        );
    }

    fn visit_not(&mut self, predicate: &NotPredicate) {
        self.buffer.push_str("NOT ");
        let parenthesis_required = matches!(
            predicate.expression.as_ref(),
            Expression::Predicate(_) | Expression::Arithmetic(_)
        );
        self.parenthesized(parenthesis_required, &predicate.expression);
    }

    fn visit_comparison(&mut self, predicate: &ComparisonPredicate) {
        let is_eq = predicate.kind == ComparisonKind::Eq;
        if predicate.negated && !is_eq {
            self.buffer.push_str("NOT ");
        }

        self.scoped(
            BooleanLiteralRenderingContext::Plain,
            ParameterRenderingMode::Placeholder,
            |g| {
                g.visit_expression(&predicate.left);
                let symbol = if is_eq && predicate.negated { "<>" } else { predicate.kind.symbol() };
                g.buffer.push(' ');
                g.buffer.push_str(symbol);
                g.buffer.push(' ');
                if predicate.quantifier != PredicateQuantifier::One {
                    g.buffer.push_str(&predicate.quantifier.to_string());
                    g.buffer.push(' ');
                    g.parenthesized(!predicate.right.is_subquery(), &predicate.right);
                } else {
                    g.visit_expression(&predicate.right);
                }
            },
        );
    }

    fn visit_between(&mut self, predicate: &BetweenPredicate) {
        self.placeholders(|g| {
            g.visit_expression(&predicate.left);
            g.keyword(predicate.negated, "BETWEEN");
            g.visit_expression(&predicate.start);
            g.buffer.push_str(" AND ");
            g.visit_expression(&predicate.end);
        });
    }

    fn visit_like(&mut self, predicate: &LikePredicate) {
        let function = if predicate.case_sensitive {
            None
        } else {
            Some(self.config.case_insensitive_function.clone())
        };
        let function = function.as_deref();

        self.placeholders(|g| {
            g.wrapped_in(function, |g| g.visit_expression(&predicate.left));
            g.keyword(predicate.negated, "LIKE");
            g.wrapped_in(function, |g| g.visit_expression(&predicate.right));
            if let Some(escape) = predicate.escape {
                g.buffer.push_str(" ESCAPE ");
                g.wrapped_in(function, |g| g.buffer.push_str(&quote(&escape.to_string())));
            }
        });
    }

    fn visit_in(&mut self, predicate: &InPredicate) {
        self.render_in(predicate);
    }

    fn visit_is_null(&mut self, predicate: &IsNullPredicate) {
        self.placeholders(|g| {
            g.visit_expression(&predicate.expression);
            g.buffer.push_str(if predicate.negated { " IS NOT NULL" } else { " IS NULL" });
        });
    }

    fn visit_is_empty(&mut self, predicate: &IsEmptyPredicate) {
        self.visit_expression(&predicate.expression);
        self.buffer.push_str(if predicate.negated { " IS NOT EMPTY" } else { " IS EMPTY" });
    }

    fn visit_member_of(&mut self, predicate: &MemberOfPredicate) {
        self.scoped(
            BooleanLiteralRenderingContext::Plain,
            ParameterRenderingMode::Placeholder,
            |g| g.visit_expression(&predicate.left),
        );
        self.keyword(predicate.negated, "MEMBER OF");
        self.visit_expression(&predicate.right);
    }

    fn visit_boolean(&mut self, literal: &BooleanLiteral) {
        if literal.negated {
            self.buffer.push_str("NOT ");
        }
        let text = match self.boolean_context {
            BooleanLiteralRenderingContext::Plain => {
                if literal.value {
                    "TRUE"
                } else {
                    "FALSE"
                }
            }
            BooleanLiteralRenderingContext::Predicate => self.config.conditional(literal.value),
            BooleanLiteralRenderingContext::CaseWhen => self.config.boolean(literal.value),
        };
        self.buffer.push_str(text);
    }

    fn visit_exists(&mut self, predicate: &ExistsPredicate) {
        if predicate.negated {
            self.buffer.push_str("NOT ");
        }
        self.buffer.push_str("EXISTS ");
        self.visit_expression(&predicate.expression);
    }

    fn visit_path(&mut self, path: &PathExpression) {
        for (i, element) in path.elements.iter().enumerate() {
            if i > 0 {
                self.buffer.push('.');
            }
            match element {
                PathElement::Property(name) => self.buffer.push_str(name),
                PathElement::Array { name, index } => {
                    self.buffer.push_str(name);
                    self.buffer.push('[');
                    self.visit_expression(index);
                    self.buffer.push(']');
                }
            }
        }
    }

    fn visit_parameter(&mut self, parameter: &ParameterExpression) {
        let Some(name) = parameter.name.as_deref() else {
            self.fail(CriteriaError::UnsatisfiedParameter(
                "parameter expression has no name".to_string(),
            ));
            return;
        };

        if self.parameter_mode == ParameterRenderingMode::Literal
            && let Some(value) = &parameter.value
        {
            self.buffer.push_str(&value.to_string());
            return;
        }

        self.buffer.push(if parameter.is_positional() { '?' } else { ':' });
        self.buffer.push_str(name);
    }

    fn visit_null(&mut self) {
        self.buffer.push_str("NULL");
    }

    fn visit_literal(&mut self, literal: &Literal) {
        self.buffer.push_str(&literal.to_string());
    }

    fn visit_function(&mut self, function: &FunctionExpression) {
        self.scoped(
            BooleanLiteralRenderingContext::Plain,
            ParameterRenderingMode::Placeholder,
            |g| {
                g.buffer.push_str(&function.name);
                if function.omits_parentheses() {
                    return;
                }

                g.buffer.push('(');
                if function.aggregate {
                    if function.distinct {
                        g.buffer.push_str("DISTINCT ");
                    }
                    if function.args.is_empty() && function.name.eq_ignore_ascii_case("COUNT") {
                        g.buffer.push('*');
                    }
                }
                for (i, arg) in function.args.iter().enumerate() {
                    if i > 0 {
                        g.buffer.push_str(", ");
                    }
                    g.visit_expression(arg);
                }
                g.buffer.push(')');
            },
        );
    }

    fn visit_arithmetic(&mut self, expression: &ArithmeticExpression) {
        let op = expression.op;
        self.placeholders(|g| {
            // (1 / 3) / 4 and (1 - 3) * 4
            let left_parenthesis = matches!(
                expression.left.as_ref(),
                Expression::Arithmetic(left)
                    if left.op == ArithmeticOperator::Div || binds_looser(&left.op, &op)
            );
            g.parenthesized(left_parenthesis, &expression.left);

            g.buffer.push(' ');
            g.buffer.push_str(op.symbol());
            g.buffer.push(' ');

            // 1 / (3 / 4), 1 - (3 + 4), 1 * (3 - 4) and 1 / (3 * 4)
            let right_parenthesis = matches!(
                expression.right.as_ref(),
                Expression::Arithmetic(right)
                    if right.op == ArithmeticOperator::Div
                        || matches!(op, ArithmeticOperator::Sub | ArithmeticOperator::Div)
                        || binds_looser(&right.op, &op)
            );
            g.parenthesized(right_parenthesis, &expression.right);
        });
    }

    fn visit_factor(&mut self, factor: &ArithmeticFactor) {
        self.placeholders(|g| {
            if factor.invert_signum {
                g.buffer.push('-');
            }
            let parenthesis_required = matches!(
                factor.expression.as_ref(),
                Expression::Arithmetic(_) | Expression::Factor(_)
            );
            g.parenthesized(parenthesis_required, &factor.expression);
        });
    }

    fn visit_subquery(&mut self, subquery: &SubqueryExpression) {
        self.buffer.push('(');
        self.buffer.push_str(&subquery.query);
        self.buffer.push(')');
    }

    fn visit_case(&mut self, expression: &CaseExpression) {
        self.render_case(expression);
    }

    fn visit_qualified(&mut self, qualified: &QualifiedPath) {
        self.buffer.push_str(&qualified.kind.to_string());
        self.buffer.push('(');
        self.visit_path(&qualified.path);
        self.buffer.push(')');
    }
}

/// Unnamed parameters render as nothing here; use
/// [`QueryGenerator::generate_predicate`] to have them reported.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut generator = QueryGenerator::new();
        self.accept(&mut generator);
        f.write_str(generator.buffer())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut generator = QueryGenerator::new();
        self.accept(&mut generator);
        f.write_str(generator.buffer())
    }
}
