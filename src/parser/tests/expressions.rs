use crate::ast::builders::*;
use crate::ast::*;
use crate::parser::parse_expression;
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

fn parse(input: &str) -> Expression {
    parse_expression(input).unwrap()
}

#[test]
fn test_arithmetic_precedence() {
    use ArithmeticOperator::*;

    assert_eq!(
        parse("1 + 3 * 4"),
        Expression::arithmetic(number(1), Add, Expression::arithmetic(number(3), Mul, number(4)))
    );
    assert_eq!(
        parse("(1 - 3) * 4"),
        Expression::arithmetic(Expression::arithmetic(number(1), Sub, number(3)), Mul, number(4))
    );
    assert_eq!(
        parse("8 / 4 / 2"),
        Expression::arithmetic(Expression::arithmetic(number(8), Div, number(4)), Div, number(2))
    );
}

#[test]
fn test_unary_sign() {
    assert_eq!(parse("-e.x"), Expression::negative(path("e.x")));
    assert_eq!(parse("-(-5)"), Expression::negative(Expression::negative(number(5))));
    assert_eq!(parse("+5"), number(5));
    assert_eq!(
        parse("e.a - -1"),
        Expression::arithmetic(path("e.a"), ArithmeticOperator::Sub, Expression::negative(number(1)))
    );
}

#[test]
fn test_functions() {
    assert_eq!(
        parse("COUNT(*)"),
        Expression::Function(FunctionExpression::aggregate("COUNT", vec![], false))
    );
    assert_eq!(
        parse("count(DISTINCT e.id)"),
        Expression::Function(FunctionExpression::aggregate("count", vec![path("e.id")], true))
    );
    assert_eq!(
        parse("COALESCE(e.a, 0)"),
        Expression::function("COALESCE", vec![path("e.a"), number(0)])
    );
    assert_eq!(parse("CURRENT_DATE"), Expression::function("CURRENT_DATE", vec![]));
    assert!(parse_expression("SUBSTRING(*)").is_err());
}

#[test]
fn test_literals() {
    assert_eq!(parse("'it''s'"), string("it's"));
    assert_eq!(parse("12.5BD"), Expression::Literal(Literal::Numeric("12.5BD".to_string())));
    assert_eq!(parse("NULL"), Expression::Null);

    let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    assert_eq!(parse("{d '2024-01-31'}"), Expression::literal(date));

    let time = NaiveTime::from_hms_opt(10, 20, 30).unwrap();
    assert_eq!(parse("{t '10:20:30'}"), Expression::literal(time));

    let timestamp = date.and_hms_nano_opt(10, 20, 30, 500_000_000).unwrap();
    assert_eq!(parse("{ts '2024-01-31 10:20:30.5'}"), Expression::literal(timestamp));
}

#[test]
fn test_parameters_and_paths() {
    assert_eq!(parse(":name"), param("name"));
    assert_eq!(parse("?1"), param("1"));

    let indexed = PathExpression::new(vec![
        PathElement::Property("e".to_string()),
        PathElement::Array {
            name: "list".to_string(),
            index: Box::new(param("i")),
        },
        PathElement::Property("name".to_string()),
    ]);
    assert_eq!(parse("e.list[:i].name"), Expression::Path(indexed));

    // reserved words are fine after the first segment
    assert_eq!(parse("e.order"), path("e.order"));
}

#[test]
fn test_qualified_path() {
    assert_eq!(
        parse("KEY(e.map)"),
        Expression::Qualified(QualifiedPath {
            kind: QualifiedKind::Key,
            path: PathExpression::from_dotted("e.map"),
        })
    );
    assert_eq!(parse("value.x"), path("value.x"));
}

#[test]
fn test_case() {
    let general = parse("CASE WHEN e.age > 18 THEN 'adult' ELSE 'minor' END");
    assert_eq!(
        general,
        Expression::Case(CaseExpression {
            operand: None,
            when_clauses: vec![WhenClause {
                condition: gt(path("e.age"), number(18)).into(),
                result: string("adult"),
            }],
            default: Some(Box::new(string("minor"))),
        })
    );

    let simple = parse("case e.kind when 1 then TRUE when 2 then FALSE else null end");
    assert_eq!(
        simple,
        Expression::Case(CaseExpression {
            operand: Some(Box::new(path("e.kind"))),
            when_clauses: vec![
                WhenClause {
                    condition: number(1),
                    result: boolean(true).into(),
                },
                WhenClause {
                    condition: number(2),
                    result: boolean(false).into(),
                },
            ],
            default: None,
        })
    );
}

#[test]
fn test_predicate_in_expression_position() {
    assert_eq!(
        parse("a = 1"),
        Expression::from(eq(path("a"), number(1)))
    );
}
