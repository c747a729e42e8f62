use crate::ast::builders::*;
use crate::ast::*;
use crate::error::CriteriaError;
use crate::parser::parse_predicate;
use pretty_assertions::assert_eq;

fn parse(input: &str) -> Predicate {
    parse_predicate(input).unwrap()
}

#[test]
fn test_comparisons() {
    assert_eq!(parse("e.age = 30"), eq(path("e.age"), number(30)));
    assert_eq!(parse("e.age>=:min"), ge(path("e.age"), param("min")));
    assert_eq!(parse("e.age < ?1"), lt(path("e.age"), param("1")));
    assert_eq!(parse("e.age <> 30"), ne(path("e.age"), number(30)));
    assert_eq!(parse("e.age != 30"), ne(path("e.age"), number(30)));
}

#[test]
fn test_and_binds_tighter_than_or() {
    let p = parse("a = 1 OR b = 2 AND c = 3");
    let expected = or(vec![
        eq(path("a"), number(1)),
        and(vec![eq(path("b"), number(2)), eq(path("c"), number(3))]),
    ]);
    assert_eq!(p, expected);

    let flat = parse("a = 1 and b = 2 AND c = 3");
    assert_eq!(
        flat,
        and(vec![
            eq(path("a"), number(1)),
            eq(path("b"), number(2)),
            eq(path("c"), number(3)),
        ])
    );
}

#[test]
fn test_not() {
    assert_eq!(parse("NOT e.age > 3"), gt(path("e.age"), number(3)).not());
    assert_eq!(
        parse("NOT (a = 1 OR b = 2)"),
        or(vec![eq(path("a"), number(1)), eq(path("b"), number(2))]).not()
    );
    assert_eq!(parse("not not a = 1"), eq(path("a"), number(1)));
    assert_eq!(
        parse("NOT e.active"),
        Predicate::Not(NotPredicate::new(path("e.active")))
    );
}

#[test]
fn test_parenthesized_operand_is_not_a_group() {
    let p = parse("(e.a + 1) * 2 > 3");
    let left = Expression::arithmetic(
        Expression::arithmetic(path("e.a"), ArithmeticOperator::Add, number(1)),
        ArithmeticOperator::Mul,
        number(2),
    );
    assert_eq!(p, gt(left, number(3)));
}

#[test]
fn test_between_absorbs_its_and() {
    let p = parse("e.age NOT BETWEEN 18 AND 65 AND e.name IS NULL");
    assert_eq!(
        p,
        and(vec![
            between(path("e.age"), number(18), number(65)).not(),
            is_null(path("e.name")),
        ])
    );
}

#[test]
fn test_like() {
    assert_eq!(
        parse("e.name NOT LIKE 'A!%' ESCAPE '!'"),
        like(path("e.name"), string("A!%"), Some('!')).not()
    );

    let mut expected = ilike(path("e.name"), param("pattern"));
    if let Predicate::Like(l) = &mut expected {
        l.escape = Some('\\');
    }
    assert_eq!(
        parse("UPPER(e.name) LIKE UPPER(:pattern) ESCAPE UPPER('\\')"),
        expected
    );

    // only one side wrapped stays case-sensitive
    let one_sided = parse("UPPER(e.name) LIKE 'A%'");
    assert!(matches!(one_sided, Predicate::Like(LikePredicate { case_sensitive: true, .. })));
}

#[test]
fn test_in() {
    assert_eq!(
        parse("e.id IN (1, 2)"),
        in_list(path("e.id"), vec![number(1), number(2)])
    );
    assert_eq!(
        parse("e.id NOT IN :ids"),
        in_list(
            path("e.id"),
            vec![Expression::Parameter(ParameterExpression::named("ids").collection_valued())]
        )
        .not()
    );
    assert_eq!(
        parse("e.id IN (select o.id from Other o)"),
        in_list(path("e.id"), vec![subquery("select o.id from Other o")])
    );
}

#[test]
fn test_null_empty_member() {
    assert_eq!(parse("e.name IS NOT NULL"), is_null(path("e.name")).not());
    assert_eq!(parse("e.tags is empty"), is_empty(path("e.tags")));
    assert_eq!(
        parse(":tag NOT MEMBER OF e.tags"),
        member_of(param("tag"), path("e.tags")).not()
    );
    assert_eq!(
        parse("e.x MEMBER e.tags"),
        member_of(path("e.x"), path("e.tags"))
    );
}

#[test]
fn test_exists() {
    assert_eq!(
        parse("NOT EXISTS (select 1 from Other o where o.name = 'x)')"),
        exists("select 1 from Other o where o.name = 'x)'").not()
    );
}

#[test]
fn test_quantifiers() {
    let all = Predicate::Comparison(
        ComparisonPredicate::new(ComparisonKind::Gt, path("e.salary"), subquery("select s.salary from Staff s"))
            .quantified(PredicateQuantifier::All),
    );
    assert_eq!(parse("e.salary > ALL (select s.salary from Staff s)"), all);

    let some = Predicate::Comparison(
        ComparisonPredicate::new(ComparisonKind::Eq, path("e.id"), param("ids")).quantified(PredicateQuantifier::Any),
    );
    assert_eq!(parse("e.id = SOME (:ids)"), some);
}

#[test]
fn test_boolean_literals() {
    assert_eq!(parse("TRUE"), boolean(true));
    assert_eq!(
        parse("NOT FALSE AND e.a = 1"),
        and(vec![boolean(false).not(), eq(path("e.a"), number(1))])
    );
}

#[test]
fn test_errors_carry_position() {
    let err = parse_predicate("e.age = 1 garbage").unwrap_err();
    assert!(matches!(err, CriteriaError::Parse { position: 10, .. }));

    assert!(parse_predicate("e.age = ").is_err());
    assert!(parse_predicate("select = 1").is_err());
    assert!(parse_predicate("e.d = {d '2024-13-01'}").is_err());
    assert!(parse_predicate("e.a NOT = 1").is_err());
}
