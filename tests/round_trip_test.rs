use criteria_core::prelude::*;
use pretty_assertions::assert_eq;

/// Text exactly as the generator writes it.
const CANONICAL: &[&str] = &[
    "e.age = 30",
    "e.age <> :age",
    "NOT e.age >= 3",
    "a = 1 AND (b = 2 OR c = 3)",
    "NOT (a = 1 OR b = 2) AND c IS NULL",
    "a = 1 AND TRUE",
    "e.age NOT BETWEEN 18 AND 65",
    "e.name NOT LIKE 'A!%%' ESCAPE '!'",
    "UPPER(e.name) LIKE UPPER(:pattern) ESCAPE UPPER('!')",
    "e.id IN (1, 2, 3)",
    "e.id NOT IN :ids",
    "e.id IN (select o.id from Other o where o.name = 'x')",
    "e.tags IS NOT EMPTY",
    ":tag MEMBER OF e.tags",
    "NOT EXISTS (select 1 from Other o)",
    "e.salary > ALL (select s.salary from Staff s)",
    "e.id = ANY (:ids)",
    "e.total * (1 - e.discount) > 100",
    "(e.a - e.b) / 2 <= -e.c",
    "e.d = {d '2024-01-31'}",
    "e.ts < {ts '2024-01-31 10:20:30.500000000'}",
    "COUNT(DISTINCT e.id) > ?1",
    "CASE WHEN e.age > 18 THEN 'adult' ELSE 'minor' END = :group",
    "e.kind = CASE e.k WHEN 1 THEN 'one' ELSE NULL END",
    "KEY(e.map) = 'k'",
    "e.list[:i].name IS NULL",
    "CURRENT_DATE > e.start",
];

#[test]
fn test_generated_text_is_stable() {
    for text in CANONICAL {
        let predicate = parse_predicate(text).unwrap_or_else(|e| panic!("{text}: {e}"));
        let generated = QueryGenerator::new().generate_predicate(&predicate).unwrap();
        assert_eq!(&generated, text);
    }
}

#[test]
fn test_built_trees_survive_round_trip() {
    let trees = vec![
        and(vec![
            eq(path("e.name"), string("O'Neil")),
            or(vec![gt(path("e.age"), number(18)), is_null(path("e.age"))]),
        ]),
        or(vec![
            like(path("e.name"), param("p"), Some('\\')).not(),
            between(path("e.age"), param("lo"), param("hi")),
        ]),
        and(vec![
            in_list(path("e.id"), vec![number(1), number(2)]).not(),
            member_of(param("tag"), path("e.tags")),
            exists("select 1 from Other o where o.id = e.id").not(),
        ]),
        and(vec![
            eq(path("e.a"), number(-5)),
            ge(path("e.score"), number(-1.5)),
            eq(path("e.flag"), Expression::literal(true)),
            eq(path("e.off"), Expression::literal(false)).not(),
        ]),
    ];

    for tree in trees {
        let text = tree.to_string();
        assert_eq!(parse_predicate(&text).unwrap(), tree, "{text}");
    }
}

#[test]
fn test_optimized_tree_renders_equivalent_text() {
    let p = parse_predicate("NOT (a = 1 AND (b = 2 AND c > 3))").unwrap();
    let optimized = p.optimize();
    assert_eq!(optimized.to_string(), "a <> 1 OR b <> 2 OR NOT c > 3");
}

#[test]
fn test_clones_are_independent() {
    let original = and(vec![eq(path("a"), number(1)), is_null(path("b"))]);
    let mut copy = original.clone();
    if let Predicate::Multinary(m) = &mut copy {
        m.children[0].negate();
        m.push(boolean(true));
    }
    assert_eq!(original.to_string(), "a = 1 AND b IS NULL");
    assert_eq!(copy.to_string(), "a <> 1 AND b IS NULL AND TRUE");
}

#[test]
fn test_negating_twice_restores_the_tree() {
    for text in CANONICAL {
        let original = parse_predicate(text).unwrap();
        let mut p = original.clone();
        p.negate();
        assert_ne!(p, original, "{text}");
        p.negate();
        assert_eq!(p, original, "{text}");
    }
}

#[test]
fn test_trees_serialize_as_json() {
    let p = parse_predicate("e.age BETWEEN :lo AND 65 OR e.name LIKE 'A%'").unwrap();
    let json = serde_json::to_string(&p).unwrap();
    let back: Predicate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn test_collects_paths_of_parsed_text() {
    let p = parse_predicate("e.a = o.b AND KEY(e.map) IN (select k from K k) OR UPPER(e.c) LIKE 'X%'").unwrap();
    let mut collector = PathCollector::new();
    p.accept(&mut collector);
    assert_eq!(collector.dotted(), vec!["e.a", "o.b", "e.map", "e.c"]);
}
