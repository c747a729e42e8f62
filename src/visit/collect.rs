use crate::ast::PathExpression;
use crate::visit::{Visitor, walk_path};

/// Collects every path referenced by a tree, in visiting order.
///
/// A path is collected before the paths used in its array indexes.
/// Subquery bodies are opaque text and contribute nothing.
#[derive(Debug, Default)]
pub struct PathCollector {
    pub paths: Vec<PathExpression>,
}

impl PathCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dotted form of the collected paths
    pub fn dotted(&self) -> Vec<String> {
        self.paths.iter().map(PathExpression::to_dotted).collect()
    }
}

impl Visitor for PathCollector {
    fn visit_path(&mut self, path: &PathExpression) {
        self.paths.push(path.clone());
        walk_path(self, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::ast::*;

    #[test]
    fn test_collects_nested_paths() {
        let predicate = and(vec![
            eq(path("e.name"), param("name")),
            or(vec![
                between(path("e.age"), number(18), path("e.limit")),
                exists("select 1 from Other o where o.id = e.id"),
            ]),
            member_of(
                Expression::Qualified(QualifiedPath {
                    kind: QualifiedKind::Key,
                    path: PathExpression::from_dotted("e.map"),
                }),
                path("e.keys"),
            ),
        ]);

        let mut collector = PathCollector::new();
        predicate.accept(&mut collector);
        assert_eq!(
            collector.dotted(),
            vec!["e.name", "e.age", "e.limit", "e.map", "e.keys"]
        );
    }

    #[test]
    fn test_collects_from_case_and_functions() {
        let case = Expression::Case(CaseExpression {
            operand: None,
            when_clauses: vec![WhenClause {
                condition: Expression::from(is_null(path("a.x"))),
                result: Expression::function("UPPER", vec![path("a.y")]),
            }],
            default: Some(Box::new(path("a.z"))),
        });

        let mut collector = PathCollector::new();
        case.accept(&mut collector);
        assert_eq!(collector.dotted(), vec!["a.x", "a.y", "a.z"]);
    }

    #[test]
    fn test_collects_paths_in_array_index() {
        let indexed = Expression::Path(PathExpression::new(vec![
            PathElement::Property("e".to_string()),
            PathElement::Array {
                name: "list".to_string(),
                index: Box::new(path("o.idx")),
            },
        ]));

        let mut collector = PathCollector::new();
        eq(indexed, number(1)).accept(&mut collector);
        assert_eq!(collector.dotted(), vec!["e.list", "o.idx"]);
    }
}
