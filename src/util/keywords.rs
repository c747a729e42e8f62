//! JPQL reserved words.

/// Words that never parse as the leading segment of a path.
pub const RESERVED_WORDS: &[&str] = &[
    "select",
    "from",
    "where",
    "group",
    "having",
    "order",
    "by",
    "as",
    "and",
    "or",
    "not",
    "null",
    "true",
    "false",
    "in",
    "is",
    "like",
    "escape",
    "between",
    "member",
    "of",
    "empty",
    "exists",
    "all",
    "any",
    "some",
    "distinct",
    "case",
    "when",
    "then",
    "else",
    "end",
    "new",
    "join",
    "fetch",
    "union",
    "intersect",
    "except",
];

/// Case-insensitive reserved word check.
pub fn is_keyword(word: &str) -> bool {
    RESERVED_WORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_keyword() {
        assert!(is_keyword("select"));
        assert!(is_keyword("BETWEEN"));
        assert!(is_keyword("Member"));
        assert!(!is_keyword("name"));
        assert!(!is_keyword("value"));
        assert!(!is_keyword(""));
    }
}
