//! String literal quoting helpers.

/// Wraps `value` in single quotes, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' {
            quoted.push('\'');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Strips the enclosing single quotes and collapses `''` to `'`.
///
/// Returns `None` unless `literal` is a complete quoted string.
pub fn unquote(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            // a lone quote would have terminated the literal
            if chars.next_if_eq(&'\'').is_none() {
                return None;
            }
        }
        value.push(c);
    }
    Some(value)
}

/// The escape character of a LIKE `ESCAPE` clause.
///
/// Accepts a quoted single-character literal such as `'!'` or `''''`.
pub fn unescape_like_escape(literal: &str) -> Option<char> {
    let value = unquote(literal)?;
    let mut chars = value.chars();
    let c = chars.next()?;
    match chars.next() {
        None => Some(c),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("abc"), "'abc'");
        assert_eq!(quote("it's"), "'it''s'");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'abc'").as_deref(), Some("abc"));
        assert_eq!(unquote("'it''s'").as_deref(), Some("it's"));
        assert_eq!(unquote("''").as_deref(), Some(""));
        assert_eq!(unquote("'a'b'"), None);
        assert_eq!(unquote("abc"), None);
        assert_eq!(unquote("'"), None);
    }

    #[test]
    fn test_like_escape() {
        assert_eq!(unescape_like_escape("'!'"), Some('!'));
        assert_eq!(unescape_like_escape("''''"), Some('\''));
        assert_eq!(unescape_like_escape("'ab'"), None);
        assert_eq!(unescape_like_escape("''"), None);
    }
}
