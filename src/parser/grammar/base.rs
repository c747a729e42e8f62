//! Lexical building blocks: keywords, identifiers, literals, parameters.

use crate::ast::*;
use crate::scan::QuoteMode;
use crate::util::keywords::is_keyword;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{opt, peek, recognize},
    error::{Error, ErrorKind},
};

pub(crate) fn error<'a, T>(input: &'a str, kind: ErrorKind) -> IResult<&'a str, T> {
    Err(nom::Err::Error(Error::new(input, kind)))
}

pub(crate) fn failure<'a, T>(input: &'a str, kind: ErrorKind) -> IResult<&'a str, T> {
    Err(nom::Err::Failure(Error::new(input, kind)))
}

pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Case-insensitive keyword that must not run into a following identifier
/// character, so `order` never matches the start of `orders`.
pub fn keyword<'a>(word: &'static str) -> impl Fn(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| {
        let (rest, matched) = tag_no_case(word).parse(input)?;
        if rest.starts_with(is_ident_char) {
            return error(input, ErrorKind::Tag);
        }
        Ok((rest, matched))
    }
}

/// Optional `NOT` followed by whitespace.
pub fn opt_not(input: &str) -> IResult<&str, bool> {
    let (input, not) = opt((keyword("not"), multispace0)).parse(input)?;
    Ok((input, not.is_some()))
}

/// Identifier: letter, `_` or `$` followed by identifier characters.
pub fn parse_identifier(input: &str) -> IResult<&str, &str> {
    if !input.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$') {
        return error(input, ErrorKind::Alpha);
    }
    take_while1(is_ident_char).parse(input)
}

/// Identifier that is not a reserved word.
pub fn parse_name(input: &str) -> IResult<&str, &str> {
    let (rest, name) = parse_identifier(input)?;
    if is_keyword(name) {
        return error(input, ErrorKind::Verify);
    }
    Ok((rest, name))
}

/// `'...'` with `''` standing for one quote.
pub fn parse_string_literal(input: &str) -> IResult<&str, String> {
    let (mut rest, _) = char('\'').parse(input)?;
    let mut value = String::new();
    loop {
        let Some(end) = rest.find('\'') else {
            return failure(input, ErrorKind::Char);
        };
        value.push_str(&rest[..end]);
        rest = &rest[end + 1..];
        match rest.strip_prefix('\'') {
            Some(after) => {
                value.push('\'');
                rest = after;
            }
            None => return Ok((rest, value)),
        }
    }
}

/// Numeric literal, kept as written: `42`, `3.14`, `1e-3`, `10L`, `2.5BD`.
pub fn parse_number(input: &str) -> IResult<&str, Literal> {
    let (rest, text) = recognize((
        digit1,
        opt((char('.'), digit1)),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
        opt(alt((
            tag_no_case("bi"),
            tag_no_case("bd"),
            tag_no_case("l"),
            tag_no_case("f"),
            tag_no_case("d"),
        ))),
    ))
    .parse(input)?;
    if rest.starts_with(is_ident_char) {
        return error(input, ErrorKind::Digit);
    }
    Ok((rest, Literal::Numeric(text.to_string())))
}

/// JDBC escape literals `{d '...'}`, `{t '...'}` and `{ts '...'}`.
pub fn parse_temporal_literal(input: &str) -> IResult<&str, Literal> {
    let start = input;
    let (input, _) = char('{').parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, kind) = alt((tag_no_case("ts"), tag_no_case("d"), tag_no_case("t"))).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, text) = parse_string_literal(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('}').parse(input)?;

    let literal = match kind.to_ascii_lowercase().as_str() {
        "d" => NaiveDate::parse_from_str(&text, "%Y-%m-%d").map(Literal::Date),
        "t" => NaiveTime::parse_from_str(&text, "%H:%M:%S%.f").map(Literal::Time),
        _ => NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f").map(Literal::Timestamp),
    };
    match literal {
        Ok(literal) => Ok((input, literal)),
        // the escape was recognized, a bad value inside it is final
        Err(_) => failure(start, ErrorKind::Verify),
    }
}

/// `:name` or positional `?1`.
pub fn parse_parameter(input: &str) -> IResult<&str, ParameterExpression> {
    if let Ok((rest, _)) = char::<_, Error<&str>>(':').parse(input) {
        let (rest, name) = parse_identifier(rest)?;
        return Ok((rest, ParameterExpression::named(name)));
    }
    let (rest, _) = char('?').parse(input)?;
    let (rest, position) = digit1(rest)?;
    Ok((rest, ParameterExpression::named(position)))
}

/// `(select ...)` captured verbatim up to the balancing parenthesis.
///
/// Parentheses inside quoted text do not count.
pub fn parse_subquery(input: &str) -> IResult<&str, SubqueryExpression> {
    let (body, _) = char('(').parse(input)?;
    peek((multispace0, keyword("select"))).parse(body)?;

    let mut depth = 1usize;
    let mut mode = QuoteMode::None;
    for (i, c) in body.bytes().enumerate() {
        mode = mode.on_char(c);
        if mode.is_quoted() {
            continue;
        }
        match c {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    let query = body[..i].to_string();
                    return Ok((&body[i + 1..], SubqueryExpression { query }));
                }
            }
            _ => {}
        }
    }
    failure(input, ErrorKind::Char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_boundary() {
        assert!(keyword("or")("or x").is_ok());
        assert!(keyword("or")("OR").is_ok());
        assert!(keyword("or")("order").is_err());
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(parse_string_literal("'it''s' rest"), Ok((" rest", "it's".to_string())));
        assert_eq!(parse_string_literal("''"), Ok(("", String::new())));
        assert!(parse_string_literal("'open").is_err());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number("42 "), Ok((" ", Literal::Numeric("42".to_string()))));
        assert_eq!(parse_number("1.5e-3"), Ok(("", Literal::Numeric("1.5e-3".to_string()))));
        assert_eq!(parse_number("10L"), Ok(("", Literal::Numeric("10L".to_string()))));
        assert!(parse_number("12abc").is_err());
    }

    #[test]
    fn test_subquery_balancing() {
        let (rest, sub) = parse_subquery("(select max(o.id) from Other o where o.name = ')') and").unwrap();
        assert_eq!(sub.query, "select max(o.id) from Other o where o.name = ')'");
        assert_eq!(rest, " and");
        assert!(parse_subquery("(a + b)").is_err());
    }
}
