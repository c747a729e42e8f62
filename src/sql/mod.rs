//! Structural scanning of SQL/JPQL query strings.
//!
//! These functions locate clause boundaries and split select lists without
//! a full SQL parser. They assume well-formed input (balanced parentheses,
//! a findable SELECT); malformed text yields `None` or meaningless indices,
//! never a panic.
//!
//! Keywords are matched with their surrounding spaces (`" from "`,
//! `"select "`), case-insensitively, and never inside quoted regions.

pub mod set_ops;

pub use set_ops::{SetOperationType, append_set_operands};

use once_cell::sync::Lazy;

use crate::scan::{BoyerMooreFirstFinder, PatternFinder, QuoteAwareFinder, QuoteMode};

const SELECT: &str = "select ";
const FROM: &str = " from ";
const WITH: &str = "with ";
const WHERE: &str = " where ";
const ORDER_BY: &str = " order by ";
const AS: &str = " as ";
const FROM_FINAL_TABLE: &str = " from final table (";
const NEXT_VALUE_FOR: &str = "next value for ";

type KeywordFinder = QuoteAwareFinder<BoyerMooreFirstFinder>;

fn keyword_finder(keyword: &str) -> KeywordFinder {
    QuoteAwareFinder::new(BoyerMooreFirstFinder::new(keyword))
}

static SELECT_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(SELECT));
static FROM_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(FROM));
static WITH_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(WITH));
static WHERE_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(WHERE));
static ORDER_BY_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(ORDER_BY));
static AS_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(AS));
static FROM_FINAL_TABLE_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(FROM_FINAL_TABLE));
static NEXT_VALUE_FOR_FINDER: Lazy<KeywordFinder> = Lazy::new(|| keyword_finder(NEXT_VALUE_FOR));

/// Counts the items of a select clause.
///
/// Expects only the select list, e.g. `col1, col2` of
/// `SELECT col1, col2 FROM ...`. Commas nested in parentheses or quotes
/// do not separate items.
pub fn count_select_items(sql: &str) -> usize {
    let mut count = 1;
    let mut parenthesis = 0isize;
    let mut mode = QuoteMode::None;
    for &c in sql.as_bytes() {
        mode = mode.on_char(c);
        if mode.is_quoted() {
            continue;
        }
        match c {
            b'(' => parenthesis += 1,
            b')' => parenthesis -= 1,
            b',' if parenthesis == 0 => count += 1,
            _ => {}
        }
    }
    count
}

/// Finds the top-level SELECT keyword of a query.
///
/// When a `WITH` prologue precedes the first SELECT, the common table
/// expression bodies are skipped and the SELECT of the main query is
/// returned.
pub fn index_of_select(sql: &str) -> Option<usize> {
    let text = sql.as_bytes();
    let mut select_index = SELECT_FINDER.index_in(text)?;
    let Some(with_index) = WITH_FINDER.index_in_range(text, 0, select_index) else {
        return Some(select_index);
    };

    let mut brackets = 0usize;
    let mut mode = QuoteMode::None;
    let mut i = with_index + WITH.len();
    let mut end = select_index;
    while i < end {
        let c = text[i];
        mode = mode.on_char(c);

        if !mode.is_quoted() {
            if c == b'(' {
                // While inside a CTE body consider the whole query
                end = text.len();
                brackets += 1;
            } else if c == b')' {
                brackets = brackets.saturating_sub(1);
                if brackets == 0 {
                    if i < select_index {
                        end = select_index;
                    } else {
                        // The select we had was part of the CTE body
                        select_index = SELECT_FINDER.index_from(text, i)?;
                        end = select_index;
                    }
                }
            }
        }

        i += 1;
    }

    tracing::debug!(select_index, with_index, "located main select after CTE prologue");
    Some(select_index)
}

/// Finds the parenthesized subquery of a `FROM FINAL TABLE (...)` clause.
///
/// Returns the `[start, end)` span of the subquery text, or `(0, sql.len())`
/// when the query has no such clause.
pub fn index_of_final_table_subquery(sql: &str, select_index: usize) -> (usize, usize) {
    let text = sql.as_bytes();
    let whole = (0, text.len());
    let Some(final_table_index) = FROM_FINAL_TABLE_FINDER.index_from(text, select_index) else {
        return whole;
    };

    let body_start = final_table_index + FROM_FINAL_TABLE.len();
    let mut brackets = 1usize;
    let mut mode = QuoteMode::None;
    for (i, &c) in text.iter().enumerate().skip(body_start) {
        mode = mode.on_char(c);
        if mode.is_quoted() {
            continue;
        }
        if c == b'(' {
            brackets += 1;
        } else if c == b')' {
            brackets -= 1;
            if brackets == 0 {
                return (body_start, i);
            }
        }
    }

    whole
}

/// Extracts the select item aliases of a query.
///
/// The first SELECT at or after `start` is used. Each top-level item
/// yields its trailing alias token: the text after the last whitespace or
/// `.`, a quoted alias kept whole. Items using `next value for` are
/// returned unchanged since a sequence expression cannot be aliased away.
pub fn select_item_aliases(sql: &str, start: usize) -> Vec<String> {
    let Some(select_index) = SELECT_FINDER.index_from(sql.as_bytes(), start) else {
        return Vec::new();
    };

    let mut aliases: Vec<String> = Vec::new();
    let items = select_items(sql, select_index);
    let count = items.len();
    for (i, item) in items.into_iter().enumerate() {
        let alias = extract_alias(item);
        // a trailing empty item means there was nothing after the last comma
        if i + 1 == count && alias.is_empty() {
            continue;
        }
        aliases.push(alias);
    }

    tracing::debug!(?aliases, "extracted select item aliases");
    aliases
}

/// Extracts the expression part of each top-level select item.
///
/// A trailing ` as alias` is removed; items without `as` are returned
/// whole (trimmed). `next value for` items are returned unchanged.
pub fn select_item_expressions(sql: &str, select_index: usize) -> Vec<String> {
    let Some(select_index) = SELECT_FINDER.index_from(sql.as_bytes(), select_index) else {
        return Vec::new();
    };

    select_items(sql, select_index)
        .into_iter()
        .map(extract_expression)
        .filter(|expr| !expr.is_empty())
        .collect()
}

/// Index of the top-level ` from ` of the main query.
pub fn index_of_from(sql: &str) -> Option<usize> {
    main_query_keyword(sql, &FROM_FINDER)
}

/// Index of the top-level ` where ` of the main query.
pub fn index_of_where(sql: &str) -> Option<usize> {
    main_query_keyword(sql, &WHERE_FINDER)
}

/// Index of the top-level ` order by ` of the main query.
pub fn index_of_order_by(sql: &str) -> Option<usize> {
    main_query_keyword(sql, &ORDER_BY_FINDER)
}

fn main_query_keyword(sql: &str, finder: &KeywordFinder) -> Option<usize> {
    let select_index = index_of_select(sql)?;
    let text = sql.as_bytes();
    top_level_matches(text, select_index + SELECT.len(), text.len(), finder)
        .into_iter()
        .next()
}

/// Positions of unquoted `finder` matches at parenthesis depth 0 relative
/// to `start`.
fn top_level_matches(text: &[u8], start: usize, end: usize, finder: &KeywordFinder) -> Vec<usize> {
    let mut matches = Vec::new();
    let mut depth = 0isize;
    let mut mode = QuoteMode::None;
    let mut scanned = start;
    let mut from = start;

    while let Some(candidate) = finder.index_in_range(text, from, end) {
        for &c in &text[scanned..candidate] {
            mode = mode.on_char(c);
            if mode.is_quoted() {
                continue;
            }
            match c {
                b'(' => depth += 1,
                b')' => depth -= 1,
                _ => {}
            }
        }
        scanned = candidate;
        if depth == 0 {
            matches.push(candidate);
        }
        from = candidate + 1;
    }

    matches
}

/// Splits the select list that follows `select_index` into item slices.
///
/// Leading whitespace of an item is skipped. The last slice is pushed even
/// when empty so callers can tell a trailing comma apart.
fn select_items(sql: &str, select_index: usize) -> Vec<&str> {
    let text = sql.as_bytes();
    let mut from_index = FROM_FINDER.index_from(text, select_index).unwrap_or(text.len());

    let mut items = Vec::new();
    let mut item_start: Option<usize> = None;
    let mut parenthesis = 0usize;
    let mut mode = QuoteMode::None;
    let mut i = select_index + SELECT.len();
    let mut end = from_index;

    while i < end {
        let c = text[i];
        mode = mode.on_char(c);

        if !mode.is_quoted() {
            if parenthesis == 0 && c == b',' {
                items.push(&sql[item_start.unwrap_or(i)..i]);
                item_start = None;
                i += 1;
                continue;
            } else if c == b'(' {
                // While inside a nested context consider the whole query
                end = text.len();
                parenthesis += 1;
            } else if c == b')' {
                parenthesis = parenthesis.saturating_sub(1);
                if parenthesis == 0 {
                    if i < from_index {
                        end = from_index;
                    } else {
                        // The from we had belonged to the nested query
                        from_index = FROM_FINDER.index_from(text, i).unwrap_or(text.len());
                        end = from_index;
                    }
                }
            }
        }

        if item_start.is_none() && !c.is_ascii_whitespace() {
            item_start = Some(i);
        }
        i += 1;
    }

    items.push(&sql[item_start.unwrap_or(i)..i]);
    items
}

fn extract_alias(item: &str) -> String {
    let bytes = item.as_bytes();
    let Some(alias_end) = bytes.iter().rposition(|c| !c.is_ascii_whitespace()) else {
        return String::new();
    };
    if NEXT_VALUE_FOR_FINDER.index_in(bytes).is_some() {
        return item.to_string();
    }

    let mut end_index = alias_end;
    let mut mode = QuoteMode::None.on_char_backwards(bytes[alias_end]);
    if mode.is_quoted() {
        // Walk back to the opening quote; a doubled quote char is an escape
        while end_index > 0 {
            end_index -= 1;
            mode = mode.on_char_backwards(bytes[end_index]);
            let escaped = end_index > 0 && bytes[end_index] == bytes[end_index - 1];
            if !mode.is_quoted() && !escaped {
                break;
            }
        }
    }

    let last_whitespace = bytes[..=end_index].iter().rposition(|c| c.is_ascii_whitespace());
    let last_dot = bytes[..=end_index].iter().rposition(|&c| c == b'.');
    let alias_start = last_whitespace.max(last_dot).map_or(0, |i| i + 1);
    item[alias_start..=alias_end].to_string()
}

fn extract_expression(item: &str) -> String {
    let trimmed = item.trim_end();
    if NEXT_VALUE_FOR_FINDER.index_in(trimmed.as_bytes()).is_some() {
        return item.to_string();
    }

    let text = trimmed.as_bytes();
    match top_level_matches(text, 0, text.len(), &AS_FINDER).last() {
        Some(&as_index) => trimmed[..as_index].trim_end().to_string(),
        None => trimmed.to_string(),
    }
}
