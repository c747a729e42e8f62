//! Assembly of set operations (UNION, INTERSECT, EXCEPT) over SQL operands.

use serde::{Deserialize, Serialize};

use super::{SELECT, index_of_order_by, index_of_select, select_item_aliases, select_item_expressions};
use crate::config::DialectConfig;

/// Set operation type for combining queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOperationType {
    Union,
    UnionAll,
    Intersect,
    IntersectAll,
    Except,
    ExceptAll,
}

impl SetOperationType {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SetOperationType::Union => "UNION",
            SetOperationType::UnionAll => "UNION ALL",
            SetOperationType::Intersect => "INTERSECT",
            SetOperationType::IntersectAll => "INTERSECT ALL",
            SetOperationType::Except => "EXCEPT",
            SetOperationType::ExceptAll => "EXCEPT ALL",
        }
    }

    /// The ALL variant only returns duplicates, so its distinct counterpart
    /// over row-numbered operands yields the same rows.
    fn distinct_variant(&self) -> SetOperationType {
        match self {
            SetOperationType::IntersectAll => SetOperationType::Intersect,
            SetOperationType::ExceptAll => SetOperationType::Except,
            other => *other,
        }
    }

    fn needs_emulation(&self, dialect: &DialectConfig) -> bool {
        match self {
            SetOperationType::IntersectAll => !dialect.supports_intersect_all,
            SetOperationType::ExceptAll => !dialect.supports_except_all,
            _ => false,
        }
    }
}

impl std::fmt::Display for SetOperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_keyword())
    }
}

/// Appends `operands` joined by the set operator to `buffer`.
///
/// Operands that carry their own ORDER BY are wrapped in a derived table.
/// INTERSECT ALL and EXCEPT ALL are emulated with `row_number()` on dialects
/// lacking them. Returns the select aliases of the first operand when they
/// were computed (emulation or `needs_alias_in_set_order_by`).
pub fn append_set_operands(
    buffer: &mut String,
    set_type: SetOperationType,
    operands: &[&str],
    dialect: &DialectConfig,
) -> Option<Vec<String>> {
    let emulate = set_type.needs_emulation(dialect);
    let operator = if emulate { set_type.distinct_variant() } else { set_type };
    tracing::debug!(%set_type, emulate, operands = operands.len(), "assembling set operation");

    let mut aliases: Option<Vec<String>> = None;
    let mut wrappers = 0;
    if dialect.needs_alias_in_set_order_by {
        aliases = operands.first().map(|first| operand_aliases(first));
    }

    for (i, operand) in operands.iter().enumerate() {
        let first = i == 0;
        if first {
            if emulate {
                let aliases = aliases.get_or_insert_with(|| operand_aliases(operand));
                buffer.push_str(SELECT);
                buffer.push_str(&aliases.join(", "));
                buffer.push_str(" from (");
            }
        } else {
            buffer.push('\n');
            buffer.push_str(operator.sql_keyword());
            buffer.push('\n');
        }

        if emulate {
            let select_index = index_of_select(operand).unwrap_or(0);
            let expressions = select_item_expressions(operand, select_index);

            buffer.push_str(SELECT);
            buffer.push_str("row_number() over (partition by ");
            buffer.push_str(&expressions.join(", "));
            if let Some(order_by) = &dialect.window_function_dummy_order_by {
                buffer.push_str(order_by);
            }
            buffer.push_str(") as set_op_row_num_, ");
            let rest = operand.get(select_index + SELECT.len()..).unwrap_or_default();
            buffer.push_str(rest);
        } else {
            let add_wrapper = index_of_order_by(operand).is_some();
            if add_wrapper {
                buffer.push_str("select * from (");
            }
            match strip_outer_parenthesis(operand) {
                Some(inner) if add_wrapper || first => buffer.push_str(inner),
                _ => buffer.push_str(operand),
            }
            if add_wrapper {
                close_from_clause(buffer, dialect, &mut wrappers);
            }
        }
    }

    if emulate {
        close_from_clause(buffer, dialect, &mut wrappers);
    }

    aliases
}

fn operand_aliases(operand: &str) -> Vec<String> {
    let select_index = index_of_select(operand).unwrap_or(0);
    select_item_aliases(operand, select_index)
}

fn strip_outer_parenthesis(operand: &str) -> Option<&str> {
    operand.strip_prefix('(')?.strip_suffix(')')
}

/// Closes a derived table. Aliases are numbered per call so sibling
/// wrappers never share one.
fn close_from_clause(buffer: &mut String, dialect: &DialectConfig, wrappers: &mut usize) {
    buffer.push(')');
    if dialect.needs_alias_for_from_clause {
        *wrappers += 1;
        buffer.push_str(" set_op_");
        buffer.push_str(&wrappers.to_string());
    }
}
