// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_type::TableInfo;

/// Name used to address a table in generated SQL.
///
/// Parts equal to `default` are treated as absent. A named database without a
/// named schema yields `database.table`.
pub fn qualified_name(table: &TableInfo) -> String {
	match (table.has_database(), table.has_schema()) {
		(true, true) => format!("{}.{}.{}", table.database, table.schema, table.table),
		(true, false) => format!("{}.{}", table.database, table.table),
		(false, true) => format!("{}.{}", table.schema, table.table),
		(false, false) => table.table.clone(),
	}
}

/// Wraps text in single quotes, doubling embedded quotes.
pub fn quote_literal(text: &str) -> String {
	format!("'{}'", text.replace('\'', "''"))
}

/// Quotes a default value unless it already is a quoted literal.
pub(crate) fn default_literal(value: &str) -> String {
	if is_quoted(value) {
		value.to_string()
	} else {
		quote_literal(value)
	}
}

fn is_quoted(value: &str) -> bool {
	value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'')
}
