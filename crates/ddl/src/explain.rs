// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use metashop_type::{FieldInfo, TableInfo};

use crate::Parsed;

/// Renders a parse result as a stable, line oriented listing.
pub fn explain(parsed: &Parsed) -> String {
	let mut output = String::new();

	for table in &parsed.tables {
		explain_table(&mut output, table);
	}

	for diagnostic in &parsed.diagnostics {
		let _ = writeln!(output, "{}", diagnostic);
	}

	output
}

fn explain_table(output: &mut String, table: &TableInfo) {
	let _ = writeln!(output, "{}.{}.{}", table.database, table.schema, table.table);

	if let Some(comment) = &table.comment {
		let _ = writeln!(output, "  comment: {}", comment);
	}

	if !table.primary_keys.is_empty() {
		let keys: Vec<_> = table.primary_keys.iter().map(String::as_str).collect();
		let _ = writeln!(output, "  primary key: {}", keys.join(", "));
	}

	for field in &table.fields {
		let _ = writeln!(output, "  - {}", explain_field(field));
	}
}

fn explain_field(field: &FieldInfo) -> String {
	let mut line = format!("{} {}", field.name, field.data_type);
	if !field.nullable {
		line.push_str(" NOT NULL");
	}
	if let Some(default_value) = &field.default_value {
		line.push_str(" DEFAULT ");
		line.push_str(default_value);
	}
	if let Some(comment) = &field.comment {
		let _ = write!(line, " COMMENT '{}'", comment);
	}
	line
}
