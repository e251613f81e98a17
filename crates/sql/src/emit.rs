// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_type::{CommentStyle, Dialect, FieldInfo, TableInfo};

use crate::{
	GeneratorConfig,
	name::{qualified_name, quote_literal},
};

/// `-- <action>: <table> (<comment>)`
pub(crate) fn emit_header(action: &str, table: &TableInfo) -> String {
	match non_empty(&table.comment) {
		Some(comment) => format!("-- {action}: {} ({comment})", table.table),
		None => format!("-- {action}: {}", table.table),
	}
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().filter(|v| !v.is_empty())
}

// ── DROP TABLE ──────────────────────────────────────────────────────────

pub(crate) fn emit_drop_table(config: &GeneratorConfig, table: &TableInfo) -> String {
	let if_exists = if config.use_if_exists() {
		" IF EXISTS"
	} else {
		""
	};
	format!("DROP TABLE{if_exists} {};", qualified_name(table))
}

// ── CREATE TABLE ────────────────────────────────────────────────────────

pub(crate) fn emit_create_table(config: &GeneratorConfig, table: &TableInfo) -> Vec<String> {
	let name = qualified_name(table);
	let style = config.dialect.comment_style();

	let if_ne = if config.use_if_not_exists() {
		" IF NOT EXISTS"
	} else {
		""
	};
	let mut lines = vec![format!("CREATE TABLE{if_ne} {name} (")];

	let mut definitions: Vec<String> =
		table.fields.iter().map(|field| format!("    {}", emit_column(field, style))).collect();

	if !table.primary_keys.is_empty() {
		let keys: Vec<&str> = table.primary_keys.iter().map(String::as_str).collect();
		definitions.push(format!("    PRIMARY KEY ({})", keys.join(", ")));
	}

	let last = definitions.len().saturating_sub(1);
	for (i, definition) in definitions.into_iter().enumerate() {
		if i < last {
			lines.push(format!("{definition},"));
		} else {
			lines.push(definition);
		}
	}

	match (non_empty(&table.comment), style) {
		(Some(comment), CommentStyle::Inline) => lines.push(format!(") COMMENT={};", quote_literal(comment))),
		_ => lines.push(");".to_string()),
	}

	if style == CommentStyle::Separate {
		lines.extend(emit_comment_on(&name, table));
	}

	lines
}

fn emit_column(field: &FieldInfo, style: CommentStyle) -> String {
	let mut definition = format!("{} {}", field.name, field.data_type);

	if !field.nullable {
		definition.push_str(" NOT NULL");
	}

	if let Some(default_value) = non_empty(&field.default_value) {
		definition.push_str(" DEFAULT ");
		definition.push_str(default_value);
	}

	if let (Some(comment), CommentStyle::Inline) = (non_empty(&field.comment), style) {
		definition.push_str(" COMMENT ");
		definition.push_str(&quote_literal(comment));
	}

	definition
}

fn emit_comment_on(name: &str, table: &TableInfo) -> Vec<String> {
	let mut lines = Vec::new();

	if let Some(comment) = non_empty(&table.comment) {
		lines.push(format!("COMMENT ON TABLE {name} IS {};", quote_literal(comment)));
	}

	for field in &table.fields {
		if let Some(comment) = non_empty(&field.comment) {
			lines.push(format!("COMMENT ON COLUMN {name}.{} IS {};", field.name, quote_literal(comment)));
		}
	}

	lines
}

// ── Inspection queries ──────────────────────────────────────────────────

pub(crate) fn emit_statistics(table: &TableInfo) -> String {
	format!("SELECT COUNT(*) AS record_count FROM {};", qualified_name(table))
}

pub(crate) fn emit_structure(dialect: Dialect, table: &TableInfo) -> String {
	let name = qualified_name(table);
	match dialect {
		Dialect::Mysql => format!("DESCRIBE {name};"),
		Dialect::Postgresql => format!("\\d {name}"),
		Dialect::Oracle => format!("DESC {name};"),
		Dialect::Sqlserver => format!("SP_HELP {};", quote_literal(&name)),
	}
}
