// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use metashop_type::{FieldInfo, TableInfo};

const MAX_SHEET_NAME: usize = 31;
const INVALID_SHEET_CHARS: [char; 7] = ['\\', '/', '?', '*', '[', ']', ':'];

/// Which parent columns precede the field columns of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
	/// Database, schema and table, then the field, then the table comment.
	Full,
	/// Table, then the field, then the table comment.
	Schema,
	/// Field columns only.
	Table,
}

impl Layout {
	pub fn header(&self) -> Vec<String> {
		let columns: &[&str] = match self {
			Layout::Full => &[
				"database",
				"schema",
				"table",
				"field",
				"type",
				"nullable",
				"default",
				"primary_key",
				"field_comment",
				"table_comment",
			],
			Layout::Schema => &[
				"table",
				"field",
				"type",
				"nullable",
				"default",
				"primary_key",
				"field_comment",
				"table_comment",
			],
			Layout::Table => &["field", "type", "nullable", "default", "primary_key", "field_comment"],
		};
		columns.iter().map(|c| c.to_string()).collect()
	}

	fn row(&self, table: &TableInfo, field: &FieldInfo) -> Vec<String> {
		let mut row = match self {
			Layout::Full => vec![table.database.clone(), table.schema.clone(), table.table.clone()],
			Layout::Schema => vec![table.table.clone()],
			Layout::Table => vec![],
		};

		row.extend([
			field.name.clone(),
			field.data_type.clone(),
			flag(field.nullable),
			field.default_value.clone().unwrap_or_default(),
			flag(table.is_primary_key(&field.name)),
			field.comment.clone().unwrap_or_default(),
		]);

		if *self != Layout::Table {
			row.push(table.comment.clone().unwrap_or_default());
		}
		row
	}
}

fn flag(value: bool) -> String {
	if value {
		"YES".to_string()
	} else {
		"NO".to_string()
	}
}

/// A named table of string cells with a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
	pub name: String,
	pub header: Vec<String>,
	pub rows: Vec<Vec<String>>,
}

impl Sheet {
	/// One row per field of every table, in input order.
	pub fn new<'a>(name: impl Into<String>, layout: Layout, tables: impl IntoIterator<Item = &'a TableInfo>) -> Self {
		let rows = tables
			.into_iter()
			.flat_map(|table| table.fields.iter().map(move |field| layout.row(table, field)))
			.collect();

		Self {
			name: name.into(),
			header: layout.header(),
			rows,
		}
	}
}

/// Makes a name usable as a workbook sheet name. Excel also rejects names
/// that start or end with `'` and the reserved name `History`.
pub(crate) fn sanitize_sheet_name(name: &str) -> String {
	let cleaned: String = name
		.trim_matches('\'')
		.chars()
		.map(|c| {
			if INVALID_SHEET_CHARS.contains(&c) {
				'_'
			} else {
				c
			}
		})
		.take(MAX_SHEET_NAME)
		.collect();

	let cleaned = cleaned.trim_end_matches('\'');
	if cleaned.is_empty() {
		"sheet".to_string()
	} else if cleaned.eq_ignore_ascii_case("history") {
		format!("{cleaned}_")
	} else {
		cleaned.to_string()
	}
}

/// Hands out sanitized sheet names, suffixing repeats with `_2`, `_3`, ...
#[derive(Debug, Default)]
pub(crate) struct SheetNames {
	taken: HashSet<String>,
}

impl SheetNames {
	pub fn next(&mut self, name: &str) -> String {
		let base = sanitize_sheet_name(name);
		if self.taken.insert(base.to_lowercase()) {
			return base;
		}

		let mut n = 2usize;
		loop {
			let suffix = format!("_{n}");
			let keep = MAX_SHEET_NAME.saturating_sub(suffix.chars().count());
			let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
			if self.taken.insert(candidate.to_lowercase()) {
				return candidate;
			}
			n += 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn orders() -> TableInfo {
		let mut table = TableInfo::new("dw", "sales", "orders");
		table.fields = vec![
			FieldInfo::new("id", "INT").not_null(),
			FieldInfo::new("note", "TEXT").with_default("''").with_comment("free text"),
		];
		table.primary_keys.insert("id".to_string());
		table.comment = Some("all orders".to_string());
		table
	}

	#[test]
	fn test_full_layout() {
		let sheet = Sheet::new("metadata", Layout::Full, [&orders()]);
		assert_eq!(sheet.header.len(), 10);
		assert_eq!(sheet.rows[0], vec!["dw", "sales", "orders", "id", "INT", "NO", "", "YES", "", "all orders"]);
		assert_eq!(
			sheet.rows[1],
			vec!["dw", "sales", "orders", "note", "TEXT", "YES", "''", "NO", "free text", "all orders"]
		);
	}

	#[test]
	fn test_schema_and_table_layouts() {
		let table = orders();
		let schema = Sheet::new("sales", Layout::Schema, [&table]);
		assert_eq!(schema.header[0], "table");
		assert_eq!(schema.rows[0], vec!["orders", "id", "INT", "NO", "", "YES", "", "all orders"]);

		let fields = Sheet::new("orders", Layout::Table, [&table]);
		assert_eq!(fields.header, vec!["field", "type", "nullable", "default", "primary_key", "field_comment"]);
		assert_eq!(fields.rows[1], vec!["note", "TEXT", "YES", "''", "NO", "free text"]);
	}

	#[test]
	fn test_sanitize() {
		assert_eq!(sanitize_sheet_name("a/b\\c?d*e[f]g:h"), "a_b_c_d_e_f_g_h");
		assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), 31);
		assert_eq!(sanitize_sheet_name(""), "sheet");
		assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
		assert_eq!(sanitize_sheet_name("''"), "sheet");
		assert_eq!(sanitize_sheet_name("History"), "History_");
	}

	#[test]
	fn test_duplicate_names() {
		let mut names = SheetNames::default();
		assert_eq!(names.next("orders"), "orders");
		assert_eq!(names.next("ORDERS"), "ORDERS_2");
		assert_eq!(names.next("orders"), "orders_3");

		let long = "y".repeat(35);
		assert_eq!(names.next(&long), "y".repeat(31));
		let second = names.next(&long);
		assert_eq!(second.chars().count(), 31);
		assert!(second.ends_with("_2"));
	}
}
