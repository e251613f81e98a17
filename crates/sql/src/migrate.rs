// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, fs, path::Path};

use indexmap::IndexMap;
use metashop_type::{Error, FieldInfo, Result, TableInfo, TableKey};

use crate::name::{default_literal, qualified_name, quote_literal};

/// Per table column renames: target column to source column.
pub type FieldMapping = HashMap<TableKey, HashMap<String, String>>;

/// Options for `INSERT ... SELECT` generation.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
	/// Replace missing source values with a default via `CASE WHEN`.
	pub coalesce: bool,
	pub mapping: FieldMapping,
}

impl MigrateOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn coalesce(mut self, enabled: bool) -> Self {
		self.coalesce = enabled;
		self
	}

	pub fn mapping(mut self, mapping: FieldMapping) -> Self {
		self.mapping = mapping;
		self
	}

	/// Reads `target` of table `key` from source column `source`.
	pub fn rename(mut self, key: TableKey, target: impl Into<String>, source: impl Into<String>) -> Self {
		self.mapping.entry(key).or_default().insert(target.into(), source.into());
		self
	}
}

/// Loads a rename map from a JSON object of the form
/// `{"schema.table": {"target_column": "source_column"}}`.
pub fn load_mapping(path: impl AsRef<Path>) -> Result<FieldMapping> {
	let path = path.as_ref();
	let text = fs::read_to_string(path).map_err(|err| Error::read(path, err))?;
	let raw: HashMap<String, HashMap<String, String>> = serde_json::from_str(&text)?;

	raw.into_iter().map(|(key, columns)| key.parse::<TableKey>().map(|key| (key, columns))).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeFamily {
	String,
	Integer,
	Temporal,
	Other,
}

impl TypeFamily {
	/// Coarse substring classification of a source type.
	fn of(data_type: &str) -> Self {
		let lower = data_type.to_lowercase();
		if lower.contains("char") {
			TypeFamily::String
		} else if lower.contains("int") || lower.contains("number") {
			TypeFamily::Integer
		} else if lower.contains("date") || lower.contains("time") {
			TypeFamily::Temporal
		} else {
			TypeFamily::Other
		}
	}
}

/// Pairs of source and target tables sharing a `schema.table` key, in target
/// order.
pub(crate) fn pair_tables<'a>(
	sources: &'a [TableInfo],
	targets: &'a [TableInfo],
) -> Vec<(&'a TableInfo, &'a TableInfo)> {
	let sources: HashMap<TableKey, &TableInfo> = sources.iter().map(|t| (t.key(), t)).collect();
	let targets: IndexMap<TableKey, &TableInfo> = targets.iter().map(|t| (t.key(), t)).collect();

	targets.into_iter().filter_map(|(key, target)| sources.get(&key).map(|source| (*source, target))).collect()
}

pub(crate) fn emit_insert_select(
	source: &TableInfo,
	target: &TableInfo,
	coalesce: bool,
	renames: Option<&HashMap<String, String>>,
) -> Vec<String> {
	let columns: Vec<&str> = target.fields.iter().map(|f| f.name.as_str()).collect();

	let mut lines = vec![
		format!("INSERT INTO {}", qualified_name(target)),
		format!("({})", columns.join(", ")),
		"SELECT".to_string(),
	];

	let last = target.fields.len().saturating_sub(1);
	for (i, field) in target.fields.iter().enumerate() {
		let source_name = renames.and_then(|r| r.get(&field.name)).map(String::as_str).unwrap_or(&field.name);
		let expression = match source.field(source_name) {
			Some(source_field) if coalesce => emit_coalesce(source_field, field),
			Some(source_field) => emit_column(&source_field.name, &field.name),
			None => emit_missing(field),
		};

		let separator = if i < last {
			","
		} else {
			""
		};
		lines.push(format!("    {expression}{separator}"));
	}

	lines.push(format!("FROM {};", qualified_name(source)));
	lines
}

fn emit_column(source: &str, target: &str) -> String {
	if source == target {
		source.to_string()
	} else {
		format!("{source} AS {target}")
	}
}

fn emit_missing(target: &FieldInfo) -> String {
	match target.default_value.as_deref().filter(|d| !d.is_empty()) {
		Some(default_value) => format!("{} AS {}", default_literal(default_value), target.name),
		None => format!("NULL AS {}", target.name),
	}
}

fn emit_coalesce(source: &FieldInfo, target: &FieldInfo) -> String {
	let column = &source.name;
	let default_value = target.default_value.as_deref().filter(|d| !d.is_empty());

	let (condition, fallback) = match TypeFamily::of(&source.data_type) {
		TypeFamily::String => (
			format!("{column} IS NULL OR {column} = ''"),
			default_value.map(default_literal).unwrap_or_else(|| quote_literal("")),
		),
		TypeFamily::Integer => (format!("{column} IS NULL"), default_value.unwrap_or("0").to_string()),
		TypeFamily::Temporal => {
			(format!("{column} IS NULL"), default_value.unwrap_or("CURRENT_TIMESTAMP").to_string())
		}
		TypeFamily::Other => (format!("{column} IS NULL"), default_value.unwrap_or("NULL").to_string()),
	};

	format!("CASE WHEN {condition} THEN {fallback} ELSE {column} END AS {}", target.name)
}
