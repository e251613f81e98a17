// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashSet, fs, path::Path, str::FromStr};

use indexmap::IndexMap;
use metashop_type::{Error, FieldInfo, Result, TableInfo};
use regex::RegexBuilder;
use tracing::{debug, instrument};

/// Where injected fields go relative to the existing ones.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Position {
	Start,
	#[default]
	End,
}

impl FromStr for Position {
	type Err = Error;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"start" => Ok(Position::Start),
			"end" => Ok(Position::End),
			_ => Err(Error::Unsupported {
				kind: "position",
				value: s.to_string(),
			}),
		}
	}
}

fn builtin_templates() -> IndexMap<String, Vec<FieldInfo>> {
	IndexMap::from([
		(
			"audit_fields".to_string(),
			vec![
				FieldInfo::new("created_at", "TIMESTAMP")
					.not_null()
					.with_default("CURRENT_TIMESTAMP")
					.with_comment("created at"),
				FieldInfo::new("updated_at", "TIMESTAMP")
					.not_null()
					.with_default("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP")
					.with_comment("updated at"),
				FieldInfo::new("created_by", "VARCHAR(50)").with_comment("created by"),
				FieldInfo::new("updated_by", "VARCHAR(50)").with_comment("updated by"),
			],
		),
		(
			"version_control".to_string(),
			vec![
				FieldInfo::new("version", "INT").not_null().with_default("1").with_comment("row version"),
				FieldInfo::new("is_deleted", "TINYINT")
					.not_null()
					.with_default("0")
					.with_comment("soft delete flag (0: no, 1: yes)"),
			],
		),
		(
			"tenant_fields".to_string(),
			vec![
				FieldInfo::new("tenant_id", "VARCHAR(32)").not_null().with_comment("tenant id"),
				FieldInfo::new("org_id", "VARCHAR(32)").with_comment("organization id"),
			],
		),
	])
}

/// Adds named groups of standard fields to tables.
#[derive(Debug, Clone)]
pub struct FieldInjector {
	templates: IndexMap<String, Vec<FieldInfo>>,
}

impl Default for FieldInjector {
	fn default() -> Self {
		Self {
			templates: builtin_templates(),
		}
	}
}

impl FieldInjector {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn templates(&self) -> &IndexMap<String, Vec<FieldInfo>> {
		&self.templates
	}

	pub fn template(&self, name: &str) -> Option<&[FieldInfo]> {
		self.templates.get(name).map(Vec::as_slice)
	}

	/// Registers a template, replacing any existing one of the same name.
	pub fn add_template(&mut self, name: impl Into<String>, fields: Vec<FieldInfo>) {
		self.templates.insert(name.into(), fields);
	}

	/// Loads templates from a JSON object of the form
	/// `{"name": [{"name": "...", "type": "..."}]}`.
	pub fn load_templates(&mut self, path: impl AsRef<Path>) -> Result<usize> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|err| Error::read(path, err))?;
		let templates: IndexMap<String, Vec<FieldInfo>> = serde_json::from_str(&text)?;

		let count = templates.len();
		for (name, fields) in templates {
			debug!(template = %name, fields = fields.len(), "loaded field template");
			self.add_template(name, fields);
		}
		Ok(count)
	}

	/// Returns a copy of `table` with the template's fields added. Fields whose
	/// name already exists in the table, ignoring case, are left out.
	pub fn inject(&self, table: &TableInfo, template: &str, position: Position) -> Result<TableInfo> {
		let fields = self.template(template).ok_or_else(|| Error::UnknownTemplate(template.to_string()))?;
		Ok(merge(table, fields, position))
	}

	/// Injects into every table whose name matches `filter`. The filter is a
	/// case-insensitive regex anchored at the start of the table name; tables
	/// that do not match are returned unchanged.
	#[instrument(name = "transform::inject_all", level = "debug", skip(self, tables), fields(tables = tables.len()))]
	pub fn inject_all(
		&self,
		tables: &[TableInfo],
		template: &str,
		position: Position,
		filter: Option<&str>,
	) -> Result<Vec<TableInfo>> {
		let fields = self.template(template).ok_or_else(|| Error::UnknownTemplate(template.to_string()))?;

		let filter = filter
			.map(|pattern| {
				RegexBuilder::new(&format!("^(?:{})", pattern)).case_insensitive(true).build().map_err(|err| {
					Error::InvalidFilter {
						pattern: pattern.to_string(),
						reason: err.to_string(),
					}
				})
			})
			.transpose()?;

		let mut injected = 0usize;
		let tables = tables
			.iter()
			.map(|table| match &filter {
				Some(filter) if !filter.is_match(&table.table) => table.clone(),
				_ => {
					injected += 1;
					merge(table, fields, position)
				}
			})
			.collect();

		debug!(injected, "system fields injected");
		Ok(tables)
	}
}

fn merge(table: &TableInfo, template: &[FieldInfo], position: Position) -> TableInfo {
	let existing: HashSet<String> = table.fields.iter().map(|f| f.name.to_lowercase()).collect();
	let added = template.iter().filter(|f| !existing.contains(&f.name.to_lowercase())).cloned();

	let fields = match position {
		Position::Start => added.chain(table.fields.iter().cloned()).collect(),
		Position::End => table.fields.iter().cloned().chain(added).collect(),
	};
	table.with_fields(fields)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn orders() -> TableInfo {
		let mut table = TableInfo::new("default", "sales", "orders");
		table.fields = vec![FieldInfo::new("id", "INT").not_null(), FieldInfo::new("CREATED_AT", "DATETIME")];
		table
	}

	fn names(table: &TableInfo) -> Vec<&str> {
		table.fields.iter().map(|f| f.name.as_str()).collect()
	}

	#[test]
	fn test_builtin_templates() {
		let injector = FieldInjector::new();
		assert_eq!(
			injector.templates().keys().map(String::as_str).collect::<Vec<_>>(),
			vec!["audit_fields", "version_control", "tenant_fields"]
		);
		let audit = injector.template("audit_fields").unwrap();
		assert_eq!(audit.len(), 4);
		assert!(!audit[0].nullable);
		assert_eq!(audit[0].default_value.as_deref(), Some("CURRENT_TIMESTAMP"));
	}

	#[test]
	fn test_append_skips_existing_names() {
		let injected = FieldInjector::new().inject(&orders(), "audit_fields", Position::End).unwrap();
		assert_eq!(names(&injected), vec!["id", "CREATED_AT", "updated_at", "created_by", "updated_by"]);
		assert_eq!(injected.fields[1].data_type, "DATETIME");
	}

	#[test]
	fn test_prepend() {
		let injected = FieldInjector::new().inject(&orders(), "version_control", Position::Start).unwrap();
		assert_eq!(names(&injected), vec!["version", "is_deleted", "id", "CREATED_AT"]);
	}

	#[test]
	fn test_injection_is_idempotent() {
		let injector = FieldInjector::new();
		let once = injector.inject(&orders(), "tenant_fields", Position::End).unwrap();
		let twice = injector.inject(&once, "tenant_fields", Position::End).unwrap();
		assert_eq!(once, twice);
	}

	#[test]
	fn test_unknown_template() {
		let err = FieldInjector::new().inject(&orders(), "nope", Position::End).unwrap_err();
		assert!(matches!(err, Error::UnknownTemplate(name) if name == "nope"));
	}

	#[test]
	fn test_filter_is_anchored_and_case_insensitive() {
		let tables = vec![
			TableInfo::new("default", "s", "ods_orders"),
			TableInfo::new("default", "s", "ODS_users"),
			TableInfo::new("default", "s", "dw_ods_sales"),
		];

		let out = FieldInjector::new().inject_all(&tables, "tenant_fields", Position::End, Some("ods_")).unwrap();
		assert_eq!(out[0].fields.len(), 2);
		assert_eq!(out[1].fields.len(), 2);
		assert!(out[2].fields.is_empty());
	}

	#[test]
	fn test_filter_alternation_stays_anchored() {
		let tables = vec![TableInfo::new("default", "s", "x_dim"), TableInfo::new("default", "s", "dim_x")];
		let out = FieldInjector::new().inject_all(&tables, "tenant_fields", Position::End, Some("fact|dim")).unwrap();
		assert!(out[0].fields.is_empty());
		assert_eq!(out[1].fields.len(), 2);
	}

	#[test]
	fn test_invalid_filter() {
		let err = FieldInjector::new().inject_all(&[orders()], "audit_fields", Position::End, Some("(")).unwrap_err();
		assert!(matches!(err, Error::InvalidFilter { pattern, .. } if pattern == "("));
	}

	#[test]
	fn test_custom_template() {
		let mut injector = FieldInjector::new();
		injector.add_template("etl", vec![FieldInfo::new("batch_id", "BIGINT")]);

		let out = injector.inject_all(&[orders()], "etl", Position::End, None).unwrap();
		assert_eq!(names(&out[0]), vec!["id", "CREATED_AT", "batch_id"]);
	}

	#[test]
	fn test_load_templates() {
		let path = std::env::temp_dir().join(format!("metashop-templates-{}.json", std::process::id()));
		fs::write(&path, r#"{"etl": [{"name": "batch_id", "type": "BIGINT", "nullable": false}, {"name": "src", "type": "TEXT"}]}"#)
			.unwrap();

		let mut injector = FieldInjector::new();
		let loaded = injector.load_templates(&path).unwrap();
		fs::remove_file(&path).unwrap();

		assert_eq!(loaded, 1);
		let etl = injector.template("etl").unwrap();
		assert!(!etl[0].nullable);
		assert!(etl[1].nullable);
	}

	#[test]
	fn test_position_from_str() {
		assert_eq!("START".parse::<Position>().unwrap(), Position::Start);
		assert_eq!("end".parse::<Position>().unwrap(), Position::End);
		assert!("middle".parse::<Position>().is_err());
	}
}
