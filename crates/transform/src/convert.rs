// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, fmt::Display, fs, path::Path, str::FromStr};

use indexmap::IndexMap;
use metashop_type::{Diagnostic, Error, Result, TableInfo, diagnostic::convert::unknown_rule};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument, warn};

static BASE_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Source type name to target type name, matched case-insensitively.
pub type TypeMapping = IndexMap<String, String>;

const MYSQL_TO_ORACLE: &[(&str, &str)] = &[
	("INT", "NUMBER(10)"),
	("BIGINT", "NUMBER(19)"),
	("VARCHAR", "VARCHAR2"),
	("TEXT", "CLOB"),
	("DATETIME", "DATE"),
	("TIMESTAMP", "TIMESTAMP"),
	("DECIMAL", "NUMBER"),
	("TINYINT", "NUMBER(3)"),
	("SMALLINT", "NUMBER(5)"),
	("MEDIUMINT", "NUMBER(7)"),
	("FLOAT", "BINARY_FLOAT"),
	("DOUBLE", "BINARY_DOUBLE"),
];

const ORACLE_TO_MYSQL: &[(&str, &str)] = &[
	("NUMBER", "DECIMAL"),
	("VARCHAR2", "VARCHAR"),
	("CLOB", "TEXT"),
	("DATE", "DATETIME"),
	("TIMESTAMP", "TIMESTAMP"),
	("BINARY_FLOAT", "FLOAT"),
	("BINARY_DOUBLE", "DOUBLE"),
];

const MYSQL_TO_POSTGRESQL: &[(&str, &str)] = &[
	("INT", "INTEGER"),
	("BIGINT", "BIGINT"),
	("VARCHAR", "VARCHAR"),
	("TEXT", "TEXT"),
	("DATETIME", "TIMESTAMP"),
	("TIMESTAMP", "TIMESTAMP"),
	("DECIMAL", "DECIMAL"),
	("TINYINT", "SMALLINT"),
	("SMALLINT", "SMALLINT"),
	("MEDIUMINT", "INTEGER"),
	("FLOAT", "REAL"),
	("DOUBLE", "DOUBLE PRECISION"),
];

const POSTGRESQL_TO_MYSQL: &[(&str, &str)] = &[
	("INTEGER", "INT"),
	("BIGINT", "BIGINT"),
	("VARCHAR", "VARCHAR"),
	("TEXT", "TEXT"),
	("TIMESTAMP", "TIMESTAMP"),
	("DECIMAL", "DECIMAL"),
	("SMALLINT", "SMALLINT"),
	("REAL", "FLOAT"),
	("DOUBLE PRECISION", "DOUBLE"),
];

/// Conversion rules that ship with the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
	MysqlToOracle,
	OracleToMysql,
	MysqlToPostgresql,
	PostgresqlToMysql,
}

impl BuiltinRule {
	pub const ALL: [BuiltinRule; 4] = [
		BuiltinRule::MysqlToOracle,
		BuiltinRule::OracleToMysql,
		BuiltinRule::MysqlToPostgresql,
		BuiltinRule::PostgresqlToMysql,
	];

	pub fn name(&self) -> &'static str {
		match self {
			BuiltinRule::MysqlToOracle => "mysql_to_oracle",
			BuiltinRule::OracleToMysql => "oracle_to_mysql",
			BuiltinRule::MysqlToPostgresql => "mysql_to_postgresql",
			BuiltinRule::PostgresqlToMysql => "postgresql_to_mysql",
		}
	}

	fn pairs(&self) -> &'static [(&'static str, &'static str)] {
		match self {
			BuiltinRule::MysqlToOracle => MYSQL_TO_ORACLE,
			BuiltinRule::OracleToMysql => ORACLE_TO_MYSQL,
			BuiltinRule::MysqlToPostgresql => MYSQL_TO_POSTGRESQL,
			BuiltinRule::PostgresqlToMysql => POSTGRESQL_TO_MYSQL,
		}
	}
}

impl Display for BuiltinRule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for BuiltinRule {
	type Err = Error;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		BuiltinRule::ALL.into_iter().find(|rule| rule.name() == s).ok_or_else(|| Error::UnknownRule(s.to_string()))
	}
}

enum Mapping<'a> {
	Builtin(&'static [(&'static str, &'static str)]),
	Custom(&'a TypeMapping),
}

impl Mapping<'_> {
	fn lookup(&self, source: &str) -> Option<&str> {
		match self {
			Mapping::Builtin(pairs) => {
				pairs.iter().find(|(from, _)| from.eq_ignore_ascii_case(source)).map(|(_, to)| *to)
			}
			Mapping::Custom(mapping) => {
				mapping.iter().find(|(from, _)| from.eq_ignore_ascii_case(source)).map(|(_, to)| to.as_str())
			}
		}
	}

	/// Maps one type string, or `None` when the rule has no entry for it.
	fn apply(&self, data_type: &str) -> Option<String> {
		let head = data_type.split('(').next().unwrap_or(data_type).trim();
		let base = BASE_TYPE.find(data_type).map(|m| m.as_str()).unwrap_or(head);

		let target = self.lookup(head).or_else(|| self.lookup(base))?;

		match modifier(data_type) {
			Some(modifier) if !target.contains('(') => Some(format!("{}({})", target, modifier)),
			_ => Some(target.to_string()),
		}
	}
}

/// Text inside the outermost parentheses of a type, if not empty.
fn modifier(data_type: &str) -> Option<&str> {
	let open = data_type.find('(')?;
	let close = data_type.rfind(')')?;
	if close <= open + 1 {
		return None;
	}
	Some(&data_type[open + 1..close])
}

/// Tables whose field types were rewritten, plus what went unconverted.
#[derive(Debug, Clone, Default)]
pub struct Converted {
	pub tables: Vec<TableInfo>,
	pub diagnostics: Vec<Diagnostic>,
}

/// Rewrites field types between dialects using built-in or registered rules.
#[derive(Debug, Clone, Default)]
pub struct TypeConverter {
	custom: HashMap<String, TypeMapping>,
}

impl TypeConverter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a named mapping. A built-in rule of the same name keeps
	/// precedence.
	pub fn add_rule(&mut self, name: impl Into<String>, mapping: TypeMapping) {
		let name = name.into();
		if name.parse::<BuiltinRule>().is_ok() {
			warn!(rule = %name, "custom rule is shadowed by the built-in rule of the same name");
		}
		self.custom.insert(name, mapping);
	}

	/// Loads rules from a JSON object of the form `{"rule": {"FROM": "TO"}}`
	/// and returns how many were registered.
	pub fn load_rules(&mut self, path: impl AsRef<Path>) -> Result<usize> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|err| Error::read(path, err))?;
		let rules: IndexMap<String, TypeMapping> = serde_json::from_str(&text)?;

		let count = rules.len();
		for (name, mapping) in rules {
			debug!(rule = %name, entries = mapping.len(), "loaded conversion rule");
			self.add_rule(name, mapping);
		}
		Ok(count)
	}

	/// Built-in rule names followed by custom rule names in sorted order.
	pub fn available_rules(&self) -> Vec<String> {
		let mut custom: Vec<String> = self.custom.keys().cloned().collect();
		custom.sort();

		BuiltinRule::ALL.iter().map(|rule| rule.name().to_string()).chain(custom).collect()
	}

	pub fn has_rule(&self, name: &str) -> bool {
		self.mapping(name).is_some()
	}

	fn mapping(&self, rule: &str) -> Option<Mapping<'_>> {
		if let Ok(builtin) = rule.parse::<BuiltinRule>() {
			return Some(Mapping::Builtin(builtin.pairs()));
		}
		self.custom.get(rule).map(Mapping::Custom)
	}

	/// Converts one type string. Unknown rules and unmapped types return the
	/// input unchanged.
	pub fn convert(&self, data_type: &str, rule: &str) -> String {
		self.mapping(rule).and_then(|mapping| mapping.apply(data_type)).unwrap_or_else(|| data_type.to_string())
	}

	/// Like [`convert`](Self::convert) but fails on an unknown rule name.
	pub fn convert_strict(&self, data_type: &str, rule: &str) -> Result<String> {
		let mapping = self.mapping(rule).ok_or_else(|| Error::UnknownRule(rule.to_string()))?;
		Ok(mapping.apply(data_type).unwrap_or_else(|| data_type.to_string()))
	}

	/// Converts the field types of every table. Identity, keys and comments are
	/// carried over untouched.
	#[instrument(name = "transform::convert_tables", level = "debug", skip(self, tables), fields(tables = tables.len()))]
	pub fn convert_tables(&self, tables: &[TableInfo], rule: &str) -> Converted {
		let Some(mapping) = self.mapping(rule) else {
			warn!(rule = %rule, "unknown conversion rule, field types left unchanged");
			return Converted {
				tables: tables.to_vec(),
				diagnostics: vec![unknown_rule(rule, &self.available_rules())],
			};
		};

		let mut changed = 0usize;
		let tables = tables
			.iter()
			.map(|table| {
				let fields = table
					.fields
					.iter()
					.map(|field| match mapping.apply(&field.data_type) {
						Some(data_type) => {
							if data_type != field.data_type {
								changed += 1;
							}
							field.with_type(data_type)
						}
						None => field.clone(),
					})
					.collect();
				table.with_fields(fields)
			})
			.collect();

		debug!(changed, "field types converted");
		Converted {
			tables,
			diagnostics: vec![],
		}
	}
}

#[cfg(test)]
mod tests {
	use metashop_type::FieldInfo;

	use super::*;

	#[test]
	fn test_varchar_to_varchar2() {
		let converter = TypeConverter::new();
		assert_eq!(converter.convert("VARCHAR(255)", "mysql_to_oracle"), "VARCHAR2(255)");
		assert_eq!(converter.convert("varchar(32)", "mysql_to_oracle"), "VARCHAR2(32)");
	}

	#[test]
	fn test_modifier_reattached() {
		let converter = TypeConverter::new();
		assert_eq!(converter.convert("DECIMAL(10,2)", "mysql_to_oracle"), "NUMBER(10,2)");
		assert_eq!(converter.convert("NUMBER(12, 4)", "oracle_to_mysql"), "DECIMAL(12, 4)");
		assert_eq!(converter.convert("TEXT", "mysql_to_oracle"), "CLOB");
	}

	#[test]
	fn test_target_modifier_wins() {
		let converter = TypeConverter::new();
		assert_eq!(converter.convert("INT(11)", "mysql_to_oracle"), "NUMBER(10)");
		assert_eq!(converter.convert("INT", "mysql_to_oracle"), "NUMBER(10)");
	}

	#[test]
	fn test_identifier_base_type() {
		let converter = TypeConverter::new();
		assert_eq!(converter.convert("VARCHAR2(40)", "oracle_to_mysql"), "VARCHAR(40)");
		assert_eq!(converter.convert("BINARY_DOUBLE", "oracle_to_mysql"), "DOUBLE");
	}

	#[test]
	fn test_multi_word_type() {
		let converter = TypeConverter::new();
		assert_eq!(converter.convert("DOUBLE PRECISION", "postgresql_to_mysql"), "DOUBLE");
		assert_eq!(converter.convert("DOUBLE", "mysql_to_postgresql"), "DOUBLE PRECISION");
	}

	#[test]
	fn test_unmapped_type_unchanged() {
		let converter = TypeConverter::new();
		for ty in ["JSON", "BLOB(10)", "GEOMETRY"] {
			let once = converter.convert(ty, "mysql_to_oracle");
			assert_eq!(once, ty);
			assert_eq!(converter.convert(&once, "mysql_to_oracle"), once);
		}
	}

	#[test]
	fn test_unknown_rule_passes_through() {
		let converter = TypeConverter::new();
		assert_eq!(converter.convert("INT", "nope"), "INT");
		assert!(matches!(converter.convert_strict("INT", "nope"), Err(Error::UnknownRule(rule)) if rule == "nope"));
	}

	#[test]
	fn test_custom_rule() {
		let mut converter = TypeConverter::new();
		converter.add_rule("hive", TypeMapping::from([("STRING".to_string(), "VARCHAR".to_string())]));

		assert!(converter.has_rule("hive"));
		assert_eq!(converter.convert("string", "hive"), "VARCHAR");
		assert_eq!(converter.convert_strict("STRING", "hive").unwrap(), "VARCHAR");
	}

	#[test]
	fn test_available_rules_order() {
		let mut converter = TypeConverter::new();
		converter.add_rule("zeta", TypeMapping::new());
		converter.add_rule("alpha", TypeMapping::new());

		assert_eq!(
			converter.available_rules(),
			vec![
				"mysql_to_oracle",
				"oracle_to_mysql",
				"mysql_to_postgresql",
				"postgresql_to_mysql",
				"alpha",
				"zeta"
			]
		);
	}

	#[test]
	fn test_convert_tables() {
		let mut table = TableInfo::new("default", "sales", "orders");
		table.fields = vec![
			FieldInfo::new("id", "INT").not_null(),
			FieldInfo::new("note", "VARCHAR(200)").with_comment("free text"),
		];
		table.primary_keys.insert("id".to_string());
		table.comment = Some("orders".to_string());

		let converted = TypeConverter::new().convert_tables(std::slice::from_ref(&table), "mysql_to_oracle");
		assert!(converted.diagnostics.is_empty());

		let out = &converted.tables[0];
		assert_eq!(out.fields[0].data_type, "NUMBER(10)");
		assert!(!out.fields[0].nullable);
		assert_eq!(out.fields[1].data_type, "VARCHAR2(200)");
		assert_eq!(out.fields[1].comment.as_deref(), Some("free text"));
		assert_eq!(out.primary_keys, table.primary_keys);
		assert_eq!(out.comment, table.comment);
		assert_eq!(table.fields[0].data_type, "INT");
	}

	#[test]
	fn test_convert_tables_unknown_rule() {
		let table = TableInfo::new("default", "s", "t");
		let converted = TypeConverter::new().convert_tables(&[table.clone()], "mysql_to_db2");
		assert_eq!(converted.tables, vec![table]);
		assert_eq!(converted.diagnostics.len(), 1);
		assert_eq!(converted.diagnostics[0].code, "CONVERT_001");
		assert!(converted.diagnostics[0].help.as_deref().unwrap().contains("mysql_to_oracle"));
	}

	#[test]
	fn test_load_rules() {
		let path = std::env::temp_dir().join(format!("metashop-rules-{}.json", std::process::id()));
		fs::write(&path, r#"{"to_sqlite": {"VARCHAR": "TEXT", "DATETIME": "TEXT"}}"#).unwrap();

		let mut converter = TypeConverter::new();
		let loaded = converter.load_rules(&path).unwrap();
		fs::remove_file(&path).unwrap();

		assert_eq!(loaded, 1);
		assert_eq!(converter.convert("VARCHAR(20)", "to_sqlite"), "TEXT(20)");
	}

	#[test]
	fn test_load_rules_invalid_json() {
		let path = std::env::temp_dir().join(format!("metashop-bad-rules-{}.json", std::process::id()));
		fs::write(&path, "[1, 2").unwrap();

		let result = TypeConverter::new().load_rules(&path);
		fs::remove_file(&path).unwrap();

		assert!(matches!(result, Err(Error::Json(_))));
	}
}
