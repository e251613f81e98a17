// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::BTreeSet,
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Placeholder used for a database or schema the DDL did not name.
pub const DEFAULT_NAMESPACE: &str = "default";

/// A single column as it was declared in a `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
	pub name: String,
	/// Raw type text, including any `(precision, scale)` suffix.
	#[serde(rename = "type")]
	pub data_type: String,
	#[serde(default = "nullable_by_default")]
	pub nullable: bool,
	#[serde(default)]
	pub default_value: Option<String>,
	#[serde(default)]
	pub comment: Option<String>,
}

fn nullable_by_default() -> bool {
	true
}

impl FieldInfo {
	pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			data_type: data_type.into(),
			nullable: true,
			default_value: None,
			comment: None,
		}
	}

	pub fn not_null(mut self) -> Self {
		self.nullable = false;
		self
	}

	pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
		self.default_value = Some(default_value.into());
		self
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}

	/// Returns a copy of this field carrying a different type.
	pub fn with_type(&self, data_type: impl Into<String>) -> Self {
		Self {
			data_type: data_type.into(),
			..self.clone()
		}
	}
}

/// Table metadata extracted from one `CREATE TABLE` statement.
///
/// Field order follows the declaration order of the source DDL. Primary keys
/// are kept as a sorted set; the declaration order of a composite key is not
/// retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
	pub database: String,
	pub schema: String,
	pub table: String,
	pub fields: Vec<FieldInfo>,
	pub primary_keys: BTreeSet<String>,
	pub comment: Option<String>,
}

impl TableInfo {
	pub fn new(database: impl Into<String>, schema: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			database: database.into(),
			schema: schema.into(),
			table: table.into(),
			fields: Vec::new(),
			primary_keys: BTreeSet::new(),
			comment: None,
		}
	}

	pub fn key(&self) -> TableKey {
		TableKey::new(self.schema.clone(), self.table.clone())
	}

	pub fn field(&self, name: &str) -> Option<&FieldInfo> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn is_primary_key(&self, name: &str) -> bool {
		self.primary_keys.contains(name)
	}

	/// Copy of this table with its field list replaced.
	pub fn with_fields(&self, fields: Vec<FieldInfo>) -> Self {
		Self {
			database: self.database.clone(),
			schema: self.schema.clone(),
			table: self.table.clone(),
			fields,
			primary_keys: self.primary_keys.clone(),
			comment: self.comment.clone(),
		}
	}

	pub fn has_database(&self) -> bool {
		is_named(&self.database)
	}

	pub fn has_schema(&self) -> bool {
		is_named(&self.schema)
	}
}

fn is_named(part: &str) -> bool {
	!part.is_empty() && part != DEFAULT_NAMESPACE
}

/// Identity of a table across parse results: `(schema, table)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableKey {
	pub schema: String,
	pub table: String,
}

impl TableKey {
	pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			table: table.into(),
		}
	}
}

impl Display for TableKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}", self.schema, self.table)
	}
}

impl FromStr for TableKey {
	type Err = Error;

	/// Accepts `schema.table` or a bare `table`, which lands in the
	/// default schema.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err(Error::InvalidTableKey(s.to_string()));
		}
		match s.split_once('.') {
			Some((schema, table)) if !schema.is_empty() && !table.is_empty() && !table.contains('.') => {
				Ok(TableKey::new(schema, table))
			}
			Some(_) => Err(Error::InvalidTableKey(s.to_string())),
			None => Ok(TableKey::new(DEFAULT_NAMESPACE, s)),
		}
	}
}
