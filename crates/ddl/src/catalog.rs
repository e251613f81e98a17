// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use metashop_type::{TableInfo, TableKey};

use crate::Parsed;

/// An ordered collection of parsed tables with schema level lookups.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	tables: Vec<TableInfo>,
}

impl Catalog {
	pub fn new(tables: Vec<TableInfo>) -> Self {
		Self {
			tables,
		}
	}

	pub fn tables(&self) -> &[TableInfo] {
		&self.tables
	}

	pub fn into_tables(self) -> Vec<TableInfo> {
		self.tables
	}

	/// Tables grouped by schema, schemas in first-seen order.
	pub fn by_schema(&self) -> IndexMap<&str, Vec<&TableInfo>> {
		let mut groups: IndexMap<&str, Vec<&TableInfo>> = IndexMap::new();
		for table in &self.tables {
			groups.entry(table.schema.as_str()).or_default().push(table);
		}
		groups
	}

	pub fn schemas(&self) -> Vec<&str> {
		self.by_schema().into_keys().collect()
	}

	pub fn table_count(&self) -> usize {
		self.tables.len()
	}

	pub fn field_count(&self) -> usize {
		self.tables.iter().map(|t| t.fields.len()).sum()
	}

	/// First table registered under `key`.
	pub fn find(&self, key: &TableKey) -> Option<&TableInfo> {
		self.tables.iter().find(|t| t.schema == key.schema && t.table == key.table)
	}
}

impl From<Parsed> for Catalog {
	fn from(parsed: Parsed) -> Self {
		Self::new(parsed.tables)
	}
}
