// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_type::{FieldInfo, TableInfo};
use serde::Serialize;

/// Nested JSON form of a set of tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
	pub metadata: DocumentMetadata,
	pub tables: Vec<DocumentTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetadata {
	pub total_tables: usize,
	pub total_fields: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTable {
	pub database: String,
	pub schema: String,
	pub table: String,
	pub comment: Option<String>,
	pub primary_keys: Vec<String>,
	pub fields: Vec<FieldInfo>,
}

impl Document {
	pub fn new<'a>(tables: impl IntoIterator<Item = &'a TableInfo>) -> Self {
		let tables: Vec<DocumentTable> = tables.into_iter().map(DocumentTable::from).collect();

		Self {
			metadata: DocumentMetadata {
				total_tables: tables.len(),
				total_fields: tables.iter().map(|t| t.fields.len()).sum(),
			},
			tables,
		}
	}
}

impl From<&TableInfo> for DocumentTable {
	fn from(table: &TableInfo) -> Self {
		Self {
			database: table.database.clone(),
			schema: table.schema.clone(),
			table: table.table.clone(),
			comment: table.comment.clone(),
			primary_keys: table.primary_keys.iter().cloned().collect(),
			fields: table.fields.clone(),
		}
	}
}
