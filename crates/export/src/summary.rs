// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexSet;
use metashop_type::TableInfo;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
	pub schema_count: usize,
	pub table_count: usize,
	pub field_count: usize,
	/// Distinct schemas in first-seen order.
	pub schemas: Vec<String>,
}

pub fn summary(tables: &[TableInfo]) -> Summary {
	let schemas: IndexSet<&str> = tables.iter().map(|t| t.schema.as_str()).collect();

	Summary {
		schema_count: schemas.len(),
		table_count: tables.len(),
		field_count: tables.iter().map(|t| t.fields.len()).sum(),
		schemas: schemas.into_iter().map(str::to_string).collect(),
	}
}

#[cfg(test)]
mod tests {
	use metashop_type::FieldInfo;

	use super::*;

	#[test]
	fn test_summary() {
		let mut a = TableInfo::new("default", "crm", "customers");
		a.fields = vec![FieldInfo::new("id", "INT"), FieldInfo::new("name", "TEXT")];
		let b = TableInfo::new("default", "sales", "orders");
		let c = TableInfo::new("default", "crm", "contacts");

		assert_eq!(
			summary(&[a, b, c]),
			Summary {
				schema_count: 2,
				table_count: 3,
				field_count: 2,
				schemas: vec!["crm".to_string(), "sales".to_string()],
			}
		);
	}
}
