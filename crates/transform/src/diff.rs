// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use metashop_type::{FieldInfo, TableInfo, TableKey};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
	pub summary: Summary,
	pub details: Vec<TableChanges>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
	pub total_tables: usize,
	pub modified_tables: usize,
	pub added_fields: usize,
	pub modified_fields: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableChanges {
	pub table_name: String,
	pub has_changes: bool,
	pub added_fields: Vec<FieldInfo>,
	pub modified_fields: Vec<FieldChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
	pub field_name: String,
	pub changes: FieldChanges,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldChanges {
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub data_type: Option<Change<String>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nullable: Option<Change<bool>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Change<Option<String>>>,
}

impl FieldChanges {
	pub fn is_empty(&self) -> bool {
		self.data_type.is_none() && self.nullable.is_none() && self.default_value.is_none()
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change<T> {
	pub old: T,
	pub new: T,
}

fn change<T: PartialEq + Clone>(old: &T, new: &T) -> Option<Change<T>> {
	(old != new).then(|| Change {
		old: old.clone(),
		new: new.clone(),
	})
}

/// Compares two versions of the same tables, paired by `schema.table`.
///
/// Tables present only in `original` or only in `modified` are not reported.
/// Field comments are not compared.
pub fn compare(original: &[TableInfo], modified: &[TableInfo]) -> ComparisonReport {
	let modified: IndexMap<TableKey, &TableInfo> = modified.iter().map(|t| (t.key(), t)).collect();
	let original_by_key: IndexMap<TableKey, &TableInfo> = original.iter().map(|t| (t.key(), t)).collect();

	let mut report = ComparisonReport {
		summary: Summary {
			total_tables: original.len(),
			..Summary::default()
		},
		details: vec![],
	};

	for (key, before) in original_by_key {
		let Some(after) = modified.get(&key) else {
			continue;
		};

		let changes = compare_table(&key, before, after);
		if changes.has_changes {
			report.summary.modified_tables += 1;
			report.summary.added_fields += changes.added_fields.len();
			report.summary.modified_fields += changes.modified_fields.len();
			report.details.push(changes);
		}
	}

	report
}

fn compare_table(key: &TableKey, before: &TableInfo, after: &TableInfo) -> TableChanges {
	let before: IndexMap<&str, &FieldInfo> = before.fields.iter().map(|f| (f.name.as_str(), f)).collect();
	let after: IndexMap<&str, &FieldInfo> = after.fields.iter().map(|f| (f.name.as_str(), f)).collect();

	let mut added_fields = Vec::new();
	let mut modified_fields = Vec::new();

	for (name, field) in &after {
		let Some(old) = before.get(name) else {
			added_fields.push((*field).clone());
			continue;
		};

		let changes = FieldChanges {
			data_type: change(&old.data_type, &field.data_type),
			nullable: change(&old.nullable, &field.nullable),
			default_value: change(&old.default_value, &field.default_value),
		};
		if !changes.is_empty() {
			modified_fields.push(FieldChange {
				field_name: name.to_string(),
				changes,
			});
		}
	}

	TableChanges {
		table_name: key.to_string(),
		has_changes: !added_fields.is_empty() || !modified_fields.is_empty(),
		added_fields,
		modified_fields,
	}
}
