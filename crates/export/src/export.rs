// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	collections::HashSet,
	fs,
	path::{Path, PathBuf},
};

use indexmap::IndexMap;
use metashop_type::{Error, Result, TableInfo};
use tracing::{debug, instrument};

use crate::{
	Document, Encoding, ExportConfig, Layout, Partition, Sheet,
	sheet::SheetNames,
	write::{file_stem, write_output},
};

/// Encoded content of one output unit.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
	Table(Sheet),
	Workbook(Vec<Sheet>),
	Document(Document),
}

/// One file of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
	pub name: String,
	pub artifact: Artifact,
}

impl Output {
	/// File name relative to the export directory.
	pub fn file_name(&self) -> String {
		let stem = file_stem(&self.name);
		match self.artifact {
			Artifact::Table(_) => format!("{stem}.csv"),
			Artifact::Workbook(_) => format!("{stem}.xlsx"),
			Artifact::Document(_) => format!("{stem}.json"),
		}
	}
}

/// Flattens tables into outputs. Output order, sheet order and row order all
/// follow the input order. Output names are unique as file names; a name
/// that would collide with an earlier one gets a `_2`, `_3`, ... suffix.
pub fn export(tables: &[TableInfo], encoding: Encoding, partition: Partition) -> Vec<Output> {
	let mut names = OutputNames::default();

	partitions(tables, partition)
		.into_iter()
		.map(|(name, group)| {
			let name = names.next(name);
			let artifact = match encoding {
				Encoding::Csv => Artifact::Table(Sheet::new(name.clone(), layout(partition), group)),
				Encoding::Json => Artifact::Document(Document::new(group)),
				Encoding::Workbook => Artifact::Workbook(workbook(partition, &group)),
			};
			Output {
				name,
				artifact,
			}
		})
		.collect()
}

/// Output names compared the way a case-insensitive file system would see
/// them.
#[derive(Debug, Default)]
struct OutputNames {
	taken: HashSet<String>,
}

impl OutputNames {
	fn next(&mut self, name: String) -> String {
		if self.taken.insert(file_stem(&name).to_lowercase()) {
			return name;
		}

		let mut n = 2usize;
		loop {
			let candidate = format!("{name}_{n}");
			if self.taken.insert(file_stem(&candidate).to_lowercase()) {
				return candidate;
			}
			n += 1;
		}
	}
}

fn layout(partition: Partition) -> Layout {
	match partition {
		Partition::Merged => Layout::Full,
		Partition::BySchema => Layout::Schema,
		Partition::ByTable => Layout::Table,
	}
}

fn partitions(tables: &[TableInfo], partition: Partition) -> Vec<(String, Vec<&TableInfo>)> {
	match partition {
		Partition::Merged => vec![("metadata".to_string(), tables.iter().collect())],
		Partition::BySchema => group_by_schema(tables.iter())
			.into_iter()
			.map(|(schema, group)| (format!("schema_{schema}"), group))
			.collect(),
		Partition::ByTable => {
			tables.iter().map(|table| (format!("table_{}_{}", table.schema, table.table), vec![table])).collect()
		}
	}
}

fn group_by_schema<'a>(tables: impl IntoIterator<Item = &'a TableInfo>) -> IndexMap<&'a str, Vec<&'a TableInfo>> {
	let mut groups: IndexMap<&'a str, Vec<&'a TableInfo>> = IndexMap::new();
	for table in tables {
		groups.entry(table.schema.as_str()).or_default().push(table);
	}
	groups
}

/// A merged workbook holds one sheet per schema; a schema workbook one sheet
/// per table; a table workbook a single sheet.
fn workbook(partition: Partition, group: &[&TableInfo]) -> Vec<Sheet> {
	let mut names = SheetNames::default();

	match partition {
		Partition::Merged => group_by_schema(group.iter().copied())
			.into_iter()
			.map(|(schema, tables)| Sheet::new(names.next(schema), Layout::Schema, tables))
			.collect(),
		Partition::BySchema | Partition::ByTable => group
			.iter()
			.map(|table| Sheet::new(names.next(&table.table), Layout::Table, [*table]))
			.collect(),
	}
}

/// Builds and writes exports according to an [`ExportConfig`].
#[derive(Debug, Clone, Default)]
pub struct Exporter {
	config: ExportConfig,
}

impl Exporter {
	pub fn new(config: ExportConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &ExportConfig {
		&self.config
	}

	pub fn build(&self, tables: &[TableInfo]) -> Vec<Output> {
		export(tables, self.config.encoding, self.config.partition)
	}

	/// Writes every output below `dir`, creating it when missing, and returns
	/// the written paths.
	#[instrument(name = "export::write", level = "debug", skip_all, fields(dir = %dir.as_ref().display(), encoding = %self.config.encoding, partition = %self.config.partition))]
	pub fn write(&self, tables: &[TableInfo], dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
		let dir = dir.as_ref();
		fs::create_dir_all(dir).map_err(|err| Error::write(dir, err))?;

		let mut paths = Vec::new();
		for output in self.build(tables) {
			let path = write_output(dir, &output, &self.config)?;
			debug!(path = %path.display(), "export written");
			paths.push(path);
		}
		Ok(paths)
	}
}

#[cfg(test)]
mod tests {
	use metashop_type::FieldInfo;

	use super::*;

	fn tables() -> Vec<TableInfo> {
		let mut orders = TableInfo::new("default", "sales", "orders");
		orders.fields = vec![FieldInfo::new("id", "INT"), FieldInfo::new("amount", "DECIMAL(10,2)")];
		let mut items = TableInfo::new("default", "sales", "items");
		items.fields = vec![FieldInfo::new("sku", "TEXT")];
		let mut customers = TableInfo::new("default", "crm", "customers");
		customers.fields = vec![FieldInfo::new("id", "BIGINT")];
		vec![orders, items, customers]
	}

	fn names(outputs: &[Output]) -> Vec<&str> {
		outputs.iter().map(|o| o.name.as_str()).collect()
	}

	#[test]
	fn test_output_names() {
		let tables = tables();
		assert_eq!(names(&export(&tables, Encoding::Csv, Partition::Merged)), vec!["metadata"]);
		assert_eq!(names(&export(&tables, Encoding::Csv, Partition::BySchema)), vec!["schema_sales", "schema_crm"]);
		assert_eq!(
			names(&export(&tables, Encoding::Json, Partition::ByTable)),
			vec!["table_sales_orders", "table_sales_items", "table_crm_customers"]
		);
	}

	#[test]
	fn test_merged_csv_rows() {
		let outputs = export(&tables(), Encoding::Csv, Partition::Merged);
		let Artifact::Table(sheet) = &outputs[0].artifact else {
			panic!("expected a table");
		};
		assert_eq!(sheet.rows.len(), 4);
		assert_eq!(sheet.rows[3][..4], ["default", "crm", "customers", "id"]);
		assert_eq!(outputs[0].file_name(), "metadata.csv");
	}

	#[test]
	fn test_merged_workbook_has_sheet_per_schema() {
		let outputs = export(&tables(), Encoding::Workbook, Partition::Merged);
		assert_eq!(outputs.len(), 1);
		assert_eq!(outputs[0].file_name(), "metadata.xlsx");

		let Artifact::Workbook(sheets) = &outputs[0].artifact else {
			panic!("expected a workbook");
		};
		assert_eq!(sheets.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["sales", "crm"]);
		assert_eq!(sheets[0].rows.len(), 3);
		assert_eq!(sheets[0].header[0], "table");
	}

	#[test]
	fn test_schema_workbook_has_sheet_per_table() {
		let outputs = export(&tables(), Encoding::Workbook, Partition::BySchema);
		let Artifact::Workbook(sheets) = &outputs[0].artifact else {
			panic!("expected a workbook");
		};
		assert_eq!(sheets.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["orders", "items"]);
		assert_eq!(sheets[0].header[0], "field");
	}

	#[test]
	fn test_json_document_per_schema() {
		let outputs = export(&tables(), Encoding::Json, Partition::BySchema);
		let Artifact::Document(document) = &outputs[1].artifact else {
			panic!("expected a document");
		};
		assert_eq!(document.metadata.total_tables, 1);
		assert_eq!(document.tables[0].table, "customers");
		assert_eq!(outputs[1].file_name(), "schema_crm.json");
	}

	#[test]
	fn test_colliding_names_are_suffixed() {
		let a = TableInfo::new("default", "a_b", "c");
		let b = TableInfo::new("default", "a", "b_c");
		let c = TableInfo::new("default", "A_B", "C");
		let outputs = export(&[a, b, c], Encoding::Csv, Partition::ByTable);

		assert_eq!(names(&outputs), vec!["table_a_b_c", "table_a_b_c_2", "table_A_B_C_3"]);
		assert_eq!(outputs[1].file_name(), "table_a_b_c_2.csv");
	}

	#[test]
	fn test_schema_names_colliding_after_sanitizing() {
		let a = TableInfo::new("default", "x:y", "t");
		let b = TableInfo::new("default", "x/y", "t");
		let outputs = export(&[a, b], Encoding::Json, Partition::BySchema);

		let files: Vec<String> = outputs.iter().map(Output::file_name).collect();
		assert_eq!(files, vec!["schema_x_y.json", "schema_x_y_2.json"]);
	}

	#[test]
	fn test_empty_input() {
		let outputs = export(&[], Encoding::Csv, Partition::BySchema);
		assert!(outputs.is_empty());

		let outputs = export(&[], Encoding::Json, Partition::Merged);
		let Artifact::Document(document) = &outputs[0].artifact else {
			panic!("expected a document");
		};
		assert_eq!(document.metadata.total_tables, 0);
	}
}
