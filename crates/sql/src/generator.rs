// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_type::{Dialect, TableInfo};
use tracing::{debug, instrument, warn};

use crate::{
	GeneratorConfig, MigrateOptions,
	emit::{emit_create_table, emit_drop_table, emit_header, emit_statistics, emit_structure},
	migrate::{emit_insert_select, pair_tables},
};

/// Produces SQL text, one line per element, for a target dialect.
#[derive(Debug, Clone, Default)]
pub struct SqlGenerator {
	config: GeneratorConfig,
}

impl SqlGenerator {
	pub fn new(config: GeneratorConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn with_dialect(dialect: Dialect) -> Self {
		Self::new(GeneratorConfig::new().dialect(dialect))
	}

	pub fn config(&self) -> &GeneratorConfig {
		&self.config
	}

	pub fn dialect(&self) -> Dialect {
		self.config.dialect
	}

	pub fn set_dialect(&mut self, dialect: Dialect) {
		self.config.dialect = dialect;
	}

	/// The bare `DROP TABLE` statement for one table.
	pub fn drop_statement(&self, table: &TableInfo) -> String {
		emit_drop_table(&self.config, table)
	}

	pub fn drop_tables(&self, tables: &[TableInfo]) -> Vec<String> {
		self.per_table(tables, "drop table", |table| vec![emit_drop_table(&self.config, table)])
	}

	pub fn create_table(&self, table: &TableInfo) -> Vec<String> {
		emit_create_table(&self.config, table)
	}

	pub fn create_tables(&self, tables: &[TableInfo]) -> Vec<String> {
		self.per_table(tables, "create table", |table| emit_create_table(&self.config, table))
	}

	/// Copies rows from each source table into the target table with the same
	/// `schema.table`. Targets without a source or without fields are skipped.
	#[instrument(name = "sql::insert_select", level = "debug", skip_all, fields(sources = sources.len(), targets = targets.len()))]
	pub fn insert_select(&self, sources: &[TableInfo], targets: &[TableInfo], options: &MigrateOptions) -> Vec<String> {
		let pairs = pair_tables(sources, targets);
		debug!(pairs = pairs.len(), "paired tables");

		let mut lines = Vec::new();
		for (source, target) in pairs {
			if target.fields.is_empty() {
				warn!(table = %target.key(), "target table has no fields, skipped");
				continue;
			}

			if self.config.comments {
				lines.push(format!(
					"-- migrate data from {}.{} to {}.{}",
					source.schema, source.table, target.schema, target.table
				));
			}

			let renames = options.mapping.get(&target.key());
			lines.extend(emit_insert_select(source, target, options.coalesce, renames));

			if self.config.comments {
				lines.push(String::new());
			}
		}
		lines
	}

	pub fn statistics(&self, tables: &[TableInfo]) -> Vec<String> {
		self.per_table(tables, "count rows of table", |table| vec![emit_statistics(table)])
	}

	pub fn structure(&self, tables: &[TableInfo]) -> Vec<String> {
		self.per_table(tables, "describe table", |table| vec![emit_structure(self.config.dialect, table)])
	}

	fn per_table(
		&self,
		tables: &[TableInfo],
		action: &str,
		emit: impl Fn(&TableInfo) -> Vec<String>,
	) -> Vec<String> {
		let mut lines = Vec::new();
		for table in tables {
			if self.config.comments {
				lines.push(emit_header(action, table));
			}
			lines.extend(emit(table));
			if self.config.comments {
				lines.push(String::new());
			}
		}
		lines
	}
}

#[cfg(test)]
mod tests {
	use metashop_type::FieldInfo;

	use super::*;

	fn orders() -> TableInfo {
		let mut table = TableInfo::new("default", "sales", "orders");
		table.fields = vec![FieldInfo::new("order_id", "INT").not_null()];
		table.primary_keys.insert("order_id".to_string());
		table
	}

	#[test]
	fn test_drop_statement_oracle() {
		let generator = SqlGenerator::with_dialect(Dialect::Oracle);
		assert_eq!(generator.drop_statement(&orders()), "DROP TABLE sales.orders;");
	}

	#[test]
	fn test_drop_tables_with_headers() {
		let mut table = orders();
		table.comment = Some("all orders".to_string());

		assert_eq!(
			SqlGenerator::default().drop_tables(&[table]),
			vec!["-- drop table: orders (all orders)", "DROP TABLE IF EXISTS sales.orders;", ""]
		);
	}

	#[test]
	fn test_without_headers() {
		let generator = SqlGenerator::new(GeneratorConfig::new().comments(false));
		assert_eq!(generator.drop_tables(&[orders(), orders()]).len(), 2);
		assert_eq!(generator.statistics(&[orders()]), vec!["SELECT COUNT(*) AS record_count FROM sales.orders;"]);
	}

	#[test]
	fn test_create_tables() {
		assert_eq!(
			SqlGenerator::default().create_tables(&[orders()]),
			vec![
				"-- create table: orders",
				"CREATE TABLE IF NOT EXISTS sales.orders (",
				"    order_id INT NOT NULL,",
				"    PRIMARY KEY (order_id)",
				");",
				"",
			]
		);
	}

	#[test]
	fn test_set_dialect() {
		let mut generator = SqlGenerator::default();
		generator.set_dialect(Dialect::Sqlserver);
		assert_eq!(generator.dialect(), Dialect::Sqlserver);
		assert_eq!(generator.structure(&[orders()]), vec!["-- describe table: orders", "SP_HELP 'sales.orders';", ""]);
	}

	#[test]
	fn test_insert_select() {
		let source = orders();
		let mut target = orders();
		target.fields.push(FieldInfo::new("status", "VARCHAR(8)"));

		let options = MigrateOptions::new().coalesce(true);
		assert_eq!(
			SqlGenerator::default().insert_select(&[source], &[target], &options),
			vec![
				"-- migrate data from sales.orders to sales.orders",
				"INSERT INTO sales.orders",
				"(order_id, status)",
				"SELECT",
				"    CASE WHEN order_id IS NULL THEN 0 ELSE order_id END AS order_id,",
				"    NULL AS status",
				"FROM sales.orders;",
				"",
			]
		);
	}

	#[test]
	fn test_insert_select_skips_empty_target() {
		let source = orders();
		let mut target = TableInfo::new("default", "sales", "orders");
		target.comment = Some("no columns yet".to_string());

		let generator = SqlGenerator::default();
		assert!(generator.insert_select(&[source.clone()], &[target], &MigrateOptions::new()).is_empty());

		let empty = TableInfo::new("default", "crm", "customers");
		let mut customers = TableInfo::new("default", "crm", "customers");
		customers.fields = vec![FieldInfo::new("id", "INT")];
		let lines = generator.insert_select(&[source.clone(), empty], &[customers, source], &MigrateOptions::new());
		assert_eq!(lines[0], "-- migrate data from crm.customers to crm.customers");
		assert_eq!(lines[4], "    NULL AS id");
	}

	#[test]
	fn test_insert_select_with_rename() {
		let mut source = TableInfo::new("default", "sales", "orders");
		source.fields = vec![FieldInfo::new("amt", "DECIMAL(10,2)")];
		let mut target = TableInfo::new("default", "sales", "orders");
		target.fields = vec![FieldInfo::new("amount", "DECIMAL(10,2)")];

		let options = MigrateOptions::new().rename(target.key(), "amount", "amt");
		let lines = SqlGenerator::default().insert_select(&[source], &[target], &options);
		assert_eq!(lines[4], "    amt AS amount");
	}
}
