// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, path::Path};

use chrono::{Local, NaiveDateTime};
use metashop_type::{Error, Result, TableInfo};
use tracing::{debug, instrument};

use crate::SqlGenerator;

const RULE: &str = "-- ========================================";

/// Assembles a complete SQL file: a banner followed by the DROP, CREATE and
/// inspection sections that are enabled.
#[derive(Debug, Clone)]
pub struct Script<'a> {
	generator: &'a SqlGenerator,
	title: String,
	drop: bool,
	create: bool,
	statistics: bool,
	structure: bool,
	generated_at: NaiveDateTime,
}

impl<'a> Script<'a> {
	pub fn new(generator: &'a SqlGenerator) -> Self {
		Self {
			generator,
			title: "metashop generated SQL script".to_string(),
			drop: true,
			create: true,
			statistics: false,
			structure: false,
			generated_at: Local::now().naive_local(),
		}
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	pub fn drop(mut self, enabled: bool) -> Self {
		self.drop = enabled;
		self
	}

	pub fn create(mut self, enabled: bool) -> Self {
		self.create = enabled;
		self
	}

	pub fn statistics(mut self, enabled: bool) -> Self {
		self.statistics = enabled;
		self
	}

	pub fn structure(mut self, enabled: bool) -> Self {
		self.structure = enabled;
		self
	}

	pub fn generated_at(mut self, at: NaiveDateTime) -> Self {
		self.generated_at = at;
		self
	}

	pub fn lines(&self, tables: &[TableInfo]) -> Vec<String> {
		let mut lines = vec![
			RULE.to_string(),
			format!("-- {}", self.title),
			format!("-- generated at: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S")),
			format!("-- dialect: {}", self.generator.dialect()),
			format!("-- tables: {}", tables.len()),
			RULE.to_string(),
			String::new(),
		];

		if self.drop {
			section(&mut lines, "DROP TABLE statements", self.generator.drop_tables(tables));
		}
		if self.create {
			section(&mut lines, "CREATE TABLE statements", self.generator.create_tables(tables));
		}
		if self.statistics {
			section(&mut lines, "table statistics", self.generator.statistics(tables));
		}
		if self.structure {
			section(&mut lines, "table structure", self.generator.structure(tables));
		}

		lines
	}

	/// The script text, every line terminated by `\n`.
	pub fn render(&self, tables: &[TableInfo]) -> String {
		self.lines(tables).iter().map(|line| format!("{line}\n")).collect()
	}

	#[instrument(name = "sql::script::write", level = "debug", skip_all, fields(path = %path.as_ref().display()))]
	pub fn write(&self, tables: &[TableInfo], path: impl AsRef<Path>) -> Result<()> {
		let path = path.as_ref();
		let text = self.render(tables);
		fs::write(path, &text).map_err(|err| Error::write(path, err))?;
		debug!(bytes = text.len(), tables = tables.len(), "script written");
		Ok(())
	}
}

fn section(lines: &mut Vec<String>, title: &str, body: Vec<String>) {
	lines.push(RULE.to_string());
	lines.push(format!("-- {title}"));
	lines.push(RULE.to_string());
	lines.push(String::new());
	lines.extend(body);
	lines.push(String::new());
}
