// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Target SQL dialect for generated statements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
	#[default]
	Mysql,
	Oracle,
	Postgresql,
	Sqlserver,
}

/// Where a dialect expects column and table comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
	/// `col INT COMMENT 'text'` inside the column definition.
	Inline,
	/// `COMMENT ON COLUMN t.col IS 'text';` after the table is created.
	Separate,
	/// Comments are dropped.
	Unsupported,
}

impl Dialect {
	pub const ALL: [Dialect; 4] = [Dialect::Mysql, Dialect::Oracle, Dialect::Postgresql, Dialect::Sqlserver];

	pub fn name(&self) -> &'static str {
		match self {
			Dialect::Mysql => "mysql",
			Dialect::Oracle => "oracle",
			Dialect::Postgresql => "postgresql",
			Dialect::Sqlserver => "sqlserver",
		}
	}

	/// Whether `DROP TABLE IF EXISTS` / `CREATE TABLE IF NOT EXISTS` are emitted.
	pub fn supports_if_exists(&self) -> bool {
		matches!(self, Dialect::Mysql | Dialect::Postgresql)
	}

	pub fn comment_style(&self) -> CommentStyle {
		match self {
			Dialect::Mysql => CommentStyle::Inline,
			Dialect::Oracle | Dialect::Postgresql => CommentStyle::Separate,
			Dialect::Sqlserver => CommentStyle::Unsupported,
		}
	}
}

impl Display for Dialect {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Dialect {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"mysql" => Ok(Dialect::Mysql),
			"oracle" => Ok(Dialect::Oracle),
			"postgresql" | "postgres" | "pg" => Ok(Dialect::Postgresql),
			"sqlserver" | "mssql" => Ok(Dialect::Sqlserver),
			_ => Err(Error::UnknownDialect(s.to_string())),
		}
	}
}
