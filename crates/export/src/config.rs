// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	str::FromStr,
};

use metashop_type::Error;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
	/// One flat table per output.
	#[default]
	Csv,
	/// Named sheets per output, written as an `.xlsx` workbook.
	Workbook,
	/// A nested JSON document per output.
	Json,
}

impl Encoding {
	pub fn name(&self) -> &'static str {
		match self {
			Encoding::Csv => "csv",
			Encoding::Workbook => "workbook",
			Encoding::Json => "json",
		}
	}
}

impl Display for Encoding {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Encoding {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"csv" => Ok(Encoding::Csv),
			"workbook" | "excel" | "xlsx" => Ok(Encoding::Workbook),
			"json" => Ok(Encoding::Json),
			_ => Err(Error::Unsupported {
				kind: "export format",
				value: s.to_string(),
			}),
		}
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
	/// Everything in a single output.
	#[default]
	Merged,
	/// One output per schema.
	BySchema,
	/// One output per table.
	ByTable,
}

impl Partition {
	pub fn name(&self) -> &'static str {
		match self {
			Partition::Merged => "merged",
			Partition::BySchema => "schema",
			Partition::ByTable => "table",
		}
	}
}

impl Display for Partition {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Partition {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"merged" | "all" => Ok(Partition::Merged),
			"schema" | "by_schema" => Ok(Partition::BySchema),
			"table" | "by_table" => Ok(Partition::ByTable),
			_ => Err(Error::Unsupported {
				kind: "partition",
				value: s.to_string(),
			}),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportConfig {
	pub encoding: Encoding,
	pub partition: Partition,
	/// Prefix CSV files with a UTF-8 byte order mark.
	pub bom: bool,
	pub pretty: bool,
}

impl Default for ExportConfig {
	fn default() -> Self {
		Self {
			encoding: Encoding::Csv,
			partition: Partition::Merged,
			bom: true,
			pretty: true,
		}
	}
}

impl ExportConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn encoding(mut self, encoding: Encoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub fn partition(mut self, partition: Partition) -> Self {
		self.partition = partition;
		self
	}

	pub fn bom(mut self, enabled: bool) -> Self {
		self.bom = enabled;
		self
	}

	pub fn pretty(mut self, enabled: bool) -> Self {
		self.pretty = enabled;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_names() {
		assert_eq!("CSV".parse::<Encoding>().unwrap(), Encoding::Csv);
		assert_eq!("excel".parse::<Encoding>().unwrap(), Encoding::Workbook);
		assert_eq!("table".parse::<Partition>().unwrap(), Partition::ByTable);
		assert!("xml".parse::<Encoding>().is_err());
		assert!("rows".parse::<Partition>().is_err());
	}

	#[test]
	fn test_builder() {
		let config = ExportConfig::new().encoding(Encoding::Json).partition(Partition::BySchema).bom(false);
		assert_eq!(config.encoding, Encoding::Json);
		assert_eq!(config.partition, Partition::BySchema);
		assert!(!config.bom);
		assert!(config.pretty);
	}
}
