// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, path::Path};

use metashop_type::{Diagnostic, Error, Result, TableInfo};
use tracing::{debug, instrument, warn};

use crate::{
	scan::{is_create_table, statements},
	table::extract,
};

/// Tables extracted from a DDL text, in source order, along with
/// everything that was skipped on the way.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
	pub tables: Vec<TableInfo>,
	pub diagnostics: Vec<Diagnostic>,
}

impl Parsed {
	pub fn is_clean(&self) -> bool {
		self.diagnostics.is_empty()
	}
}

/// Extracts every `CREATE TABLE` statement of `text`.
///
/// Statements of any other kind are ignored. A statement that cannot be read
/// yields a diagnostic instead of a table; the remaining statements are
/// still parsed. Each statement is recognized exactly once.
#[instrument(name = "ddl::parse", level = "debug", skip_all)]
pub fn parse(text: &str) -> Parsed {
	let mut parsed = Parsed::default();

	for statement in statements(text) {
		if !is_create_table(&statement) {
			continue;
		}

		match extract(&statement) {
			Ok(extracted) => {
				debug!(
					table = %extracted.table.key(),
					fields = extracted.table.fields.len(),
					"table parsed"
				);
				parsed.tables.push(extracted.table);
				parsed.diagnostics.extend(extracted.diagnostics);
			}
			Err(diagnostic) => {
				warn!(code = %diagnostic.code, "{}", diagnostic.message);
				parsed.diagnostics.push(diagnostic);
			}
		}
	}

	debug!(tables = parsed.tables.len(), skipped = parsed.diagnostics.len(), "parse finished");
	parsed
}

/// Reads and parses a DDL file. Bytes that are not valid UTF-8 are replaced.
#[instrument(name = "ddl::parse_file", level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Parsed> {
	let path = path.as_ref();
	let bytes = fs::read(path).map_err(|err| Error::read(path, err))?;

	let text = match String::from_utf8(bytes) {
		Ok(text) => text,
		Err(err) => {
			warn!("file is not valid utf-8, replacing invalid bytes");
			String::from_utf8_lossy(err.as_bytes()).into_owned()
		}
	};

	Ok(parse(&text))
}
