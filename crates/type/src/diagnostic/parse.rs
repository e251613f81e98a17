// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, snippet};

/// The statement starts like `CREATE TABLE` but no table name follows.
pub fn missing_identity(statement: &str) -> Diagnostic {
	Diagnostic {
		code: "PARSE_001".to_string(),
		statement: Some(snippet(statement)),
		message: "statement skipped: no table name found".to_string(),
		label: Some("expected `CREATE TABLE [schema.]name`".to_string()),
		help: Some("qualify the table as `table`, `schema.table` or `database.schema.table`".to_string()),
		notes: vec![],
	}
}

/// No parenthesized column list ends the statement or precedes a table option.
pub fn missing_field_block(table: &str, statement: &str) -> Diagnostic {
	Diagnostic {
		code: "PARSE_002".to_string(),
		statement: Some(snippet(statement)),
		message: format!("table `{}` skipped: no column definition block found", table),
		label: Some("expected `( column definitions )`".to_string()),
		help: Some("check that every opening parenthesis is closed before the end of the statement".to_string()),
		notes: vec![
			"a column block must be followed by ENGINE, DISTSTYLE, COMMENT, WITH, PARTITION or the end of the statement"
				.to_string(),
		],
	}
}

/// A column clause whose leading tokens are not `name type`.
pub fn malformed_field(table: &str, clause: &str) -> Diagnostic {
	Diagnostic {
		code: "PARSE_003".to_string(),
		statement: Some(snippet(clause)),
		message: format!("column clause in `{}` skipped: expected `name type`", table),
		label: None,
		help: None,
		notes: vec![],
	}
}
