// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use once_cell::sync::Lazy;
use regex::Regex;

static CREATE_TABLE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)^\s*CREATE\s+(?:OR\s+REPLACE\s+)?(?:TEMP(?:ORARY)?\s+)?TABLE\b").unwrap());

/// Cuts SQL text into statements on `;` outside of quoted text.
///
/// Line comments (`-- ...`) and block comments (`/* ... */`) outside of
/// quotes are replaced by a single space. Each returned statement is trimmed
/// and keeps no terminating `;`. Empty statements are dropped.
pub fn statements(text: &str) -> Vec<String> {
	let chars: Vec<char> = text.chars().collect();
	let len = chars.len();
	let mut statements = Vec::new();
	let mut current = String::new();
	let mut quote: Option<char> = None;
	let mut i = 0;

	while i < len {
		let c = chars[i];

		if let Some(q) = quote {
			if c == q {
				quote = None;
			}
			current.push(c);
			i += 1;
			continue;
		}

		// Skip line comments (-- ...)
		if c == '-' && i + 1 < len && chars[i + 1] == '-' {
			while i < len && chars[i] != '\n' {
				i += 1;
			}
			current.push(' ');
			continue;
		}

		// Skip block comments (/* ... */)
		if c == '/' && i + 1 < len && chars[i + 1] == '*' {
			i += 2;
			while i < len && !(chars[i] == '*' && i + 1 < len && chars[i + 1] == '/') {
				i += 1;
			}
			i = (i + 2).min(len);
			current.push(' ');
			continue;
		}

		match c {
			'\'' | '"' | '`' => {
				quote = Some(c);
				current.push(c);
			}
			';' => {
				push_statement(&mut statements, &current);
				current.clear();
			}
			_ => current.push(c),
		}
		i += 1;
	}

	push_statement(&mut statements, &current);
	statements
}

fn push_statement(statements: &mut Vec<String>, current: &str) {
	let trimmed = current.trim();
	if !trimmed.is_empty() {
		statements.push(trimmed.to_string());
	}
}

/// Whether a statement opens with `CREATE [OR REPLACE] [TEMPORARY] TABLE`.
pub fn is_create_table(statement: &str) -> bool {
	CREATE_TABLE.is_match(statement)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_on_semicolon() {
		let stmts = statements("CREATE TABLE a (x INT); CREATE TABLE b (y INT);");
		assert_eq!(stmts, vec!["CREATE TABLE a (x INT)", "CREATE TABLE b (y INT)"]);
	}

	#[test]
	fn test_semicolon_inside_quotes() {
		let stmts = statements("CREATE TABLE a (x INT COMMENT 'a;b'); SELECT 1");
		assert_eq!(stmts, vec!["CREATE TABLE a (x INT COMMENT 'a;b')", "SELECT 1"]);
	}

	#[test]
	fn test_comments_removed() {
		let stmts = statements("-- header; still comment\nCREATE TABLE a (/* id; */ x INT);");
		assert_eq!(stmts.len(), 1);
		assert!(stmts[0].starts_with("CREATE TABLE a"));
		assert!(!stmts[0].contains("id;"));
	}

	#[test]
	fn test_trailing_statement_without_semicolon() {
		let stmts = statements("CREATE TABLE a (x INT);\n\nCREATE TABLE b (y INT)\n");
		assert_eq!(stmts.len(), 2);
		assert_eq!(stmts[1], "CREATE TABLE b (y INT)");
	}

	#[test]
	fn test_unterminated_block_comment() {
		let stmts = statements("CREATE TABLE a (x INT); /* open");
		assert_eq!(stmts, vec!["CREATE TABLE a (x INT)"]);
	}

	#[test]
	fn test_is_create_table() {
		assert!(is_create_table("CREATE TABLE t (a INT)"));
		assert!(is_create_table("create or replace table t (a INT)"));
		assert!(is_create_table("CREATE TEMPORARY TABLE t (a INT)"));
		assert!(is_create_table("  CREATE\n TABLE IF NOT EXISTS t (a INT)"));
		assert!(!is_create_table("CREATE VIEW v AS SELECT 1"));
		assert!(!is_create_table("CREATE TABLESPACE ts"));
		assert!(!is_create_table("DROP TABLE t"));
	}
}
