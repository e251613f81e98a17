// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeSet;

use metashop_type::{DEFAULT_NAMESPACE, Diagnostic, TableInfo, TableKey, diagnostic::parse as diag};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::{
	field::{is_constraint, mask_literals, parse_field, read_literal},
	split::split_clauses,
};

const CREATE_PREFIX: &str =
	r"(?is)^\s*CREATE\s+(?:OR\s+REPLACE\s+)?(?:TEMP(?:ORARY)?\s+)?TABLE\s+(?:IF\s+NOT\s+EXISTS\s+)?";
const IDENT: &str = r#"([`"]?\w+[`"]?)"#;

static THREE_PART: Lazy<Regex> =
	Lazy::new(|| Regex::new(&format!(r"{CREATE_PREFIX}{IDENT}\.{IDENT}\.{IDENT}")).unwrap());
static TWO_PART: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{CREATE_PREFIX}{IDENT}\.{IDENT}")).unwrap());
static ONE_PART: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{CREATE_PREFIX}{IDENT}")).unwrap());

static BLOCK_TRAILER: Lazy<Regex> = Lazy::new(|| {
	Regex::new(
		r"(?i)^(?:ENGINE|DISTSTYLE|DISTKEY|SORTKEY|COMPOUND|INTERLEAVED|COMMENT|WITH|PARTITION|TABLESPACE|DEFAULT|AUTO_INCREMENT|CHARSET)\b",
	)
	.unwrap()
});

static KEY_LIST: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\bPRIMARY\s+KEY\s*(?:(?:NONCLUSTERED|CLUSTERED)\s*)?\(([^)]*)\)").unwrap()
});
static BARE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)^PRIMARY\s+KEY\s+([`"]?\w+[`"]?)$"#).unwrap());
static TABLE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\bCOMMENT\s*=?\s*['"]"#).unwrap());

/// A table together with the clause level diagnostics raised while
/// extracting it.
#[derive(Debug, Clone)]
pub(crate) struct Extracted {
	pub table: TableInfo,
	pub diagnostics: Vec<Diagnostic>,
}

struct Identity {
	database: String,
	schema: String,
	table: String,
	end: usize,
}

/// Extracts one table from a single `CREATE TABLE` statement.
///
/// Fails when the statement has no recognizable table name or no column
/// block. Column clauses that cannot be read are dropped from the table.
pub fn parse_table(statement: &str) -> Result<TableInfo, Diagnostic> {
	extract(statement).map(|extracted| extracted.table)
}

pub(crate) fn extract(statement: &str) -> Result<Extracted, Diagnostic> {
	let identity = identity(statement).ok_or_else(|| diag::missing_identity(statement))?;
	let name = TableKey::new(&identity.schema, &identity.table).to_string();

	let (open, close) =
		field_block(statement, identity.end).ok_or_else(|| diag::missing_field_block(&name, statement))?;
	let block = &statement[open + 1..close];

	let mut table = TableInfo::new(identity.database, identity.schema, identity.table);
	let mut diagnostics = Vec::new();
	let mut inline_keys = Vec::new();
	let clauses = split_clauses(block);

	for clause in &clauses {
		if is_constraint(clause) {
			if let Some(key) = BARE_KEY.captures(clause) {
				inline_keys.push(unquote(&key[1]));
			}
			continue;
		}

		match parse_field(clause) {
			Some(parsed) => {
				if parsed.primary_key {
					inline_keys.push(parsed.field.name.clone());
				}
				table.fields.push(parsed.field);
			}
			None => {
				warn!(table = %name, clause = %clause, "column clause skipped");
				diagnostics.push(diag::malformed_field(&name, clause));
			}
		}
	}

	table.primary_keys = primary_keys(block, inline_keys);
	table.comment = table_comment(&statement[close + 1..]);

	Ok(Extracted {
		table,
		diagnostics,
	})
}

fn identity(statement: &str) -> Option<Identity> {
	if let Some(c) = THREE_PART.captures(statement) {
		return Some(Identity {
			database: unquote(&c[1]),
			schema: unquote(&c[2]),
			table: unquote(&c[3]),
			end: c.get(0)?.end(),
		});
	}
	if let Some(c) = TWO_PART.captures(statement) {
		return Some(Identity {
			database: DEFAULT_NAMESPACE.to_string(),
			schema: unquote(&c[1]),
			table: unquote(&c[2]),
			end: c.get(0)?.end(),
		});
	}
	let c = ONE_PART.captures(statement)?;
	Some(Identity {
		database: DEFAULT_NAMESPACE.to_string(),
		schema: DEFAULT_NAMESPACE.to_string(),
		table: unquote(&c[1]),
		end: c.get(0)?.end(),
	})
}

/// Locates the column block: the first top level parenthesized group after
/// `from` that is followed by the end of the statement or a table option.
/// Returns the byte offsets of its opening and closing parenthesis.
fn field_block(statement: &str, from: usize) -> Option<(usize, usize)> {
	let mut depth = 0usize;
	let mut open = None;
	let mut quote: Option<char> = None;

	for (offset, c) in statement[from..].char_indices() {
		let idx = from + offset;

		if let Some(q) = quote {
			if c == q {
				quote = None;
			}
			continue;
		}

		match c {
			'\'' | '"' | '`' => quote = Some(c),
			'(' => {
				if depth == 0 {
					open = Some(idx);
				}
				depth += 1;
			}
			')' if depth > 0 => {
				depth -= 1;
				if depth == 0 {
					let start = open.take()?;
					if ends_block(&statement[idx + 1..]) {
						return Some((start, idx));
					}
				}
			}
			_ => {}
		}
	}
	None
}

fn ends_block(trailer: &str) -> bool {
	let trailer = trailer.trim_matches(|c: char| c == ';' || c.is_whitespace());
	trailer.is_empty() || BLOCK_TRAILER.is_match(trailer)
}

fn primary_keys(block: &str, inline: Vec<String>) -> BTreeSet<String> {
	let masked = mask_literals(block);
	let mut keys: BTreeSet<String> = inline.into_iter().collect();

	for captures in KEY_LIST.captures_iter(&masked) {
		let Some(list) = captures.get(1) else {
			continue;
		};
		for column in block[list.start()..list.end()].split(',') {
			if let Some(name) = column.split_whitespace().next() {
				let name = unquote(name.split('(').next().unwrap_or(name));
				if !name.is_empty() {
					keys.insert(name);
				}
			}
		}
	}
	keys
}

fn table_comment(trailer: &str) -> Option<String> {
	let masked = mask_literals(trailer);
	let found = TABLE_COMMENT.find(&masked)?;
	read_literal(trailer, found.end() - 1).map(|(text, _)| text)
}

fn unquote(ident: &str) -> String {
	ident.trim_matches(|c| c == '`' || c == '"' || c == '[' || c == ']').to_string()
}
