// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_type::FieldInfo;
use once_cell::sync::Lazy;
use regex::Regex;

static NOT_NULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap());
static DEFAULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bDEFAULT\s+").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\bCOMMENT\s*=?\s*['"]"#).unwrap());
static INLINE_PRIMARY_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bPRIMARY\s+KEY\b").unwrap());

/// A column definition together with an inline `PRIMARY KEY` marker.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedField {
	pub field: FieldInfo,
	pub primary_key: bool,
}

/// Whether a clause is a table level constraint rather than a column.
pub(crate) fn is_constraint(clause: &str) -> bool {
	let mut words = leading_words(clause);
	let first = words.next().unwrap_or_default();
	match first.as_str() {
		"UNIQUE" | "INDEX" | "KEY" | "CONSTRAINT" | "CHECK" | "FULLTEXT" | "SPATIAL" => true,
		"PRIMARY" | "FOREIGN" => words.next().as_deref() == Some("KEY"),
		_ => false,
	}
}

/// Upper cased bare words at the start of a clause; stops at the first
/// character that is neither part of a word nor whitespace.
fn leading_words(clause: &str) -> impl Iterator<Item = String> + '_ {
	let end = clause.find(|c: char| !(c.is_alphanumeric() || c == '_' || c.is_whitespace())).unwrap_or(clause.len());
	clause[..end].split_whitespace().map(|w| w.to_ascii_uppercase())
}

/// Parses `name type [options...]`. Returns `None` when the clause does not
/// start with a name followed by a type.
pub(crate) fn parse_field(clause: &str) -> Option<ParsedField> {
	let (name, rest) = split_name(clause)?;
	let (data_type, rest) = split_type(rest)?;
	let masked = mask_literals(rest);

	let nullable = !NOT_NULL.is_match(&masked);

	let default_value = DEFAULT.find(&masked).and_then(|m| read_token(rest, m.end()));

	let comment = COMMENT.find(&masked).and_then(|m| read_literal(rest, m.end() - 1)).map(|(text, _)| text);

	let primary_key = INLINE_PRIMARY_KEY.is_match(&masked);

	Some(ParsedField {
		field: FieldInfo {
			name,
			data_type,
			nullable,
			default_value,
			comment,
		},
		primary_key,
	})
}

fn split_name(clause: &str) -> Option<(String, &str)> {
	let clause = clause.trim_start();
	let first = clause.chars().next()?;

	if matches!(first, '`' | '"' | '[') {
		let close = if first == '[' {
			']'
		} else {
			first
		};
		let end = clause[1..].find(close)? + 1;
		let name = &clause[1..end];
		if name.trim().is_empty() {
			return None;
		}
		return Some((name.to_string(), &clause[end + 1..]));
	}

	let end = clause.find(char::is_whitespace)?;
	let name = &clause[..end];
	if !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
		return None;
	}
	Some((name.to_string(), &clause[end..]))
}

fn split_type(rest: &str) -> Option<(String, &str)> {
	let rest = rest.trim_start();
	let end = rest.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(rest.len());
	if end == 0 {
		return None;
	}

	let base = &rest[..end];
	let after = &rest[end..];
	let attached = after.trim_start();
	if attached.starts_with('(') {
		let close = matching_paren(attached)?;
		return Some((format!("{}{}", base, &attached[..=close]), &attached[close + 1..]));
	}

	Some((base.to_string(), after))
}

/// Byte index of the parenthesis closing the one `text` starts with.
pub(crate) fn matching_paren(text: &str) -> Option<usize> {
	let mut depth = 0usize;
	let mut quote: Option<char> = None;

	for (idx, c) in text.char_indices() {
		if let Some(q) = quote {
			if c == q {
				quote = None;
			}
			continue;
		}
		match c {
			'\'' | '"' => quote = Some(c),
			'(' => depth += 1,
			')' => {
				depth = depth.checked_sub(1)?;
				if depth == 0 {
					return Some(idx);
				}
			}
			_ => {}
		}
	}
	None
}

/// Blanks out the inside of `'` and `"` quoted literals, keeping byte offsets.
pub(crate) fn mask_literals(text: &str) -> String {
	let mut masked = String::with_capacity(text.len());
	let mut quote: Option<char> = None;

	for c in text.chars() {
		match quote {
			Some(q) if c == q => {
				quote = None;
				masked.push(c);
			}
			Some(_) => masked.extend(std::iter::repeat_n(' ', c.len_utf8())),
			None => {
				if c == '\'' || c == '"' {
					quote = Some(c);
				}
				masked.push(c);
			}
		}
	}
	masked
}

/// Reads the quoted literal starting at byte `start` and returns its unescaped
/// content along with the byte offset past the closing quote.
pub(crate) fn read_literal(text: &str, start: usize) -> Option<(String, usize)> {
	let quote = text[start..].chars().next()?;
	if quote != '\'' && quote != '"' {
		return None;
	}

	let body = &text[start + 1..];
	let mut content = String::new();
	let mut chars = body.char_indices().peekable();
	while let Some((idx, c)) = chars.next() {
		if c == quote {
			if chars.peek().map(|&(_, next)| next) == Some(quote) {
				content.push(quote);
				chars.next();
				continue;
			}
			return Some((content, start + 1 + idx + 1));
		}
		content.push(c);
	}
	None
}

/// First whitespace or comma delimited token at byte `start`; a quoted
/// literal is read whole, quotes included.
fn read_token(text: &str, start: usize) -> Option<String> {
	let rest = &text[start..];
	if rest.starts_with('\'') || rest.starts_with('"') {
		let (_, end) = read_literal(text, start)?;
		return Some(text[start..end].to_string());
	}
	let end = rest.find(|c: char| c.is_whitespace() || c == ',').unwrap_or(rest.len());
	if end == 0 {
		return None;
	}
	Some(rest[..end].to_string())
}
