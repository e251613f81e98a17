// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Splits the body of a column block into its clauses.
///
/// Commas split clauses only at parenthesis depth zero and outside of `'` or
/// `"` quoted text, so `DECIMAL(10,2)`, `PRIMARY KEY (a, b)` and
/// `COMMENT 'a, b'` stay intact. Clauses are trimmed; empty ones are dropped.
pub fn split_clauses(block: &str) -> Vec<String> {
	let mut clauses = Vec::new();
	let mut current = String::new();
	let mut depth: i32 = 0;
	let mut quote: Option<char> = None;

	for c in block.chars() {
		if let Some(q) = quote {
			if c == q {
				quote = None;
			}
			current.push(c);
			continue;
		}

		match c {
			'\'' | '"' => quote = Some(c),
			'(' => depth += 1,
			')' => depth -= 1,
			',' if depth == 0 => {
				push_clause(&mut clauses, &current);
				current.clear();
				continue;
			}
			_ => {}
		}
		current.push(c);
	}

	push_clause(&mut clauses, &current);
	clauses
}

fn push_clause(clauses: &mut Vec<String>, current: &str) {
	let trimmed = current.trim();
	if !trimmed.is_empty() {
		clauses.push(trimmed.to_string());
	}
}
