// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

pub mod convert;
pub mod parse;

/// A non-fatal finding reported alongside a best-effort result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub statement: Option<String>,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.code, self.message)
	}
}

pub fn render(d: &Diagnostic) -> String {
	let mut output = String::new();

	let _ = writeln!(&mut output, "warning[{}]: {}", d.code, d.message);

	if let Some(statement) = &d.statement {
		let _ = writeln!(&mut output, "  │ {}", statement);
		if let Some(label) = &d.label {
			let _ = writeln!(&mut output, "  = {}", label);
		}
	}

	if let Some(help) = &d.help {
		let _ = writeln!(&mut output, "\nhelp: {}", help);
	}

	for note in &d.notes {
		let _ = writeln!(&mut output, "\nnote: {}", note);
	}

	output
}

const SNIPPET_WIDTH: usize = 80;

/// First line of a statement, collapsed and cut to a printable width.
pub(crate) fn snippet(text: &str) -> String {
	let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
	if collapsed.chars().count() <= SNIPPET_WIDTH {
		return collapsed;
	}
	let mut cut: String = collapsed.chars().take(SNIPPET_WIDTH).collect();
	cut.push('…');
	cut
}
