// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

/// Types were left untouched because the rule name is not registered.
pub fn unknown_rule(rule: &str, available: &[String]) -> Diagnostic {
	Diagnostic {
		code: "CONVERT_001".to_string(),
		statement: None,
		message: format!("unknown conversion rule `{}`, field types left unchanged", rule),
		label: None,
		help: Some(format!("available rules: {}", available.join(", "))),
		notes: vec![],
	}
}
