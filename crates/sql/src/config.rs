// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_type::Dialect;

/// Settings shared by every statement a [`SqlGenerator`](crate::SqlGenerator)
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
	pub dialect: Dialect,
	/// Emit `DROP TABLE IF EXISTS` where the dialect supports it.
	pub if_exists: bool,
	/// Emit `CREATE TABLE IF NOT EXISTS` where the dialect supports it.
	pub if_not_exists: bool,
	/// Emit a `-- ...` header line and a blank separator per table.
	pub comments: bool,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			dialect: Dialect::Mysql,
			if_exists: true,
			if_not_exists: true,
			comments: true,
		}
	}
}

impl GeneratorConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn dialect(mut self, dialect: Dialect) -> Self {
		self.dialect = dialect;
		self
	}

	pub fn if_exists(mut self, enabled: bool) -> Self {
		self.if_exists = enabled;
		self
	}

	pub fn if_not_exists(mut self, enabled: bool) -> Self {
		self.if_not_exists = enabled;
		self
	}

	pub fn comments(mut self, enabled: bool) -> Self {
		self.comments = enabled;
		self
	}

	pub(crate) fn use_if_exists(&self) -> bool {
		self.if_exists && self.dialect.supports_if_exists()
	}

	pub(crate) fn use_if_not_exists(&self) -> bool {
		self.if_not_exists && self.dialect.supports_if_exists()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = GeneratorConfig::default();
		assert_eq!(config.dialect, Dialect::Mysql);
		assert!(config.if_exists && config.if_not_exists && config.comments);
	}

	#[test]
	fn test_if_exists_needs_dialect_support() {
		let config = GeneratorConfig::new().dialect(Dialect::Oracle);
		assert!(!config.use_if_exists());
		assert!(!config.use_if_not_exists());

		let config = GeneratorConfig::new().dialect(Dialect::Postgresql).if_exists(false);
		assert!(!config.use_if_exists());
		assert!(config.use_if_not_exists());
	}
}
