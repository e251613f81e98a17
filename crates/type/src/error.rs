// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to read `{path}`: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to write `{path}`: {source}")]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to write workbook `{path}`: {reason}")]
	Workbook {
		path: PathBuf,
		reason: String,
	},

	#[error("invalid json: {0}")]
	Json(#[from] serde_json::Error),

	#[error("unknown conversion rule `{0}`")]
	UnknownRule(String),

	#[error("unknown system field template `{0}`")]
	UnknownTemplate(String),

	#[error("invalid table filter `{pattern}`: {reason}")]
	InvalidFilter {
		pattern: String,
		reason: String,
	},

	#[error("unknown dialect `{0}`")]
	UnknownDialect(String),

	#[error("invalid table key `{0}`, expected `schema.table`")]
	InvalidTableKey(String),

	#[error("unsupported {kind} `{value}`")]
	Unsupported {
		kind: &'static str,
		value: String,
	},
}

impl Error {
	pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Error::Read {
			path: path.into(),
			source,
		}
	}

	pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Error::Write {
			path: path.into(),
			source,
		}
	}

	pub fn workbook(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
		Error::Workbook {
			path: path.into(),
			reason: reason.to_string(),
		}
	}
}
