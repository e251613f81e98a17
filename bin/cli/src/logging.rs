// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use anyhow::anyhow;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	/// `LEVEL target: message` lines
	Compact,
	/// JSON lines
	Json,
}

/// Installs the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(level: &str, format: LogFormat) -> anyhow::Result<()> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{}': {}", level, e))?,
	};

	let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

	let result = match format {
		LogFormat::Compact => builder.compact().without_time().try_init(),
		LogFormat::Json => builder.json().try_init(),
	};
	result.map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}
