// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use clap::Parser;

use crate::{command::Command, logging::LogFormat};

mod command;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "metashop")]
#[command(version)]
#[command(about = "Extract table metadata from DDL and generate SQL from it")]
#[command(long_about = "Extract table metadata from DDL and generate SQL from it

EXAMPLES:
  # Summarize the tables of a dump
  metashop parse schema.sql

  # Rewrite MySQL types for Oracle and print the CREATE statements
  metashop convert schema.sql --rule mysql_to_oracle --dialect oracle

  # Add audit columns to every table starting with ord
  metashop inject schema.sql --template audit_fields --filter ord

  # Export one CSV per schema
  metashop export schema.sql --format csv --partition schema --out ./meta")]
struct Cli {
	/// Tracing filter, overridden by RUST_LOG when set
	#[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
	log_level: String,

	/// Log line format written to stderr
	#[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	logging::init(&cli.log_level, cli.log_format)?;
	cli.command.run()
}
