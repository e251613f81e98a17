// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use config::GeneratorConfig;
pub use generator::SqlGenerator;
pub use migrate::{FieldMapping, MigrateOptions, load_mapping};
pub use name::{qualified_name, quote_literal};
pub use script::Script;

mod config;
mod emit;
mod generator;
mod migrate;
mod name;
mod script;
