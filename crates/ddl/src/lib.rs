// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use catalog::Catalog;
pub use explain::explain;
pub use parse::{Parsed, parse, parse_file};
pub use scan::{is_create_table, statements};
pub use split::split_clauses;
pub use table::parse_table;

mod catalog;
mod explain;
mod field;
mod parse;
mod scan;
mod split;
mod table;
