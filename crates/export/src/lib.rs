// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use config::{Encoding, ExportConfig, Partition};
pub use document::{Document, DocumentMetadata, DocumentTable};
pub use export::{Artifact, Exporter, Output, export};
pub use sheet::{Layout, Sheet};
pub use summary::{Summary, summary};

mod config;
mod document;
mod export;
mod sheet;
mod summary;
mod write;
