// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

// #![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use dialect::{CommentStyle, Dialect};
pub use diagnostic::{Diagnostic, render};
pub use error::{Error, Result};
pub use model::{DEFAULT_NAMESPACE, FieldInfo, TableInfo, TableKey};

mod dialect;
pub mod diagnostic;
mod error;
mod model;
