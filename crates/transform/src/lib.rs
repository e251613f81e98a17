// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use convert::{BuiltinRule, Converted, TypeConverter, TypeMapping};
pub use diff::{Change, ComparisonReport, FieldChange, FieldChanges, Summary, TableChanges, compare};
pub use inject::{FieldInjector, Position};

mod convert;
mod diff;
mod inject;
