// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs,
	path::{Path, PathBuf},
};

use metashop_type::{Error, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::{Artifact, ExportConfig, Output, Sheet};

const BOM: &str = "\u{feff}";
const INVALID_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces characters that are not allowed in file names.
pub(crate) fn file_stem(name: &str) -> String {
	let stem: String = name
		.chars()
		.map(|c| {
			if INVALID_FILE_CHARS.contains(&c) || c.is_control() {
				'_'
			} else {
				c
			}
		})
		.collect();

	if stem.is_empty() {
		"metadata".to_string()
	} else {
		stem
	}
}

pub(crate) fn write_output(dir: &Path, output: &Output, config: &ExportConfig) -> Result<PathBuf> {
	let path = dir.join(output.file_name());

	match &output.artifact {
		Artifact::Table(sheet) => write_file(&path, &render_csv(sheet, config.bom))?,
		Artifact::Workbook(sheets) => write_workbook(&path, sheets)?,
		Artifact::Document(document) => {
			let text = if config.pretty {
				serde_json::to_string_pretty(document)?
			} else {
				serde_json::to_string(document)?
			};
			write_file(&path, &text)?;
		}
	}

	Ok(path)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
	fs::write(path, contents).map_err(|err| Error::write(path, err))
}

/// One worksheet per sheet, a bold frozen header row, every cell a string.
fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<()> {
	let mut workbook = Workbook::new();
	let header = Format::new().set_bold();

	for sheet in sheets {
		let worksheet = workbook.add_worksheet();
		worksheet.set_name(sheet.name.as_str()).map_err(|err| Error::workbook(path, err))?;
		worksheet.set_freeze_panes(1, 0).map_err(|err| Error::workbook(path, err))?;

		for (col, title) in sheet.header.iter().enumerate() {
			worksheet
				.write_string_with_format(0, column(path, col)?, title.as_str(), &header)
				.map_err(|err| Error::workbook(path, err))?;
		}

		for (idx, row) in sheet.rows.iter().enumerate() {
			let row_num = u32::try_from(idx + 1).map_err(|_| Error::workbook(path, "too many rows"))?;
			for (col, cell) in row.iter().enumerate() {
				worksheet
					.write_string(row_num, column(path, col)?, cell.as_str())
					.map_err(|err| Error::workbook(path, err))?;
			}
		}
	}

	workbook.save(path).map_err(|err| Error::workbook(path, err))
}

fn column(path: &Path, col: usize) -> Result<u16> {
	u16::try_from(col).map_err(|_| Error::workbook(path, "too many columns"))
}

pub(crate) fn render_csv(sheet: &Sheet, bom: bool) -> String {
	let mut out = String::new();
	if bom {
		out.push_str(BOM);
	}

	for row in std::iter::once(&sheet.header).chain(sheet.rows.iter()) {
		let cells: Vec<String> = row.iter().map(|cell| escape_csv_value(cell)).collect();
		out.push_str(&cells.join(","));
		out.push('\n');
	}
	out
}

/// Quotes a value when it contains a delimiter, a quote or a line break.
fn escape_csv_value(value: &str) -> String {
	if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
		format!("\"{}\"", value.replace('"', "\"\""))
	} else {
		value.to_string()
	}
}
