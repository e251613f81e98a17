// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::anyhow;
use clap::Subcommand;
use metashop_ddl::{Catalog, parse_file};
use metashop_export::{Document, Encoding, ExportConfig, Exporter, Partition};
use metashop_sql::{GeneratorConfig, MigrateOptions, Script, SqlGenerator, load_mapping};
use metashop_transform::{FieldInjector, Position, TypeConverter, compare};
use metashop_type::{Diagnostic, Dialect, Error, TableKey, render};
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Summarize the tables of a DDL file
	Parse {
		file: PathBuf,

		/// Print the nested JSON document instead of the summary
		#[arg(long)]
		json: bool,

		/// Only show the table with this `schema.table` key
		#[arg(long, value_name = "SCHEMA.TABLE")]
		table: Option<TableKey>,
	},

	/// Rewrite field types and print the resulting CREATE statements
	Convert {
		file: PathBuf,

		/// Conversion rule, built in or loaded with --rules
		#[arg(long)]
		rule: String,

		/// JSON file of custom rules: {"name": {"SOURCE": "TARGET"}}
		#[arg(long, value_name = "FILE")]
		rules: Option<PathBuf>,

		#[arg(long, default_value = "mysql")]
		dialect: Dialect,
	},

	/// Add the fields of a template to matching tables
	Inject {
		file: PathBuf,

		#[arg(long)]
		template: String,

		/// JSON file of custom templates: {"name": [field, ...]}
		#[arg(long, value_name = "FILE")]
		templates: Option<PathBuf>,

		#[arg(long, default_value = "end")]
		position: Position,

		/// Case-insensitive regex matched against the start of table names
		#[arg(long, value_name = "REGEX")]
		filter: Option<String>,

		#[arg(long, default_value = "mysql")]
		dialect: Dialect,
	},

	/// Generate a SQL script; DROP and CREATE sections when no section is chosen
	Sql {
		file: PathBuf,

		#[arg(long, default_value = "mysql")]
		dialect: Dialect,

		#[arg(long)]
		drop: bool,

		#[arg(long)]
		create: bool,

		/// Row count queries
		#[arg(long)]
		stats: bool,

		/// Table structure queries
		#[arg(long)]
		describe: bool,

		/// Omit comment headers and blank separator lines
		#[arg(long)]
		no_comments: bool,

		#[arg(short, long, value_name = "FILE")]
		output: Option<PathBuf>,
	},

	/// Generate INSERT ... SELECT statements from source to target tables
	Migrate {
		source: PathBuf,
		target: PathBuf,

		/// Replace NULL and empty source values with defaults
		#[arg(long)]
		coalesce: bool,

		/// JSON file of renames: {"schema.table": {"target": "source"}}
		#[arg(long, value_name = "FILE")]
		mapping: Option<PathBuf>,

		#[arg(short, long, value_name = "FILE")]
		output: Option<PathBuf>,
	},

	/// Write flattened metadata files
	Export {
		file: PathBuf,

		#[arg(long, default_value = "csv")]
		format: Encoding,

		#[arg(long, default_value = "merged")]
		partition: Partition,

		#[arg(long, value_name = "DIR")]
		out: PathBuf,

		/// Write CSV files without a byte order mark
		#[arg(long)]
		no_bom: bool,

		/// Write JSON on a single line
		#[arg(long)]
		compact: bool,
	},

	/// Compare two DDL files and print the report as JSON
	Diff {
		original: PathBuf,
		modified: PathBuf,
	},
}

impl Command {
	pub fn run(self) -> anyhow::Result<()> {
		match self {
			Command::Parse {
				file,
				json,
				table,
			} => {
				let mut catalog = load(&file)?;
				if let Some(key) = table {
					let found = catalog.find(&key).cloned().ok_or_else(|| anyhow!("table `{}` not found", key))?;
					catalog = Catalog::new(vec![found]);
				}

				if json {
					println!("{}", serde_json::to_string_pretty(&Document::new(catalog.tables()))?);
				} else {
					print!("{}", describe(&catalog));
				}
			}

			Command::Convert {
				file,
				rule,
				rules,
				dialect,
			} => {
				let mut converter = TypeConverter::new();
				if let Some(path) = rules {
					let loaded = converter.load_rules(&path)?;
					info!(loaded, path = %path.display(), "custom rules loaded");
				}

				let converted = converter.convert_tables(load(&file)?.tables(), &rule);
				report(&converted.diagnostics);
				emit(&SqlGenerator::with_dialect(dialect).create_tables(&converted.tables), None)?;
			}

			Command::Inject {
				file,
				template,
				templates,
				position,
				filter,
				dialect,
			} => {
				let mut injector = FieldInjector::new();
				if let Some(path) = templates {
					let loaded = injector.load_templates(&path)?;
					info!(loaded, path = %path.display(), "custom templates loaded");
				}

				let tables = injector.inject_all(load(&file)?.tables(), &template, position, filter.as_deref())?;
				emit(&SqlGenerator::with_dialect(dialect).create_tables(&tables), None)?;
			}

			Command::Sql {
				file,
				dialect,
				drop,
				create,
				stats,
				describe,
				no_comments,
				output,
			} => {
				let catalog = load(&file)?;
				let tables = catalog.tables();
				let generator = SqlGenerator::new(GeneratorConfig::new().dialect(dialect).comments(!no_comments));
				let script = sections(
					Script::new(&generator),
					Sections {
						drop,
						create,
						stats,
						describe,
					},
				);

				match output {
					Some(path) => {
						script.write(tables, &path)?;
						println!("{}", path.display());
					}
					None => print!("{}", script.render(tables)),
				}
			}

			Command::Migrate {
				source,
				target,
				coalesce,
				mapping,
				output,
			} => {
				let mut options = MigrateOptions::new().coalesce(coalesce);
				if let Some(path) = mapping {
					options = options.mapping(load_mapping(&path)?);
				}

				let sources = load(&source)?.into_tables();
				let targets = load(&target)?.into_tables();
				let lines = SqlGenerator::default().insert_select(&sources, &targets, &options);
				emit(&lines, output.as_deref())?;
			}

			Command::Export {
				file,
				format,
				partition,
				out,
				no_bom,
				compact,
			} => {
				let config =
					ExportConfig::new().encoding(format).partition(partition).bom(!no_bom).pretty(!compact);
				for path in Exporter::new(config).write(load(&file)?.tables(), &out)? {
					println!("{}", path.display());
				}
			}

			Command::Diff {
				original,
				modified,
			} => {
				let changes = compare(load(&original)?.tables(), load(&modified)?.tables());
				println!("{}", serde_json::to_string_pretty(&changes)?);
			}
		}

		Ok(())
	}
}

/// Parses a DDL file, reporting skipped statements on stderr.
fn load(path: &Path) -> anyhow::Result<Catalog> {
	let parsed = parse_file(path)?;
	report(&parsed.diagnostics);
	info!(path = %path.display(), tables = parsed.tables.len(), "ddl loaded");
	Ok(Catalog::from(parsed))
}

/// Script sections picked on the command line.
#[derive(Debug, Clone, Copy, Default)]
struct Sections {
	drop: bool,
	create: bool,
	stats: bool,
	describe: bool,
}

/// DROP and CREATE are written when no section was picked.
fn sections(script: Script<'_>, picked: Sections) -> Script<'_> {
	let any = picked.drop || picked.create || picked.stats || picked.describe;
	script
		.drop(picked.drop || !any)
		.create(picked.create || !any)
		.statistics(picked.stats)
		.structure(picked.describe)
}

fn report(diagnostics: &[Diagnostic]) {
	for diagnostic in diagnostics {
		eprint!("{}", render(diagnostic));
	}
}

fn describe(catalog: &Catalog) -> String {
	let mut out = String::new();
	for (schema, tables) in catalog.by_schema() {
		out.push_str(&format!("schema {schema}: {} tables\n", tables.len()));
		for table in tables {
			out.push_str(&format!("  {} ({} fields)\n", table.table, table.fields.len()));
		}
	}
	out.push_str(&format!(
		"total: {} schemas, {} tables, {} fields\n",
		catalog.schemas().len(),
		catalog.table_count(),
		catalog.field_count()
	));
	out
}

fn emit(lines: &[String], output: Option<&Path>) -> anyhow::Result<()> {
	let text: String = lines.iter().map(|line| format!("{line}\n")).collect();
	match output {
		Some(path) => fs::write(path, text).map_err(|err| Error::write(path, err))?,
		None => print!("{text}"),
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use metashop_ddl::parse;

	use super::*;

	#[test]
	fn test_describe() {
		let parsed = parse(
			"CREATE TABLE sales.orders (id INT, amount INT); CREATE TABLE crm.customers (id INT); CREATE TABLE \
			 sales.items (sku TEXT);",
		);

		assert_eq!(
			describe(&Catalog::new(parsed.tables)),
			"\
schema sales: 2 tables
  orders (2 fields)
  items (1 fields)
schema crm: 1 tables
  customers (1 fields)
total: 2 schemas, 3 tables, 4 fields
"
		);
	}

	#[test]
	fn test_sections_default_to_drop_and_create() {
		let tables = parse("CREATE TABLE sales.orders (id INT);").tables;
		let generator = SqlGenerator::default();

		let text = sections(Script::new(&generator), Sections::default()).render(&tables);
		assert!(text.contains("DROP TABLE IF EXISTS sales.orders;"));
		assert!(text.contains("CREATE TABLE IF NOT EXISTS sales.orders ("));
		assert!(!text.contains("COUNT(*)"));
		assert!(!text.contains("DESCRIBE"));
	}

	#[test]
	fn test_picked_sections_only() {
		let tables = parse("CREATE TABLE sales.orders (id INT);").tables;
		let generator = SqlGenerator::default();

		let picked = Sections {
			stats: true,
			..Sections::default()
		};
		let text = sections(Script::new(&generator), picked).render(&tables);
		assert!(!text.contains("DROP TABLE"));
		assert!(!text.contains("CREATE TABLE"));
		assert!(text.contains("SELECT COUNT(*) AS record_count FROM sales.orders;"));
	}
}
