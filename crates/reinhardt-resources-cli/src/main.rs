//! Reinhardt Resources CLI
//!
//! Exports the field metadata of an API schema as JSON.
//!
//! ## Usage
//!
//! ```bash
//! reinhardt-resources export schema.json --models models.json -o resources.json
//! reinhardt-resources list schema.json
//! reinhardt-resources integrations
//! ```
//!
//! The schema document is the JSON form of a `Schema`. The optional models
//! document is a JSON array of model bindings for the ORM integration.

use clap::{Parser, Subcommand};
use colored::Colorize;
use reinhardt_resources_core::{
	IntegrationRegistry, ResourceError, ResourceField, ResourceSettings, Resolver, Schema, to_json,
};
use reinhardt_resources_orm::{ModelBinding, global_bindings};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
enum CliError {
	#[error(transparent)]
	Resource(#[from] ResourceError),
	#[error("{}: {source}", path.display())]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("{}: {source}", path.display())]
	Write {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("{}: invalid models document: {source}", path.display())]
	Models {
		path: PathBuf,
		source: serde_json::Error,
	},
}

type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Parser)]
#[command(name = "reinhardt-resources")]
#[command(about = "Field metadata exporter for Reinhardt API schemas", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Resolve every resource of a schema and write the export document
	Export {
		#[command(flatten)]
		source: SourceArgs,

		/// Drop null values and false flags
		#[arg(long)]
		remove_nulls: bool,

		/// Drop the fields of nested objects that are resources themselves
		#[arg(long)]
		remove_nested_types_fields: bool,

		/// Spaces per indentation level (0 writes compact JSON)
		#[arg(long, value_name = "N")]
		indent: Option<usize>,

		/// Output file (defaults to stdout)
		#[arg(short, long, value_name = "PATH")]
		output: Option<PathBuf>,
	},

	/// List the resources of a schema
	List {
		#[command(flatten)]
		source: SourceArgs,
	},

	/// List the integrations registered for discovery
	Integrations,
}

#[derive(Debug, clap::Args)]
struct SourceArgs {
	/// Schema document (JSON)
	#[arg(value_name = "SCHEMA")]
	schema: PathBuf,

	/// Settings file (TOML)
	#[arg(long, value_name = "PATH")]
	settings: Option<PathBuf>,

	/// Model bindings document (JSON array) for the ORM integration
	#[arg(long, value_name = "PATH")]
	models: Option<PathBuf>,

	/// Maximum nesting depth (overrides the settings file)
	#[arg(long, value_name = "N")]
	max_depth: Option<usize>,
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbosity);

	let result = match cli.command {
		Commands::Export {
			source,
			remove_nulls,
			remove_nested_types_fields,
			indent,
			output,
		} => run_export(
			&source,
			remove_nulls,
			remove_nested_types_fields,
			indent,
			output.as_deref(),
		),
		Commands::List { source } => run_list(&source),
		Commands::Integrations => run_integrations(),
	};

	if let Err(e) = result {
		eprintln!("{}: {}", "Error".red(), e);
		process::exit(1);
	}
}

fn init_logging(verbosity: u8) {
	let level = match verbosity {
		0 => Level::WARN,
		1 => Level::INFO,
		2 => Level::DEBUG,
		_ => Level::TRACE,
	};
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.init();
}

fn read(path: &Path) -> CliResult<String> {
	std::fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})
}

/// Registers every binding of a models document on the global registry
fn load_models(path: &Path) -> CliResult<usize> {
	let bindings: Vec<ModelBinding> =
		serde_json::from_str(&read(path)?).map_err(|source| CliError::Models {
			path: path.to_path_buf(),
			source,
		})?;

	let count = bindings.len();
	for binding in bindings {
		global_bindings().register(binding);
	}
	tracing::info!(count, path = %path.display(), "Loaded model bindings");
	Ok(count)
}

fn load_settings(source: &SourceArgs) -> CliResult<ResourceSettings> {
	let mut settings = match &source.settings {
		Some(path) => ResourceSettings::from_file(path)?,
		None => ResourceSettings::default(),
	};
	if let Some(max_depth) = source.max_depth {
		settings.max_depth = max_depth;
	}
	Ok(settings)
}

/// Loads the schema, settings and models, and builds the resolver
fn prepare(source: &SourceArgs) -> CliResult<(Schema, ResourceSettings, Resolver)> {
	let settings = load_settings(source)?;
	if let Some(models) = &source.models {
		load_models(models)?;
	}
	let schema = Schema::from_json(&read(&source.schema)?)?;
	let resolver = Resolver::from_settings(&IntegrationRegistry::discover(), &settings);
	tracing::debug!(?resolver, types = schema.len(), "Resolver ready");
	Ok((schema, settings, resolver))
}

fn run_export(
	source: &SourceArgs,
	remove_nulls: bool,
	remove_nested_types_fields: bool,
	indent: Option<usize>,
	output: Option<&Path>,
) -> CliResult<()> {
	let (schema, settings, resolver) = prepare(source)?;

	let mut options = settings.export;
	options.remove_nulls |= remove_nulls;
	options.remove_nested_types_fields |= remove_nested_types_fields;
	if let Some(indent) = indent {
		options.indent = indent;
	}

	let resources = resolver.resolve_all(&schema);
	let document = to_json(&resources, &options)?;

	match output {
		Some(path) => {
			std::fs::write(path, document + "\n").map_err(|source| CliError::Write {
				path: path.to_path_buf(),
				source,
			})?;
			println!(
				"{} {} resources to {}",
				"Exported".green(),
				resources.len(),
				path.display()
			);
		}
		None => println!("{}", document),
	}
	Ok(())
}

fn run_list(source: &SourceArgs) -> CliResult<()> {
	let (schema, _, resolver) = prepare(source)?;

	for resource in resolver.resolve_all(&schema).values() {
		let nested = resource
			.fields
			.iter()
			.filter(|field| matches!(field, ResourceField::Object(_)))
			.count();
		println!(
			"{} ({} fields, {} nested)",
			resource.name.bold(),
			resource.fields.len(),
			nested
		);
		for field in &resource.fields {
			println!("  {}", describe_field(field));
		}
	}
	Ok(())
}

/// One `list` line: the kind of a leaf, or the type a nested object expands
fn describe_field(field: &ResourceField) -> String {
	match field {
		ResourceField::Field(field) if field.multiple => format!("{}: [{}]", field.name, field.kind),
		ResourceField::Field(field) => format!("{}: {}", field.name, field.kind),
		ResourceField::Object(object) => format!("{} -> {}", object.name, object.obj_type),
	}
}

fn run_integrations() -> CliResult<()> {
	let registry = IntegrationRegistry::discover();
	if registry.is_empty() {
		println!("{}", "No integrations registered".yellow());
	}
	for integration in registry.sorted() {
		println!("{} (ordering {})", integration.name().bold(), integration.ordering());
	}
	Ok(())
}
