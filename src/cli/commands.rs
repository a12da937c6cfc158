use clap::{Parser, Subcommand};
use std::path::PathBuf;

use anyhow::Context;

use crate::blocks::DEFAULT_BLOCKS;
use crate::config::{RawOverrides, ScaffoldConfig, TableConfig};
use crate::params::{load_params, resolve_params_path};

/// Command-line interface for ldproxy-scaffold
#[derive(Parser)]
#[command(name = "ldscaffold")]
#[command(about = "Generate ldproxy entity-store configuration", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate services/ and providers/ config files for one service
    Generate {
        /// ldproxy service identifier (also the output file stem)
        #[arg(long)]
        service_id: String,

        /// Database schema the feature provider points at
        #[arg(long)]
        schema: String,

        /// Connection string embedded into the provider config; treated as
        /// an opaque value, never connected to
        #[arg(long)]
        db_url: Option<String>,

        /// Host value for connectionInfo.host outside docker (defaults to
        /// the connection string verbatim)
        #[arg(long)]
        host_template: Option<String>,

        /// ldproxy runs in a container and reaches the database via
        /// host.docker.internal
        #[arg(long, default_value_t = false)]
        docker: bool,

        /// Building blocks to enable (comma-separated or repeated);
        /// default: all supported blocks
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        blocks: Option<Vec<String>>,

        /// Declared table layout (YAML); collections and provider types are
        /// derived from it
        #[arg(long)]
        tables: Option<PathBuf>,

        /// Per-block override parameters (TOML)
        /// If not provided, will auto-detect alongside the table layout
        #[arg(long)]
        params: Option<PathBuf>,

        /// Inline override, e.g. --set HTML.homeUrl='"https://x"'
        /// (value parsed as JSON, falling back to a plain string)
        #[arg(long = "set", value_name = "BLOCK.KEY=VALUE")]
        set: Vec<String>,

        /// Export root directory
        #[arg(short, long, default_value = "export")]
        output: PathBuf,
    },
    /// List the supported building blocks
    Blocks,
}

/// Parse CLI arguments and run the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            service_id,
            schema,
            db_url,
            host_template,
            docker,
            blocks,
            tables,
            params,
            set,
            output,
        } => {
            let mut overrides: RawOverrides = Vec::new();

            if let Some(path) = resolve_params_path(params.as_deref(), tables.as_deref()) {
                if let Some(file) = load_params(&path)? {
                    overrides.extend(file.into_overrides());
                }
            }
            // Inline --set entries come last so they win over the params file
            for entry in &set {
                let (block, key, value) = parse_set_override(entry)?;
                overrides.push((block, vec![(key, value)]));
            }

            let mut config = ScaffoldConfig::new(
                service_id,
                schema,
                db_url,
                host_template,
                docker,
                blocks.as_deref(),
                Some(overrides),
            )?;

            if let Some(path) = &tables {
                config = config.with_tables(TableConfig::from_file(path)?);
            }

            let summary: Vec<&str> = config.blocks.iter().map(|b| b.as_str()).collect();
            println!("Creating files with the following input:");
            println!("service_id: {}", config.service_id);
            println!("schema: {}", config.schema_name);
            println!("api_blocks: {}", summary.join(", "));

            let export_root = config.generate(&output)?;
            println!("✅ Export tree written to {}", export_root.display());
            Ok(())
        }
        Commands::Blocks => {
            for block in DEFAULT_BLOCKS {
                println!("{block}");
            }
            Ok(())
        }
    }
}

/// Split `BLOCK.key=value` into its parts. The value is parsed as JSON so
/// numbers and booleans keep their type; anything that is not valid JSON is
/// taken as a plain string.
fn parse_set_override(entry: &str) -> anyhow::Result<(String, String, serde_yaml::Value)> {
    let (target, raw_value) = entry
        .split_once('=')
        .with_context(|| format!("Invalid override '{entry}': expected BLOCK.KEY=VALUE"))?;
    let (block, key) = target
        .split_once('.')
        .with_context(|| format!("Invalid override target '{target}': expected BLOCK.KEY"))?;

    let value = match serde_json::from_str::<serde_json::Value>(raw_value) {
        Ok(json) => serde_yaml::to_value(json)
            .with_context(|| format!("Failed to convert override value '{raw_value}'"))?,
        Err(_) => serde_yaml::Value::from(raw_value),
    };

    Ok((block.to_string(), key.to_string(), value))
}
