//! # CLI Module
//!
//! Command-line interface for the ldproxy-scaffold generator.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate the export tree for a service:
//!
//! ```bash
//! ldscaffold generate --service-id demo --schema public \
//!     --db-url postgresql://user:pw@localhost:5432/gis \
//!     --tables tables.yaml --output export
//! ```
//!
//! Options:
//! - `--service-id <ID>` - ldproxy service identifier (required)
//! - `--schema <NAME>` - database schema the provider points at (required)
//! - `--db-url <URL>` - connection string to embed (never connected to)
//! - `--host-template <HOST>` - host value for `connectionInfo.host`
//! - `--docker` - ldproxy runs in a container (`host.docker.internal`)
//! - `--blocks <A,B,...>` - building blocks to enable (default: all)
//! - `--tables <FILE>` - declared table layout (YAML)
//! - `--params <FILE>` - per-block overrides (TOML); auto-detected next to
//!   the table layout when omitted
//! - `--set BLOCK.key=value` - inline override, value parsed as JSON
//! - `--output <DIR>` - export root (default: `export`)
//!
//! ### `blocks`
//!
//! List the supported building blocks:
//!
//! ```bash
//! ldscaffold blocks
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
