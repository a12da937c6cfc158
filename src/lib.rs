//! # ldproxy-scaffold
//!
//! **ldproxy-scaffold** generates [ldproxy](https://github.com/interactive-instruments/ldproxy)
//! entity-store configuration — service definitions, SQL feature providers
//! and tile providers — from a declared table layout and a handful of
//! parameters. The output tree is meant to be copied verbatim into
//! ldproxy's data store.
//!
//! ## Overview
//!
//! Generation is a deterministic merge-and-serialize operation: each
//! requested API building block has a static default document, caller
//! overrides are applied on top, and the merged documents are written as
//! YAML under a predictable folder layout. No database connection is opened;
//! the connection string is an opaque value to embed.
//!
//! ## Architecture
//!
//! - **[`blocks`]** - The supported building-block set, default documents,
//!   and the override merge
//! - **[`config`]** - The validated, immutable generation request
//!   ([`ScaffoldConfig`]) and the declared table layout
//! - **[`params`]** - Optional per-block override file (TOML)
//! - **[`generator`]** - Document assembly and the export tree writer
//! - **[`cli`]** - `clap`-based command-line interface (`ldscaffold` binary)
//!
//! ## Generation Flow
//!
//! ```text
//! parameters + table layout → ScaffoldConfig (validated)
//!     → service / provider / tile documents → serde_yaml → export tree
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ldproxy_scaffold::ScaffoldConfig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let blocks = vec!["QUERYABLES".to_string(), "CRS".to_string()];
//! let config = ScaffoldConfig::new(
//!     "demo",
//!     "public",
//!     Some("postgresql://user:pw@localhost:5432/gis".to_string()),
//!     None,
//!     false,
//!     Some(&blocks),
//!     None,
//! )?;
//! let export_root = config.generate(std::path::Path::new("export"))?;
//! # Ok(())
//! # }
//! ```
//!
//! Validation happens at construction: an unknown building-block name fails
//! before any file is written. `generate` either fully succeeds or returns
//! the underlying I/O error; partially written files are left in place.

pub mod blocks;
pub mod cli;
pub mod config;
pub mod generator;
pub mod params;

pub use blocks::BuildingBlock;
pub use config::{ScaffoldConfig, ScaffoldError, TableConfig};
pub use generator::generate;
