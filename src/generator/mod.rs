//! # Generator Module
//!
//! Turns a validated [`ScaffoldConfig`](crate::config::ScaffoldConfig) into
//! an ldproxy entity-store tree on disk.
//!
//! ## Generated Structure
//!
//! ```text
//! export/
//! ├── services/
//! │   └── <service_id>.yml        # service metadata + api: block list + collections
//! └── providers/
//!     ├── <service_id>.yml        # SQL feature provider (connectionInfo, types)
//!     └── <service_id>-tiles.yml  # tile provider, only when TILES is requested
//! ```
//!
//! ## Flow
//!
//! ```text
//! ScaffoldConfig → build documents (service / provider / tiles) → serde_yaml → files
//! ```
//!
//! Documents are plain serde structs and `serde_yaml::Mapping`s; key order in
//! the output follows struct field order and mapping insertion order, so
//! repeated runs over the same config serialize identical bytes. Each file is
//! assembled completely in memory before anything touches disk.

mod project;
mod provider;
mod service;
mod tiles;

pub use project::generate;
pub use provider::{build_provider_doc, map_datatype, map_geom_type};
pub use service::build_service_doc;
pub use tiles::build_tile_provider_doc;
