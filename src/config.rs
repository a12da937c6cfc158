//! # Scaffold Configuration Module
//!
//! The immutable input bundle for a generation run: service identity, target
//! schema, database connection parameters, the ordered list of requested
//! building blocks, per-block overrides, and an optional table layout.
//!
//! ## Overview
//!
//! [`ScaffoldConfig::new`] validates everything up front — an unknown
//! building-block name fails construction before any file is touched. After
//! construction the config is read-only; [`ScaffoldConfig::generate`] can be
//! called any number of times and produces byte-identical output because the
//! `createdAt`/`lastModified` stamp is captured once at construction.
//!
//! ## Table layout
//!
//! The original tool introspected PostGIS for tables and columns. That is
//! out of scope here; instead the caller declares the layout in a small YAML
//! file:
//!
//! ```yaml
//! tables:
//!   - name: roads
//!     columns:
//!       - name: id
//!         type: INTEGER
//!       - name: geom
//!         type: GEOMETRY
//!         geometryType: MULTILINESTRING
//!       - name: created_at
//!         type: TIMESTAMP
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::Deserialize;
use serde_yaml::Value;

use crate::blocks::{BuildingBlock, DEFAULT_BLOCKS};

/// Per-block override entries, in application order.
pub type OverrideEntries = Vec<(String, Value)>;

/// Raw overrides as collected from a params file or the command line:
/// block name → key/value pairs. Block names are validated when the
/// config is constructed.
pub type RawOverrides = Vec<(String, OverrideEntries)>;

/// Validation failure raised before any file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldError {
    /// A requested block or an override target is not in the supported set.
    UnknownBlock {
        /// The offending name as supplied by the caller
        name: String,
    },
    /// The service identifier is empty or whitespace-only.
    EmptyServiceId,
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::UnknownBlock { name } => {
                write!(
                    f,
                    "unknown building block '{name}': supported blocks are \
                     QUERYABLES, TILES, CRS, STYLES, HTML, FILTER, PROJECTIONS"
                )
            }
            ScaffoldError::EmptyServiceId => {
                write!(f, "service id must not be empty")
            }
        }
    }
}

impl std::error::Error for ScaffoldError {}

/// A column of a declared table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Column name as it exists in the database
    pub name: String,
    /// Declared SQL type (`VARCHAR`, `INTEGER`, `TIMESTAMP`, `GEOMETRY`, ...)
    #[serde(rename = "type")]
    pub ty: String,
    /// Concrete geometry type for `geom` columns (`MULTIPOLYGON`, ...);
    /// absent means ldproxy gets `ANY`
    #[serde(default)]
    pub geometry_type: Option<String>,
}

/// A table that becomes a collection in the service and a type in the
/// feature provider.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TableDef {
    /// Table name within the target schema
    pub name: String,
    /// Column layout, in declaration order
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

/// Declared table layout for the target schema.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Tables to expose, in the order collections should appear
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl TableConfig {
    /// Load a table layout from a YAML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read table layout: {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse table layout: {}", path.display()))
    }
}

/// Everything one generation run needs, validated and read-only.
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Identifier of the ldproxy service (also the output file stem)
    pub service_id: String,
    /// Database schema the provider points at
    pub schema_name: String,
    /// Connection string to embed, never connected to (opaque value)
    pub db_conn_str: Option<String>,
    /// Host template embedded as `connectionInfo.host` outside docker
    pub db_host_template: Option<String>,
    /// ldproxy runs in a container and reaches the database through
    /// `host.docker.internal`
    pub run_in_docker: bool,
    /// Requested blocks, in output order
    pub blocks: Vec<BuildingBlock>,
    /// Validated overrides: block → entries in application order
    pub block_params: Vec<(BuildingBlock, OverrideEntries)>,
    /// Declared table layout (may be empty)
    pub tables: TableConfig,
    /// Native CRS gets `forceAxisOrder: LON_LAT` when set (the default)
    pub force_axis_order: bool,
    /// Unix timestamp stamped into every generated document
    pub created_at: u64,
}

impl ScaffoldConfig {
    /// Build and validate a generation request.
    ///
    /// `blocks` defaults to the full supported set ([`DEFAULT_BLOCKS`]).
    /// Every name in `blocks` and every top-level key of `params` must be a
    /// recognized building block, otherwise construction fails with
    /// [`ScaffoldError::UnknownBlock`] naming the offender. Overrides aimed
    /// at a known block that was not requested are kept but have no effect
    /// on output.
    pub fn new(
        service_id: impl Into<String>,
        schema_name: impl Into<String>,
        db_conn_str: Option<String>,
        db_host_template: Option<String>,
        run_in_docker: bool,
        blocks: Option<&[String]>,
        params: Option<RawOverrides>,
    ) -> Result<Self, ScaffoldError> {
        let service_id = service_id.into();
        if service_id.trim().is_empty() {
            return Err(ScaffoldError::EmptyServiceId);
        }

        let blocks = match blocks {
            Some(names) => names
                .iter()
                .map(|name| {
                    BuildingBlock::parse(name).ok_or_else(|| ScaffoldError::UnknownBlock {
                        name: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => DEFAULT_BLOCKS.to_vec(),
        };

        let mut block_params = Vec::new();
        for (name, entries) in params.unwrap_or_default() {
            let block = BuildingBlock::parse(&name)
                .ok_or(ScaffoldError::UnknownBlock { name })?;
            block_params.push((block, entries));
        }

        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Ok(Self {
            service_id,
            schema_name: schema_name.into(),
            db_conn_str,
            db_host_template,
            run_in_docker,
            blocks,
            block_params,
            tables: TableConfig::default(),
            force_axis_order: true,
            created_at,
        })
    }

    /// Attach a declared table layout.
    pub fn with_tables(mut self, tables: TableConfig) -> Self {
        self.tables = tables;
        self
    }

    /// Pin the document timestamp (tests and reproducible pipelines).
    pub fn with_created_at(mut self, created_at: u64) -> Self {
        self.created_at = created_at;
        self
    }

    /// Disable `forceAxisOrder: LON_LAT` on the provider's native CRS.
    pub fn with_force_axis_order(mut self, force_axis_order: bool) -> Self {
        self.force_axis_order = force_axis_order;
        self
    }

    /// Override entries for a block, in application order. Empty when the
    /// caller supplied none.
    pub fn overrides_for(&self, block: BuildingBlock) -> Vec<(String, Value)> {
        self.block_params
            .iter()
            .filter(|(b, _)| *b == block)
            .flat_map(|(_, entries)| entries.iter().cloned())
            .collect()
    }

    /// Whether a block is part of this run.
    pub fn requests(&self, block: BuildingBlock) -> bool {
        self.blocks.contains(&block)
    }

    /// The host value embedded into `connectionInfo`: inside docker the
    /// compose-provided alias, otherwise the host template verbatim, falling
    /// back to the connection string verbatim.
    pub fn connection_host(&self) -> Option<String> {
        if self.run_in_docker {
            return Some("host.docker.internal".to_string());
        }
        self.db_host_template
            .clone()
            .or_else(|| self.db_conn_str.clone())
    }

    /// Generate the export tree under `export_dir` and return the export
    /// root. See [`crate::generator::generate`].
    pub fn generate(&self, export_dir: &Path) -> anyhow::Result<PathBuf> {
        crate::generator::generate(self, export_dir)
    }
}
