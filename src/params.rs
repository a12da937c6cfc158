//! Per-block override parameters for ldproxy-scaffold generation
//!
//! Allows deployments to tweak individual building-block documents via a
//! TOML file that sits alongside the table layout:
//!
//! ```toml
//! [blocks.HTML]
//! homeUrl = "https://example.com"
//!
//! [blocks.STYLES]
//! deriveCollectionStyles = false
//! ```
//!
//! Keys are merged on top of the block's default document; values may be any
//! TOML scalar, array or table and are carried into the YAML output as-is.

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::RawOverrides;

/// File name auto-detected next to the table layout.
pub const PARAMS_FILE_NAME: &str = "ldscaffold-params.toml";

/// Override parameters loaded from ldscaffold-params.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamsFile {
    /// Block name → override key/value pairs
    #[serde(default)]
    pub blocks: BTreeMap<String, toml::Table>,
}

impl ParamsFile {
    /// Flatten into the raw override shape the config validates. Block names
    /// are passed through untouched; unknown names surface as
    /// `ScaffoldError::UnknownBlock` at construction time.
    pub fn into_overrides(self) -> RawOverrides {
        self.blocks
            .into_iter()
            .map(|(block, table)| {
                let entries = table
                    .into_iter()
                    .map(|(key, value)| (key, toml_to_yaml(value)))
                    .collect();
                (block, entries)
            })
            .collect()
    }
}

/// Carry a TOML value into YAML without losing structure. Datetimes become
/// their string rendering, which is what ldproxy expects in config files.
fn toml_to_yaml(value: toml::Value) -> serde_yaml::Value {
    match value {
        toml::Value::String(s) => serde_yaml::Value::from(s),
        toml::Value::Integer(i) => serde_yaml::Value::from(i),
        toml::Value::Float(f) => serde_yaml::Value::from(f),
        toml::Value::Boolean(b) => serde_yaml::Value::from(b),
        toml::Value::Datetime(dt) => serde_yaml::Value::from(dt.to_string()),
        toml::Value::Array(items) => {
            serde_yaml::Value::from(items.into_iter().map(toml_to_yaml).collect::<Vec<_>>())
        }
        toml::Value::Table(table) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (key, value) in table {
                mapping.insert(serde_yaml::Value::from(key), toml_to_yaml(value));
            }
            serde_yaml::Value::from(mapping)
        }
    }
}

/// Load override parameters from a TOML file
///
/// # Returns
///
/// Returns `Ok(Some(params))` if the file exists and parses successfully,
/// `Ok(None)` if the file doesn't exist (not an error),
/// `Err` if the file exists but fails to parse.
pub fn load_params(params_path: &Path) -> anyhow::Result<Option<ParamsFile>> {
    if !params_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(params_path)
        .with_context(|| format!("Failed to read params file: {}", params_path.display()))?;

    let params: ParamsFile = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse params file: {}", params_path.display()))?;

    Ok(Some(params))
}

/// Auto-detect a params file alongside the table layout
///
/// Looks for `ldscaffold-params.toml` in the same directory as the layout.
pub fn auto_detect_params_path(tables_path: &Path) -> Option<PathBuf> {
    let dir = tables_path.parent()?;
    let params_path = dir.join(PARAMS_FILE_NAME);
    if params_path.exists() {
        Some(params_path)
    } else {
        None
    }
}

/// Resolve the params file path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the table layout
/// 3. None (no params)
pub fn resolve_params_path(
    explicit_path: Option<&Path>,
    tables_path: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    tables_path.and_then(auto_detect_params_path)
}
