//! Export tree orchestration: directories, file writes, and nothing else.
//!
//! `generate` is a one-shot operation. Files are overwritten without
//! merging; on failure partially written output stays on disk (filesystem
//! problems are not transient here, so nothing is retried).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};

use crate::blocks::BuildingBlock;
use crate::config::ScaffoldConfig;

use super::provider::build_provider_doc;
use super::service::build_service_doc;
use super::tiles::build_tile_provider_doc;

/// Generate the export tree for a config under `export_dir`.
///
/// Writes `services/<id>.yml`, `providers/<id>.yml` when connection
/// parameters are present, and `providers/<id>-tiles.yml` when TILES is
/// requested. Missing directories are created. Returns the export root.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be
/// written; the connection string failing to parse as a URL is also
/// surfaced here, before its provider file is touched.
pub fn generate(config: &ScaffoldConfig, export_dir: &Path) -> anyhow::Result<PathBuf> {
    let services_dir = export_dir.join("services");
    fs::create_dir_all(&services_dir)
        .with_context(|| format!("Failed to create directory {}", services_dir.display()))?;

    let service_doc = build_service_doc(config);
    write_yaml(
        &services_dir.join(format!("{}.yml", config.service_id)),
        &service_doc,
    )?;

    let wants_provider = config.db_conn_str.is_some() || config.db_host_template.is_some();
    let wants_tiles = config.requests(BuildingBlock::Tiles);

    if wants_provider || wants_tiles {
        let providers_dir = export_dir.join("providers");
        fs::create_dir_all(&providers_dir)
            .with_context(|| format!("Failed to create directory {}", providers_dir.display()))?;

        if wants_provider {
            let provider_doc = build_provider_doc(config)?;
            write_yaml(
                &providers_dir.join(format!("{}.yml", config.service_id)),
                &provider_doc,
            )?;
        } else {
            debug!("no connection parameters supplied, skipping feature provider file");
        }

        if wants_tiles {
            let tile_doc = build_tile_provider_doc(config);
            write_yaml(
                &providers_dir.join(format!("{}-tiles.yml", config.service_id)),
                &tile_doc,
            )?;
        }
    }

    Ok(export_dir.to_path_buf())
}

/// Serialize a document and write it in one pass.
fn write_yaml<T: Serialize>(path: &Path, doc: &T) -> anyhow::Result<()> {
    let rendered = serde_yaml::to_string(doc)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, rendered)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote config file");
    Ok(())
}
