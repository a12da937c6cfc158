//! Service document assembly: `services/<service_id>.yml`.
//!
//! The service document carries the service metadata, the ordered `api:`
//! list of rendered building-block documents, and one collection per
//! declared table. When FILTER is requested each collection additionally
//! gets a FEATURES_CORE entry so spatial and property-based querying works
//! out of the box.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::blocks::{render, BuildingBlock};
use crate::config::{ScaffoldConfig, TableDef};

/// The full `services/<id>.yml` document. Field order is serialization
/// order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: String,
    pub created_at: u64,
    pub last_modified: u64,
    pub entity_storage_version: u32,
    pub label: String,
    pub description: String,
    pub enabled: bool,
    pub service_type: String,
    /// Rendered building-block documents, in request order
    pub api: Vec<Mapping>,
    /// Collection per declared table, in declaration order
    pub collections: Mapping,
}

/// Assemble the service document for a config.
pub fn build_service_doc(config: &ScaffoldConfig) -> ServiceDoc {
    ServiceDoc {
        id: config.service_id.clone(),
        created_at: config.created_at,
        last_modified: config.created_at,
        entity_storage_version: 2,
        label: config.service_id.clone(),
        description: String::new(),
        enabled: true,
        service_type: "OGC_API".to_string(),
        api: build_api_list(config),
        collections: build_collections(config),
    }
}

/// The ordered `api:` list. TILES drags TILE_MATRIX_SETS in front of it;
/// everything else renders exactly once, defaults plus overrides.
fn build_api_list(config: &ScaffoldConfig) -> Vec<Mapping> {
    let mut api = Vec::new();
    for block in &config.blocks {
        if *block == BuildingBlock::Tiles {
            api.push(render(
                BuildingBlock::TileMatrixSets,
                &config.service_id,
                &config.overrides_for(BuildingBlock::TileMatrixSets),
            ));
        }
        api.push(render(
            *block,
            &config.service_id,
            &config.overrides_for(*block),
        ));
    }
    api
}

fn build_collections(config: &ScaffoldConfig) -> Mapping {
    let with_features = config.requests(BuildingBlock::Filter);
    let mut collections = Mapping::new();
    for table in &config.tables.tables {
        let mut collection = Mapping::new();
        collection.insert(Value::from("id"), Value::from(table.name.as_str()));
        collection.insert(Value::from("label"), Value::from(table.name.as_str()));
        collection.insert(Value::from("enabled"), Value::from(true));
        if with_features {
            collection.insert(
                Value::from("api"),
                Value::from(vec![Value::from(features_core_doc(table))]),
            );
        }
        collections.insert(Value::from(table.name.as_str()), Value::from(collection));
    }
    collections
}

/// FEATURES_CORE entry for one collection: geometry as the spatial
/// queryable, every business column as a text queryable.
fn features_core_doc(table: &TableDef) -> Mapping {
    let mut queryables = Mapping::new();
    queryables.insert(
        Value::from("spatial"),
        Value::from(vec![Value::from("geometry")]),
    );
    queryables.insert(
        Value::from("q"),
        Value::from(
            queryable_columns(table)
                .into_iter()
                .map(Value::from)
                .collect::<Vec<_>>(),
        ),
    );

    let mut doc = Mapping::new();
    doc.insert(Value::from("buildingBlock"), Value::from("FEATURES_CORE"));
    doc.insert(Value::from("enabled"), Value::from(true));
    doc.insert(Value::from("itemType"), Value::from("feature"));
    doc.insert(Value::from("queryables"), Value::from(queryables));
    doc
}

/// Column names usable as text queryables. System columns carry no search
/// value and are excluded.
fn queryable_columns(table: &TableDef) -> Vec<String> {
    table
        .columns
        .iter()
        .filter(|c| !matches!(c.name.as_str(), "geom" | "id" | "created_by"))
        .map(|c| c.name.clone())
        .collect()
}
