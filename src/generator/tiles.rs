//! Tile provider assembly: `providers/<service_id>-tiles.yml`.
//!
//! Written only when TILES is requested. The document defines two MBTiles
//! caches (an immutable seed cache for low zoom levels and a dynamic cache
//! above it), default zoom ranges, one tileset per declared table and the
//! combined `__all__` tileset the service's TILES block points at.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use crate::config::ScaffoldConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileProviderDoc {
    pub id: String,
    pub provider_type: String,
    pub provider_sub_type: String,
    pub caches: Vec<CacheDef>,
    pub tileset_defaults: TilesetDefaults,
    pub tilesets: Mapping,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheDef {
    #[serde(rename = "type")]
    pub ty: String,
    pub storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeded: Option<bool>,
    pub levels: BTreeMap<String, LevelRange>,
}

#[derive(Debug, Serialize)]
pub struct LevelRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Serialize)]
pub struct TilesetDefaults {
    pub levels: BTreeMap<String, LevelRange>,
}

fn web_mercator(min: u8, max: u8) -> BTreeMap<String, LevelRange> {
    let mut levels = BTreeMap::new();
    levels.insert("WebMercatorQuad".to_string(), LevelRange { min, max });
    levels
}

/// Assemble the tile provider document for a config.
pub fn build_tile_provider_doc(config: &ScaffoldConfig) -> TileProviderDoc {
    let mut tilesets = Mapping::new();
    let mut all = Mapping::new();
    all.insert(Value::from("id"), Value::from("__all__"));
    all.insert(Value::from("combine"), Value::from(vec![Value::from("*")]));
    tilesets.insert(Value::from("__all__"), Value::from(all));

    for table in &config.tables.tables {
        let mut tileset = Mapping::new();
        tileset.insert(Value::from("id"), Value::from(table.name.as_str()));
        tilesets.insert(Value::from(table.name.as_str()), Value::from(tileset));
    }

    TileProviderDoc {
        id: format!("{}-tiles", config.service_id),
        provider_type: "TILE".to_string(),
        provider_sub_type: "FEATURES".to_string(),
        caches: vec![
            CacheDef {
                ty: "IMMUTABLE".to_string(),
                storage: "MBTILES".to_string(),
                seeded: None,
                levels: web_mercator(5, 12),
            },
            CacheDef {
                ty: "DYNAMIC".to_string(),
                storage: "MBTILES".to_string(),
                seeded: Some(false),
                levels: web_mercator(13, 18),
            },
        ],
        tileset_defaults: TilesetDefaults {
            levels: web_mercator(5, 20),
        },
        tilesets,
    }
}
