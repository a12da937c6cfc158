//! # Building Blocks Module
//!
//! The fixed set of ldproxy API building blocks this tool knows how to
//! configure, together with the default document for each block and the
//! override merge used to render the final entries of a service's `api:`
//! list.
//!
//! ## Overview
//!
//! A building block is a named, independently toggled configuration unit in
//! ldproxy (TILES, STYLES, ...). Every rendered document carries at least:
//!
//! ```yaml
//! buildingBlock: <NAME>
//! enabled: true
//! ```
//!
//! followed by the block's defaults and any caller-supplied overrides.
//! `TILE_MATRIX_SETS` is special: it is never requested directly but is
//! emitted immediately before `TILES` whenever TILES is requested, because
//! ldproxy's tile endpoints need at least one tile matrix set definition.

use serde_yaml::{Mapping, Value};

/// An ldproxy API building block supported by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildingBlock {
    /// Property-based querying (`included: ['*']` by default)
    Queryables,
    /// Tile-based data access, linked to the service's tile provider
    Tiles,
    /// Tile matrix set definitions, implied by [`BuildingBlock::Tiles`]
    TileMatrixSets,
    /// Additional coordinate reference systems
    Crs,
    /// Style derivation for collections
    Styles,
    /// HTML output settings
    Html,
    /// CQL2 filtering support
    Filter,
    /// Map projection capabilities
    Projections,
}

/// Blocks requested when the caller does not name any, in the order the
/// original scaffold emitted them (HTML last, being purely presentational).
pub const DEFAULT_BLOCKS: &[BuildingBlock] = &[
    BuildingBlock::Queryables,
    BuildingBlock::Crs,
    BuildingBlock::Filter,
    BuildingBlock::Tiles,
    BuildingBlock::Styles,
    BuildingBlock::Projections,
    BuildingBlock::Html,
];

impl BuildingBlock {
    /// The block name as it appears in ldproxy configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingBlock::Queryables => "QUERYABLES",
            BuildingBlock::Tiles => "TILES",
            BuildingBlock::TileMatrixSets => "TILE_MATRIX_SETS",
            BuildingBlock::Crs => "CRS",
            BuildingBlock::Styles => "STYLES",
            BuildingBlock::Html => "HTML",
            BuildingBlock::Filter => "FILTER",
            BuildingBlock::Projections => "PROJECTIONS",
        }
    }

    /// Parse a block name. Returns `None` for anything outside the supported
    /// set; callers turn that into a validation error naming the offender.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "QUERYABLES" => Some(BuildingBlock::Queryables),
            "TILES" => Some(BuildingBlock::Tiles),
            "TILE_MATRIX_SETS" => Some(BuildingBlock::TileMatrixSets),
            "CRS" => Some(BuildingBlock::Crs),
            "STYLES" => Some(BuildingBlock::Styles),
            "HTML" => Some(BuildingBlock::Html),
            "FILTER" => Some(BuildingBlock::Filter),
            "PROJECTIONS" => Some(BuildingBlock::Projections),
            _ => None,
        }
    }

    /// Default document for this block.
    ///
    /// `service_id` is only consulted by TILES, whose document references the
    /// service's tile provider (`<service_id>-tiles`).
    pub fn default_document(&self, service_id: &str) -> Mapping {
        let mut doc = Mapping::new();
        doc.insert(Value::from("buildingBlock"), Value::from(self.as_str()));
        doc.insert(Value::from("enabled"), Value::from(true));

        match self {
            BuildingBlock::Queryables => {
                doc.insert(Value::from("included"), Value::from(vec![Value::from("*")]));
            }
            BuildingBlock::Tiles => {
                doc.insert(
                    Value::from("TileProvider"),
                    Value::from(format!("{service_id}-tiles")),
                );
                doc.insert(
                    Value::from("tileProviderTileset"),
                    Value::from("__all__"),
                );
            }
            BuildingBlock::Crs => {
                let crs = |code: i64| {
                    let mut m = Mapping::new();
                    m.insert(Value::from("code"), Value::from(code));
                    m.insert(Value::from("forceAxisOrder"), Value::from("NONE"));
                    Value::from(m)
                };
                doc.insert(
                    Value::from("additionalCrs"),
                    Value::from(vec![crs(4258), crs(3857)]),
                );
            }
            BuildingBlock::Styles => {
                doc.insert(Value::from("deriveCollectionStyles"), Value::from(true));
            }
            // HTML, FILTER, PROJECTIONS and TILE_MATRIX_SETS carry no extra keys
            _ => {}
        }

        doc
    }
}

impl std::fmt::Display for BuildingBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render the final document for a block: the default document with the
/// caller's overrides applied on top. Override wins on key collision; keys
/// the default does not know are appended verbatim. The default table is
/// never mutated, every call starts from a fresh mapping.
pub fn render(
    block: BuildingBlock,
    service_id: &str,
    overrides: &[(String, Value)],
) -> Mapping {
    let mut doc = block.default_document(service_id);
    for (key, value) in overrides {
        doc.insert(Value::from(key.as_str()), value.clone());
    }
    doc
}
