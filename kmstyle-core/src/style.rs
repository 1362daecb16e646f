//! Assembling patched layers into complete style documents.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::patch::{PatchContext, PatchError, apply_patches};
use crate::source::{LayerSource, LayerSourceError};
use crate::{Flavor, Language, LayerList};

/// Style specification version written into every document.
pub const STYLE_VERSION: u8 = 8;

/// Kind of a tile source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// Vector tiles.
    Vector,
    /// Raster elevation tiles.
    RasterDem,
}

/// One entry of a style's `sources` mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    /// Source kind.
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// TileJSON URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tile URL templates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<String>>,
    /// HTML attribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// DEM encoding, e.g. `terrarium`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Lowest zoom with tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<u8>,
    /// Highest zoom with tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<u8>,
    /// Tile size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u16>,
}

impl SourceDescriptor {
    /// A vector source described by a TileJSON URL.
    #[must_use]
    pub fn vector(url: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Vector,
            url: Some(url.into()),
            tiles: None,
            attribution: Some(attribution.into()),
            encoding: None,
            minzoom: None,
            maxzoom: None,
            tile_size: None,
        }
    }
}

/// Fixed metadata shared by every generated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleConfig {
    /// Id of the vector source the base layers reference.
    pub vector_source_id: String,
    /// TileJSON URL of the vector source.
    pub vector_url: String,
    /// Attribution of the vector source.
    pub vector_attribution: String,
    /// Id of the elevation source used by the hillshade layer.
    pub dem_source_id: String,
    /// Tile URL template of the elevation source.
    pub dem_tiles_url: String,
    /// Attribution of the elevation source.
    pub dem_attribution: String,
    /// Highest zoom of the elevation tiles.
    pub dem_max_zoom: u8,
    /// Glyph URL template.
    pub glyphs_url: String,
    /// Sprite base URL; the flavor name is appended.
    pub sprite_base_url: String,
    /// Prefix of generated style names, if any.
    pub name_prefix: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            vector_source_id: "osm".to_owned(),
            vector_url: "https://tiles.kmproj.com/osm-japan.json".to_owned(),
            vector_attribution: "<a href=\"https://protomaps.com\">Protomaps</a> © \
                                 <a href=\"https://openstreetmap.org\">OpenStreetMap</a>"
                .to_owned(),
            dem_source_id: crate::patch::DEFAULT_DEM_SOURCE.to_owned(),
            dem_tiles_url:
                "https://s3.amazonaws.com/elevation-tiles-prod/terrarium/{z}/{x}/{y}.png"
                    .to_owned(),
            dem_attribution: "<a href=\"https://github.com/tilezen/joerd\">Mapzen Terrain Tiles</a>"
                .to_owned(),
            dem_max_zoom: 15,
            glyphs_url:
                "https://protomaps.github.io/basemaps-assets/fonts/{fontstack}/{range}.pbf"
                    .to_owned(),
            sprite_base_url: "https://protomaps.github.io/basemaps-assets/sprites/v4".to_owned(),
            name_prefix: Some("osm".to_owned()),
        }
    }
}

impl StyleConfig {
    /// Sprite URL for `flavor`.
    #[must_use]
    pub fn sprite_url(&self, flavor: Flavor) -> String {
        format!("{}/{flavor}", self.sprite_base_url.trim_end_matches('/'))
    }

    /// The `sources` mapping of every style.
    #[must_use]
    pub fn sources(&self) -> BTreeMap<String, SourceDescriptor> {
        let dem = SourceDescriptor {
            kind: SourceKind::RasterDem,
            url: None,
            tiles: Some(vec![self.dem_tiles_url.clone()]),
            attribution: Some(self.dem_attribution.clone()),
            encoding: Some("terrarium".to_owned()),
            minzoom: None,
            maxzoom: Some(self.dem_max_zoom),
            tile_size: Some(256),
        };
        BTreeMap::from([
            (
                self.vector_source_id.clone(),
                SourceDescriptor::vector(&self.vector_url, &self.vector_attribution),
            ),
            (self.dem_source_id.clone(), dem),
        ])
    }

    /// Name of the style built for one pair.
    #[must_use]
    pub fn style_name(&self, language: &Language, flavor: Flavor) -> StyleName {
        StyleName::new(self.name_prefix.as_deref(), language, flavor)
    }
}

/// Base name of a generated style, e.g. `osm-ja-light`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleName(String);

impl StyleName {
    /// `<prefix>-<language>-<flavor>`, or `<language>-<flavor>` without a
    /// prefix.
    #[must_use]
    pub fn new(prefix: Option<&str>, language: &Language, flavor: Flavor) -> Self {
        match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => Self(format!("{prefix}-{language}-{flavor}")),
            None => Self(format!("{language}-{flavor}")),
        }
    }

    /// The bare name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the style document.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for StyleName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A complete style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style specification version.
    pub version: u8,
    /// Glyph URL template.
    pub glyphs: String,
    /// Sprite URL.
    pub sprite: String,
    /// Tile sources by id.
    pub sources: BTreeMap<String, SourceDescriptor>,
    /// Layers in paint order.
    pub layers: LayerList,
}

impl StyleDocument {
    /// Wrap finished `layers` with the metadata in `config`.
    #[must_use]
    pub fn assemble(config: &StyleConfig, flavor: Flavor, layers: LayerList) -> Self {
        Self {
            version: STYLE_VERSION,
            glyphs: config.glyphs_url.clone(),
            sprite: config.sprite_url(flavor),
            sources: config.sources(),
            layers,
        }
    }
}

/// Errors returned by [`build_style`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The base layers could not be obtained.
    #[error("failed to load base layers for {language}-{flavor}")]
    Source {
        /// Language being built.
        language: Language,
        /// Flavor being built.
        flavor: Flavor,
        /// Underlying source error.
        #[source]
        source: LayerSourceError,
    },
    /// A patch stage failed.
    #[error("failed to patch layers for {language}-{flavor}")]
    Patch {
        /// Language being built.
        language: Language,
        /// Flavor being built.
        flavor: Flavor,
        /// Underlying stage error.
        #[source]
        source: PatchError,
    },
}

/// Fetch, patch and assemble the style for one (language, flavor) pair.
pub fn build_style(
    source: &dyn LayerSource,
    config: &StyleConfig,
    language: &Language,
    flavor: Flavor,
) -> Result<StyleDocument, BuildError> {
    let mut layers = source
        .layers(&config.vector_source_id, flavor, language)
        .map_err(|err| BuildError::Source {
            language: language.clone(),
            flavor,
            source: err,
        })?;
    let context = PatchContext::new(language.clone(), flavor)
        .with_dem_source(config.dem_source_id.clone());
    apply_patches(&mut layers, &context).map_err(|err| BuildError::Patch {
        language: language.clone(),
        flavor,
        source: err,
    })?;
    debug!("built {language}-{flavor} with {} layers", layers.len());
    Ok(StyleDocument::assemble(config, flavor, layers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Layer, MemoryLayerSource};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn ja() -> Language {
        Language::new("ja").unwrap()
    }

    #[rstest]
    #[case(Some("osm"), "osm-ja-dark")]
    #[case(Some(""), "ja-dark")]
    #[case(None, "ja-dark")]
    fn style_names(ja: Language, #[case] prefix: Option<&str>, #[case] expected: &str) {
        let name = StyleName::new(prefix, &ja, Flavor::Dark);
        assert_eq!(name.as_str(), expected);
        assert_eq!(name.file_name(), format!("{expected}.json"));
    }

    #[rstest]
    fn document_serialises_with_expected_schema() {
        let config = StyleConfig::default();
        let layers = LayerList::new(vec![Layer::new("water", "fill")]).unwrap();
        let doc = StyleDocument::assemble(&config, Flavor::Dark, layers);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["version"], json!(8));
        assert_eq!(
            value["sprite"],
            json!("https://protomaps.github.io/basemaps-assets/sprites/v4/dark")
        );
        assert_eq!(value["sources"]["osm"]["type"], json!("vector"));
        assert_eq!(
            value["sources"]["osm"]["url"],
            json!("https://tiles.kmproj.com/osm-japan.json")
        );
        assert_eq!(value["sources"]["dem"]["type"], json!("raster-dem"));
        assert_eq!(value["sources"]["dem"]["encoding"], json!("terrarium"));
        assert_eq!(value["sources"]["dem"]["tileSize"], json!(256));
        assert!(value["sources"]["osm"].get("tiles").is_none());
        assert_eq!(value["layers"], json!([{"id": "water", "type": "fill"}]));
    }

    #[rstest]
    fn build_style_wraps_patch_failures(ja: Language) {
        let source = MemoryLayerSource::uniform(
            LayerList::new(vec![Layer::new("earth", "fill")]).unwrap(),
        );
        let err = build_style(&source, &StyleConfig::default(), &ja, Flavor::White).unwrap_err();
        match err {
            BuildError::Patch {
                flavor,
                source: PatchError::MissingAnchor { anchor, .. },
                ..
            } => {
                assert_eq!(flavor, Flavor::White);
                assert_eq!(anchor, "water");
            }
            other => panic!("expected patch failure, found {other:?}"),
        }
    }

    #[rstest]
    fn build_style_points_hillshade_at_dem_source(ja: Language) {
        let source = MemoryLayerSource::uniform(
            LayerList::new(vec![Layer::new("water", "fill")]).unwrap(),
        );
        let config = StyleConfig {
            dem_source_id: "terrain".to_owned(),
            ..StyleConfig::default()
        };
        let doc = build_style(&source, &config, &ja, Flavor::Light).unwrap();
        assert_eq!(doc.layers.get("hillshade").unwrap().source(), Some("terrain"));
        assert!(doc.sources.contains_key("terrain"));
    }
}
