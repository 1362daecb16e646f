//! Terrain shading under the water layer.

use log::{debug, warn};
use serde_json::Value;

use super::PatchError;
use crate::filter::zoom_interpolation;
use crate::{Layer, LayerList};

/// Id of the inserted hillshade layer.
pub const HILLSHADE_LAYER: &str = "hillshade";

/// Id of the layer the hillshade is drawn under.
pub const WATER_LAYER: &str = "water";

const EXAGGERATION: [(u8, f64); 4] = [(0, 0.4), (6, 0.2), (10, 0.1), (15, 0.05)];

fn hillshade(dem_source: &str) -> Layer {
    Layer::new(HILLSHADE_LAYER, "hillshade")
        .with("source", Value::from(dem_source))
        .with_paint("hillshade-exaggeration", zoom_interpolation(&EXAGGERATION))
}

/// Insert the hillshade layer directly before `water`.
///
/// An existing `hillshade` layer makes this a no-op. Otherwise a missing
/// `water` layer is fatal. Returns whether the layer was inserted.
pub fn insert_hillshade(layers: &mut LayerList, dem_source: &str) -> Result<bool, PatchError> {
    if layers.contains(HILLSHADE_LAYER) {
        debug!("`{HILLSHADE_LAYER}` already present");
        return Ok(false);
    }
    match layers.insert_before(WATER_LAYER, hillshade(dem_source)) {
        Some(inserted) => Ok(inserted),
        None => {
            warn!("cannot place hillshade: no `{WATER_LAYER}` layer");
            Err(PatchError::MissingAnchor {
                stage: "hillshade insertion",
                anchor: WATER_LAYER,
            })
        }
    }
}
