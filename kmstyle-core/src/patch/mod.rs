//! The layer-patching pipeline.
//!
//! Each stage rewrites a [`LayerList`] in place and later stages look up
//! layers produced by earlier ones, so [`apply_patches`] runs them in a fixed
//! order: boundaries, rail, motorways, POIs, hillshade. Every stage is
//! idempotent: running the pipeline over its own output changes nothing.

mod boundary;
mod hillshade;
mod motorway;
mod poi;
mod rail;

pub use boundary::{BOUNDARY_LAYER, patch_boundaries};
pub use hillshade::{HILLSHADE_LAYER, WATER_LAYER, insert_hillshade};
pub use motorway::{MOTORWAY_DERIVATIONS, MotorwayDerivation, derive_motorways};
pub use poi::{POI_LAYER, STATION_LAYER, split_pois};
pub use rail::{RAIL_LABEL_LAYER, RAIL_LAYER, RAIL_LAYER_IDS, split_rail};

use log::debug;
use thiserror::Error;

use crate::{Flavor, Language, LayerList};

/// Source layer carrying roads and rail in the upstream tile schema.
pub const ROADS_SOURCE_LAYER: &str = "roads";

/// Default id of the raster-DEM source referenced by the hillshade layer.
pub const DEFAULT_DEM_SOURCE: &str = "dem";

/// Fatal errors raised by the patch stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// Motorway derivation could not find the layers it clones.
    #[error("motorway derivation is missing source layers: {}", ids.join(", "))]
    MissingSourceLayers {
        /// Missing source ids, deduplicated, in table order.
        ids: Vec<String>,
    },
    /// A stage could not find the layer it inserts relative to.
    #[error("{stage} requires anchor layer `{anchor}`")]
    MissingAnchor {
        /// Stage that failed.
        stage: &'static str,
        /// The absent layer id.
        anchor: &'static str,
    },
}

/// Inputs shared by the patch stages for one (language, flavor) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchContext {
    /// Label language.
    pub language: Language,
    /// Colour flavor.
    pub flavor: Flavor,
    /// Raster-DEM source used by the hillshade layer.
    pub dem_source: String,
}

impl PatchContext {
    /// Context using [`DEFAULT_DEM_SOURCE`].
    #[must_use]
    pub fn new(language: Language, flavor: Flavor) -> Self {
        Self {
            language,
            flavor,
            dem_source: DEFAULT_DEM_SOURCE.to_owned(),
        }
    }

    /// Override the DEM source id.
    #[must_use]
    pub fn with_dem_source(mut self, dem_source: impl Into<String>) -> Self {
        self.dem_source = dem_source.into();
        self
    }
}

/// Run every patch stage over `layers` in order.
///
/// Motorway derivation only runs when the list holds at least one of its
/// source layers; a roadless base list has nothing to derive from. Once it
/// runs, every missing source is fatal.
pub fn apply_patches(layers: &mut LayerList, context: &PatchContext) -> Result<(), PatchError> {
    patch_boundaries(layers);
    split_rail(layers, &context.language, context.flavor);
    if carries_motorway_sources(layers) {
        derive_motorways(layers, context.flavor)?;
    } else {
        debug!("no motorway source layers; skipping motorway derivation");
    }
    split_pois(layers);
    insert_hillshade(layers, &context.dem_source)?;
    Ok(())
}

fn carries_motorway_sources(layers: &LayerList) -> bool {
    MOTORWAY_DERIVATIONS
        .iter()
        .any(|derivation| layers.contains(derivation.source))
}
