//! Country boundary filter rewrite.

use log::debug;

use crate::LayerList;
use crate::filter::{all, le, ne};

/// Id of the country boundary layer.
pub const BOUNDARY_LAYER: &str = "boundaries_country";

/// Restrict country boundaries to admin levels up to 2 and hide disputed
/// segments.
///
/// Returns whether the layer was present.
pub fn patch_boundaries(layers: &mut LayerList) -> bool {
    let Some(layer) = layers.get_mut(BOUNDARY_LAYER) else {
        debug!("no `{BOUNDARY_LAYER}` layer; boundary filter unchanged");
        return false;
    };
    layer.set_filter(all([le("kind_detail", 2), ne("disputed", true)]));
    true
}
