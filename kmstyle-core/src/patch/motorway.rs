//! Derives dedicated motorway layers from the generic highway layers.
//!
//! The upstream schema draws motorways with the same layers as trunk roads.
//! For each row of [`MOTORWAY_DERIVATIONS`] the source layer is cloned,
//! narrowed to motorways (or motorway links) in the matching road context,
//! recoloured, and inserted directly above its source.

use log::{debug, warn};
use serde_json::Value;

use super::PatchError;
use crate::filter::{all, eq, has, not_has};
use crate::palette::{MotorwayPalette, RoadContext, RoadPart};
use crate::{Derivation, Flavor, LayerList};

/// One row of the motorway derivation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorwayDerivation {
    /// Layer to clone.
    pub source: &'static str,
    /// Id of the derived layer.
    pub target: &'static str,
    /// Tunnel, bridge or at-grade.
    pub context: RoadContext,
    /// Whether the layer draws motorway links.
    pub link: bool,
}

impl MotorwayDerivation {
    const fn new(
        source: &'static str,
        target: &'static str,
        context: RoadContext,
        link: bool,
    ) -> Self {
        Self {
            source,
            target,
            context,
            link,
        }
    }

    /// Casing layers are the ones whose id ends in `_casing`.
    #[must_use]
    pub fn part(&self) -> RoadPart {
        if self.target.ends_with("_casing") {
            RoadPart::Casing
        } else {
            RoadPart::Fill
        }
    }

    /// Filter selecting the motorway features this layer draws.
    #[must_use]
    pub fn filter(&self) -> Value {
        let (kind_detail, link) = if self.link {
            ("motorway_link", has("is_link"))
        } else {
            ("motorway", not_has("is_link"))
        };
        let mut conditions = vec![eq("kind", "highway"), eq("kind_detail", kind_detail), link];
        match self.context {
            RoadContext::Surface => {
                conditions.push(not_has("is_tunnel"));
                conditions.push(not_has("is_bridge"));
            }
            RoadContext::Tunnel => conditions.push(has("is_tunnel")),
            RoadContext::Bridge => conditions.push(has("is_bridge")),
        }
        all(conditions)
    }
}

/// The twelve motorway layers and the layers they are cloned from.
pub const MOTORWAY_DERIVATIONS: [MotorwayDerivation; 12] = {
    use RoadContext::{Bridge, Surface, Tunnel};
    [
        MotorwayDerivation::new(
            "roads_tunnels_link_casing",
            "roads_tunnels_motorway_link_casing",
            Tunnel,
            true,
        ),
        MotorwayDerivation::new(
            "roads_tunnels_highway_casing",
            "roads_tunnels_motorway_casing",
            Tunnel,
            false,
        ),
        MotorwayDerivation::new("roads_tunnels_link", "roads_tunnels_motorway_link", Tunnel, true),
        MotorwayDerivation::new("roads_tunnels_highway", "roads_tunnels_motorway", Tunnel, false),
        MotorwayDerivation::new("roads_link_casing", "roads_motorway_link_casing", Surface, true),
        MotorwayDerivation::new(
            "roads_highway_casing_late",
            "roads_motorway_casing",
            Surface,
            false,
        ),
        MotorwayDerivation::new("roads_link", "roads_motorway_link", Surface, true),
        MotorwayDerivation::new("roads_highway", "roads_motorway", Surface, false),
        MotorwayDerivation::new(
            "roads_bridges_link_casing",
            "roads_bridges_motorway_link_casing",
            Bridge,
            true,
        ),
        MotorwayDerivation::new(
            "roads_bridges_highway_casing",
            "roads_bridges_motorway_casing",
            Bridge,
            false,
        ),
        MotorwayDerivation::new("roads_bridges_link", "roads_bridges_motorway_link", Bridge, true),
        MotorwayDerivation::new("roads_bridges_highway", "roads_bridges_motorway", Bridge, false),
    ]
};

/// Insert every motorway layer from [`MOTORWAY_DERIVATIONS`].
///
/// Targets that already exist are left alone. Every row is attempted before
/// reporting missing source layers, so the error names all of them. Returns
/// the number of layers inserted.
pub fn derive_motorways(layers: &mut LayerList, flavor: Flavor) -> Result<usize, PatchError> {
    let Some(palette) = MotorwayPalette::for_flavor(flavor) else {
        debug!("flavor {flavor} has no motorway palette; motorways unchanged");
        return Ok(0);
    };
    let mut inserted = 0;
    let mut missing: Vec<String> = Vec::new();
    for derivation in &MOTORWAY_DERIVATIONS {
        let color = palette.line_color(derivation.context, derivation.part());
        let outcome = layers.derive_layer(derivation.source, derivation.target, |layer| {
            layer.set_filter(derivation.filter());
            layer.set_paint("line-color", Value::from(color));
        });
        match outcome {
            Derivation::Inserted(_) => inserted += 1,
            Derivation::AlreadyPresent => debug!("`{}` already present", derivation.target),
            Derivation::SourceMissing => {
                if !missing.iter().any(|id| id == derivation.source) {
                    missing.push(derivation.source.to_owned());
                }
            }
        }
    }
    if missing.is_empty() {
        Ok(inserted)
    } else {
        warn!("motorway derivation failed; missing {}", missing.join(", "));
        Err(PatchError::MissingSourceLayers { ids: missing })
    }
}
