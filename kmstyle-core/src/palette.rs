//! Colours for the rail and motorway layers.
//!
//! Only [`Flavor::Light`] and [`Flavor::Dark`] have palettes; the other
//! flavors keep the upstream road styling untouched.

use crate::Flavor;

/// Colours used by the rail layers and the rail label layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RailPalette {
    /// Non-JR rail lines.
    pub generic: &'static str,
    /// JR casing and dash colour.
    pub jr_fill: &'static str,
    /// Stroke under the JR dashes.
    pub jr_background: &'static str,
    /// Shinkansen casing and dash colour.
    pub shinkansen: &'static str,
    /// Rail label text.
    pub label_text: &'static str,
    /// Rail label halo.
    pub label_halo: &'static str,
}

impl RailPalette {
    const LIGHT: Self = Self {
        generic: "#9b9b9b",
        jr_fill: "#5e5e5e",
        jr_background: "#ffffff",
        shinkansen: "#2a5caa",
        label_text: "#4f4f4f",
        label_halo: "#ffffff",
    };

    const DARK: Self = Self {
        generic: "#5f5f5f",
        jr_fill: "#a9a9a9",
        jr_background: "#222222",
        shinkansen: "#6d9be3",
        label_text: "#c4c4c4",
        label_halo: "#1b1b1b",
    };

    /// Palette for `flavor`, if it has one.
    #[must_use]
    pub const fn for_flavor(flavor: Flavor) -> Option<Self> {
        if !flavor.has_transport_palette() {
            return None;
        }
        match flavor {
            Flavor::Dark => Some(Self::DARK),
            _ => Some(Self::LIGHT),
        }
    }
}

/// Whether a derived motorway layer runs at grade, in a tunnel or on a
/// bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadContext {
    /// Neither tunnel nor bridge.
    Surface,
    /// Carries the tunnel marker.
    Tunnel,
    /// Carries the bridge marker.
    Bridge,
}

/// Casing or fill half of a road line pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadPart {
    /// The wider stroke drawn underneath.
    Casing,
    /// The narrower stroke drawn on top.
    Fill,
}

/// One casing/fill pair of motorway colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShade {
    /// Casing colour.
    pub casing: &'static str,
    /// Fill colour.
    pub fill: &'static str,
}

/// Motorway colours for one flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorwayPalette {
    /// Shade for surface and bridge motorways.
    pub surface: LineShade,
    /// Shade for tunnelled motorways.
    pub tunnel: LineShade,
}

impl MotorwayPalette {
    const LIGHT: Self = Self {
        surface: LineShade {
            casing: "#4f9a67",
            fill: "#9fd6ae",
        },
        tunnel: LineShade {
            casing: "#98c4a5",
            fill: "#cfe9d6",
        },
    };

    const DARK: Self = Self {
        surface: LineShade {
            casing: "#1f4a32",
            fill: "#3d7a54",
        },
        tunnel: LineShade {
            casing: "#1a3326",
            fill: "#2b4d3a",
        },
    };

    /// Palette for `flavor`, if it has one.
    #[must_use]
    pub const fn for_flavor(flavor: Flavor) -> Option<Self> {
        if !flavor.has_transport_palette() {
            return None;
        }
        match flavor {
            Flavor::Dark => Some(Self::DARK),
            _ => Some(Self::LIGHT),
        }
    }

    /// Line colour for a derived motorway layer.
    #[must_use]
    pub const fn line_color(&self, context: RoadContext, part: RoadPart) -> &'static str {
        let shade = match context {
            RoadContext::Tunnel => self.tunnel,
            RoadContext::Surface | RoadContext::Bridge => self.surface,
        };
        match part {
            RoadPart::Casing => shade.casing,
            RoadPart::Fill => shade.fill,
        }
    }
}
