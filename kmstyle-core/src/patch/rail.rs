//! Splits the generic rail layer into JR, Shinkansen and other rail lines.
//!
//! JR group lines are drawn as a dashed line over a contrasting background
//! stroke with a casing underneath, the familiar Japanese topographic map
//! look. The Shinkansen gets the same treatment in its own colour. Other
//! operators keep a plain solid line.

use log::debug;
use serde_json::{Value, json};

use super::ROADS_SOURCE_LAYER;
use crate::filter::{all, eq, get, has, none_of, not_has, one_of, zoom_interpolation};
use crate::palette::RailPalette;
use crate::{Flavor, Language, Layer, LayerList};

/// Id of the upstream rail layer that gets replaced.
pub const RAIL_LAYER: &str = "roads_rail";

/// Id of the rail label layer.
pub const RAIL_LABEL_LAYER: &str = "roads_labels_rail";

/// Ids of the replacement rail layers in paint order.
pub const RAIL_LAYER_IDS: [&str; 8] = [
    "roads_rail_generic",
    "roads_rail_generic_service",
    "roads_rail_jr_casing",
    "roads_rail_jr_bg",
    "roads_rail_jr",
    "roads_rail_jr_shinkansen_casing",
    "roads_rail_jr_shinkansen_bg",
    "roads_rail_jr_shinkansen",
];

const MAJOR_ROAD_LABELS: &str = "roads_labels_major";

/// Operators of the JR group.
const JR_OPERATORS: [&str; 7] = [
    "北海道旅客鉄道",
    "東日本旅客鉄道",
    "東海旅客鉄道",
    "西日本旅客鉄道",
    "四国旅客鉄道",
    "九州旅客鉄道",
    "日本貨物鉄道",
];

const WIDTH_GENERIC: [(u8, f64); 2] = [(6, 0.3), (18, 10.0)];
const WIDTH_SERVICE: [(u8, f64); 2] = [(14, 0.3), (18, 4.5)];
const WIDTH_JR: [(u8, f64); 2] = [(6, 1.5), (18, 13.0)];
const WIDTH_JR_BG: [(u8, f64); 2] = [(6, 1.0), (18, 9.0)];
const LABEL_SIZE: [(u8, f64); 2] = [(11, 10.0), (18, 14.0)];
const SERVICE_MIN_ZOOM: u8 = 14;
const LABEL_MIN_ZOOM: u8 = 11;

#[derive(Clone, Copy)]
enum Service {
    Excluded,
    Only,
}

#[derive(Clone, Copy)]
enum Operator {
    Jr,
    Other,
}

#[derive(Clone, Copy)]
enum Speed {
    Conventional,
    High,
}

/// `kind == rail`, `kind_detail in {rail, subway}` plus the caller's extras.
fn rail_filter(service: Service, operator: Operator, speed: Option<Speed>) -> Value {
    let mut conditions = vec![
        eq("kind", "rail"),
        one_of("kind_detail", ["rail", "subway"]),
        match service {
            Service::Excluded => not_has("service"),
            Service::Only => has("service"),
        },
        match operator {
            Operator::Jr => one_of("operator", JR_OPERATORS),
            Operator::Other => none_of("operator", JR_OPERATORS),
        },
    ];
    if let Some(speed) = speed {
        conditions.push(match speed {
            Speed::Conventional => not_has("highspeed"),
            Speed::High => has("highspeed"),
        });
    }
    all(conditions)
}

struct RailLine {
    id: &'static str,
    filter: Value,
    color: &'static str,
    width: &'static [(u8, f64)],
    dash: Option<[u8; 2]>,
    min_zoom: Option<u8>,
}

impl RailLine {
    fn into_layer(self, source: Option<&str>) -> Layer {
        let mut layer = Layer::new(self.id, "line")
            .with("source-layer", Value::from(ROADS_SOURCE_LAYER))
            .with_filter(self.filter)
            .with_paint("line-color", Value::from(self.color))
            .with_paint("line-width", zoom_interpolation(self.width));
        if let Some(source) = source {
            layer.insert("source", Value::from(source));
        }
        if let Some(min_zoom) = self.min_zoom {
            layer.insert("minzoom", json!(min_zoom));
        }
        if let Some(dash) = self.dash {
            layer.set_paint("line-dasharray", json!(dash));
        }
        layer
    }
}

fn rail_lines(palette: &RailPalette) -> [RailLine; 8] {
    let [generic, service, jr_casing, jr_bg, jr, sk_casing, sk_bg, sk] = RAIL_LAYER_IDS;
    let jr_line = |speed| rail_filter(Service::Excluded, Operator::Jr, Some(speed));
    [
        RailLine {
            id: generic,
            filter: rail_filter(Service::Excluded, Operator::Other, None),
            color: palette.generic,
            width: &WIDTH_GENERIC,
            dash: None,
            min_zoom: None,
        },
        RailLine {
            id: service,
            filter: rail_filter(Service::Only, Operator::Other, None),
            color: palette.generic,
            width: &WIDTH_SERVICE,
            dash: None,
            min_zoom: Some(SERVICE_MIN_ZOOM),
        },
        RailLine {
            id: jr_casing,
            filter: jr_line(Speed::Conventional),
            color: palette.jr_fill,
            width: &WIDTH_JR,
            dash: None,
            min_zoom: None,
        },
        RailLine {
            id: jr_bg,
            filter: jr_line(Speed::Conventional),
            color: palette.jr_background,
            width: &WIDTH_JR_BG,
            dash: None,
            min_zoom: None,
        },
        RailLine {
            id: jr,
            filter: jr_line(Speed::Conventional),
            color: palette.jr_fill,
            width: &WIDTH_JR,
            dash: Some([5, 5]),
            min_zoom: None,
        },
        RailLine {
            id: sk_casing,
            filter: jr_line(Speed::High),
            color: palette.shinkansen,
            width: &WIDTH_JR,
            dash: None,
            min_zoom: None,
        },
        RailLine {
            id: sk_bg,
            filter: jr_line(Speed::High),
            color: palette.jr_background,
            width: &WIDTH_JR_BG,
            dash: None,
            min_zoom: None,
        },
        RailLine {
            id: sk,
            filter: jr_line(Speed::High),
            color: palette.shinkansen,
            width: &WIDTH_JR,
            dash: Some([8, 8]),
            min_zoom: None,
        },
    ]
}

fn rail_label(palette: &RailPalette, language: &Language, source: Option<&str>) -> Layer {
    let mut layer = Layer::new(RAIL_LABEL_LAYER, "symbol")
        .with("source-layer", Value::from(ROADS_SOURCE_LAYER))
        .with("minzoom", json!(LABEL_MIN_ZOOM))
        .with_filter(all([
            eq("kind", "rail"),
            eq("kind_detail", "rail"),
            not_has("service"),
        ]))
        .with_layout("symbol-placement", json!("line"))
        .with_layout("text-font", json!(["Noto Sans Regular"]))
        .with_layout(
            "text-field",
            json!(["coalesce", get(&language.name_field()), get("name")]),
        )
        .with_layout("text-size", zoom_interpolation(&LABEL_SIZE))
        .with_paint("text-color", Value::from(palette.label_text))
        .with_paint("text-halo-color", Value::from(palette.label_halo))
        .with_paint("text-halo-width", json!(1));
    if let Some(source) = source {
        layer.insert("source", Value::from(source));
    }
    layer
}

/// Replace `roads_rail` with the eight specialised rail layers and add a
/// rail label layer under the major road labels.
///
/// Only light and dark flavors are affected. Returns whether the list
/// changed.
pub fn split_rail(layers: &mut LayerList, language: &Language, flavor: Flavor) -> bool {
    let Some(palette) = RailPalette::for_flavor(flavor) else {
        debug!("flavor {flavor} has no rail palette; rail unchanged");
        return false;
    };
    let mut changed = false;
    let mut source = None;
    if let Some(rail) = layers.get(RAIL_LAYER) {
        source = rail.source().map(str::to_owned);
        let replacements = rail_lines(&palette)
            .into_iter()
            .map(|line| line.into_layer(source.as_deref()))
            .collect();
        changed |= layers.replace(RAIL_LAYER, replacements);
    } else {
        debug!("no `{RAIL_LAYER}` layer; rail split skipped");
    }
    if let Some(anchor) = layers.get(MAJOR_ROAD_LABELS) {
        let label_source = source.or_else(|| anchor.source().map(str::to_owned));
        let label = rail_label(&palette, language, label_source.as_deref());
        changed |= layers.insert_before(MAJOR_ROAD_LABELS, label) == Some(true);
    }
    changed
}
