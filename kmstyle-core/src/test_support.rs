//! Fixture layer lists shaped like the upstream basemap output.

use serde_json::{Value, json};

use crate::{Layer, LayerList};

const SOURCE: &str = "osm";

fn line(id: &str, color: &str) -> Layer {
    Layer::new(id, "line")
        .with_source(SOURCE, "roads")
        .with_filter(json!(["all", ["==", "kind", "highway"]]))
        .with_paint("line-color", Value::from(color))
        .with_paint(
            "line-width",
            json!(["interpolate", ["exponential", 1.6], ["zoom"], 3, 0, 18, 15]),
        )
}

/// A trimmed upstream layer list containing every layer the pipeline looks
/// up, in upstream paint order.
///
/// # Panics
/// Never; the fixture ids are unique.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture ids are unique by construction")]
pub fn base_layers() -> LayerList {
    let mut layers = vec![
        Layer::new("background", "background").with_paint("background-color", json!("#cccccc")),
        Layer::new("earth", "fill").with_source(SOURCE, "earth"),
        Layer::new("water", "fill")
            .with_source(SOURCE, "water")
            .with_paint("fill-color", json!("#80deea")),
    ];
    for id in [
        "roads_tunnels_link_casing",
        "roads_tunnels_highway_casing",
        "roads_tunnels_link",
        "roads_tunnels_highway",
        "roads_link_casing",
        "roads_highway_casing_late",
        "roads_link",
        "roads_highway",
    ] {
        layers.push(line(id, "#ffffff"));
    }
    layers.push(
        Layer::new("roads_rail", "line")
            .with_source(SOURCE, "roads")
            .with_filter(json!(["==", "kind", "rail"]))
            .with_paint("line-color", json!("#a7b1b3")),
    );
    for id in [
        "roads_bridges_link_casing",
        "roads_bridges_highway_casing",
        "roads_bridges_link",
        "roads_bridges_highway",
    ] {
        layers.push(line(id, "#ffffff"));
    }
    layers.extend([
        Layer::new("boundaries_country", "line")
            .with_source(SOURCE, "boundaries")
            .with_filter(json!(["<=", "kind_detail", 2])),
        Layer::new("roads_labels_minor", "symbol").with_source(SOURCE, "roads"),
        Layer::new("roads_labels_major", "symbol").with_source(SOURCE, "roads"),
        Layer::new("pois", "symbol")
            .with_source(SOURCE, "pois")
            .with_filter(json!([
                "all",
                ["in", ["get", "kind"], ["literal", ["station", "park", "museum"]]],
                [">=", ["zoom"], ["+", ["get", "min_zoom"], 0]]
            ])),
        Layer::new("places_subplace", "symbol").with_source(SOURCE, "places"),
        Layer::new("places_locality", "symbol").with_source(SOURCE, "places"),
        Layer::new("places_country", "symbol").with_source(SOURCE, "places"),
    ]);
    LayerList::new(layers).expect("fixture ids are unique")
}

/// Background, water and POIs only.
///
/// # Panics
/// Never; the fixture ids are unique.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture ids are unique by construction")]
pub fn roadless_layers() -> LayerList {
    LayerList::new(vec![
        Layer::new("background", "background"),
        Layer::new("water", "fill").with_source(SOURCE, "water"),
        Layer::new("pois", "symbol")
            .with_source(SOURCE, "pois")
            .with_filter(json!(["in", ["get", "kind"], ["literal", ["station", "cafe"]]])),
    ])
    .expect("fixture ids are unique")
}
