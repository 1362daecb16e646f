//! Moves stations out of the generic POI layer into their own layer.

use log::debug;
use serde_json::Value;

use crate::LayerList;
use crate::filter::{all, conditions, get, is_kind_enumeration, literal, remove_kind};

/// Id of the generic POI layer.
pub const POI_LAYER: &str = "pois";

/// Id of the derived station layer.
pub const STATION_LAYER: &str = "pois_station";

const STATION_KIND: &str = "station";
const PLACES_PREFIX: &str = "places_";

fn station_filter(original: Option<&Value>) -> Value {
    let kind_is_station = Value::Array(vec![
        Value::from("=="),
        get("kind"),
        literal(STATION_KIND),
    ]);
    let rest = original
        .map(conditions)
        .unwrap_or_default()
        .into_iter()
        .filter(|condition| !is_kind_enumeration(condition));
    all(std::iter::once(kind_is_station).chain(rest))
}

/// Clone `pois` as `pois_station` and drop stations from `pois`.
///
/// The station layer keeps every condition of the original filter except
/// the kind enumeration, which becomes `kind == "station"`. It is drawn
/// above the last `places_*` layer so station icons win over place labels,
/// or directly above `pois` when there are none. Returns whether the list
/// changed.
pub fn split_pois(layers: &mut LayerList) -> bool {
    if layers.contains(STATION_LAYER) {
        debug!("`{STATION_LAYER}` already present");
        return false;
    }
    let Some(pois) = layers.get_mut(POI_LAYER) else {
        debug!("no `{POI_LAYER}` layer; POI split skipped");
        return false;
    };
    let mut station = pois.clone();
    station.set_id(STATION_LAYER);
    station.set_filter(station_filter(pois.filter()));
    if let Some(filter) = pois.filter_mut() {
        remove_kind(filter, STATION_KIND);
    }
    let anchor = layers
        .last_position(|layer| layer.id().starts_with(PLACES_PREFIX))
        .or_else(|| layers.position(POI_LAYER))
        .map_or(layers.len(), |index| index + 1);
    layers.insert(anchor, station)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Layer, filter};
    use rstest::rstest;
    use serde_json::json;

    fn pois_layer(filter: Value) -> Layer {
        Layer::new(POI_LAYER, "symbol")
            .with_source("osm", "pois")
            .with_filter(filter)
    }

    fn kinds(values: &[&str]) -> Value {
        json!(["in", ["get", "kind"], ["literal", values]])
    }

    #[rstest]
    fn splits_station_out_of_enumeration() {
        let mut layers = LayerList::new(vec![
            Layer::new("water", "fill"),
            pois_layer(json!(["all", kinds(&["station", "cafe"]), [">=", ["zoom"], 13]])),
        ])
        .unwrap();
        assert!(split_pois(&mut layers));
        let ids: Vec<_> = layers.ids().collect();
        assert_eq!(ids, ["water", POI_LAYER, STATION_LAYER]);
        assert_eq!(
            layers.get(POI_LAYER).unwrap().filter(),
            Some(&json!(["all", kinds(&["cafe"]), [">=", ["zoom"], 13]]))
        );
        assert_eq!(
            layers.get(STATION_LAYER).unwrap().filter(),
            Some(&json!([
                "all",
                ["==", ["get", "kind"], ["literal", "station"]],
                [">=", ["zoom"], 13]
            ]))
        );
    }

    #[rstest]
    fn bare_filter_is_a_single_condition() {
        let mut layers = LayerList::new(vec![pois_layer(kinds(&["station", "park"]))]).unwrap();
        split_pois(&mut layers);
        assert_eq!(layers.get(POI_LAYER).unwrap().filter(), Some(&kinds(&["park"])));
        assert_eq!(
            layers.get(STATION_LAYER).unwrap().filter(),
            Some(&json!(["all", ["==", ["get", "kind"], ["literal", "station"]]]))
        );
    }

    #[rstest]
    fn station_goes_after_last_places_layer() {
        let mut layers = LayerList::new(vec![
            pois_layer(kinds(&["station"])),
            Layer::new("places_subplace", "symbol"),
            Layer::new("places_locality", "symbol"),
            Layer::new("places_country", "symbol"),
            Layer::new("roads_labels_major", "symbol"),
        ])
        .unwrap();
        split_pois(&mut layers);
        assert_eq!(layers.position(STATION_LAYER), Some(4));
    }

    #[rstest]
    fn split_preserves_the_enumerated_kinds() {
        let original = ["station", "cafe", "museum"];
        let mut layers = LayerList::new(vec![pois_layer(all([kinds(&original)]))]).unwrap();
        split_pois(&mut layers);
        let remaining = filter::enumerated_kinds(layers.get(POI_LAYER).unwrap().filter().unwrap())
            .unwrap();
        let station = layers.get(STATION_LAYER).unwrap().filter().unwrap();
        let station_kind = station
            .as_array()
            .and_then(|items| items.get(1))
            .and_then(|eq| eq.get(2))
            .and_then(|lit| lit.get(1))
            .and_then(Value::as_str)
            .unwrap();
        let mut union: Vec<String> = remaining;
        union.push(station_kind.to_owned());
        union.sort();
        let mut expected: Vec<String> = original.iter().map(|s| (*s).to_owned()).collect();
        expected.sort();
        assert_eq!(union, expected);
    }

    #[rstest]
    fn absent_pois_or_existing_station_is_noop() {
        let mut empty = LayerList::new(vec![Layer::new("water", "fill")]).unwrap();
        assert!(!split_pois(&mut empty));

        let mut layers = LayerList::new(vec![pois_layer(kinds(&["station"]))]).unwrap();
        assert!(split_pois(&mut layers));
        let once = layers.clone();
        assert!(!split_pois(&mut layers));
        assert_eq!(layers, once);
    }

    #[rstest]
    fn unfiltered_pois_get_station_only_filter() {
        let mut layers = LayerList::new(vec![Layer::new(POI_LAYER, "symbol")]).unwrap();
        split_pois(&mut layers);
        assert_eq!(layers.get(POI_LAYER).unwrap().filter(), None);
        assert_eq!(
            layers.get(STATION_LAYER).unwrap().filter(),
            Some(&json!(["all", ["==", ["get", "kind"], ["literal", "station"]]]))
        );
    }
}
