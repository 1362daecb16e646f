//! Builders and rewrites for filter expressions.
//!
//! Filters stay as raw [`serde_json::Value`] trees so upstream expressions
//! the pipeline does not understand survive unchanged. Combinators built
//! here always carry their tag as element 0.

use serde_json::{Value, json};

/// Tag of the conjunction combinator.
pub const ALL: &str = "all";
/// Tag of the disjunction combinator.
pub const ANY: &str = "any";

/// `["all", ...conditions]`.
pub fn all(conditions: impl IntoIterator<Item = Value>) -> Value {
    combine(ALL, conditions)
}

/// `["any", ...conditions]`.
pub fn any(conditions: impl IntoIterator<Item = Value>) -> Value {
    combine(ANY, conditions)
}

fn combine(tag: &str, conditions: impl IntoIterator<Item = Value>) -> Value {
    let mut expr = vec![Value::from(tag)];
    expr.extend(conditions);
    Value::Array(expr)
}

/// `["==", field, value]`.
pub fn eq(field: &str, value: impl Into<Value>) -> Value {
    json!(["==", field, value.into()])
}

/// `["!=", field, value]`.
pub fn ne(field: &str, value: impl Into<Value>) -> Value {
    json!(["!=", field, value.into()])
}

/// `["<=", field, value]`.
pub fn le(field: &str, value: impl Into<Value>) -> Value {
    json!(["<=", field, value.into()])
}

/// `["has", field]`.
pub fn has(field: &str) -> Value {
    json!(["has", field])
}

/// `["!has", field]`.
pub fn not_has(field: &str) -> Value {
    json!(["!has", field])
}

/// `["in", field, ...values]`.
pub fn one_of<V: Into<Value>>(field: &str, values: impl IntoIterator<Item = V>) -> Value {
    membership("in", field, values)
}

/// `["!in", field, ...values]`.
pub fn none_of<V: Into<Value>>(field: &str, values: impl IntoIterator<Item = V>) -> Value {
    membership("!in", field, values)
}

fn membership<V: Into<Value>>(op: &str, field: &str, values: impl IntoIterator<Item = V>) -> Value {
    let mut expr = vec![Value::from(op), Value::from(field)];
    expr.extend(values.into_iter().map(Into::into));
    Value::Array(expr)
}

/// `["get", property]`.
pub fn get(property: &str) -> Value {
    json!(["get", property])
}

/// `["literal", value]`.
pub fn literal(value: impl Into<Value>) -> Value {
    json!(["literal", value.into()])
}

/// `["interpolate", ["linear"], ["zoom"], z0, v0, z1, v1, ...]`.
pub fn zoom_interpolation(stops: &[(u8, f64)]) -> Value {
    let mut expr = vec![json!("interpolate"), json!(["linear"]), json!(["zoom"])];
    for (zoom, value) in stops {
        expr.push(json!(zoom));
        expr.push(json!(value));
    }
    Value::Array(expr)
}

/// Whether `expr` is the combinator `tag`.
pub fn is_combinator(expr: &Value, tag: &str) -> bool {
    expr.as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .is_some_and(|head| head == tag)
}

/// Split a filter into the conditions it requires.
///
/// An `all` combinator yields its operands; any other expression is a single
/// condition. [`all`] recomposes the pieces.
pub fn conditions(filter: &Value) -> Vec<Value> {
    match filter.as_array() {
        Some(items) if is_combinator(filter, ALL) => items.iter().skip(1).cloned().collect(),
        _ => vec![filter.clone()],
    }
}

/// Whether `expr` has the shape `["in", ["get", "kind"], ["literal", [...]]]`.
pub fn is_kind_enumeration(expr: &Value) -> bool {
    enumeration_values(expr).is_some()
}

fn enumeration_values(expr: &Value) -> Option<&Vec<Value>> {
    let [op, operand, list] = expr.as_array()?.as_slice() else {
        return None;
    };
    if op.as_str() != Some("in") || *operand != get("kind") {
        return None;
    }
    match list.as_array()?.as_slice() {
        [tag, Value::Array(values)] if tag.as_str() == Some("literal") => Some(values),
        _ => None,
    }
}

fn enumeration_values_mut(expr: &mut Value) -> Option<&mut Vec<Value>> {
    if !is_kind_enumeration(expr) {
        return None;
    }
    match expr.as_array_mut()?.get_mut(2)?.as_array_mut()?.get_mut(1)? {
        Value::Array(values) => Some(values),
        _ => None,
    }
}

/// Remove `kind` from every kind enumeration in `filter`.
///
/// Works on a bare enumeration or on the direct operands of an `all`
/// combinator. Returns whether anything was removed.
pub fn remove_kind(filter: &mut Value, kind: &str) -> bool {
    if is_combinator(filter, ALL) {
        let Some(items) = filter.as_array_mut() else {
            return false;
        };
        let mut removed = false;
        for condition in items.iter_mut().skip(1) {
            removed |= remove_kind_from_enumeration(condition, kind);
        }
        removed
    } else {
        remove_kind_from_enumeration(filter, kind)
    }
}

fn remove_kind_from_enumeration(expr: &mut Value, kind: &str) -> bool {
    let Some(values) = enumeration_values_mut(expr) else {
        return false;
    };
    let before = values.len();
    values.retain(|value| value.as_str() != Some(kind));
    values.len() != before
}

/// The kinds listed by the first kind enumeration in `filter`.
pub fn enumerated_kinds(filter: &Value) -> Option<Vec<String>> {
    conditions(filter).iter().find_map(|condition| {
        enumeration_values(condition).map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
    })
}
