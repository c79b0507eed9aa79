//! Per-value structural classification.
//!
//! Pure functions from one `serde_json::Value` to a `Schema` node. Array
//! elements are merged left-to-right as they are seen, so an array's element
//! schema already accommodates every element of that one array; cross-record
//! accumulation happens later in the corpus fold.

use serde_json::Value;

use crate::merge::merge;
use crate::schema::{Primitive, Schema};

pub fn analyze_value(value: &Value) -> Schema {
    match value {
        Value::Null => Schema::Primitive(Primitive::Null),
        Value::Bool(_) => Schema::Primitive(Primitive::Boolean),
        Value::Number(_) => Schema::Primitive(Primitive::Number),
        Value::String(_) => Schema::Primitive(Primitive::String),
        Value::Array(items) => analyze_array(items),
        Value::Object(map) => Schema::Object(
            map.iter()
                .map(|(key, member)| (key.clone(), analyze_value(member)))
                .collect(),
        ),
    }
}

fn analyze_array(items: &[Value]) -> Schema {
    // An empty array carries no element evidence; the placeholder is dropped
    // as soon as a sibling array contributes a concrete element type.
    let Some((first, rest)) = items.split_first() else {
        return Schema::Array(Box::new(Schema::Primitive(Primitive::Unknown)));
    };
    let mut element = analyze_value(first);
    for item in rest {
        element = merge(element, analyze_value(item));
    }
    Schema::Array(Box::new(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Kind;
    use serde_json::json;

    #[test]
    fn scalars_classify_by_runtime_kind() {
        assert_eq!(analyze_value(&json!(null)), Schema::Primitive(Primitive::Null));
        assert_eq!(analyze_value(&json!(true)), Schema::Primitive(Primitive::Boolean));
        assert_eq!(analyze_value(&json!(3.5)), Schema::Primitive(Primitive::Number));
        assert_eq!(analyze_value(&json!(7)), Schema::Primitive(Primitive::Number));
        assert_eq!(analyze_value(&json!("x")), Schema::Primitive(Primitive::String));
    }

    #[test]
    fn object_keys_keep_source_order() {
        let schema = analyze_value(&json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let Schema::Object(properties) = schema else {
            panic!("expected object");
        };
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn empty_array_gets_unknown_element() {
        assert_eq!(
            analyze_value(&json!([])),
            Schema::Array(Box::new(Schema::Primitive(Primitive::Unknown)))
        );
    }

    #[test]
    fn homogeneous_array_collapses_to_single_element_kind() {
        assert_eq!(
            analyze_value(&json!([1, 2, 3])),
            Schema::Array(Box::new(Schema::Primitive(Primitive::Number)))
        );
    }

    #[test]
    fn mixed_array_unions_elements_in_first_seen_order() {
        let schema = analyze_value(&json!([1, "a", 2, true]));
        let Schema::Array(element) = schema else {
            panic!("expected array");
        };
        assert_eq!(
            *element,
            Schema::Union(vec![
                Schema::Primitive(Primitive::Number),
                Schema::Primitive(Primitive::String),
                Schema::Primitive(Primitive::Boolean),
            ])
        );
    }

    #[test]
    fn array_of_objects_merges_element_properties() {
        let schema = analyze_value(&json!([{"a": 1}, {"b": "x"}]));
        let Schema::Array(element) = schema else {
            panic!("expected array");
        };
        assert_eq!(element.kind(), Kind::Object);
        let Schema::Object(properties) = *element else {
            unreachable!();
        };
        assert_eq!(properties.len(), 2);
        assert_eq!(properties["a"], Schema::Primitive(Primitive::Number));
        assert_eq!(properties["b"], Schema::Primitive(Primitive::String));
    }

    #[test]
    fn nested_structures_recurse() {
        let schema = analyze_value(&json!({"loc": {"lat": 1.0, "lon": 2.0}}));
        let Schema::Object(properties) = schema else {
            panic!("expected object");
        };
        let Schema::Object(loc) = &properties["loc"] else {
            panic!("expected nested object");
        };
        assert_eq!(loc["lat"], Schema::Primitive(Primitive::Number));
    }
}
