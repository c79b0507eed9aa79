//! Tagged schema tree.
//!
//! One variant per structural kind; no shape-polymorphic nodes. Every pass
//! over the tree (merge, rewrite, clean, codegen) consumes or borrows whole
//! variants, so partial shapes cannot exist.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// The inferred structural type of one or more JSON values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    Primitive(Primitive),
    /// Precomputed literal-type expression, e.g. `"foo" | "bar"`.
    /// Only produced by the `"type"`-field rewrite pass.
    LiteralUnion(String),
    /// Element is the merge of every element seen at this position.
    Array(Box<Schema>),
    /// Key order is insertion order of first encounter.
    Object(IndexMap<String, Schema>),
    /// Members unique by kind; at most one object and one array member.
    Union(Vec<Schema>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    /// Placeholder for the element type of an empty array. Transient: the
    /// union cleaner removes it wherever a concrete kind was also observed.
    Unknown,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
            Primitive::Unknown => "unknown",
        }
    }
}

/// Union-membership discriminant. Unions hold at most one member per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Unknown,
    LiteralUnion,
    Array,
    Object,
    Union,
}

impl Schema {
    pub fn kind(&self) -> Kind {
        match self {
            Schema::Primitive(Primitive::String) => Kind::String,
            Schema::Primitive(Primitive::Number) => Kind::Number,
            Schema::Primitive(Primitive::Boolean) => Kind::Boolean,
            Schema::Primitive(Primitive::Null) => Kind::Null,
            Schema::Primitive(Primitive::Undefined) => Kind::Undefined,
            Schema::Primitive(Primitive::Unknown) => Kind::Unknown,
            Schema::LiteralUnion(_) => Kind::LiteralUnion,
            Schema::Array(_) => Kind::Array,
            Schema::Object(_) => Kind::Object,
            Schema::Union(_) => Kind::Union,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Schema::Primitive(Primitive::Unknown))
    }
}

// Debug view mirrors the working shape of the tree:
//   {"type": "object", "properties": {...}}
//   {"type": "array", "elementTypes": {...}}
//   {"unionTypes": [...]}
impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Schema::Primitive(p) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", p)?;
                map.end()
            }
            Schema::LiteralUnion(text) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "literal_union")?;
                map.serialize_entry("value", text)?;
                map.end()
            }
            Schema::Array(element) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("elementTypes", element)?;
                map.end()
            }
            Schema::Object(properties) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "object")?;
                map.serialize_entry("properties", properties)?;
                map.end()
            }
            Schema::Union(members) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("unionTypes", members)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitive_names() {
        assert_eq!(Primitive::String.name(), "string");
        assert_eq!(Primitive::Unknown.name(), "unknown");
    }

    #[test]
    fn debug_view_shapes() {
        let schema = Schema::Object(IndexMap::from([
            ("id".to_string(), Schema::Primitive(Primitive::Number)),
            (
                "tags".to_string(),
                Schema::Array(Box::new(Schema::Primitive(Primitive::String))),
            ),
            (
                "v".to_string(),
                Schema::Union(vec![
                    Schema::Primitive(Primitive::Number),
                    Schema::LiteralUnion("\"a\" | \"b\"".to_string()),
                ]),
            ),
        ]));
        let view = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            view,
            json!({
                "type": "object",
                "properties": {
                    "id": { "type": "number" },
                    "tags": { "type": "array", "elementTypes": { "type": "string" } },
                    "v": { "unionTypes": [
                        { "type": "number" },
                        { "type": "literal_union", "value": "\"a\" | \"b\"" }
                    ]},
                },
            })
        );
    }

    #[test]
    fn kind_separates_primitive_kinds() {
        assert_ne!(
            Schema::Primitive(Primitive::String).kind(),
            Schema::Primitive(Primitive::Number).kind()
        );
        assert_eq!(Schema::Object(IndexMap::new()).kind(), Kind::Object);
    }
}
