//! Discriminator-field handling.
//!
//! Two corpus-wide passes over `"type"` keys. The collector walks the raw
//! records (not the merged schema) so it sees every literal that ever
//! occurred, in first-seen order. The rewriter then replaces every merged
//! `"type"` property that is still a plain string with one closed
//! literal-union expression over the collected set.

use indexmap::IndexSet;
use serde_json::Value;

use crate::schema::{Primitive, Schema};

/// Append every string value keyed `"type"` anywhere in `value` to
/// `literals`. Duplicates are ignored; insertion order is preserved.
pub fn collect_type_literals(value: &Value, literals: &mut IndexSet<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_type_literals(item, literals);
            }
        }
        Value::Object(map) => {
            for (key, member) in map {
                match member {
                    Value::String(literal) if key == "type" => {
                        literals.insert(literal.clone());
                    }
                    _ => collect_type_literals(member, literals),
                }
            }
        }
        _ => {}
    }
}

/// Render the collected set as a literal-union expression: each value
/// double-quoted, joined with ` | `.
pub fn literal_union_text(literals: &IndexSet<String>) -> String {
    literals
        .iter()
        .map(|literal| format!("\"{literal}\""))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Replace every `"type"` property that is exactly a string primitive with a
/// literal union over `literals`. No-op when the set is empty. Only the
/// `"type"` key is touched; a `"type"` property that already merged into a
/// union (or is itself structural) stays as-is.
pub fn rewrite_type_fields(schema: Schema, literals: &IndexSet<String>) -> Schema {
    if literals.is_empty() {
        return schema;
    }
    let text = literal_union_text(literals);
    rewrite(schema, &text)
}

fn rewrite(schema: Schema, text: &str) -> Schema {
    match schema {
        Schema::Object(properties) => Schema::Object(
            properties
                .into_iter()
                .map(|(key, value)| {
                    let value = if key == "type" && value == Schema::Primitive(Primitive::String) {
                        Schema::LiteralUnion(text.to_string())
                    } else {
                        rewrite(value, text)
                    };
                    (key, value)
                })
                .collect(),
        ),
        Schema::Array(element) => Schema::Array(Box::new(rewrite(*element, text))),
        Schema::Union(members) => Schema::Union(
            members
                .into_iter()
                .map(|member| rewrite(member, text))
                .collect(),
        ),
        other => other,
    }
}
