//! Union simplification.
//!
//! Drops the transient `unknown` placeholder from unions once a concrete
//! member exists. Idempotent and confluent per node, so processing order
//! does not matter.

use crate::schema::Schema;

pub fn clean_unknown_unions(schema: Schema) -> Schema {
    match schema {
        Schema::Union(members) => {
            let mut members: Vec<Schema> =
                members.into_iter().map(clean_unknown_unions).collect();
            if members.iter().any(|member| !member.is_unknown()) {
                members.retain(|member| !member.is_unknown());
            }
            if members.len() == 1 {
                members.remove(0)
            } else {
                Schema::Union(members)
            }
        }
        Schema::Array(element) => Schema::Array(Box::new(clean_unknown_unions(*element))),
        Schema::Object(properties) => Schema::Object(
            properties
                .into_iter()
                .map(|(key, value)| (key, clean_unknown_unions(value)))
                .collect(),
        ),
        other => other,
    }
}
