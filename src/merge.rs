//! Pairwise schema merging.
//!
//! `merge` combines two schema nodes into one that structurally accommodates
//! both. It is used for folding whole records into the corpus accumulator and
//! for combining array elements. Operands are taken by value and a new tree
//! is returned; nothing is shared or mutated behind the caller's back.
//!
//! Determinism: union member order and object key order follow first
//! encounter, so a left-to-right fold over the corpus reproduces the same
//! output for the same input order.

use indexmap::IndexMap;

use crate::schema::{Primitive, Schema};

pub fn merge(a: Schema, b: Schema) -> Schema {
    match (a, b) {
        // Identical primitive kinds are structurally the same schema.
        (Schema::Primitive(p), Schema::Primitive(q)) if p == q => Schema::Primitive(p),
        (Schema::LiteralUnion(text), Schema::LiteralUnion(_)) => Schema::LiteralUnion(text),
        (Schema::Object(left), Schema::Object(right)) => {
            Schema::Object(merge_properties(left, right))
        }
        (Schema::Array(left), Schema::Array(right)) => merge_arrays(*left, *right),
        (a, b) => merge_mixed(a, b),
    }
}

/// Key-set union. A key present on both sides merges recursively; a one-sided
/// key is carried through unchanged. Absence does not mark the field optional;
/// only an explicit undefined-typed value does.
fn merge_properties(
    left: IndexMap<String, Schema>,
    mut right: IndexMap<String, Schema>,
) -> IndexMap<String, Schema> {
    let mut out = IndexMap::with_capacity(left.len() + right.len());
    for (key, left_value) in left {
        match right.shift_remove(&key) {
            Some(right_value) => {
                out.insert(key, merge(left_value, right_value));
            }
            None => {
                out.insert(key, left_value);
            }
        }
    }
    // Keys only seen on the right append in their own order.
    out.extend(right);
    out
}

/// The empty-array placeholder never survives contact with real data: if
/// exactly one side's element is unknown, the concrete side wins whole.
fn merge_arrays(left_element: Schema, right_element: Schema) -> Schema {
    match (left_element.is_unknown(), right_element.is_unknown()) {
        (true, false) => Schema::Array(Box::new(right_element)),
        (false, true) => Schema::Array(Box::new(left_element)),
        _ => Schema::Array(Box::new(merge(left_element, right_element))),
    }
}

/// General mixed-kind merge, including unions on either side. Flatten both
/// operands into member lists, then fold every member into the result list
/// keyed by kind: objects deep-merge properties, arrays merge elements, any
/// other kind keeps its first occurrence.
fn merge_mixed(a: Schema, b: Schema) -> Schema {
    let mut members: Vec<Schema> = Vec::new();
    for candidate in into_members(a).into_iter().chain(into_members(b)) {
        match members.iter().position(|m| m.kind() == candidate.kind()) {
            None => members.push(candidate),
            Some(i) => {
                let existing =
                    std::mem::replace(&mut members[i], Schema::Primitive(Primitive::Unknown));
                members[i] = fold_into(existing, candidate);
            }
        }
    }
    if members.len() == 1 {
        members.remove(0)
    } else {
        Schema::Union(members)
    }
}

fn into_members(schema: Schema) -> Vec<Schema> {
    match schema {
        Schema::Union(members) => members,
        other => vec![other],
    }
}

fn fold_into(existing: Schema, incoming: Schema) -> Schema {
    match (existing, incoming) {
        (Schema::Object(left), Schema::Object(right)) => {
            Schema::Object(merge_properties(left, right))
        }
        (Schema::Array(left), Schema::Array(right)) => merge_arrays(*left, *right),
        // Same non-object/non-array kind: definitionally identical.
        (keep, _) => keep,
    }
}
