//! TypeScript declaration rendering.
//!
//! Two modes over the same cleaned tree. Nominal mode synthesizes named
//! `interface` declarations, deduplicated by derived name; inline mode
//! expands everything into one `type` alias. The dedup set and output buffer
//! live on the `Codegen` value, threaded explicitly through emission.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::Write;

use crate::schema::{Primitive, Schema};

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9]").expect("valid pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Named, deduplicated interface declarations referencing each other.
    Nominal,
    /// One fully expanded anonymous structural type.
    Inline,
}

pub struct Codegen {
    mode: Mode,
    emitted: HashSet<String>,
    out: String,
}

impl Codegen {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            emitted: HashSet::new(),
            out: String::new(),
        }
    }

    pub fn emit(&mut self, schema: &Schema, root_name: &str) {
        match self.mode {
            Mode::Inline => {
                let body = render_inline(schema, 0);
                let _ = writeln!(self.out, "type {root_name} = {body};");
            }
            Mode::Nominal => match schema {
                Schema::Object(_) => self.emit_interface(schema, root_name),
                // A non-object root has no interface of its own; alias it to
                // the expanded rendering so mixed corpora still get output.
                _ => {
                    let body = render_inline(schema, 0);
                    let _ = writeln!(self.out, "type {root_name} = {body};");
                }
            },
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn emit_interface(&mut self, schema: &Schema, name: &str) {
        let Schema::Object(properties) = schema else {
            return;
        };
        if !self.emitted.insert(name.to_string()) {
            return;
        }
        let _ = writeln!(self.out, "interface {name} {{");
        for (key, value) in properties {
            let marker = if is_optional(value) { "?" } else { "" };
            let rendered = render_nominal(value, &child_name(name, key));
            let _ = writeln!(self.out, "  {}{marker}: {rendered};", safe_key(key));
        }
        self.out.push_str("}\n\n");
        for (key, value) in properties {
            self.emit_nested(value, &child_name(name, key));
        }
    }

    // Declarations follow their parent, depth-first in property order.
    fn emit_nested(&mut self, schema: &Schema, name: &str) {
        match schema {
            Schema::Object(_) => self.emit_interface(schema, name),
            Schema::Array(element) => self.emit_nested(element, &format!("{name}Element")),
            Schema::Union(members) => {
                for member in members {
                    self.emit_nested(member, name);
                }
            }
            _ => {}
        }
    }
}

/// Use-site rendering for nominal mode: objects appear by derived name, and
/// array elements extend the name path with `Element`.
fn render_nominal(schema: &Schema, name: &str) -> String {
    match schema {
        Schema::Primitive(primitive) => primitive.name().to_string(),
        Schema::LiteralUnion(text) => text.clone(),
        Schema::Array(element) => {
            format!("[{}]", render_nominal(element, &format!("{name}Element")))
        }
        Schema::Object(properties) if properties.is_empty() => {
            "Record<string, unknown>".to_string()
        }
        Schema::Object(_) => name.to_string(),
        Schema::Union(members) => members
            .iter()
            .map(|member| render_nominal(member, name))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn render_inline(schema: &Schema, depth: usize) -> String {
    match schema {
        Schema::Primitive(primitive) => primitive.name().to_string(),
        Schema::LiteralUnion(text) => text.clone(),
        Schema::Array(element) => format!("[{}]", render_inline(element, depth)),
        Schema::Object(properties) if properties.is_empty() => {
            "Record<string, unknown>".to_string()
        }
        Schema::Object(properties) => {
            let indent = "  ".repeat(depth + 1);
            let close = "  ".repeat(depth);
            let fields: Vec<String> = properties
                .iter()
                .map(|(key, value)| {
                    let marker = if is_optional(value) { "?" } else { "" };
                    format!(
                        "{indent}{}{marker}: {}",
                        safe_key(key),
                        render_inline(value, depth + 1)
                    )
                })
                .collect();
            format!("{{\n{};\n{close}}}", fields.join(";\n"))
        }
        Schema::Union(members) => members
            .iter()
            .map(|member| render_inline(member, depth))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// Optional marker: only an explicit undefined-typed value (alone or as a
/// union member) makes a property optional. A key merely absent from some
/// records does not.
fn is_optional(schema: &Schema) -> bool {
    match schema {
        Schema::Primitive(Primitive::Undefined) => true,
        Schema::Union(members) => members
            .iter()
            .any(|member| matches!(member, Schema::Primitive(Primitive::Undefined))),
        _ => false,
    }
}

/// Keys that are empty, contain whitespace or hyphens, or start with a digit
/// are quoted.
fn safe_key(key: &str) -> String {
    let needs_quotes = key.is_empty()
        || key.chars().any(|c| c.is_whitespace() || c == '-')
        || key.chars().next().is_some_and(|c| c.is_ascii_digit());
    if needs_quotes {
        format!("\"{key}\"")
    } else {
        key.to_string()
    }
}

fn child_name(parent: &str, key: &str) -> String {
    format!("{parent}{}", pascal_component(key))
}

/// One path segment of a derived type name: first letter upper-cased,
/// non-alphanumerics stripped.
pub fn pascal_component(segment: &str) -> String {
    let mut chars = segment.chars();
    let cased = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    NON_ALPHANUMERIC.replace_all(&cased, "").into_owned()
}
