//! Corpus-level inference front API.
//!
//! Stream records in, fold each one into a single accumulator schema
//! left-to-right, and gather `"type"` literals from the raw values as they
//! pass by. `solve` then runs the whole-corpus passes: literal-field rewrite
//! followed by union cleaning. Union member order and object key order are
//! reproducible for identical input order.

use indexmap::IndexSet;
use serde_json::Value;

use crate::analyze::analyze_value;
use crate::clean::clean_unknown_unions;
use crate::discriminant::{collect_type_literals, rewrite_type_fields};
use crate::merge::merge;
use crate::schema::Schema;

pub struct Inference {
    state: Option<Schema>,
    type_literals: IndexSet<String>,
}

impl Inference {
    pub fn new() -> Self {
        Self {
            state: None,
            type_literals: IndexSet::new(),
        }
    }

    pub fn observe_value(&mut self, value: &Value) {
        collect_type_literals(value, &mut self.type_literals);
        let observed = analyze_value(value);
        self.state = Some(match self.state.take() {
            None => observed,
            Some(current) => merge(current, observed),
        });
    }

    /// Literals gathered so far, in first-seen order.
    pub fn type_literals(&self) -> &IndexSet<String> {
        &self.type_literals
    }

    /// Finish the fold: rewrite `"type"` leaves, clean unions. `None` when
    /// nothing was observed.
    pub fn solve(self) -> Option<Schema> {
        let schema = self.state?;
        let schema = rewrite_type_fields(schema, &self.type_literals);
        Some(clean_unknown_unions(schema))
    }
}

impl Default for Inference {
    fn default() -> Self {
        Self::new()
    }
}

pub fn infer_from_values<'a, I>(values: I) -> Option<Schema>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut inference = Inference::new();
    for value in values {
        inference.observe_value(value);
    }
    inference.solve()
}
