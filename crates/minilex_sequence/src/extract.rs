//! Structural extraction.
//!
//! In extraction mode the flattener does not linearize. It walks the tree
//! post-order and collects every node, then keeps only the nodes whose tag
//! was asked for. A condition node's own `condition` is a guard: the guard
//! node itself is not collected, whatever its shape, but everything nested
//! inside it is. Traversal order is kept and duplicates are not removed.

use std::collections::BTreeSet;

use minilex_foundation::{CONDITION, RESULT, Shape, Symbol, Value};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Node,
    Guard,
}

/// Collection state for one extraction call.
#[derive(Debug, Default)]
pub(crate) struct Extraction {
    items: Vec<Symbol>,
    tags: Option<BTreeSet<&'static str>>,
}

impl Extraction {
    pub(crate) fn new(record_tags: bool) -> Self {
        Self {
            items: Vec::new(),
            tags: record_tags.then(BTreeSet::new),
        }
    }

    pub(crate) fn collect(&mut self, root: &Symbol) {
        self.visit(root, Role::Node);
    }

    fn visit_value(&mut self, value: &Value, role: Role) {
        match value {
            Value::Symbol(symbol) => self.visit(symbol, role),
            Value::List(items) => {
                for item in items {
                    self.visit_value(item, role);
                }
            }
            Value::Nil | Value::Bool(_) | Value::Int(_) | Value::Str(_) => {}
        }
    }

    fn visit(&mut self, symbol: &Symbol, role: Role) {
        if let Some(tags) = &mut self.tags {
            tags.insert(symbol.tag());
        }
        let shape = symbol.shape();
        for &(name, ref value) in symbol.params() {
            let child_role = if shape == Shape::Condition && name == CONDITION {
                Role::Guard
            } else {
                Role::Node
            };
            self.visit_value(value, child_role);
        }
        if role == Role::Node {
            trace!(tag = symbol.tag(), "collect");
            self.items.push(symbol.clone());
        }
    }

    /// Filters to `extraction_tags` and strips `result` from nodes tagged in
    /// `collapse_tags`.
    pub(crate) fn finish(
        self,
        extraction_tags: &BTreeSet<String>,
        collapse_tags: &BTreeSet<String>,
    ) -> (Vec<Symbol>, Option<BTreeSet<&'static str>>) {
        let items = self
            .items
            .into_iter()
            .filter(|symbol| extraction_tags.contains(symbol.tag()))
            .map(|mut symbol| {
                if collapse_tags.contains(symbol.tag()) {
                    symbol.strip(RESULT);
                }
                symbol
            })
            .collect();
        (items, self.tags)
    }
}
