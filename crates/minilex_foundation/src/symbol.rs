//! Symbols: tagged AST nodes.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;
use crate::variant::{CONDITION, RESULT, SYMBOLS, Shape, Variant};

/// Ordered payload of a symbol: `(field-name, value)` pairs in the variant's
/// declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(&'static str, Value)>);

impl Params {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a payload from pairs, keeping their order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(field, value)| (*field == name).then_some(value))
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.0.iter().position(|(field, _)| *field == name)?;
        Some(self.0.remove(index).1)
    }

    /// Iterates over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Value)> {
        self.0.iter()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a (&'static str, Value);
    type IntoIter = std::slice::Iter<'a, (&'static str, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A tagged AST node.
///
/// The tag and shape come from the symbol's [`Variant`]; the payload is the
/// variant's declared fields in order. Symbols are immutable once built,
/// except that a holder of an owned copy may [`strip`](Symbol::strip) a
/// field, which is recorded on that copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    variant: &'static Variant,
    params: Params,
    original_text: Option<Arc<str>>,
    stripped: Vec<&'static str>,
}

impl Symbol {
    pub(crate) fn from_parts(
        variant: &'static Variant,
        params: Params,
        original_text: Option<Arc<str>>,
    ) -> Self {
        Self {
            variant,
            params,
            original_text,
            stripped: Vec::new(),
        }
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.variant.tag()
    }

    /// Returns the variant this symbol was built from.
    #[must_use]
    pub fn variant(&self) -> &'static Variant {
        self.variant
    }

    /// Returns the structural shape.
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.variant.shape()
    }

    /// Returns the source excerpt this symbol was lexed from.
    #[must_use]
    pub fn original_text(&self) -> Option<&str> {
        self.original_text.as_deref()
    }

    /// Returns the ordered payload.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Looks up a payload field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Returns the `condition` sub-tree of a condition symbol.
    ///
    /// Absent and nil both read as `None`.
    #[must_use]
    pub fn condition(&self) -> Option<&Value> {
        self.branch(CONDITION)
    }

    /// Returns the `result` sub-tree of a condition symbol.
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        self.branch(RESULT)
    }

    fn branch(&self, name: &str) -> Option<&Value> {
        match self.shape() {
            Shape::Condition => self.params.get(name).filter(|v| !v.is_nil()),
            Shape::NoOp | Shape::Sequence | Shape::Plain => None,
        }
    }

    /// Returns the children of a sequence symbol; empty for other shapes.
    #[must_use]
    pub fn children(&self) -> &[Value] {
        match self.shape() {
            Shape::Sequence => self
                .params
                .get(SYMBOLS)
                .and_then(Value::as_list)
                .unwrap_or_default(),
            Shape::NoOp | Shape::Condition | Shape::Plain => &[],
        }
    }

    /// Removes a field from this copy and records the removal.
    pub fn strip(&mut self, name: &'static str) -> Option<Value> {
        let removed = self.params.remove(name);
        if removed.is_some() {
            self.stripped.push(name);
        }
        removed
    }

    /// Returns a copy with `name` stripped.
    #[must_use]
    pub fn without(&self, name: &'static str) -> Self {
        let mut copy = self.clone();
        copy.strip(name);
        copy
    }

    /// Returns the fields stripped from this copy, in removal order.
    #[must_use]
    pub fn stripped(&self) -> &[&'static str] {
        &self.stripped
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())?;
        if self.params.is_empty() {
            return Ok(());
        }
        write!(f, "{{")?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
