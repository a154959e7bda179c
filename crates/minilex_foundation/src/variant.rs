//! Declared symbol variants.
//!
//! A [`Variant`] is the static description of one symbol family: its tag,
//! its structural [`Shape`], and the ordered list of payload fields it
//! declares. Symbols are only ever built through a variant, so every symbol's
//! payload follows a declared field order.

use std::fmt;

use crate::error::{Error, Result};
use crate::symbol::{Params, Symbol};
use crate::value::Value;

/// Name of the `condition` field on condition-shaped variants.
pub const CONDITION: &str = "condition";

/// Name of the `result` field on condition-shaped variants.
pub const RESULT: &str = "result";

/// Name of the single field on sequence-shaped variants.
pub const SYMBOLS: &str = "symbols";

const SEQUENCE_FIELDS: &[&str] = &[SYMBOLS];

/// Structural shape of a variant. This is the closed set the pipeline
/// dispatches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Does nothing; contributes no lines.
    NoOp,
    /// Ordered list of child values; pure structure.
    Sequence,
    /// Guard plus consequence (`condition` / `result` fields).
    Condition,
    /// Any other node; emitted verbatim.
    Plain,
}

/// Static description of a symbol family.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Variant {
    tag: &'static str,
    shape: Shape,
    fields: &'static [&'static str],
}

impl Variant {
    /// Declares a no-op variant.
    #[must_use]
    pub const fn no_op(tag: &'static str) -> Self {
        Self {
            tag,
            shape: Shape::NoOp,
            fields: &[],
        }
    }

    /// Declares a sequence variant with the single field `symbols`.
    #[must_use]
    pub const fn sequence(tag: &'static str) -> Self {
        Self {
            tag,
            shape: Shape::Sequence,
            fields: SEQUENCE_FIELDS,
        }
    }

    /// Declares a condition variant. `fields` should name [`CONDITION`] and
    /// [`RESULT`]; any of them left out reads as absent.
    #[must_use]
    pub const fn condition(tag: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            tag,
            shape: Shape::Condition,
            fields,
        }
    }

    /// Declares a plain variant.
    #[must_use]
    pub const fn plain(tag: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            tag,
            shape: Shape::Plain,
            fields,
        }
    }

    /// Returns the variant tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the variant shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the declared field names, in order.
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Constructs a symbol from one value per declared field plus the
    /// original text.
    ///
    /// # Errors
    ///
    /// Returns an arity mismatch error if `args` does not supply exactly one
    /// value per declared field.
    pub fn construct(&'static self, args: Vec<Value>, text: Option<&str>) -> Result<Symbol> {
        if args.len() != self.fields.len() {
            return Err(Error::arity_mismatch(
                self.tag,
                self.fields.len(),
                args.len(),
            ));
        }
        let params = Params::from_pairs(self.fields.iter().copied().zip(args));
        Ok(Symbol::from_parts(self, params, text.map(Into::into)))
    }

    /// Constructs a sequence symbol from its children.
    ///
    /// For non-sequence variants this behaves like [`Variant::construct`]
    /// with the children as arguments.
    ///
    /// # Errors
    ///
    /// Returns an arity mismatch error for non-sequence variants whose field
    /// count differs from the number of children.
    pub fn construct_sequence(
        &'static self,
        children: Vec<Value>,
        text: Option<&str>,
    ) -> Result<Symbol> {
        match self.shape {
            Shape::Sequence => self.construct(vec![Value::List(children)], text),
            Shape::NoOp | Shape::Condition | Shape::Plain => self.construct(children, text),
        }
    }

    /// Constructs a symbol with no payload. Used for terminal rules and
    /// default fallbacks.
    ///
    /// # Errors
    ///
    /// Returns an arity mismatch error if the variant declares fields.
    pub fn terminal(&'static self, text: Option<&str>) -> Result<Symbol> {
        self.construct(Vec::new(), text)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}
