//! Field values carried in symbol payloads.

use std::fmt;
use std::sync::Arc;

use crate::symbol::Symbol;

/// A payload field value.
///
/// Values are the closed set of things a symbol field may hold. Nested
/// symbols are boxed; lists may mix any values.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value (unmatched capture group, missing branch).
    Nil,
    /// Boolean flag.
    Bool(bool),
    /// Integer, usually from a numeric capture group.
    Int(i64),
    /// Text that stays a scalar leaf.
    Str(Arc<str>),
    /// A nested symbol.
    Symbol(Box<Symbol>),
    /// An ordered list of values.
    List(Vec<Value>),
}

/// A terminal value produced by flattening a leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scalar {
    /// Boolean leaf.
    Bool(bool),
    /// Integer leaf, including numeric strings.
    Int(i64),
    /// Non-numeric string leaf.
    Str(Arc<str>),
}

/// Returns the integer a string denotes, if it is made only of ASCII digits.
#[must_use]
pub fn parse_numeric(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl Value {
    /// Builds a value from captured text: digit strings become integers,
    /// anything else stays a string.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        parse_numeric(text).map_or_else(|| Self::Str(text.into()), Self::Int)
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer, coercing numeric strings.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a nested symbol.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts a leaf value to a scalar. Numeric strings coerce to integers.
    ///
    /// Returns `None` for nil, symbols and lists.
    #[must_use]
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Bool(b) => Some(Scalar::Bool(*b)),
            Self::Int(n) => Some(Scalar::Int(*n)),
            Self::Str(s) => Some(
                parse_numeric(s).map_or_else(|| Scalar::Str(Arc::clone(s)), Scalar::Int),
            ),
            Self::Nil | Self::Symbol(_) | Self::List(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Symbol(sym) => write!(f, "{sym}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}

impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Self::Symbol(Box::new(sym))
    }
}

impl From<Option<Symbol>> for Value {
    fn from(sym: Option<Symbol>) -> Self {
        sym.map_or(Self::Nil, Self::from)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}
