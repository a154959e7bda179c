//! Plain nested export of pipeline entities.
//!
//! Every entity in the model converts to an [`Exported`] tree of maps,
//! lists and scalars for logging, debugging and persistence. Exporting is
//! read-only and has no effect on the pipeline.

use std::fmt;

use crate::symbol::Symbol;
use crate::value::{Scalar, Value};

/// A plain nested representation.
///
/// Maps keep insertion order, so exported symbols list their fields in
/// declaration order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exported {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// String.
    Str(String),
    /// Ordered list.
    List(Vec<Exported>),
    /// Ordered map.
    Map(Vec<(String, Exported)>),
}

impl Exported {
    /// Builds a map from key/value pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Exported)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Looks up a key in a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Exported> {
        match self {
            Self::Map(entries) => entries.iter().find_map(|(k, v)| (k == key).then_some(v)),
            _ => None,
        }
    }

    /// Attempts to extract a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Exported]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true if this is a map or list.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, Self::Map(_) | Self::List(_))
    }
}

impl fmt::Display for Exported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Conversion to the plain export representation.
pub trait Export {
    /// Converts `self` to a plain nested representation.
    fn export(&self) -> Exported;
}

impl<T: Export> Export for Option<T> {
    fn export(&self) -> Exported {
        self.as_ref().map_or(Exported::Null, Export::export)
    }
}

impl<T: Export> Export for [T] {
    fn export(&self) -> Exported {
        Exported::List(self.iter().map(Export::export).collect())
    }
}

impl<T: Export> Export for Vec<T> {
    fn export(&self) -> Exported {
        self.as_slice().export()
    }
}

impl Export for str {
    fn export(&self) -> Exported {
        Exported::Str(self.to_string())
    }
}

impl Export for String {
    fn export(&self) -> Exported {
        self.as_str().export()
    }
}

impl Export for Value {
    fn export(&self) -> Exported {
        match self {
            Self::Nil => Exported::Null,
            Self::Bool(b) => Exported::Bool(*b),
            Self::Int(n) => Exported::Int(*n),
            Self::Str(s) => Exported::Str(s.to_string()),
            Self::Symbol(sym) => sym.export(),
            Self::List(items) => items.export(),
        }
    }
}

impl Export for Scalar {
    fn export(&self) -> Exported {
        match self {
            Self::Bool(b) => Exported::Bool(*b),
            Self::Int(n) => Exported::Int(*n),
            Self::Str(s) => Exported::Str(s.to_string()),
        }
    }
}

/// A symbol exports as `{TAG: {field: value, ...}}`, or as the bare tag
/// when it has no payload.
impl Export for Symbol {
    fn export(&self) -> Exported {
        if self.params().is_empty() {
            return Exported::Str(self.tag().to_string());
        }
        let fields = self
            .params()
            .iter()
            .map(|(name, value)| (*name, value.export()));
        Exported::map([(self.tag(), Exported::map(fields))])
    }
}
