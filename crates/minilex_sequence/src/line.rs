//! Lines of a flattened symbol sequence.

use std::fmt;

use minilex_foundation::{Export, Exported, Scalar, Symbol};

/// Structural markers framing an expanded condition node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Opens the condition branch.
    ConditionStart,
    /// Opens the result branch.
    ResultStart,
    /// Closes the node.
    SequenceEnd,
}

impl Marker {
    /// Returns the label printed for this marker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConditionStart => "CONDITION",
            Self::ResultStart => "RESULT",
            Self::SequenceEnd => "END",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a line carries.
#[derive(Clone, Debug, PartialEq)]
pub enum LineContent {
    /// A symbol node, with any branches already stripped.
    Node(Symbol),
    /// A named field of the enclosing node, with its value when it is a leaf.
    Param {
        /// Field name.
        name: &'static str,
        /// Leaf value, if the field held one.
        value: Option<Scalar>,
    },
    /// A structural marker.
    Marker(Marker),
}

/// One entry of a flattened sequence: a tag, a payload, and a nesting depth.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolLine {
    tag: &'static str,
    content: LineContent,
    indent: i32,
}

impl SymbolLine {
    /// A node line tagged with the symbol's own tag.
    #[must_use]
    pub fn node(symbol: Symbol, indent: i32) -> Self {
        Self {
            tag: symbol.tag(),
            content: LineContent::Node(symbol),
            indent,
        }
    }

    /// A marker line belonging to the node tagged `tag`.
    #[must_use]
    pub const fn marker(tag: &'static str, marker: Marker, indent: i32) -> Self {
        Self {
            tag,
            content: LineContent::Marker(marker),
            indent,
        }
    }

    /// A parameter line belonging to the node tagged `tag`.
    #[must_use]
    pub const fn param(
        tag: &'static str,
        name: &'static str,
        value: Option<Scalar>,
        indent: i32,
    ) -> Self {
        Self {
            tag,
            content: LineContent::Param { name, value },
            indent,
        }
    }

    /// Returns the tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the payload.
    #[must_use]
    pub const fn content(&self) -> &LineContent {
        &self.content
    }

    /// Returns the nesting depth. The outermost lines of a sequence root sit
    /// at zero; a bare root node sits at -1.
    #[must_use]
    pub const fn indent(&self) -> i32 {
        self.indent
    }

    /// Returns the symbol if this is a node line.
    #[must_use]
    pub const fn symbol(&self) -> Option<&Symbol> {
        match &self.content {
            LineContent::Node(symbol) => Some(symbol),
            LineContent::Param { .. } | LineContent::Marker(_) => None,
        }
    }

    /// Returns the marker if this is a marker line.
    #[must_use]
    pub const fn marker_kind(&self) -> Option<Marker> {
        match &self.content {
            LineContent::Marker(marker) => Some(*marker),
            LineContent::Node(_) | LineContent::Param { .. } => None,
        }
    }

    /// Returns true for a `SequenceEnd` line.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.marker_kind() == Some(Marker::SequenceEnd)
    }
}

impl fmt::Display for SymbolLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.indent.max(0) {
            f.write_str("\t")?;
        }
        match &self.content {
            LineContent::Node(symbol) => write!(f, "({}, {symbol})", self.tag),
            LineContent::Param { name, value: None } => write!(f, "({}, {name})", self.tag),
            LineContent::Param {
                name,
                value: Some(value),
            } => write!(f, "({}, {name} = {value})", self.tag),
            LineContent::Marker(marker) => write!(f, "({}, {marker})", self.tag),
        }
    }
}

impl Export for SymbolLine {
    fn export(&self) -> Exported {
        let content = match &self.content {
            LineContent::Node(symbol) => symbol.export(),
            LineContent::Param { name, value } => Exported::map([
                ("param", Exported::Str((*name).to_string())),
                ("value", value.export()),
            ]),
            LineContent::Marker(marker) => Exported::Str(marker.label().to_string()),
        };
        Exported::map([
            ("tag", Exported::Str(self.tag.to_string())),
            ("content", content),
            ("indent", Exported::Int(i64::from(self.indent))),
        ])
    }
}
