//! Flattener output.

use std::collections::BTreeSet;
use std::fmt;

use minilex_foundation::{Export, Exported, Symbol};
use minilex_parser::{CardText, SymbolTree};

use crate::cursor::Cursor;
use crate::line::SymbolLine;

/// The body of a sequence, by flattening mode.
#[derive(Clone, Debug, PartialEq)]
pub enum Lines {
    /// Indented lines from linearization.
    Linear(Vec<SymbolLine>),
    /// Nodes collected by structural extraction.
    Extracted(Vec<Symbol>),
}

/// A flattened card text.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolSequence {
    text: CardText,
    source: String,
    lines: Lines,
    tags: Option<BTreeSet<&'static str>>,
}

impl SymbolSequence {
    pub(crate) fn new(
        tree: &SymbolTree,
        lines: Lines,
        tags: Option<BTreeSet<&'static str>>,
    ) -> Self {
        Self {
            text: tree.text().clone(),
            source: tree.source().to_string(),
            lines,
            tags,
        }
    }

    /// Returns the card text the sequence was built from.
    #[must_use]
    pub const fn text(&self) -> &CardText {
        &self.text
    }

    /// Returns the source tag.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the body.
    #[must_use]
    pub const fn lines(&self) -> &Lines {
        &self.lines
    }

    /// Returns the lines of a linearized sequence.
    #[must_use]
    pub fn linear(&self) -> Option<&[SymbolLine]> {
        match &self.lines {
            Lines::Linear(lines) => Some(lines),
            Lines::Extracted(_) => None,
        }
    }

    /// Returns the nodes of an extracted sequence.
    #[must_use]
    pub fn extracted(&self) -> Option<&[Symbol]> {
        match &self.lines {
            Lines::Extracted(items) => Some(items),
            Lines::Linear(_) => None,
        }
    }

    /// Returns a cursor over a linearized sequence.
    #[must_use]
    pub fn cursor(&self) -> Option<Cursor<'_>> {
        self.linear().map(Cursor::new)
    }

    /// Tags seen while flattening, when tag recording was enabled.
    #[must_use]
    pub const fn tags(&self) -> Option<&BTreeSet<&'static str>> {
        self.tags.as_ref()
    }

    /// Number of lines or extracted nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.lines {
            Lines::Linear(lines) => lines.len(),
            Lines::Extracted(items) => items.len(),
        }
    }

    /// Returns true if the sequence has no lines or nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SymbolSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lines {
            Lines::Linear(lines) => {
                for line in lines {
                    writeln!(f, "{line}")?;
                }
            }
            Lines::Extracted(items) => {
                for item in items {
                    writeln!(f, "{item}")?;
                }
            }
        }
        Ok(())
    }
}

impl Export for SymbolSequence {
    fn export(&self) -> Exported {
        let (mode, body) = match &self.lines {
            Lines::Linear(lines) => ("linear", lines.export()),
            Lines::Extracted(items) => ("extracted", items.export()),
        };
        let mut entries = vec![
            ("text", self.text.export()),
            ("source", self.source.export()),
            ("mode", mode.export()),
            ("lines", body),
        ];
        if let Some(tags) = &self.tags {
            entries.push((
                "tags",
                Exported::List(tags.iter().map(|t| t.export()).collect()),
            ));
        }
        Exported::map(entries)
    }
}
