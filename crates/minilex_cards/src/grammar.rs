//! The assembled standard grammar.

use minilex_foundation::Result;
use minilex_parser::{CardText, SymbolTree, TreeBuilder};
use minilex_sequence::{ExpansionPolicy, Flattener, FlattenerConfig, SymbolSequence};
use tracing::debug;

use crate::{cases, layout};

/// A frozen tree builder and flattener for the standard card grammar.
#[derive(Debug)]
pub struct Grammar {
    builder: TreeBuilder,
    flattener: Flattener,
}

impl Grammar {
    /// Builds the standard grammar with the standard flattener.
    ///
    /// # Errors
    ///
    /// Returns an invalid-pattern error if a built-in pattern fails to
    /// compile.
    pub fn standard() -> Result<Self> {
        Self::with_flattener(layout::flattener_config())
    }

    /// Builds the standard grammar with a customized flattener. Start from
    /// [`layout::flattener_config`] to keep the standard handlers.
    ///
    /// # Errors
    ///
    /// Returns an invalid-pattern error if a built-in pattern fails to
    /// compile.
    pub fn with_flattener(config: FlattenerConfig) -> Result<Self> {
        Ok(Self {
            builder: cases::tree_builder()?,
            flattener: config.finish(),
        })
    }

    /// Returns the tree builder.
    #[must_use]
    pub const fn builder(&self) -> &TreeBuilder {
        &self.builder
    }

    /// Returns the flattener.
    #[must_use]
    pub const fn flattener(&self) -> &Flattener {
        &self.flattener
    }

    /// Builds the symbol tree for `text` from `source`.
    ///
    /// # Errors
    ///
    /// See [`TreeBuilder::build`].
    pub fn parse(&self, text: impl Into<CardText>, source: &str) -> Result<SymbolTree> {
        self.builder.build(text, source)
    }

    /// Builds and flattens `text` from `source`.
    ///
    /// # Errors
    ///
    /// Returns any error from building or flattening.
    pub fn process(
        &self,
        text: impl Into<CardText>,
        source: &str,
        policy: ExpansionPolicy,
    ) -> Result<(SymbolTree, SymbolSequence)> {
        let tree = self.parse(text, source)?;
        let sequence = self.flattener.flatten_with(&tree, policy)?;
        debug!(source, lines = sequence.len(), "processed card text");
        Ok((tree, sequence))
    }
}
