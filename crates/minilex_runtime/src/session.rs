//! Session state for the REPL.
//!
//! The session holds the runtime configuration, the standard grammar built
//! for it, and a bounded history of processed inputs.

use std::collections::VecDeque;

use minilex_cards::{Grammar, flattener_config};
use minilex_foundation::Result;
use minilex_parser::{CardText, SymbolTree};
use minilex_sequence::{ExpansionPolicy, SymbolSequence};
use tracing::debug;

use crate::config::RuntimeConfig;
use crate::serialize::{Archive, ArchivedSequence};

/// Session state for an interactive or batch run.
#[derive(Debug)]
pub struct Session {
    config: RuntimeConfig,
    grammar: Grammar,
    history: VecDeque<ArchivedSequence>,
}

impl Session {
    /// Creates a session for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails to build.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let grammar = Self::grammar_for(&config)?;
        Ok(Self {
            config,
            grammar,
            history: VecDeque::new(),
        })
    }

    fn grammar_for(config: &RuntimeConfig) -> Result<Grammar> {
        Grammar::with_flattener(
            flattener_config()
                .with_extraction_tags(config.extraction_tags.iter().cloned())
                .with_collapse_tags(config.collapse_tags.iter().cloned()),
        )
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Returns the grammar.
    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Sets the source tag for later inputs.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.config.source = source.into();
    }

    /// Sets the expansion policy for later inputs.
    pub fn set_policy(&mut self, policy: ExpansionPolicy) {
        self.config.policy = policy;
    }

    /// Replaces the extraction tags and rebuilds the flattener. An empty
    /// list switches back to linearization.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails to rebuild; the session is
    /// left unchanged.
    pub fn set_extraction_tags(&mut self, tags: Vec<String>) -> Result<()> {
        let mut config = self.config.clone();
        config.extraction_tags = tags;
        self.grammar = Self::grammar_for(&config)?;
        self.config = config;
        debug!(tags = ?self.config.extraction_tags, "extraction tags changed");
        Ok(())
    }

    /// Replaces the collapse tags and rebuilds the flattener.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar fails to rebuild; the session is
    /// left unchanged.
    pub fn set_collapse_tags(&mut self, tags: Vec<String>) -> Result<()> {
        let mut config = self.config.clone();
        config.collapse_tags = tags;
        self.grammar = Self::grammar_for(&config)?;
        self.config = config;
        debug!(tags = ?self.config.collapse_tags, "collapse tags changed");
        Ok(())
    }

    /// Sets whether trees are printed.
    pub fn set_show_tree(&mut self, show: bool) {
        self.config.show_tree = show;
    }

    /// Sets whether exports are printed instead of lines.
    pub fn set_show_export(&mut self, show: bool) {
        self.config.show_export = show;
    }

    /// Builds and flattens `text` under the session's source and policy,
    /// and records the result in the history.
    ///
    /// # Errors
    ///
    /// Returns any error from building or flattening.
    pub fn process(&mut self, text: impl Into<CardText>) -> Result<(SymbolTree, SymbolSequence)> {
        let (tree, sequence) =
            self.grammar
                .process(text, &self.config.source, self.config.policy)?;
        self.record(&sequence);
        Ok((tree, sequence))
    }

    fn record(&mut self, sequence: &SymbolSequence) {
        if self.config.history_size == 0 {
            return;
        }
        while self.history.len() >= self.config.history_size {
            self.history.pop_front();
        }
        self.history.push_back(ArchivedSequence::new(sequence));
    }

    /// Returns the processed inputs still retained, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ArchivedSequence> {
        self.history.iter()
    }

    /// Number of retained inputs.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns an archive of the retained inputs.
    #[must_use]
    pub fn archive(&self) -> Archive {
        Archive::new(self.history.iter().cloned().collect())
    }
}
