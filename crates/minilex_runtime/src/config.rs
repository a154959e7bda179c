//! Configuration for the minilex runtime.

use minilex_sequence::ExpansionPolicy;

/// Configuration for a REPL or batch session.
///
/// Controls how input is built and flattened and what gets printed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Source tag every input is built under.
    pub source: String,

    /// Whether condition nodes are framed by markers.
    pub policy: ExpansionPolicy,

    /// Tags to extract; empty means linearize.
    pub extraction_tags: Vec<String>,

    /// Tags whose `result` is stripped from extracted nodes.
    pub collapse_tags: Vec<String>,

    /// Print the symbol tree before the sequence.
    pub show_tree: bool,

    /// Print the sequence's export instead of its lines.
    pub show_export: bool,

    /// Number of processed inputs kept for `:save`.
    pub history_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            source: "card".to_string(),
            policy: ExpansionPolicy::Expand,
            extraction_tags: Vec::new(),
            collapse_tags: Vec::new(),
            show_tree: false,
            show_export: false,
            history_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Creates a configuration for debugging: trees and exports shown.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            show_tree: true,
            show_export: true,
            history_size: 200,
            ..Self::default()
        }
    }

    /// Builder method to set the source tag.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Builder method to set the expansion policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ExpansionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builder method to set the extraction tags.
    #[must_use]
    pub fn with_extraction_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.extraction_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the collapse tags.
    #[must_use]
    pub fn with_collapse_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.collapse_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to show or hide the symbol tree.
    #[must_use]
    pub fn with_show_tree(mut self, show: bool) -> Self {
        self.show_tree = show;
        self
    }

    /// Builder method to print exports instead of lines.
    #[must_use]
    pub fn with_show_export(mut self, show: bool) -> Self {
        self.show_export = show;
        self
    }

    /// Builder method to set the history size.
    #[must_use]
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Returns true if inputs are extracted rather than linearized.
    #[must_use]
    pub fn is_extracting(&self) -> bool {
        !self.extraction_tags.is_empty()
    }
}
