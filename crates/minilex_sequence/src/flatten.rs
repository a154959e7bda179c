//! Symbol tree flattening.
//!
//! A [`Flattener`] turns a [`SymbolTree`] into a [`SymbolSequence`]. With no
//! extraction tags configured it linearizes the tree into indented lines:
//!
//! ```text
//! SEQ                          (WHILE_RESOLVING, WHILE_RESOLVING{..})
//! ├── WHILE_RESOLVING          (WHILE_RESOLVING, CONDITION)
//! │   ├── condition: SKILL       \t(SKILL, SKILL{..})
//! │   └── result: GAIN   ──▶   (WHILE_RESOLVING, RESULT)
//! └── GAIN                       \t(GAIN, GAIN{..})
//!                              (WHILE_RESOLVING, END)
//!                              (GAIN, GAIN{..})
//! ```
//!
//! Sequences contribute no line of their own; their children sit one level
//! deeper. Condition nodes are stripped of both branches and, when expansion
//! is on, framed by markers. Leaves yield scalars and no line. Tags with a
//! registered handler are handed to that handler, which writes lines through
//! an [`Emitter`].
//!
//! With extraction tags configured the flattener instead collects matching
//! nodes; see [`crate::extract`].

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use minilex_foundation::{
    CONDITION, Error, ErrorContext, Freeze, RESULT, Result, Scalar, Shape, Symbol, Value,
};
use minilex_parser::SymbolTree;
use tracing::{debug, trace, warn};

use crate::check::check_lines;
use crate::extract::Extraction;
use crate::line::{Marker, SymbolLine};
use crate::sequence::{Lines, SymbolSequence};
use crate::sink::LineSink;

/// Custom flattening for one tag. Receives the emitter, the node, and the
/// node's indent; it alone decides what lines the node produces.
pub type Handler = Arc<dyn Fn(&mut Emitter<'_>, &Symbol, i32) -> Result<()> + Send + Sync>;

/// Whether condition nodes are framed by markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpansionPolicy {
    /// Emit the node, `ConditionStart`, the condition, `ResultStart`, the
    /// result, and `SequenceEnd`.
    #[default]
    Expand,
    /// Emit the node and its result only; the condition is dropped.
    Collapse,
}

/// Flattener configuration, open for registration.
#[derive(Clone, Default)]
pub struct FlattenerConfig {
    collapse_tags: BTreeSet<String>,
    extraction_tags: BTreeSet<String>,
    handlers: HashMap<String, Handler>,
    record_tags: bool,
}

impl FlattenerConfig {
    /// Creates an empty configuration: linearization mode, no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds tags whose `result` is stripped from extracted nodes.
    #[must_use]
    pub fn with_collapse_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.collapse_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds tags to extract. Any extraction tag switches the flattener to
    /// extraction mode.
    #[must_use]
    pub fn with_extraction_tags<S: Into<String>>(
        mut self,
        tags: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extraction_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds a handler for `tag`.
    #[must_use]
    pub fn with_handler(
        mut self,
        tag: impl Into<String>,
        handler: impl Fn(&mut Emitter<'_>, &Symbol, i32) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.register_handler(tag, handler);
        self
    }

    /// Records the set of tags seen by each flatten call.
    #[must_use]
    pub fn with_tag_recording(mut self, enabled: bool) -> Self {
        self.record_tags = enabled;
        self
    }

    /// Adds a collapse tag in place.
    pub fn add_collapse_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.collapse_tags.insert(tag.into());
        self
    }

    /// Adds an extraction tag in place.
    pub fn add_extraction_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.extraction_tags.insert(tag.into());
        self
    }

    /// Registers a handler for `tag` in place. A later handler for the same
    /// tag replaces the earlier one.
    pub fn register_handler(
        &mut self,
        tag: impl Into<String>,
        handler: impl Fn(&mut Emitter<'_>, &Symbol, i32) -> Result<()> + Send + Sync + 'static,
    ) -> &mut Self {
        self.handlers.insert(tag.into(), Arc::new(handler));
        self
    }

    /// Freezes the configuration.
    #[must_use]
    pub fn finish(self) -> Flattener {
        Flattener {
            collapse_tags: self.collapse_tags,
            extraction_tags: self.extraction_tags,
            handlers: self.handlers,
            record_tags: self.record_tags,
        }
    }
}

impl Freeze for FlattenerConfig {
    type Frozen = Flattener;
    const COMPONENT: &'static str = "flattener";

    fn freeze(self) -> Flattener {
        self.finish()
    }
}

impl fmt::Debug for FlattenerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlattenerConfig")
            .field("collapse_tags", &self.collapse_tags)
            .field("extraction_tags", &self.extraction_tags)
            .field("handlers", &sorted_keys(&self.handlers))
            .field("record_tags", &self.record_tags)
            .finish()
    }
}

/// A frozen flattener.
pub struct Flattener {
    collapse_tags: BTreeSet<String>,
    extraction_tags: BTreeSet<String>,
    handlers: HashMap<String, Handler>,
    record_tags: bool,
}

impl Flattener {
    /// Starts a configuration.
    #[must_use]
    pub fn config() -> FlattenerConfig {
        FlattenerConfig::new()
    }

    /// Returns true if this flattener collects nodes instead of
    /// linearizing.
    #[must_use]
    pub fn is_extracting(&self) -> bool {
        !self.extraction_tags.is_empty()
    }

    /// Returns true if `tag` has a custom handler.
    #[must_use]
    pub fn has_handler(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Returns the extraction tags.
    #[must_use]
    pub const fn extraction_tags(&self) -> &BTreeSet<String> {
        &self.extraction_tags
    }

    /// Returns the collapse tags.
    #[must_use]
    pub const fn collapse_tags(&self) -> &BTreeSet<String> {
        &self.collapse_tags
    }

    /// Flattens `tree` with condition expansion on.
    ///
    /// # Errors
    ///
    /// See [`Flattener::flatten_with`].
    pub fn flatten(&self, tree: &SymbolTree) -> Result<SymbolSequence> {
        self.flatten_with(tree, ExpansionPolicy::Expand)
    }

    /// Flattens `tree` under the given expansion policy. The policy has no
    /// effect in extraction mode.
    ///
    /// # Errors
    ///
    /// Returns a malformed-tree error if a bare list appears where a node is
    /// expected, a non-flat-sequence error if the output fails the flatness
    /// checks, or any error raised by a handler. Errors carry the tree's
    /// source and text as context.
    pub fn flatten_with(&self, tree: &SymbolTree, policy: ExpansionPolicy) -> Result<SymbolSequence> {
        debug!(
            source = tree.source(),
            extracting = self.is_extracting(),
            ?policy,
            "flattening symbol tree"
        );
        let attach = |err: Error| attach_context(err, tree);

        if self.is_extracting() {
            let mut extraction = Extraction::new(self.record_tags);
            if let Some(root) = tree.logic() {
                extraction.collect(root);
            }
            let (items, tags) = extraction.finish(&self.extraction_tags, &self.collapse_tags);
            return Ok(SymbolSequence::new(tree, Lines::Extracted(items), tags));
        }

        let mut emitter = Emitter::new(self, policy);
        if let Some(root) = tree.logic() {
            emitter.flatten_symbol(root, -1).map_err(attach)?;
        }
        let (lines, tags) = emitter.finish();
        check_lines(&lines).map_err(attach)?;
        Ok(SymbolSequence::new(tree, Lines::Linear(lines), tags))
    }
}

impl fmt::Debug for Flattener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flattener")
            .field("collapse_tags", &self.collapse_tags)
            .field("extraction_tags", &self.extraction_tags)
            .field("handlers", &sorted_keys(&self.handlers))
            .field("record_tags", &self.record_tags)
            .finish()
    }
}

fn sorted_keys(handlers: &HashMap<String, Handler>) -> Vec<&str> {
    let mut keys: Vec<&str> = handlers.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

fn attach_context(mut err: Error, tree: &SymbolTree) -> Error {
    let ctx = err.context.get_or_insert_with(ErrorContext::new);
    ctx.source.get_or_insert_with(|| tree.source().to_string());
    ctx.text.get_or_insert_with(|| tree.text().joined());
    err
}

/// Per-call line writer handed to custom handlers.
///
/// Owns the output sink for one flatten call. Handlers use it to emit
/// lines, recurse into sub-trees with the built-in rules, and hold lines for
/// a later splice.
pub struct Emitter<'f> {
    flattener: &'f Flattener,
    policy: ExpansionPolicy,
    sink: LineSink,
    tags: Option<BTreeSet<&'static str>>,
}

impl<'f> Emitter<'f> {
    fn new(flattener: &'f Flattener, policy: ExpansionPolicy) -> Self {
        Self {
            flattener,
            policy,
            sink: LineSink::new(),
            tags: flattener.record_tags.then(BTreeSet::new),
        }
    }

    /// Returns the expansion policy of this call.
    #[must_use]
    pub const fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    /// Writes a line to the output or the held buffer.
    pub fn push(&mut self, line: SymbolLine) {
        trace!(tag = line.tag(), indent = line.indent(), holding = self.sink.is_holding(), "emit");
        self.sink.push(line);
    }

    /// Writes a node line.
    pub fn emit_node(&mut self, symbol: Symbol, indent: i32) {
        self.push(SymbolLine::node(symbol, indent));
    }

    /// Writes a marker line.
    pub fn emit_marker(&mut self, tag: &'static str, marker: Marker, indent: i32) {
        self.push(SymbolLine::marker(tag, marker, indent));
    }

    /// Writes one parameter line per field of `node`. Leaf values ride on
    /// the parameter line; nested symbols and lists are flattened one level
    /// deeper right after it.
    ///
    /// # Errors
    ///
    /// Returns any error raised while flattening a nested field value.
    pub fn emit_params(&mut self, node: &Symbol, indent: i32) -> Result<()> {
        let tag = node.tag();
        for &(name, ref value) in node.params() {
            match value {
                Value::Nil | Value::Bool(_) | Value::Int(_) | Value::Str(_) => {
                    self.push(SymbolLine::param(tag, name, value.to_scalar(), indent));
                }
                Value::Symbol(symbol) => {
                    self.push(SymbolLine::param(tag, name, None, indent));
                    self.flatten_symbol(symbol, indent + 1)
                        .map_err(|e| e.in_frame(format!("{tag}.{name}")))?;
                }
                Value::List(items) => {
                    self.push(SymbolLine::param(tag, name, None, indent));
                    for item in items {
                        self.flatten_value(item, indent + 1)
                            .map_err(|e| e.in_frame(format!("{tag}.{name}")))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Flattens any value with the built-in rules. Leaves yield a scalar
    /// and write nothing.
    ///
    /// # Errors
    ///
    /// Returns a malformed-tree error for a bare list, or any error raised
    /// while flattening a symbol.
    pub fn flatten_value(&mut self, value: &Value, indent: i32) -> Result<Option<Scalar>> {
        match value {
            Value::Nil => Ok(None),
            Value::Bool(_) | Value::Int(_) | Value::Str(_) => Ok(value.to_scalar()),
            Value::Symbol(symbol) => self.flatten_symbol(symbol, indent).map(|()| None),
            Value::List(items) => Err(Error::malformed_tree(format!(
                "list of {} values where a node is expected",
                items.len()
            ))),
        }
    }

    /// Flattens a symbol: no-ops vanish, sequences recurse, handled tags go
    /// to their handler, conditions expand, everything else is one line.
    ///
    /// # Errors
    ///
    /// Returns any error raised below this node, framed with its tag.
    pub fn flatten_symbol(&mut self, symbol: &Symbol, indent: i32) -> Result<()> {
        if let Some(tags) = &mut self.tags {
            tags.insert(symbol.tag());
        }
        let flattener = self.flattener;
        match (symbol.shape(), flattener.handlers.get(symbol.tag())) {
            (Shape::NoOp, _) => Ok(()),
            (Shape::Sequence, _) => {
                for child in symbol.children() {
                    self.flatten_value(child, indent + 1)
                        .map_err(|e| e.in_frame(symbol.tag()))?;
                }
                Ok(())
            }
            (Shape::Condition | Shape::Plain, Some(handler)) => {
                handler(self, symbol, indent).map_err(|e| e.in_frame(symbol.tag()))
            }
            (Shape::Condition, None) => self.flatten_condition(symbol, indent),
            (Shape::Plain, None) => {
                self.emit_node(symbol.clone(), indent);
                Ok(())
            }
        }
    }

    /// Applies the built-in condition rule to `node` under this call's
    /// policy. Handlers may call this to fall back to the default layout.
    ///
    /// # Errors
    ///
    /// Returns any error raised while flattening either branch.
    pub fn flatten_condition(&mut self, node: &Symbol, indent: i32) -> Result<()> {
        let tag = node.tag();
        let mut line = node.clone();
        let condition = line.strip(CONDITION);
        let result = line.strip(RESULT);
        self.emit_node(line, indent);

        match self.policy {
            ExpansionPolicy::Expand => {
                self.emit_marker(tag, Marker::ConditionStart, indent);
                if let Some(condition) = condition {
                    self.flatten_value(&condition, indent + 1)
                        .map_err(|e| e.in_frame(format!("{tag}.{CONDITION}")))?;
                }
                self.emit_marker(tag, Marker::ResultStart, indent);
                if let Some(result) = result {
                    self.flatten_value(&result, indent + 1)
                        .map_err(|e| e.in_frame(format!("{tag}.{RESULT}")))?;
                }
                self.emit_marker(tag, Marker::SequenceEnd, indent);
            }
            ExpansionPolicy::Collapse => {
                if let Some(result) = result {
                    self.flatten_value(&result, indent + 1)
                        .map_err(|e| e.in_frame(format!("{tag}.{RESULT}")))?;
                }
            }
        }
        Ok(())
    }

    /// Switches to holding: subsequent lines go to a new side buffer. Holds
    /// nest, so a handler may hold while an enclosing handler is holding.
    pub fn hold(&mut self) {
        self.sink.hold();
    }

    /// Returns true while lines are being held.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.sink.is_holding()
    }

    /// Inserts the innermost held lines right after line `index` of the
    /// enclosing target and closes that hold. Returns the number of lines
    /// inserted.
    pub fn splice_after(&mut self, index: usize) -> usize {
        let count = self.sink.splice_after(index);
        trace!(index, count, depth = self.sink.depth(), "splice held lines");
        count
    }

    /// Number of lines in the current target: the innermost held buffer, or
    /// the output when nothing is held. Indices for
    /// [`splice_after`](Emitter::splice_after) are taken from this count
    /// before calling [`hold`](Emitter::hold).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sink.len()
    }

    /// Returns true if the current target is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sink.is_empty()
    }

    /// Returns the output lines so far, excluding held lines.
    #[must_use]
    pub fn lines(&self) -> &[SymbolLine] {
        self.sink.lines()
    }

    fn finish(self) -> (Vec<SymbolLine>, Option<BTreeSet<&'static str>>) {
        let (mut lines, held) = self.sink.into_parts();
        if !held.is_empty() {
            warn!(count = held.len(), "flatten ended while holding; appending held lines");
            lines.extend(held);
        }
        (lines, self.tags)
    }
}

impl fmt::Debug for Emitter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("policy", &self.policy)
            .field("sink", &self.sink)
            .finish_non_exhaustive()
    }
}
