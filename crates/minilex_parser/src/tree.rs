//! Symbol tree building.
//!
//! A [`TreeBuilder`] decides which grammar logic governs a card text and
//! wraps the result in a [`SymbolTree`]. Dispatch order:
//!
//! 1. Null detection: absent text, a boolean flag, no lines, or "n/a".
//! 2. Source rules, in registration order, exact match on the source tag.
//! 3. Pattern rules, in registration order, against the first line.
//! 4. The default rule.
//!
//! The builder performs no tree assembly itself; each logic function drives
//! the lexer and returns whatever root symbol it deems appropriate.

use std::fmt;
use std::sync::{Arc, LazyLock};

use minilex_foundation::{Error, ErrorContext, Export, Exported, Freeze, Result, Symbol};
use regex::{Captures, Regex};
use tracing::debug;

use crate::lexer::{Lexer, compile_pattern};

/// Logic for source and default cases.
pub type LogicFn = Arc<dyn Fn(&Lexer, &[String]) -> Result<Option<Symbol>> + Send + Sync>;

/// Logic for pattern cases; also receives the first-line match.
pub type PatternLogicFn =
    Arc<dyn Fn(&Lexer, &[String], &Captures<'_>) -> Result<Option<Symbol>> + Send + Sync>;

static NOT_APPLICABLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^n\s*/\s*a$").unwrap());

/// Card text as handed to the tree builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardText {
    /// No text at all.
    Absent,
    /// A boolean placeholder some card sources use instead of text.
    Flag(bool),
    /// Ordered lines of text.
    Lines(Vec<String>),
}

impl CardText {
    /// Returns the lines, or an empty slice for absent text and flags.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match self {
            Self::Lines(lines) => lines,
            Self::Absent | Self::Flag(_) => &[],
        }
    }

    /// Returns the first line, trimmed and lowercased.
    #[must_use]
    pub fn first_line(&self) -> Option<String> {
        self.lines().first().map(|line| Lexer::normalize(line))
    }

    /// Returns the lines joined by spaces.
    #[must_use]
    pub fn joined(&self) -> String {
        self.lines().join(" ")
    }

    /// Returns true if this text denotes a card with no logic.
    #[must_use]
    pub fn is_null(&self) -> bool {
        match self {
            Self::Absent | Self::Flag(_) => true,
            Self::Lines(lines) => {
                lines.is_empty() || NOT_APPLICABLE.is_match(&Lexer::normalize(&self.joined()))
            }
        }
    }
}

impl From<&str> for CardText {
    fn from(text: &str) -> Self {
        Self::Lines(vec![text.to_string()])
    }
}

impl From<String> for CardText {
    fn from(text: String) -> Self {
        Self::Lines(vec![text])
    }
}

impl From<Vec<String>> for CardText {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Vec<&str>> for CardText {
    fn from(lines: Vec<&str>) -> Self {
        Self::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for CardText {
    fn from(lines: &[&str]) -> Self {
        Self::Lines(lines.iter().map(|l| (*l).to_string()).collect())
    }
}

impl From<bool> for CardText {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl<T: Into<CardText>> From<Option<T>> for CardText {
    fn from(text: Option<T>) -> Self {
        text.map_or(Self::Absent, Into::into)
    }
}

impl Export for CardText {
    fn export(&self) -> Exported {
        match self {
            Self::Absent => Exported::Null,
            Self::Flag(b) => Exported::Bool(*b),
            Self::Lines(lines) => lines.export(),
        }
    }
}

/// A parsed card text: the original text, its source tag, and the root
/// symbol. `logic` is `None` for cards with nothing to do.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolTree {
    text: CardText,
    source: String,
    logic: Option<Symbol>,
}

impl SymbolTree {
    /// Creates a tree.
    #[must_use]
    pub fn new(text: CardText, source: impl Into<String>, logic: Option<Symbol>) -> Self {
        Self {
            text,
            source: source.into(),
            logic,
        }
    }

    /// Returns the original text.
    #[must_use]
    pub fn text(&self) -> &CardText {
        &self.text
    }

    /// Returns the source tag.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the root symbol.
    #[must_use]
    pub fn logic(&self) -> Option<&Symbol> {
        self.logic.as_ref()
    }

    /// Returns true if this tree has no logic.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.logic.is_none()
    }
}

impl fmt::Display for SymbolTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.logic {
            Some(logic) => write!(f, "{logic}"),
            None => write!(f, "None"),
        }
    }
}

impl Export for SymbolTree {
    fn export(&self) -> Exported {
        Exported::map([
            ("text", self.text.export()),
            ("source", self.source.export()),
            ("logic", self.logic.export()),
        ])
    }
}

/// Tree cases under construction.
pub struct TreeRules {
    lexer: Lexer,
    sources: Vec<(String, LogicFn)>,
    patterns: Vec<(Regex, PatternLogicFn)>,
    default: Option<LogicFn>,
}

impl TreeRules {
    /// Creates an empty case table over `lexer`.
    #[must_use]
    pub fn new(lexer: Lexer) -> Self {
        Self {
            lexer,
            sources: Vec::new(),
            patterns: Vec::new(),
            default: None,
        }
    }

    /// Adds a case for texts from `source`.
    pub fn register_for_source(
        &mut self,
        source: impl Into<String>,
        logic: impl Fn(&Lexer, &[String]) -> Result<Option<Symbol>> + Send + Sync + 'static,
    ) -> &mut Self {
        self.sources.push((source.into(), Arc::new(logic)));
        self
    }

    /// Adds a case for texts whose first line matches `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-pattern error if `pattern` does not compile.
    pub fn register_for_pattern(
        &mut self,
        pattern: &str,
        logic: impl Fn(&Lexer, &[String], &Captures<'_>) -> Result<Option<Symbol>>
        + Send
        + Sync
        + 'static,
    ) -> Result<&mut Self> {
        self.patterns.push((compile_pattern(pattern)?, Arc::new(logic)));
        Ok(self)
    }

    /// Sets the case used when no other case applies.
    pub fn register_default(
        &mut self,
        logic: impl Fn(&Lexer, &[String]) -> Result<Option<Symbol>> + Send + Sync + 'static,
    ) -> &mut Self {
        self.default = Some(Arc::new(logic));
        self
    }

    /// Freezes the case table.
    #[must_use]
    pub fn finish(self) -> TreeBuilder {
        TreeBuilder {
            lexer: self.lexer,
            sources: self.sources,
            patterns: self.patterns,
            default: self.default,
        }
    }
}

impl Freeze for TreeRules {
    type Frozen = TreeBuilder;
    const COMPONENT: &'static str = "tree builder";

    fn freeze(self) -> TreeBuilder {
        self.finish()
    }
}

/// A frozen tree case table.
pub struct TreeBuilder {
    lexer: Lexer,
    sources: Vec<(String, LogicFn)>,
    patterns: Vec<(Regex, PatternLogicFn)>,
    default: Option<LogicFn>,
}

impl TreeBuilder {
    /// Starts a case table over `lexer`.
    #[must_use]
    pub fn rules(lexer: Lexer) -> TreeRules {
        TreeRules::new(lexer)
    }

    /// Returns the lexer the cases drive.
    #[must_use]
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Builds the symbol tree for `text` from `source`.
    ///
    /// # Errors
    ///
    /// Returns an unrecognized-input error if no case applies and no
    /// default is registered, or any error raised by the chosen case. Errors
    /// carry the source tag and text as context.
    pub fn build(&self, text: impl Into<CardText>, source: &str) -> Result<SymbolTree> {
        let text = text.into();
        let logic = self
            .dispatch(&text, source)
            .map_err(|e| attach_context(e, &text, source))?;
        Ok(SymbolTree::new(text, source, logic))
    }

    fn dispatch(&self, text: &CardText, source: &str) -> Result<Option<Symbol>> {
        if text.is_null() {
            debug!(source, "null card text");
            return Ok(None);
        }
        let lines = text.lines();

        if let Some((_, logic)) = self.sources.iter().find(|(src, _)| src == source) {
            debug!(source, "source case");
            return logic(&self.lexer, lines);
        }

        if let Some(first) = text.first_line() {
            for (pattern, logic) in &self.patterns {
                if let Some(caps) = pattern.captures(&first) {
                    debug!(source, pattern = pattern.as_str(), "pattern case");
                    return logic(&self.lexer, lines, &caps);
                }
            }
        }

        match &self.default {
            Some(logic) => {
                debug!(source, "default case");
                logic(&self.lexer, lines)
            }
            None => Err(Error::unrecognized_input(text.joined())),
        }
    }
}

fn attach_context(mut err: Error, text: &CardText, source: &str) -> Error {
    let ctx = err.context.get_or_insert_with(ErrorContext::new);
    ctx.source.get_or_insert_with(|| source.to_string());
    ctx.text.get_or_insert_with(|| text.joined());
    err
}

impl fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("lexer", &self.lexer)
            .field(
                "sources",
                &self.sources.iter().map(|(s, _)| s.as_str()).collect::<Vec<_>>(),
            )
            .field(
                "patterns",
                &self.patterns.iter().map(|(p, _)| p.as_str()).collect::<Vec<_>>(),
            )
            .field("default", &self.default.is_some())
            .finish()
    }
}
