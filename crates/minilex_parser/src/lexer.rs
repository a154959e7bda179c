//! Rule-table lexer.
//!
//! Text is matched against an ordered table of regex rules. The first rule
//! whose inclusion pattern matches and none of whose exclusion patterns
//! match wins. Captured groups are lexed recursively, so a single rule can
//! build a nested symbol out of sub-phrases that other rules recognize.
//!
//! ```text
//! "gain 2 clues"
//!      │
//!      ▼  rule GAIN  ^gain (.+)$  captures [1]
//! GAIN { resource: lex("2 clues") }
//!                       │
//!                       ▼  rule QUANTITY  ^(\d+) (.+)$  captures [1, 2]
//!                  QUANTITY { amount: 2, unit: lex("clues") }
//! ```

use std::fmt;
use std::sync::Arc;

use minilex_foundation::{Error, Freeze, Result, Symbol, Value, Variant, parse_numeric};
use regex::{Captures, Regex};
use tracing::trace;

/// Custom construction logic for a rule.
///
/// Receives the lexer (for further extraction), the raw match, and the
/// normalized text. It is fully responsible for producing the symbol.
pub type CustomConstructor =
    Arc<dyn Fn(&Lexer, &Captures<'_>, &str) -> Result<Option<Symbol>> + Send + Sync>;

/// How a capture group becomes a constructor argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Lex the group recursively; digit-only groups become integers.
    Lex(usize),
    /// Keep the group as a scalar leaf; digit-only groups become integers.
    Text(usize),
}

impl Capture {
    const fn index(self) -> usize {
        match self {
            Self::Lex(i) | Self::Text(i) => i,
        }
    }
}

impl From<usize> for Capture {
    fn from(index: usize) -> Self {
        Self::Lex(index)
    }
}

/// A lexer rule awaiting registration.
#[derive(Clone)]
pub struct Rule {
    variant: &'static Variant,
    pattern: String,
    exclusions: Vec<String>,
    captures: Vec<Capture>,
    custom: Option<CustomConstructor>,
}

impl Rule {
    /// Creates a rule building `variant` when `pattern` matches.
    #[must_use]
    pub fn new(variant: &'static Variant, pattern: impl Into<String>) -> Self {
        Self {
            variant,
            pattern: pattern.into(),
            exclusions: Vec::new(),
            captures: Vec::new(),
            custom: None,
        }
    }

    /// Creates a rule with no captures; the variant is built with an empty
    /// payload. The returned [`TerminalRule`] accepts exclusions but no
    /// captures or custom constructor.
    #[must_use]
    pub fn terminal(variant: &'static Variant, pattern: impl Into<String>) -> TerminalRule {
        TerminalRule(Self::new(variant, pattern))
    }

    /// Adds an exclusion pattern. If it matches, the rule is skipped.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclusions.push(pattern.into());
        self
    }

    /// Declares the capture groups passed to the variant, in field order.
    #[must_use]
    pub fn captures<C: Into<Capture>>(mut self, groups: impl IntoIterator<Item = C>) -> Self {
        self.captures = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Hands construction to custom logic.
    #[must_use]
    pub fn custom(
        mut self,
        f: impl Fn(&Lexer, &Captures<'_>, &str) -> Result<Option<Symbol>> + Send + Sync + 'static,
    ) -> Self {
        self.custom = Some(Arc::new(f));
        self
    }

    fn compile(self) -> Result<CompiledRule> {
        let inclusion = compile_pattern(&self.pattern)?;
        let exclusions = self
            .exclusions
            .iter()
            .map(String::as_str)
            .map(compile_pattern)
            .collect::<Result<Vec<_>>>()?;
        Ok(CompiledRule {
            variant: self.variant,
            inclusion,
            exclusions,
            captures: self.captures,
            custom: self.custom,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("variant", &self.variant.tag())
            .field("pattern", &self.pattern)
            .field("exclusions", &self.exclusions)
            .field("captures", &self.captures)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// A rule that builds its variant from the matched text alone.
#[derive(Clone, Debug)]
pub struct TerminalRule(Rule);

impl TerminalRule {
    /// Adds an exclusion pattern. If it matches, the rule is skipped.
    #[must_use]
    pub fn exclude(self, pattern: impl Into<String>) -> Self {
        Self(self.0.exclude(pattern))
    }
}

impl From<TerminalRule> for Rule {
    fn from(rule: TerminalRule) -> Self {
        rule.0
    }
}

/// Compiles a regex, mapping failures to an invalid-pattern error.
///
/// # Errors
///
/// Returns an invalid-pattern error if `pattern` is not a valid regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e.to_string()))
}

struct CompiledRule {
    variant: &'static Variant,
    inclusion: Regex,
    exclusions: Vec<Regex>,
    captures: Vec<Capture>,
    custom: Option<CustomConstructor>,
}

impl CompiledRule {
    fn captures_in<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        let caps = self.inclusion.captures(text)?;
        if self.exclusions.iter().any(|e| e.is_match(text)) {
            trace!(tag = self.variant.tag(), "rule excluded");
            return None;
        }
        Some(caps)
    }
}

impl fmt::Debug for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledRule")
            .field("variant", &self.variant.tag())
            .field("inclusion", &self.inclusion.as_str())
            .field("exclusions", &self.exclusions.len())
            .field("captures", &self.captures)
            .finish_non_exhaustive()
    }
}

/// Rule table under construction.
#[derive(Debug, Default)]
pub struct LexerRules {
    rules: Vec<CompiledRule>,
    default: Option<&'static Variant>,
}

impl LexerRules {
    /// Creates an empty rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Rules are tried in registration order.
    ///
    /// # Errors
    ///
    /// Returns an invalid-pattern error if any of the rule's patterns fail
    /// to compile.
    pub fn register(&mut self, rule: impl Into<Rule>) -> Result<&mut Self> {
        self.rules.push(rule.into().compile()?);
        Ok(self)
    }

    /// Sets the variant built when no rule matches non-empty text.
    pub fn register_default(&mut self, variant: &'static Variant) -> &mut Self {
        self.default = Some(variant);
        self
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Freezes the table into a lexer.
    #[must_use]
    pub fn finish(self) -> Lexer {
        Lexer {
            rules: self.rules,
            default: self.default,
        }
    }
}

impl Freeze for LexerRules {
    type Frozen = Lexer;
    const COMPONENT: &'static str = "lexer";

    fn freeze(self) -> Lexer {
        self.finish()
    }
}

/// A frozen rule table.
#[derive(Debug)]
pub struct Lexer {
    rules: Vec<CompiledRule>,
    default: Option<&'static Variant>,
}

impl Lexer {
    /// Starts a new rule table.
    #[must_use]
    pub fn rules() -> LexerRules {
        LexerRules::new()
    }

    /// Normalizes text for matching: trimmed and lowercased.
    #[must_use]
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Lexes `text` into a symbol.
    ///
    /// Returns `Ok(None)` for empty or whitespace-only text.
    ///
    /// # Errors
    ///
    /// Returns an unrecognized-input error if no rule matches and no default
    /// is registered, or any error raised while building the symbol.
    pub fn lex(&self, text: &str) -> Result<Option<Symbol>> {
        let text = Self::normalize(text);
        if text.is_empty() {
            return Ok(None);
        }

        for rule in &self.rules {
            let Some(caps) = rule.captures_in(&text) else {
                continue;
            };
            let tag = rule.variant.tag();
            trace!(tag, text = %text, "rule matched");

            if let Some(custom) = &rule.custom {
                return custom(self, &caps, &text).map_err(|e| e.in_frame(tag));
            }

            let args = rule
                .captures
                .iter()
                .map(|capture| self.capture_value(&caps, *capture))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| e.in_frame(tag))?;
            return rule.variant.construct(args, Some(&text)).map(Some);
        }

        match self.default {
            Some(variant) => {
                trace!(tag = variant.tag(), text = %text, "default rule");
                variant.terminal(Some(&text)).map(Some)
            }
            None => Err(Error::unrecognized_input(text)),
        }
    }

    /// Lexes an optional fragment into a field value.
    ///
    /// Absent or blank fragments are nil, digit-only fragments become
    /// integers, anything else is lexed into a nested symbol.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Lexer::lex`].
    pub fn lex_value(&self, fragment: Option<&str>) -> Result<Value> {
        let Some(fragment) = fragment else {
            return Ok(Value::Nil);
        };
        if let Some(n) = parse_numeric(fragment.trim()) {
            return Ok(Value::Int(n));
        }
        Ok(self.lex(fragment)?.into())
    }

    fn capture_value(&self, caps: &Captures<'_>, capture: Capture) -> Result<Value> {
        let group = caps.get(capture.index()).map(|m| m.as_str());
        match capture {
            Capture::Lex(_) => self.lex_value(group),
            Capture::Text(_) => Ok(group.map_or(Value::Nil, |g| Value::from_text(g.trim()))),
        }
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true if a default variant is registered.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}
