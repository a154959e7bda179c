//! Tree cases of the standard card grammar.
//!
//! - Texts from the [`ABILITY`] source are one clause spread over lines;
//!   the lines are joined and lexed once.
//! - Texts whose first line starts with "while resolving" become a
//!   `WHILE_RESOLVING` node whose result is the rest of the first line
//!   followed by every further line.
//! - Anything else is lexed line by line. A single line is its own root;
//!   several lines become a `SEQ`.

use minilex_foundation::{Result, Symbol, Value};
use minilex_parser::{Lexer, TreeBuilder, TreeRules};
use regex::Captures;

use crate::lexicon;
use crate::variants::{SEQ, WHILE_RESOLVING};

/// Source tag for texts that are a single clause.
pub const ABILITY: &str = "ability";

/// Returns the standard case table over `lexer`, still open for
/// registration.
///
/// # Errors
///
/// Returns an invalid-pattern error if a built-in pattern fails to compile.
pub fn tree_rules(lexer: Lexer) -> Result<TreeRules> {
    let mut rules = TreeBuilder::rules(lexer);
    rules
        .register_for_source(ABILITY, |lexer, lines| lexer.lex(&lines.join(" ")))
        .register_for_pattern(r"^while resolving ([^,]+),\s*(.*)$", while_resolving)?
        .register_default(line_by_line);
    Ok(rules)
}

/// Returns the standard tree builder over the standard lexer.
///
/// # Errors
///
/// Returns an invalid-pattern error if a built-in pattern fails to compile.
pub fn tree_builder() -> Result<TreeBuilder> {
    tree_rules(lexicon::lexer()?).map(TreeRules::finish)
}

fn line_by_line(lexer: &Lexer, lines: &[String]) -> Result<Option<Symbol>> {
    match lines {
        [line] => lexer.lex(line),
        _ => sequence(lexer, lines.iter().map(String::as_str)),
    }
}

fn while_resolving(lexer: &Lexer, lines: &[String], caps: &Captures<'_>) -> Result<Option<Symbol>> {
    let condition = lexer.lex_value(caps.get(1).map(|m| m.as_str()))?;
    let rest = caps.get(2).map_or("", |m| m.as_str());
    let body = std::iter::once(rest).chain(lines.iter().skip(1).map(String::as_str));
    let result = sequence(lexer, body)?;
    let text = Lexer::normalize(&lines.join(" "));
    WHILE_RESOLVING
        .construct(vec![condition, result.into()], Some(&text))
        .map(Some)
}

/// Lexes each line and wraps the non-empty results in a `SEQ`.
fn sequence<'a>(lexer: &Lexer, lines: impl IntoIterator<Item = &'a str>) -> Result<Option<Symbol>> {
    let mut children = Vec::new();
    for line in lines {
        if let Some(symbol) = lexer.lex(line)? {
            children.push(Value::from(symbol));
        }
    }
    SEQ.construct_sequence(children, None).map(Some)
}
