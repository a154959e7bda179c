//! Integration tests for the tree builder
//!
//! Null detection, case dispatch order, and error context.

use minilex_foundation::{ErrorKind, Export, Symbol, Value};
use minilex_parser::{CardText, Lexer, TreeBuilder};

use crate::grammar;

fn tags(symbol: &Symbol) -> Vec<&'static str> {
    symbol
        .children()
        .iter()
        .filter_map(Value::as_symbol)
        .map(Symbol::tag)
        .collect()
}

// =============================================================================
// Null texts
// =============================================================================

#[test]
fn null_texts_have_no_logic() {
    let builder = grammar::builder();
    for text in [
        CardText::Absent,
        CardText::from(true),
        CardText::from(Vec::<String>::new()),
        CardText::from("N/A"),
        CardText::from(" n / a "),
    ] {
        let tree = builder.build(text, "any").unwrap();
        assert!(tree.is_null());
        assert_eq!(tree.to_string(), "None");
    }
}

#[test]
fn na_inside_text_is_not_null() {
    let tree = grammar::builder().build("n/a cards", "any").unwrap();
    assert!(!tree.is_null());
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn source_case_wins_over_pattern() {
    let tree = grammar::builder()
        .build(vec!["if you can,", "draw 1 card"], "joined")
        .unwrap();
    assert_eq!(tree.logic().map(Symbol::tag), Some("IF"));
    assert_eq!(tree.source(), "joined");
}

#[test]
fn pattern_case_sees_first_line() {
    let tree = grammar::builder()
        .build(vec!["Then:", "draw 1 card", "cards"], "any")
        .unwrap();
    let root = tree.logic().unwrap();
    assert_eq!(tags(root), vec!["DRAW", "CARD"]);
}

#[test]
fn default_case_handles_the_rest() {
    let tree = grammar::builder()
        .build(vec!["draw 1 card", "", "cards"], "any")
        .unwrap();
    assert_eq!(tags(tree.logic().unwrap()), vec!["DRAW", "CARD"]);
}

#[test]
fn no_case_is_unrecognized_with_context() {
    let builder = TreeBuilder::rules(grammar::lexer()).finish();
    let err = builder.build("draw 1 card", "skill").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnrecognizedInput(_)));
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("skill"));
    assert_eq!(context.text.as_deref(), Some("draw 1 card"));
}

#[test]
fn tree_exports_text_source_and_logic() {
    let tree = grammar::builder().build("draw 1 card", "any").unwrap();
    let exported = tree.export();
    assert_eq!(exported.get("source").and_then(|s| s.as_str()), Some("any"));
    assert!(exported.get("logic").is_some());
    assert!(exported.get("text").is_some());
}

#[test]
fn builder_exposes_its_lexer() {
    let builder = grammar::builder();
    let lexer: &Lexer = builder.lexer();
    assert!(lexer.has_default());
}
