//! Integration tests for the rule-table lexer
//!
//! Rule order, exclusions, capture handling, defaults, and registration.

use minilex_foundation::{ErrorKind, Symbol, Value};
use minilex_parser::{Rule, StagedLexer};

use crate::grammar::{self, CARD, DRAW};

fn lex(text: &str) -> Symbol {
    grammar::lexer().lex(text).unwrap().unwrap()
}

fn tag_of(value: Option<&Value>) -> Option<&'static str> {
    value.and_then(Value::as_symbol).map(Symbol::tag)
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn text_is_normalized_before_matching() {
    let draw = lex("  Draw 2 Cards. ");
    assert_eq!(draw.tag(), "DRAW");
    assert_eq!(draw.original_text(), Some("draw 2 cards."));
}

#[test]
fn digit_captures_become_integers() {
    let draw = lex("draw 3 cards");
    assert_eq!(draw.get("amount"), Some(&Value::Int(3)));
    assert_eq!(tag_of(draw.get("what")), Some("CARD"));
}

#[test]
fn first_matching_rule_wins() {
    let node = lex("if you can, draw 1 card");
    assert_eq!(node.tag(), "IF");
    assert_eq!(tag_of(node.condition()), Some("UNKNOWN"));
    assert_eq!(tag_of(node.result()), Some("DRAW"));
}

#[test]
fn exclusion_skips_rule() {
    assert_eq!(lex("cards").tag(), "CARD");
    assert_eq!(lex("cards of power").tag(), "UNKNOWN");
}

#[test]
fn text_captures_stay_leaves() {
    let named = lex("named 42");
    assert_eq!(named.get("name"), Some(&Value::Int(42)));
    let named = lex("named lucky penny");
    assert_eq!(named.get("name"), Some(&Value::from("lucky penny")));
}

#[test]
fn blank_text_lexes_to_nothing() {
    let lexer = grammar::lexer();
    assert!(lexer.lex("").unwrap().is_none());
    assert!(lexer.lex("   ").unwrap().is_none());
    assert_eq!(lexer.lex_value(None).unwrap(), Value::Nil);
    assert_eq!(lexer.lex_value(Some(" 12 ")).unwrap(), Value::Int(12));
}

// =============================================================================
// Defaults and errors
// =============================================================================

#[test]
fn no_default_means_unrecognized() {
    let lexer = grammar::rules().finish();
    assert!(!lexer.has_default());
    let err = lexer.lex("shuffle your deck").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnrecognizedInput(ref t) if t == "shuffle your deck"));
}

#[test]
fn bad_pattern_fails_at_registration() {
    let mut rules = grammar::rules();
    let err = rules.register(Rule::new(&CARD, r"^(unclosed")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidPattern { .. }));
}

#[test]
fn nested_errors_carry_the_rule_frame() {
    let mut rules = grammar::rules();
    rules
        .register(Rule::new(&DRAW, r"^take (.+)$").captures([1, 1]))
        .unwrap();
    let lexer = rules.finish();
    let err = lexer.lex("take nothing").unwrap_err();
    let context = err.context.unwrap();
    assert!(context.stack.contains(&"DRAW".to_string()));
}

#[test]
fn staged_lexer_rejects_late_rules() {
    let mut staged = StagedLexer::new(grammar::rules());
    staged
        .register("rule DRAW", |rules| {
            rules.register(Rule::new(&DRAW, r"^take (\d+) (.+)$").captures([1, 2]))?;
            Ok(())
        })
        .unwrap();
    assert_eq!(staged.frozen().lex("take 2 cards").unwrap().unwrap().tag(), "DRAW");
    let err = staged
        .register("rule CARD", |rules| {
            rules.register(Rule::terminal(&CARD, r"^deck$"))?;
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IllegalRegistration { .. }));
}
