//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use minilex_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_illegal_registration() {
    let err = Error::illegal_registration("lexer", "rule GAIN");
    assert!(matches!(
        err.kind,
        ErrorKind::IllegalRegistration {
            component: "lexer",
            ..
        }
    ));
    let msg = format!("{err}");
    assert!(msg.contains("rule GAIN"));
    assert!(msg.contains("lexer"));
}

#[test]
fn error_unrecognized_input_is_not_fatal() {
    let err = Error::unrecognized_input("draw 1 card");
    assert!(matches!(err.kind, ErrorKind::UnrecognizedInput(_)));
    assert!(!err.is_fatal());
}

#[test]
fn structural_errors_are_fatal() {
    assert!(Error::malformed_tree("bare list").is_fatal());
    assert!(Error::non_flat("nested symbol").is_fatal());
    assert!(Error::invalid_pattern("(", "unclosed group").is_fatal());
}

#[test]
fn error_arity_mismatch() {
    let err = Error::arity_mismatch("GAIN", 2, 3);
    let msg = format!("{err}");
    assert!(msg.contains("GAIN"));
    assert!(msg.contains('2'));
    assert!(msg.contains('3'));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn frames_accumulate_in_order() {
    let err = Error::malformed_tree("bare list")
        .in_frame("MAY")
        .in_frame("WHILE_RESOLVING");
    let context = err.context.unwrap();
    assert_eq!(context.stack, vec!["MAY", "WHILE_RESOLVING"]);
}

#[test]
fn context_display_names_source_and_text() {
    let context = ErrorContext::new()
        .with_source("skill")
        .with_text("gain 1 clue")
        .with_frame("GAIN");
    let shown = context.to_string();
    assert!(shown.contains("in source skill"));
    assert!(shown.contains("\"gain 1 clue\""));
    assert!(shown.contains("in GAIN"));
}
