//! Integration tests for variants, symbols, and values
//!
//! Tests construction through variants, field order, stripping, and export.

use minilex_foundation::{
    CONDITION, ErrorKind, Export, Exported, RESULT, Scalar, Shape, Value, Variant, parse_numeric,
};

static GAIN: Variant = Variant::plain("GAIN", &["subject", "resource"]);
static MAY: Variant = Variant::condition("MAY", &["subject", CONDITION, RESULT]);
static SEQ: Variant = Variant::sequence("SEQ");
static NO_OP: Variant = Variant::no_op("NO_OP");
static TEXT: Variant = Variant::plain("TEXT", &[]);

fn text(s: &str) -> Value {
    TEXT.terminal(Some(s)).unwrap().into()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn fields_follow_declaration_order() {
    let gain = GAIN.construct(vec![text("you"), Value::Int(2)], Some("you gain 2")).unwrap();
    let names: Vec<_> = gain.params().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["subject", "resource"]);
    assert_eq!(gain.original_text(), Some("you gain 2"));
    assert_eq!(gain.shape(), Shape::Plain);
}

#[test]
fn wrong_arity_is_rejected() {
    let err = GAIN.construct(vec![Value::Int(1)], None).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ArityMismatch {
            tag: "GAIN",
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn sequence_wraps_children() {
    let seq = SEQ
        .construct_sequence(vec![text("a"), text("b")], None)
        .unwrap();
    assert_eq!(seq.shape(), Shape::Sequence);
    assert_eq!(seq.children().len(), 2);
    assert!(NO_OP.terminal(None).unwrap().children().is_empty());
}

// =============================================================================
// Condition branches
// =============================================================================

#[test]
fn nil_branch_reads_as_absent() {
    let may = MAY
        .construct(vec![text("you"), Value::Nil, text("gain")], None)
        .unwrap();
    assert!(may.condition().is_none());
    assert!(may.result().is_some());
    assert_eq!(may.get(CONDITION), Some(&Value::Nil));
}

#[test]
fn strip_leaves_original_untouched() {
    let may = MAY
        .construct(vec![text("you"), text("pay"), text("gain")], None)
        .unwrap();
    let head = may.without(RESULT);
    assert!(head.get(RESULT).is_none());
    assert_eq!(head.stripped(), &[RESULT]);
    assert!(may.get(RESULT).is_some());
    assert!(may.stripped().is_empty());
}

// =============================================================================
// Values and export
// =============================================================================

#[test]
fn numeric_text_coerces() {
    assert_eq!(parse_numeric("42"), Some(42));
    assert_eq!(parse_numeric("4 2"), None);
    assert_eq!(parse_numeric(""), None);
    assert_eq!(Value::from_text("7"), Value::Int(7));
    assert_eq!(Value::from("7").to_scalar(), Some(Scalar::Int(7)));
    assert_eq!(text("x").to_scalar(), None);
}

#[test]
fn symbol_export_is_plain_nested_data() {
    let gain = GAIN.construct(vec![text("you"), Value::Int(2)], None).unwrap();
    let exported = gain.export();
    assert!(exported.is_compound());
    let shown = exported.to_string();
    assert!(shown.contains("GAIN"));
    assert!(shown.contains("TEXT"));
    assert!(!matches!(exported, Exported::Null));
}
