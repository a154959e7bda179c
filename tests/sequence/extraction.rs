//! Integration tests for extraction mode
//!
//! Post-order collection, guard handling, collapse tags, and the
//! policy-independence of extraction.

use minilex_foundation::{RESULT, Symbol, Value};
use minilex_sequence::{ExpansionPolicy, Flattener, SymbolSequence};

use crate::fixtures::{amount, gain, no_op, seq, skill, tree, while_, wrap};

fn extract(root: Value, tags: &[&str], collapse: &[&str]) -> SymbolSequence {
    Flattener::config()
        .with_extraction_tags(tags.iter().copied())
        .with_collapse_tags(collapse.iter().copied())
        .finish()
        .flatten(&tree(root))
        .unwrap()
}

fn tags_of(items: &[Symbol]) -> Vec<&'static str> {
    items.iter().map(Symbol::tag).collect()
}

#[test]
fn collects_matching_nodes_post_order() {
    let root = seq(vec![while_(skill("combat"), gain(1)), gain(2)]);
    let sequence = extract(root, &["GAIN", "WHILE"], &[]);
    let items = sequence.extracted().unwrap();
    assert_eq!(tags_of(items), vec!["GAIN", "WHILE", "GAIN"]);
    assert_eq!(amount(&items[0]), Some(1));
    assert_eq!(amount(&items[2]), Some(2));
}

#[test]
fn guard_node_is_skipped_but_its_children_are_not() {
    let root = while_(wrap(gain(1)), gain(2));
    let sequence = extract(root, &["WRAP", "GAIN"], &[]);
    let items = sequence.extracted().unwrap();
    assert_eq!(tags_of(items), vec!["GAIN", "GAIN"]);
    assert_eq!(items.iter().map(amount).collect::<Vec<_>>(), vec![Some(1), Some(2)]);
}

#[test]
fn sequence_guard_children_are_collected() {
    let root = while_(seq(vec![skill("combat"), skill("agility")]), gain(1));
    let sequence = extract(root, &["SKILL", "GAIN", "SEQ"], &[]);
    assert_eq!(
        tags_of(sequence.extracted().unwrap()),
        vec!["SKILL", "SKILL", "GAIN"]
    );
}

#[test]
fn sequences_and_no_ops_are_collected_when_asked_for() {
    let root = seq(vec![while_(seq(vec![gain(1), gain(3)]), gain(2)), no_op()]);
    let sequence = extract(root, &["GAIN", "SEQ", "NO_OP"], &[]);
    let items = sequence.extracted().unwrap();
    assert_eq!(tags_of(items), vec!["GAIN", "GAIN", "GAIN", "NO_OP", "SEQ"]);
    assert_eq!(
        items[..3].iter().map(amount).collect::<Vec<_>>(),
        vec![Some(1), Some(3), Some(2)]
    );
}

#[test]
fn collapse_tags_strip_results() {
    let root = while_(skill("combat"), gain(1));
    let sequence = extract(root, &["WHILE"], &["WHILE"]);
    let node = &sequence.extracted().unwrap()[0];
    assert!(node.get(RESULT).is_none());
    assert!(node.get("condition").is_some());
    assert_eq!(node.stripped(), &[RESULT]);
}

#[test]
fn policy_does_not_affect_extraction() {
    let flattener = Flattener::config().with_extraction_tags(["GAIN"]).finish();
    let t = tree(seq(vec![while_(skill("combat"), gain(1))]));
    let expanded = flattener.flatten_with(&t, ExpansionPolicy::Expand).unwrap();
    let collapsed = flattener.flatten_with(&t, ExpansionPolicy::Collapse).unwrap();
    assert_eq!(expanded.extracted(), collapsed.extracted());
    assert!(expanded.linear().is_none());
}

#[test]
fn duplicates_are_kept() {
    let root = seq(vec![gain(1), gain(1)]);
    assert_eq!(extract(root, &["GAIN"], &[]).len(), 2);
}

#[test]
fn unmatched_tags_extract_nothing() {
    let sequence = extract(gain(1), &["MISSING"], &[]);
    assert!(sequence.is_empty());
    assert!(sequence.extracted().is_some());
}
