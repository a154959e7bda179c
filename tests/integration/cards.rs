//! End-to-end tests of the standard card grammar
//!
//! Text in, symbol lines or extracted nodes out.

use minilex::cards::{ABILITY, Grammar, flattener_config};
use minilex::foundation::{Export, Symbol, Value};
use minilex::sequence::{ExpansionPolicy, LineContent, SymbolSequence};

fn process(text: &str, policy: ExpansionPolicy) -> SymbolSequence {
    Grammar::standard()
        .unwrap()
        .process(text, "card", policy)
        .unwrap()
        .1
}

fn rendered(sequence: &SymbolSequence) -> Vec<String> {
    sequence
        .linear()
        .unwrap()
        .iter()
        .map(|line| match line.content() {
            LineContent::Node(symbol) => symbol.tag().to_string(),
            LineContent::Param { name, .. } => format!("{}.{name}", line.tag()),
            LineContent::Marker(marker) => format!("{}:{marker}", line.tag()),
        })
        .collect()
}

#[test]
fn imperative_gain_is_one_line() {
    let sequence = process("Gain 2 clues.", ExpansionPolicy::Expand);
    assert_eq!(rendered(&sequence), vec!["GAIN"]);
    let gain = sequence.linear().unwrap()[0].symbol().unwrap();
    let quantity = gain.get("resource").and_then(Value::as_symbol).unwrap();
    assert_eq!(quantity.get("num"), Some(&Value::Int(2)));
}

#[test]
fn while_resolving_is_framed() {
    let sequence = process(
        "While resolving spell effects, gain 1 combat.",
        ExpansionPolicy::Expand,
    );
    assert_eq!(
        rendered(&sequence),
        vec![
            "WHILE_RESOLVING",
            "WHILE_RESOLVING:CONDITION",
            "SPELL_EFFECTS",
            "WHILE_RESOLVING:RESULT",
            "GAIN",
            "WHILE_RESOLVING:END",
        ]
    );
}

#[test]
fn multi_line_texts_run_in_order() {
    let grammar = Grammar::standard().unwrap();
    let (tree, sequence) = grammar
        .process(
            vec!["Gain 1 clue.", "-", "You may gain 2 resources."],
            "card",
            ExpansionPolicy::Collapse,
        )
        .unwrap();
    assert_eq!(tree.logic().map(Symbol::tag), Some("SEQ"));
    assert_eq!(
        rendered(&sequence),
        vec!["GAIN", "MAY", "MAY.subject", "CURR_INVESTIGATOR", "GAIN"]
    );
}

#[test]
fn ability_lines_form_one_clause() {
    let grammar = Grammar::standard().unwrap();
    let (tree, _) = grammar
        .process(
            vec!["You may discard a card", "to gain 2 clues."],
            ABILITY,
            ExpansionPolicy::Expand,
        )
        .unwrap();
    assert_eq!(tree.logic().map(Symbol::tag), Some("MAY"));
}

#[test]
fn unknown_text_falls_back_to_text_nodes() {
    let sequence = process("Shuffle your deck.", ExpansionPolicy::Expand);
    assert_eq!(rendered(&sequence), vec!["TEXT"]);
}

#[test]
fn not_applicable_text_is_empty() {
    let grammar = Grammar::standard().unwrap();
    let (tree, sequence) = grammar.process("N/A", "card", ExpansionPolicy::Expand).unwrap();
    assert!(tree.is_null());
    assert!(sequence.is_empty());
}

#[test]
fn extraction_skips_guards() {
    let grammar = Grammar::with_flattener(flattener_config().with_extraction_tags(["GAIN"])).unwrap();
    let (_, sequence) = grammar
        .process(
            "While resolving gain 1 clue, gain 2 clues.",
            "card",
            ExpansionPolicy::Expand,
        )
        .unwrap();
    let items = sequence.extracted().unwrap();
    assert_eq!(items.len(), 1);
    let quantity = items[0].get("resource").and_then(Value::as_symbol).unwrap();
    assert_eq!(quantity.get("num"), Some(&Value::Int(2)));
}

#[test]
fn collapse_tags_strip_may_results() {
    let grammar = Grammar::with_flattener(
        flattener_config()
            .with_extraction_tags(["MAY"])
            .with_collapse_tags(["MAY"]),
    )
    .unwrap();
    let (_, sequence) = grammar
        .process("You may gain 1 clue.", "card", ExpansionPolicy::Expand)
        .unwrap();
    let may = &sequence.extracted().unwrap()[0];
    assert!(may.result().is_none());
    assert!(may.get("subject").is_some());
}

#[test]
fn sequence_export_names_mode_and_source() {
    let sequence = process("You may gain 1 clue.", ExpansionPolicy::Expand);
    let exported = sequence.export();
    assert_eq!(exported.get("mode").and_then(|m| m.as_str()), Some("linear"));
    assert_eq!(exported.get("source").and_then(|m| m.as_str()), Some("card"));
    assert_eq!(
        exported.get("lines").and_then(|l| l.as_list()).map(<[_]>::len),
        Some(sequence.len())
    );
}
