//! Runtime tests: sessions, archives, and the REPL evaluator

use minilex::runtime::serialize::{from_bytes, to_bytes};
use minilex::runtime::{RuntimeConfig, Session};
use minilex::sequence::ExpansionPolicy;

#[test]
fn session_archive_survives_bytes() {
    let mut session = Session::new(RuntimeConfig::default()).unwrap();
    session.process("Gain 2 clues.").unwrap();
    session
        .process(vec!["While resolving spell effects,", "gain 1 combat."])
        .unwrap();
    let archive = session.archive();
    let restored = from_bytes(&to_bytes(&archive).unwrap()).unwrap();
    assert_eq!(restored, archive);
    assert_eq!(restored.entries[1].text.len(), 2);
}

#[test]
fn config_drives_session_grammar() {
    let config = RuntimeConfig::default()
        .with_source("ability")
        .with_policy(ExpansionPolicy::Collapse)
        .with_extraction_tags(["GAIN"]);
    let mut session = Session::new(config).unwrap();
    let (tree, sequence) = session
        .process(vec!["You may discard a card", "to gain 2 clues."])
        .unwrap();
    assert_eq!(tree.source(), "ability");
    assert_eq!(sequence.extracted().map(<[_]>::len), Some(1));
}

#[test]
fn blank_lines_give_an_empty_sequence() {
    let mut session = Session::new(RuntimeConfig::default()).unwrap();
    let (_, sequence) = session.process(vec!["", "  "]).unwrap();
    assert!(sequence.is_empty());
    assert_eq!(session.history_len(), 1);
}
