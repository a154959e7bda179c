//! Property tests for flattening and the line sink
//!
//! Random trees always flatten to flat, balanced sequences, and held lines
//! always land right after the splice point.

use minilex_foundation::Value;
use minilex_sequence::{ExpansionPolicy, Flattener, LineSink, Marker, SymbolLine, branch_end};
use proptest::prelude::*;

use crate::fixtures::{gain, no_op, seq, skill, tree, while_};

fn arb_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        (0i64..10).prop_map(gain),
        "[a-z]{1,6}".prop_map(|name| skill(&name)),
        Just(no_op()),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(seq),
            (inner.clone(), inner).prop_map(|(c, r)| while_(c, r)),
        ]
    })
}

fn marker_line(n: usize) -> SymbolLine {
    // Indent doubles as an identity for ordering checks.
    SymbolLine::marker("X", Marker::SequenceEnd, i32::try_from(n).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Expanded output has one END per frame, each reachable from its node.
    #[test]
    fn expanded_frames_are_balanced(root in arb_tree()) {
        let flattener = Flattener::config().finish();
        let sequence = flattener.flatten(&tree(root)).unwrap();
        let lines = sequence.linear().unwrap();
        let opens = (0..lines.len()).filter(|&i| branch_end(lines, i).is_some()).count();
        let ends = lines.iter().filter(|line| line.is_end()).count();
        prop_assert_eq!(opens, ends);
    }

    /// Collapsed output never carries markers and never has more lines.
    #[test]
    fn collapse_drops_only_frames(root in arb_tree()) {
        let flattener = Flattener::config().finish();
        let t = tree(root);
        let expanded = flattener.flatten_with(&t, ExpansionPolicy::Expand).unwrap();
        let collapsed = flattener.flatten_with(&t, ExpansionPolicy::Collapse).unwrap();
        let lines = collapsed.linear().unwrap();
        prop_assert!(lines.iter().all(|line| line.marker_kind().is_none()));
        prop_assert!(collapsed.len() <= expanded.len());
    }

    /// Extraction returns only nodes with the requested tag.
    #[test]
    fn extraction_filters_by_tag(root in arb_tree()) {
        let flattener = Flattener::config().with_extraction_tags(["GAIN"]).finish();
        let sequence = flattener.flatten(&tree(root)).unwrap();
        prop_assert!(sequence.extracted().unwrap().iter().all(|s| s.tag() == "GAIN"));
    }

    /// Held lines are inserted right after the splice index, in order.
    #[test]
    fn splice_inserts_after_index(direct in 0usize..8, held in 0usize..8, index in 0usize..10) {
        let mut sink = LineSink::new();
        for n in 0..direct {
            sink.push(marker_line(n));
        }
        sink.hold();
        for n in 0..held {
            sink.push(marker_line(100 + n));
        }
        prop_assert_eq!(sink.lines().len(), direct);
        prop_assert_eq!(sink.len(), held);
        prop_assert_eq!(sink.splice_after(index), held);
        prop_assert!(!sink.is_holding());

        let at = (index + 1).min(direct);
        let order: Vec<i32> = sink.lines().iter().map(SymbolLine::indent).collect();
        let mut expected: Vec<i32> = (0..direct).map(|n| i32::try_from(n).unwrap()).collect();
        let inserted = (0..held).map(|n| i32::try_from(100 + n).unwrap());
        expected.splice(at..at, inserted);
        prop_assert_eq!(order, expected);
    }
}
