//! Property tests for the lexer and tree builder
//!
//! The lexer with a default rule accepts every input; the builder never
//! panics on arbitrary line lists.

use minilex_parser::{CardText, Lexer};
use proptest::prelude::*;

use crate::grammar;

fn arbitrary_line() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..120).prop_map(|chars| chars.into_iter().collect())
}

fn card_like_line() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        "[0-9]{1,3}".prop_map(String::from),
        "(draw|if|named|card|cards|of)".prop_map(String::from),
        "[a-z]{1,8}".prop_map(String::from),
        Just(",".to_string()),
        Just(".".to_string()),
    ];
    prop::collection::vec(word, 0..12).prop_map(|words| words.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// With a default rule every non-blank text lexes to some symbol.
    #[test]
    fn lexer_with_default_accepts_everything(input in arbitrary_line()) {
        let lexer = grammar::lexer();
        let result = lexer.lex(&input).unwrap();
        prop_assert_eq!(result.is_some(), !Lexer::normalize(&input).is_empty());
    }

    /// Card-like text exercises nested rules without failing.
    #[test]
    fn lexer_handles_card_like_text(input in card_like_line()) {
        let lexer = grammar::lexer();
        prop_assert!(lexer.lex(&input).is_ok());
    }

    /// Spacing and case never hide a not-applicable marker.
    #[test]
    fn not_applicable_ignores_spacing_and_case(
        left in " {0,3}",
        right in " {0,3}",
        n in "[nN]",
        a in "[aA]",
    ) {
        let text = CardText::from(format!(" {n}{left}/{right}{a} "));
        prop_assert!(text.is_null());
    }

    /// The builder never panics on arbitrary line lists.
    #[test]
    fn builder_never_panics(lines in prop::collection::vec(card_like_line(), 0..6)) {
        let builder = grammar::builder();
        let tree = builder.build(lines.clone(), "any").unwrap();
        prop_assert_eq!(tree.text(), &CardText::from(lines));
    }
}
