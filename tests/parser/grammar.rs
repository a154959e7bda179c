//! A small grammar shared by the parser tests.

use minilex_foundation::{CONDITION, RESULT, Result, Value, Variant};
use minilex_parser::{Capture, Lexer, LexerRules, Rule, TreeBuilder};

pub static DRAW: Variant = Variant::plain("DRAW", &["amount", "what"]);
pub static IF: Variant = Variant::condition("IF", &[CONDITION, RESULT]);
pub static CARD: Variant = Variant::plain("CARD", &[]);
pub static NAMED: Variant = Variant::plain("NAMED", &["name"]);
pub static SEQ: Variant = Variant::sequence("SEQ");
pub static UNKNOWN: Variant = Variant::plain("UNKNOWN", &[]);

pub fn rules() -> LexerRules {
    let mut rules = Lexer::rules();
    rules
        .register(Rule::new(&IF, r"^if (.+?), (.+)$").captures([1, 2]))
        .unwrap()
        .register(Rule::new(&DRAW, r"^draw (\d+) (.+?)\.?$").captures([1, 2]))
        .unwrap()
        .register(Rule::terminal(&CARD, r"^cards?$").exclude(r"^cards? of"))
        .unwrap()
        .register(Rule::new(&NAMED, r"^named (.+)$").captures([Capture::Text(1)]))
        .unwrap();
    rules
}

pub fn lexer() -> Lexer {
    let mut rules = rules();
    rules.register_default(&UNKNOWN);
    rules.finish()
}

pub fn builder() -> TreeBuilder {
    let mut rules = TreeBuilder::rules(lexer());
    rules
        .register_for_source("joined", |lexer, lines| lexer.lex(&lines.join(" ")))
        .register_for_pattern(r"^then:$", |lexer, lines, _| sequence(lexer, &lines[1..]))
        .unwrap()
        .register_default(|lexer, lines| sequence(lexer, lines));
    rules.finish()
}

fn sequence(lexer: &Lexer, lines: &[String]) -> Result<Option<minilex_foundation::Symbol>> {
    let mut children = Vec::new();
    for line in lines {
        if let Some(symbol) = lexer.lex(line)? {
            children.push(Value::from(symbol));
        }
    }
    SEQ.construct_sequence(children, None).map(Some)
}
