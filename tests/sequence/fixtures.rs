//! Variants and tree builders shared by the sequence tests.

use minilex_foundation::{CONDITION, RESULT, Symbol, Value, Variant};
use minilex_parser::{CardText, SymbolTree};
use minilex_sequence::{LineContent, SymbolLine};

pub static SEQ: Variant = Variant::sequence("SEQ");
pub static NO_OP: Variant = Variant::no_op("NO_OP");
pub static GAIN: Variant = Variant::plain("GAIN", &["amount"]);
pub static SKILL: Variant = Variant::plain("SKILL", &["name"]);
pub static WRAP: Variant = Variant::plain("WRAP", &["inner"]);
pub static WHILE: Variant = Variant::condition("WHILE", &[CONDITION, RESULT]);

pub fn gain(n: i64) -> Value {
    GAIN.construct(vec![Value::Int(n)], None).unwrap().into()
}

pub fn skill(name: &str) -> Value {
    SKILL.construct(vec![Value::from(name)], None).unwrap().into()
}

pub fn while_(condition: Value, result: Value) -> Value {
    WHILE.construct(vec![condition, result], None).unwrap().into()
}

pub fn seq(children: Vec<Value>) -> Value {
    SEQ.construct_sequence(children, None).unwrap().into()
}

pub fn wrap(inner: Value) -> Value {
    WRAP.construct(vec![inner], None).unwrap().into()
}

pub fn no_op() -> Value {
    NO_OP.terminal(None).unwrap().into()
}

pub fn tree(root: Value) -> SymbolTree {
    let logic = root.as_symbol().cloned();
    SymbolTree::new(CardText::from("test text"), "test", logic)
}

/// Renders each line as its indent and `TAG`, `TAG:MARKER`, or `TAG.param`.
pub fn shape(lines: &[SymbolLine]) -> Vec<(i32, String)> {
    lines
        .iter()
        .map(|line| {
            let body = match line.content() {
                LineContent::Node(symbol) => symbol.tag().to_string(),
                LineContent::Param { name, .. } => format!("{}.{name}", line.tag()),
                LineContent::Marker(marker) => format!("{}:{marker}", line.tag()),
            };
            (line.indent(), body)
        })
        .collect()
}

pub fn amount(symbol: &Symbol) -> Option<i64> {
    symbol.get("amount").and_then(Value::as_int)
}
