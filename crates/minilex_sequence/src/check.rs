//! Post-condition checks on flatten output.

use minilex_foundation::{Error, Result, Shape, Symbol, Value};

use crate::line::SymbolLine;

/// Checks that a linear sequence is flat: no sequence symbol is a line, and
/// no line payload nests a sequence or condition symbol in any field.
///
/// # Errors
///
/// Returns a non-flat-sequence error naming the first offending line.
pub fn check_lines(lines: &[SymbolLine]) -> Result<()> {
    for (index, line) in lines.iter().enumerate() {
        let Some(symbol) = line.symbol() else {
            continue;
        };
        if symbol.shape() == Shape::Sequence {
            return Err(Error::non_flat(format!(
                "line {index}: sequence {} emitted as a line",
                symbol.tag()
            )));
        }
        check_payload(symbol).map_err(|detail| {
            Error::non_flat(format!("line {index}: {detail}"))
        })?;
    }
    Ok(())
}

fn check_payload(symbol: &Symbol) -> std::result::Result<(), String> {
    for (name, value) in symbol.params() {
        if let Some(nested) = find_compound(value) {
            return Err(format!(
                "field `{name}` of {} holds nested {}",
                symbol.tag(),
                nested.tag()
            ));
        }
    }
    Ok(())
}

fn find_compound(value: &Value) -> Option<&Symbol> {
    match value {
        Value::Nil | Value::Bool(_) | Value::Int(_) | Value::Str(_) => None,
        Value::Symbol(symbol) => match symbol.shape() {
            Shape::Sequence | Shape::Condition => Some(symbol),
            Shape::NoOp | Shape::Plain => symbol.params().iter().find_map(|(_, v)| find_compound(v)),
        },
        Value::List(items) => items.iter().find_map(find_compound),
    }
}
