//! Flattener handlers of the standard card grammar.
//!
//! `MAY` nodes get their own layout. The choice's subject is bound right
//! after the result marker, and the result lines follow that binding:
//!
//! ```text
//! (MAY, MAY{subject: CURR_INVESTIGATOR})
//! (MAY, CONDITION)
//!     <condition lines>
//! (MAY, RESULT)
//! (MAY, subject)
//!     (CURR_INVESTIGATOR, CURR_INVESTIGATOR)
//!     <result lines>          held, then spliced after the binding
//! (MAY, END)
//! ```
//!
//! Under [`ExpansionPolicy::Collapse`] the markers and the condition are
//! dropped; the binding and the result remain.

use minilex_foundation::{CONDITION, RESULT, Result, Symbol, Value};
use minilex_sequence::{Emitter, ExpansionPolicy, Flattener, FlattenerConfig, Marker, SymbolLine};

use crate::variants::{MAY, SUBJECT};

/// Returns the standard flattener configuration, still open for
/// registration.
#[must_use]
pub fn flattener_config() -> FlattenerConfig {
    Flattener::config().with_handler(MAY.tag(), flatten_may)
}

/// Returns the standard flattener.
#[must_use]
pub fn flattener() -> Flattener {
    flattener_config().finish()
}

fn flatten_may(emitter: &mut Emitter<'_>, node: &Symbol, indent: i32) -> Result<()> {
    let tag = node.tag();
    let mut head = node.clone();
    let condition = head.strip(CONDITION);
    let result = head.strip(RESULT);
    let subject = node.get(SUBJECT).cloned().unwrap_or(Value::Nil);
    emitter.emit_node(head, indent);

    let expand = emitter.policy() == ExpansionPolicy::Expand;
    if expand {
        emitter.emit_marker(tag, Marker::ConditionStart, indent);
        if let Some(condition) = &condition {
            emitter.flatten_value(condition, indent + 1)?;
        }
        emitter.emit_marker(tag, Marker::ResultStart, indent);
    }

    emitter.push(SymbolLine::param(tag, SUBJECT, subject.to_scalar(), indent));
    emitter.flatten_value(&subject, indent + 1)?;
    // Index into the current target, which is an enclosing held buffer when nested.
    let binding = emitter.len().saturating_sub(1);

    if expand {
        emitter.emit_marker(tag, Marker::SequenceEnd, indent);
    }

    emitter.hold();
    if let Some(result) = &result {
        emitter.flatten_value(result, indent + 1)?;
    }
    emitter.splice_after(binding);
    Ok(())
}
