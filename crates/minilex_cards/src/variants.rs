//! Symbol variants of the standard card grammar.

use minilex_foundation::{CONDITION, RESULT, Variant};

/// Field naming who a clause applies to.
pub const SUBJECT: &str = "subject";

/// Does nothing.
pub static NO_OP: Variant = Variant::no_op("NO_OP");

/// Ordered clauses of a multi-line text.
pub static SEQ: Variant = Variant::sequence("SEQ");

/// A subject gains a resource.
pub static GAIN: Variant = Variant::plain("GAIN", &[SUBJECT, "resource"]);

/// A number of some resource type.
pub static QUANTITY: Variant = Variant::plain("QUANTITY", &["num", "type"]);

/// One of the four investigator skills.
pub static SKILL: Variant = Variant::plain("SKILL", &["skill"]);

/// The investigator resolving the card.
pub static CURR_INVESTIGATOR: Variant = Variant::plain("CURR_INVESTIGATOR", &[]);

/// Spell effects, as a resolving context.
pub static SPELL_EFFECTS: Variant = Variant::plain("SPELL_EFFECTS", &[]);

/// An optional choice: the subject may pay the condition to get the result.
pub static MAY: Variant = Variant::condition("MAY", &[SUBJECT, CONDITION, RESULT]);

/// A clause that only applies while something is resolving.
pub static WHILE_RESOLVING: Variant = Variant::condition("WHILE_RESOLVING", &[CONDITION, RESULT]);

/// Text no rule recognized.
pub static TEXT: Variant = Variant::plain("TEXT", &[]);

/// Every variant of the grammar, in declaration order.
pub static VARIANTS: [&Variant; 10] = [
    &NO_OP,
    &SEQ,
    &GAIN,
    &QUANTITY,
    &SKILL,
    &CURR_INVESTIGATOR,
    &SPELL_EFFECTS,
    &MAY,
    &WHILE_RESOLVING,
    &TEXT,
];

/// Looks up a variant by tag.
#[must_use]
pub fn by_tag(tag: &str) -> Option<&'static Variant> {
    VARIANTS.iter().copied().find(|v| v.tag() == tag)
}
