//! Lexer rules of the standard card grammar.
//!
//! Rules are tried in the order below; clause rules come before the phrase
//! rules their captures are lexed with.
//!
//! | Variant              | Pattern                                       |
//! |----------------------|-----------------------------------------------|
//! | `NO_OP`              | `-`, `none`, `no effect`                      |
//! | `WHILE_RESOLVING`    | `while resolving <condition>, <result>`       |
//! | `MAY`                | `<subject> may [<condition> to] <result>`     |
//! | `GAIN`               | `gain <resource>` (subject is the investigator) |
//! | `GAIN`               | `<subject> gains <resource>`                  |
//! | `QUANTITY`           | `<num> <type>`                                |
//! | `SKILL`              | `willpower`, `intellect`, `combat`, `agility` |
//! | `CURR_INVESTIGATOR`  | `you`, `your investigator`                    |
//! | `SPELL_EFFECTS`      | `spell effects`                               |
//! | `TEXT`               | anything else                                 |

use minilex_foundation::{Result, Symbol};
use minilex_parser::{Capture, Lexer, LexerRules, Rule};
use regex::Captures;

use crate::variants::{
    CURR_INVESTIGATOR, GAIN, MAY, NO_OP, QUANTITY, SKILL, SPELL_EFFECTS, TEXT, WHILE_RESOLVING,
};

/// Returns the standard rule table, still open for registration.
///
/// # Errors
///
/// Returns an invalid-pattern error if a built-in pattern fails to compile.
pub fn lexer_rules() -> Result<LexerRules> {
    let mut rules = Lexer::rules();
    rules
        .register(Rule::terminal(&NO_OP, r"^(?:-|none|no effect)\.?$"))?
        .register(
            Rule::new(&WHILE_RESOLVING, r"^while resolving ([^,]+),\s*(.+?)\.?$").captures([1, 2]),
        )?
        .register(Rule::new(&MAY, r"^(.+?) may (?:(.+?) to )?(.+?)\.?$").captures([1, 2, 3]))?
        .register(Rule::new(&GAIN, r"^gains? (.+?)\.?$").custom(imperative_gain))?
        .register(
            Rule::new(&GAIN, r"^(.+?) gains? (.+?)\.?$")
                .exclude(r"\bmay\b")
                .captures([1, 2]),
        )?
        .register(Rule::new(&QUANTITY, r"^(\d+) (.+?)$").captures([1, 2]))?
        .register(
            Rule::new(&SKILL, r"^(willpower|intellect|combat|agility)$")
                .captures([Capture::Text(1)]),
        )?
        .register(Rule::terminal(&CURR_INVESTIGATOR, r"^(?:you|your investigator)$"))?
        .register(Rule::terminal(&SPELL_EFFECTS, r"^(?:a )?spell effects?$"))?;
    rules.register_default(&TEXT);
    Ok(rules)
}

/// Returns the standard lexer.
///
/// # Errors
///
/// See [`lexer_rules`].
pub fn lexer() -> Result<Lexer> {
    lexer_rules().map(LexerRules::finish)
}

// "gain 2 clues" has no subject; it is the resolving investigator.
fn imperative_gain(lexer: &Lexer, caps: &Captures<'_>, text: &str) -> Result<Option<Symbol>> {
    let subject = CURR_INVESTIGATOR.terminal(None)?;
    let resource = lexer.lex_value(caps.get(1).map(|m| m.as_str()))?;
    GAIN.construct(vec![subject.into(), resource], Some(text))
        .map(Some)
}
