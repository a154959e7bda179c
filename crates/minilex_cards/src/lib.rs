//! Standard card grammar for minilex.
//!
//! This crate provides:
//! - [`variants`] - The symbol variants cards are lexed into
//! - [`lexicon`] - The ordered lexer rules
//! - [`cases`] - Source, pattern, and default tree cases
//! - [`layout`] - Flattener handlers, including the `MAY` layout
//! - [`Grammar`] - All of the above, frozen and ready to use
//!
//! # Example
//!
//! ```
//! use minilex_cards::Grammar;
//! use minilex_sequence::ExpansionPolicy;
//!
//! let grammar = Grammar::standard().unwrap();
//! let (_, sequence) = grammar
//!     .process("You may gain 2 clues.", "skill", ExpansionPolicy::Expand)
//!     .unwrap();
//! assert_eq!(sequence.linear().unwrap()[0].tag(), "MAY");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cases;
pub mod grammar;
pub mod layout;
pub mod lexicon;
pub mod variants;

pub use cases::{ABILITY, tree_builder, tree_rules};
pub use grammar::Grammar;
pub use layout::{flattener, flattener_config};
pub use lexicon::{lexer, lexer_rules};
