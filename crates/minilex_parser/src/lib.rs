//! Rule-table lexer and symbol tree builder for minilex.
//!
//! This crate turns card text into a [`SymbolTree`].
//!
//! # Architecture
//!
//! ```text
//! ["Gain 2 clues."], source "skill"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ TREE BUILDER    │  null check → source case → pattern case → default
//! └─────────────────┘
//!          │  logic(lexer, lines)
//!          ▼
//! ┌─────────────────┐
//! │ LEXER           │  ordered rules, exclusions, recursive captures
//! └─────────────────┘
//!          │
//!          ▼
//! SymbolTree { text, source, logic: GAIN { resource: QUANTITY { .. } } }
//! ```
//!
//! # Modules
//!
//! - [`lexer`] - Ordered regex rules producing symbols
//! - [`tree`] - Source/pattern/default dispatch producing symbol trees

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexer;
pub mod tree;

use minilex_foundation::Staged;

pub use lexer::{
    Capture, CustomConstructor, Lexer, LexerRules, Rule, TerminalRule, compile_pattern,
};
pub use tree::{CardText, LogicFn, PatternLogicFn, SymbolTree, TreeBuilder, TreeRules};

/// A lexer that accepts rules until its first use.
pub type StagedLexer = Staged<LexerRules>;

/// A tree builder that accepts cases until its first use.
pub type StagedTreeBuilder = Staged<TreeRules>;
