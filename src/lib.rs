//! minilex - Rule-table lexer, tree builder, and flattener for card text
//!
//! This crate re-exports all layers of the minilex pipeline for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: minilex_runtime    - REPL, CLI, sequence archives
//! Layer 3: minilex_cards      - Standard card grammar (variants, rules, handlers)
//! Layer 2: minilex_sequence   - Flattener, symbol lines, cursor
//! Layer 1: minilex_parser     - Lexer and tree builder
//! Layer 0: minilex_foundation - Symbols, variants, errors, exports
//! ```

pub use minilex_cards as cards;
pub use minilex_foundation as foundation;
pub use minilex_parser as parser;
pub use minilex_runtime as runtime;
pub use minilex_sequence as sequence;
