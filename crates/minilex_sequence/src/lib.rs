//! Flattening symbol trees into symbol sequences.
//!
//! This crate provides:
//! - [`Flattener`] - Linearization and structural extraction of a [`SymbolTree`]
//! - [`Emitter`] - Per-call line writer handed to custom handlers
//! - [`SymbolSequence`] - The flattened result
//! - [`Cursor`] - Executor-side reading with branch skipping
//!
//! # Architecture
//!
//! ```text
//! SymbolTree ──▶ Flattener ──┬─ linearize ──▶ LineSink (direct / holding) ──▶ check ──┐
//!                            └─ extract ────▶ post-order collect ─▶ filter ───────────┤
//!                                                                                      ▼
//!                                                                              SymbolSequence
//! ```
//!
//! [`SymbolTree`]: minilex_parser::SymbolTree

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod check;
pub mod cursor;
pub mod extract;
pub mod flatten;
pub mod line;
pub mod sequence;
pub mod sink;

use minilex_foundation::Staged;

pub use cursor::{Cursor, branch_end};
pub use flatten::{Emitter, ExpansionPolicy, Flattener, FlattenerConfig, Handler};
pub use line::{LineContent, Marker, SymbolLine};
pub use sequence::{Lines, SymbolSequence};
pub use sink::LineSink;

/// A flattener that accepts handlers until its first use.
pub type StagedFlattener = Staged<FlattenerConfig>;
