//! REPL, CLI, and sequence archives for minilex.
//!
//! This crate provides:
//! - [`Repl`] - Interactive loop that flattens card texts as they are typed
//! - [`Session`] - The grammar and history behind a run
//! - MessagePack archives of processed sequences ([`serialize`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::RuntimeConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, Reply};
pub use serialize::{Archive, ArchivedSequence};
pub use session::Session;
