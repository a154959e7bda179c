//! Cross-layer integration tests for minilex
//!
//! Tests that run card text through the standard grammar and the runtime.

mod cards;
mod runtime;
