//! Integration tests for Layer 2: Sequence
//!
//! Tests for linearization, handlers, extraction, cursors, and the line
//! sink, over hand-built symbol trees.

mod extraction;
mod fixtures;
mod properties;
