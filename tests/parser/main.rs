//! Integration tests for Layer 1: Parser
//!
//! Tests for the rule-table lexer and the tree builder, over a small
//! grammar declared in `grammar.rs`.

mod grammar;
mod lexer;
mod properties;
mod tree;
