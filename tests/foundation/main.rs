//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Variant, Symbol, Value, Error, and staging.

mod errors;
mod staging;
mod symbols;
