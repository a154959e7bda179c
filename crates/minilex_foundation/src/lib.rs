//! Symbol model, values, export, and error types for minilex.
//!
//! This crate provides:
//! - [`Variant`] - Declared symbol families (tag, shape, ordered fields)
//! - [`Symbol`] - Tagged AST nodes built from a variant
//! - [`Value`] - The closed set of payload field values
//! - [`Export`] - Plain nested export for diagnostics and persistence
//! - [`Staged`] - Registration-then-freeze lifecycle shared by all components
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod export;
pub mod stage;
pub mod symbol;
pub mod value;
pub mod variant;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use export::{Export, Exported};
pub use stage::{Freeze, Staged};
pub use symbol::{Params, Symbol};
pub use value::{Scalar, Value, parse_numeric};
pub use variant::{CONDITION, RESULT, SYMBOLS, Shape, Variant};
