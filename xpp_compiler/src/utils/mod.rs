//! Shared primitive types used by the scanner, parser and diagnostics.

pub mod span;

pub use span::{Position, Span};
