//! Configuration module for the X++ compiler
//!
//! Compile-time limits live in [`constants`]; user preferences that may be
//! overridden through environment variables or a TOML file live in [`runtime`].

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::RuntimeConfig;
