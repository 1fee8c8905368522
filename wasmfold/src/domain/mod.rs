//! Domain model for wasmfold
//!
//! Core types shared by every stage:
//! - `ModuleName` / `FuncIndex` newtypes so names and indices don't get mixed
//!   up with the raw strings and integers they are parsed from
//! - `TranslateError`, the single error enum of the library

pub mod errors;
pub mod types;

// Re-export common types for convenience
pub use types::{FuncIndex, ModuleName};

pub use errors::{Result, TranslateError};
