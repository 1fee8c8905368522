//! Command-line interface for wasmfold
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::{parse_wasm_names, Args, WasmNames};
