//! Structured error types for wasmfold
//!
//! Using thiserror for automatic Display implementation and error chaining.
//! Every variant is fatal for the run; the only recovered condition (an empty
//! section reported on the utility's error channel) never becomes an error.

use std::path::PathBuf;
use thiserror::Error;

use super::types::ModuleName;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("No wasm files given: use --wasm <FILE> or --wasm-names <NAME=FILE,...>")]
    NoArtifacts,

    #[error("Wasm file for module '{module}' not found: {}", path.display())]
    MissingArtifact { module: ModuleName, path: PathBuf },

    #[error("Module name '{0}' is declared more than once")]
    DuplicateModule(ModuleName),

    #[error("An empty module name is only allowed when a single wasm file is given")]
    EmptyModuleName,

    #[error("Module name '{0}' contains a path separator")]
    InvalidModuleName(ModuleName),

    #[error("{tool} failed: {reason}")]
    ExternalToolFailure { tool: String, reason: String },

    #[error("Unexpected line in {section} section of module '{module}': {line:?}")]
    ObjdumpParse { module: ModuleName, section: &'static str, line: String },

    #[error("{symbol} doesn't have a module name, but there are multiple wasm files")]
    AmbiguousModule { symbol: String },

    #[error("Can't find a wasm file for module '{module}' (symbol {symbol})")]
    UnknownModule { module: String, symbol: String },

    #[error("Malformed folded line: {reason}")]
    MalformedLine { reason: String },

    #[error("Malformed jitted symbol {symbol:?}: {reason}")]
    MalformedSymbol { symbol: String, reason: String },

    #[error("line {line_no} ({line:?}): {source}")]
    AtLine {
        line_no: usize,
        line: String,
        #[source]
        source: Box<TranslateError>,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranslateError {
    /// Attach the input position to a per-line failure
    #[must_use]
    pub fn at_line(self, line_no: usize, line: &str) -> Self {
        TranslateError::AtLine { line_no, line: line.to_string(), source: Box::new(self) }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| TranslateError::Io { path, source }
    }
}

/// A [`std::result::Result`] alias where the `Err` case is [`TranslateError`].
pub type Result<T> = std::result::Result<T, TranslateError>;
