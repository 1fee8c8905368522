//! Folded stack translation
//!
//! - **`line`**: splits `stack samples` records
//! - **`symbol`**: classifies frames and parses jitted references
//! - **`rewriter`**: resolves jitted frames to debug names
//! - **`output`**: combined and per-module output files

pub mod line;
pub mod output;
pub mod rewriter;
pub mod symbol;

pub use line::FoldedLine;
pub use output::{combined_output_path, module_output_path, OutputStreams, OutputSummary};
pub use rewriter::{
    detect_stack_check_mode, is_stack_check_mode, RewrittenLine, StackRewriter, PRECHECK_SUFFIX,
};
pub use symbol::{JittedRef, Symbol, Variant};
