//! # wasmfold - Wasm Names for Folded Flame-Graph Stacks
//!
//! WAMR's AOT/JIT code shows up in `perf` samples as opaque symbols such as
//! `aot_func#12` or, with several modules loaded, `[apple]#aot_func#12`.
//! wasmfold rewrites those frames in a `stackcollapse-perf.pl` folded file
//! using the debug names recorded in each module's wasm name section, and
//! splits the result into one file per module.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────────────┐
//! │   Registry   │────▶│  wasm-objdump -j Import  │──┐ import counts
//! │ name → .wasm │     └──────────────────────────┘  │
//! │              │     ┌──────────────────────────┐  │
//! │              │────▶│  wasm-objdump -j name    │──┤ index → name
//! └──────────────┘     └──────────────────────────┘  │
//!                                                    ▼
//!   out.folded ───────────────────────────▶ ┌──────────────┐
//!                                           │   Rewriter   │
//!                                           └──────┬───────┘
//!                       ┌──────────────────────────┼──────────────────────┐
//!                       ▼                          ▼                      ▼
//!               out.translated         out.apple.translated    out.banana.translated
//! ```
//!
//! ## Module Structure
//!
//! - [`cli`]: command-line arguments
//! - [`domain`]: newtypes and the error enum
//! - [`registry`]: module name → wasm file
//! - [`objdump`]: `wasm-objdump` invocation and output parsing
//! - [`folded`]: folded line grammar, symbol resolution, output streams
//! - [`pipeline`]: one complete run
//!
//! ## Typical Usage
//!
//! ```bash
//! perf script -i perf.data > out.perf
//! ./FlameGraph/stackcollapse-perf.pl out.perf > out.folded
//! wasmfold --wabt-home /opt/wabt-1.0.33 --wasm app.wasm out.folded
//! ./FlameGraph/flamegraph.pl out.translated > app.svg
//! ```

pub mod cli;
pub mod domain;
pub mod folded;
pub mod objdump;
pub mod pipeline;
pub mod registry;

pub use domain::{Result, TranslateError};
pub use pipeline::{translate, TranslationSummary};
pub use registry::ModuleRegistry;
