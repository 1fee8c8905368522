//! # Wasm Metadata via `wasm-objdump`
//!
//! The profiled runtime numbers jitted functions from zero over the
//! module-defined functions only, while a wasm binary's name section indexes
//! the whole function index space, imports first:
//!
//! ```text
//! function index space:   [ import 0 | import 1 | defined 0 | defined 1 | ... ]
//! absolute index:               0          1          2           3
//! jitted symbol:                                 aot_func#0  aot_func#1
//! ```
//!
//! So resolving `aot_func#N` takes two facts per module, both read from
//! `wasm-objdump` output rather than by parsing the binary here:
//!
//! - **`imports`**: count of function imports (`-j Import -x`), the offset
//!   added to every jitted index
//! - **`names`**: the name section (`-j name -x`), absolute index → name
//!
//! Both parsers are strict: a line that mentions a function but does not fit
//! the expected shape fails the run instead of being skipped.

pub mod imports;
pub mod names;
pub mod runner;

pub use imports::{collect_import_counts, count_function_imports, ImportCounts};
pub use names::{collect_name_sections, parse_name_section, NameSection, NameSections};
pub use runner::{DumpOutput, Section, SectionDumper, WasmObjdump};
