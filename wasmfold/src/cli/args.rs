//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wasmfold",
    about = "Translate jitted wasm function names in a folded flame-graph file",
    after_help = "\
EXAMPLES:
    wasmfold --wabt-home /opt/wabt --wasm app.wasm out.folded
    wasmfold --wabt-home /opt/wabt --wasm a.wasm --wasm b.wasm out.folded
    wasmfold --wabt-home /opt/wabt --wasm-names a=apple.wasm,b=banana.wasm out.folded"
)]
pub struct Args {
    /// WABT installation directory, like /opt/wabt-1.0.33 (must contain bin/wasm-objdump)
    #[arg(long, value_name = "DIR")]
    pub wabt_home: PathBuf,

    /// Wasm file that was profiled; the module name is its file stem (repeatable)
    #[arg(long, value_name = "FILE")]
    pub wasm: Vec<PathBuf>,

    /// Wasm files with explicit module names; takes precedence over --wasm
    #[arg(long, value_name = "NAME=FILE,...", value_parser = parse_wasm_names)]
    pub wasm_names: Option<WasmNames>,

    /// Folded stacks generated by stackcollapse-perf.pl
    #[arg(value_name = "FOLDED")]
    pub folded: PathBuf,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Ordered `name=path` pairs from `--wasm-names`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasmNames(pub Vec<(String, PathBuf)>);

/// Parse `a=apple.wasm,b=banana.wasm` into name/path pairs
///
/// # Errors
/// Returns a message for clap if a pair lacks `=` or has an empty path
pub fn parse_wasm_names(value: &str) -> Result<WasmNames, String> {
    let mut pairs = Vec::new();
    for pair in value.split(',') {
        let Some((name, path)) = pair.split_once('=') else {
            return Err(format!("expected NAME=FILE, got '{pair}'"));
        };
        if path.is_empty() {
            return Err(format!("missing wasm file for module '{name}'"));
        }
        pairs.push((name.to_string(), PathBuf::from(path)));
    }
    Ok(WasmNames(pairs))
}
