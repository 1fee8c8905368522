//! # wasmfold - Main Entry Point
//!
//! Resolves the module registry, locates `wasm-objdump`, and runs one
//! translation of the given folded file.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wasmfold::cli::Args;
use wasmfold::objdump::WasmObjdump;
use wasmfold::{translate, ModuleRegistry, TranslateError};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if matches!(e.downcast_ref::<TranslateError>(), Some(TranslateError::NoArtifacts)) {
                eprintln!(
                    "\nUsage:\n  \
                     wasmfold --wabt-home <DIR> --wasm <FILE> [--wasm <FILE>...] <FOLDED>\n  \
                     wasmfold --wabt-home <DIR> --wasm-names <NAME=FILE,...> <FOLDED>\n\n\
                     Run 'wasmfold --help' for more options"
                );
            }
            EXIT_ERROR
        }
    });
}

fn run() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    let registry = ModuleRegistry::resolve(&args.wasm, args.wasm_names.as_ref())?;
    let objdump = WasmObjdump::from_wabt_home(&args.wabt_home)?;
    info!("using {}", objdump.bin().display());

    if !args.folded.is_file() {
        anyhow::bail!("Folded file not found: {}", args.folded.display());
    }

    let summary = translate(&objdump, &registry, &args.folded)
        .with_context(|| format!("Failed to translate {}", args.folded.display()))?;

    if !quiet {
        if summary.stack_check_mode {
            println!("stack check mode: aot_func#N is reported as <name>_precheck");
        }
        for output in &summary.outputs {
            println!("-> write into {} ({} lines)", output.path.display(), output.lines);
        }
    }

    Ok(())
}
