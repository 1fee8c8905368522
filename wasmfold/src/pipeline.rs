//! One translation run: metadata collection, then a single pass over the input

use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{Result, TranslateError};
use crate::folded::{is_stack_check_mode, OutputStreams, OutputSummary, StackRewriter};
use crate::objdump::{collect_import_counts, collect_name_sections, SectionDumper};
use crate::registry::ModuleRegistry;

/// What a completed run wrote
#[derive(Debug, Clone)]
pub struct TranslationSummary {
    pub lines: usize,
    pub stack_check_mode: bool,
    /// Combined output first, then one entry per module
    pub outputs: Vec<OutputSummary>,
}

/// Translate `folded` into `<stem>.translated` and `<stem>.<module>.translated`
///
/// Nothing is written unless every line translates.
///
/// # Errors
/// Returns the first failure from metadata collection, reading, rewriting
/// (wrapped with its line number) or writing
pub fn translate<D: SectionDumper>(
    dumper: &D,
    registry: &ModuleRegistry,
    folded: &Path,
) -> Result<TranslationSummary> {
    let import_counts = collect_import_counts(dumper, registry)?;
    let name_sections = collect_name_sections(dumper, registry)?;
    let stack_check_mode = is_stack_check_mode(folded)?;
    if stack_check_mode {
        info!("stack check wrappers found, marking aot_func#N as {{name}}_precheck");
    }

    let rewriter = StackRewriter::new(registry, &import_counts, &name_sections, stack_check_mode);
    let mut streams = OutputStreams::create(folded, registry.names())?;

    let reader = BufReader::new(File::open(folded).map_err(TranslateError::io(folded))?);
    let mut lines = 0;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(TranslateError::io(folded))?;
        let rewritten = rewriter.rewrite_line(&line).map_err(|e| e.at_line(idx + 1, &line))?;
        streams.write_line(&rewritten.text, rewritten.module)?;
        lines += 1;
    }
    debug!("translated {lines} line(s) from {}", folded.display());

    let outputs = streams.commit()?;
    Ok(TranslationSummary { lines, stack_check_mode, outputs })
}
