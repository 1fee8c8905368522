//! Jitted symbol resolution and line rewriting
//!
//! Each jitted frame is resolved in three steps:
//!
//! 1. pick the module: the symbol's tag, or the sole registered module
//! 2. absolute index = local index + imported function count of that module
//! 3. look the absolute index up in the module's name section, falling back
//!    to `func[ABS]` so unnamed functions stay distinct
//!
//! With stack checks enabled, WAMR's original entry point `aot_func#N` is the
//! generated prologue check and `aot_func_internal#N` is the real body. The
//! body keeps the debug name; the check gets a `_precheck` suffix.

use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::line::FoldedLine;
use super::symbol::{JittedRef, Symbol, Variant, FRAME_SEPARATOR, INTERNAL_MARKER};
use crate::domain::{ModuleName, Result, TranslateError};
use crate::objdump::{ImportCounts, NameSections};
use crate::registry::ModuleRegistry;

/// Suffix marking the generated prologue-check function
pub const PRECHECK_SUFFIX: &str = "_precheck";

/// Prefix of every resolved jitted frame
pub const WASM_FRAME_PREFIX: &str = "[Wasm]";

/// A translated line and the module it is routed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenLine<'r> {
    pub text: String,
    /// Module of the innermost jitted frame, if the stack has one
    pub module: Option<&'r ModuleName>,
}

/// Rewrites folded lines using the metadata collected for one run
pub struct StackRewriter<'r> {
    registry: &'r ModuleRegistry,
    import_counts: &'r ImportCounts,
    name_sections: &'r NameSections,
    stack_check_mode: bool,
}

impl<'r> StackRewriter<'r> {
    pub fn new(
        registry: &'r ModuleRegistry,
        import_counts: &'r ImportCounts,
        name_sections: &'r NameSections,
        stack_check_mode: bool,
    ) -> Self {
        Self { registry, import_counts, name_sections, stack_check_mode }
    }

    pub fn stack_check_mode(&self) -> bool {
        self.stack_check_mode
    }

    /// Translate every jitted frame of one folded line
    ///
    /// # Errors
    /// Returns an error for a malformed line or symbol, or a symbol whose
    /// module cannot be determined
    pub fn rewrite_line(&self, line: &str) -> Result<RewrittenLine<'r>> {
        let folded = FoldedLine::parse(line)?;

        let mut frames = Vec::new();
        let mut leaf_module = None;

        for frame in folded.stack.split(FRAME_SEPARATOR) {
            match Symbol::parse(frame)? {
                Symbol::Passthrough(text) => frames.push(text.to_string()),
                Symbol::Jitted(jitted) => {
                    let (name, module) = self.resolve(frame, &jitted)?;
                    leaf_module = Some(module);
                    frames.push(name);
                }
            }
        }

        let mut text = frames.join(FRAME_SEPARATOR);
        text.push(' ');
        text.push_str(folded.samples);

        Ok(RewrittenLine { text, module: leaf_module })
    }

    /// Display name for one jitted frame, plus its owning module
    fn resolve(&self, symbol: &str, jitted: &JittedRef<'_>) -> Result<(String, &'r ModuleName)> {
        let module = match jitted.module {
            Some(tag) => self.registry.get(tag).map(|(name, _)| name).ok_or_else(|| {
                TranslateError::UnknownModule { module: tag.to_string(), symbol: symbol.to_string() }
            })?,
            None => self
                .registry
                .sole_module()
                .ok_or_else(|| TranslateError::AmbiguousModule { symbol: symbol.to_string() })?,
        };

        let imports = self.import_counts.get(module).copied().unwrap_or(0);
        let absolute = jitted.index.offset_by(imports).ok_or_else(|| {
            TranslateError::MalformedSymbol {
                symbol: symbol.to_string(),
                reason: format!("index {} plus {imports} imports overflows", jitted.index.0),
            }
        })?;

        let function = self
            .name_sections
            .get(module)
            .and_then(|names| names.get(&absolute))
            .cloned()
            .unwrap_or_else(|| absolute.to_string());

        let mut name = match jitted.module {
            Some(tag) => format!("{WASM_FRAME_PREFIX} [{tag}] {function}"),
            None => format!("{WASM_FRAME_PREFIX} {function}"),
        };

        if self.stack_check_mode && jitted.variant == Variant::Plain {
            name.push_str(PRECHECK_SUFFIX);
        }

        Ok((name, module))
    }
}

/// Scan a folded file for stack-check wrapper symbols
///
/// # Errors
/// Returns `Io` if the file cannot be read
pub fn is_stack_check_mode(folded: &Path) -> Result<bool> {
    let file = File::open(folded).map_err(TranslateError::io(folded))?;
    let found = detect_stack_check_mode(BufReader::new(file)).map_err(TranslateError::io(folded))?;
    debug!("stack check mode: {found}");
    Ok(found)
}

/// True iff any line mentions `aot_func_internal`
///
/// # Errors
/// Propagates read errors from `reader`
pub fn detect_stack_check_mode<R: BufRead>(reader: R) -> std::io::Result<bool> {
    for line in reader.lines() {
        if line?.contains(INTERNAL_MARKER) {
            return Ok(true);
        }
    }
    Ok(false)
}
