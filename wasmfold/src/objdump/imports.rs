//! Import section: how many function slots precede module-defined functions

use log::{debug, warn};
use std::collections::BTreeMap;

use super::runner::{Section, SectionDumper};
use crate::domain::{ModuleName, Result, TranslateError};
use crate::registry::ModuleRegistry;

/// Number of imported functions per module
pub type ImportCounts = BTreeMap<ModuleName, u32>;

/// Query every registered module's import section
///
/// A module whose query reports a diagnostic (wasm-objdump does this for an
/// absent section) counts as having no imports.
///
/// # Errors
/// Returns an error if the dumper fails or prints an unexpected import line
pub fn collect_import_counts<D: SectionDumper>(
    dumper: &D,
    registry: &ModuleRegistry,
) -> Result<ImportCounts> {
    let mut counts = ImportCounts::new();

    for (module, wasm) in registry.iter() {
        let output = dumper.dump(Section::Import, wasm)?;

        let count = if output.stderr.trim().is_empty() {
            count_function_imports(module, &output.stdout)?
        } else {
            warn!("No content in import section of '{module}': {}", output.stderr.trim());
            0
        };

        debug!("{count} imported function(s) in '{module}'");
        counts.insert(module.clone(), count);
    }

    Ok(counts)
}

/// Count function imports in `wasm-objdump -j Import -x` output
///
/// Lines look like ` - func[0] sig=1 <env.log> <- env.log`.
///
/// # Errors
/// Returns `ObjdumpParse` for a line mentioning ` func` that is not a
/// function import
pub fn count_function_imports(module: &ModuleName, stdout: &str) -> Result<u32> {
    let mut count = 0;

    for line in stdout.lines().map(str::trim) {
        if line.is_empty() || !line.contains(" func") {
            continue;
        }

        if !is_function_import(line) {
            return Err(TranslateError::ObjdumpParse {
                module: module.clone(),
                section: "import",
                line: line.to_string(),
            });
        }
        count += 1;
    }

    Ok(count)
}

/// `-` followed by at least one whitespace character and `func`
fn is_function_import(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('-') else {
        return false;
    };
    let trimmed = rest.trim_start();
    trimmed.len() < rest.len() && trimmed.starts_with("func")
}
