//! Name section: function index → debug name

use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};

use super::runner::{Section, SectionDumper};
use crate::domain::{FuncIndex, ModuleName, Result, TranslateError};
use crate::registry::ModuleRegistry;

/// Debug names of one module, keyed by absolute function index
pub type NameSection = HashMap<FuncIndex, String>;

/// Debug names of every registered module
pub type NameSections = BTreeMap<ModuleName, NameSection>;

/// Query every registered module's name section
///
/// A module without a name section yields an empty mapping.
///
/// # Errors
/// Returns an error if the dumper fails or prints an unexpected function line
pub fn collect_name_sections<D: SectionDumper>(
    dumper: &D,
    registry: &ModuleRegistry,
) -> Result<NameSections> {
    let mut sections = NameSections::new();

    for (module, wasm) in registry.iter() {
        let output = dumper.dump(Section::Name, wasm)?;

        let names = if output.stderr.trim().is_empty() {
            parse_name_section(module, &output.stdout)?
        } else {
            warn!("No content in name section of '{module}': {}", output.stderr.trim());
            NameSection::new()
        };

        debug!("{} function name(s) in '{module}'", names.len());
        sections.insert(module.clone(), names);
    }

    Ok(sections)
}

/// Parse `wasm-objdump -j name -x` output
///
/// Function names look like ` - func[12] <main>`; local names
/// (` - func[12] local[0] <argc>`) are skipped.
///
/// # Errors
/// Returns `ObjdumpParse` for any other line mentioning ` func`
pub fn parse_name_section(module: &ModuleName, stdout: &str) -> Result<NameSection> {
    let mut names = NameSection::new();

    for line in stdout.lines().map(str::trim) {
        if line.is_empty() || !line.contains(" func") {
            continue;
        }

        match parse_name_line(line) {
            Some(NameLine::Function(index, name)) => {
                names.insert(index, name.to_string());
            }
            Some(NameLine::Local) => {}
            None => {
                return Err(TranslateError::ObjdumpParse {
                    module: module.clone(),
                    section: "name",
                    line: line.to_string(),
                });
            }
        }
    }

    Ok(names)
}

enum NameLine<'a> {
    Function(FuncIndex, &'a str),
    Local,
}

fn parse_name_line(line: &str) -> Option<NameLine<'_>> {
    let rest = line.strip_prefix("- func[")?;
    let (digits, rest) = rest.split_once(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = FuncIndex(digits.parse().ok()?);

    let rest = rest.strip_prefix(' ')?;
    if rest.starts_with("local[") {
        return Some(NameLine::Local);
    }

    let name = rest.strip_prefix('<')?.strip_suffix('>')?;
    if name.is_empty() {
        return None;
    }
    Some(NameLine::Function(index, name))
}
