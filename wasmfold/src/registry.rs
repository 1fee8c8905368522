//! Module registry: logical module name → compiled wasm file
//!
//! Built once from the command line and shared read-only by the extractors and
//! the rewriter.

use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::WasmNames;
use crate::domain::{ModuleName, Result, TranslateError};

/// Registered wasm modules, keyed by module name
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: BTreeMap<ModuleName, PathBuf>,
}

impl ModuleRegistry {
    /// Build the registry from the two ways of declaring wasm files
    ///
    /// When explicit names are given the bare path list is ignored.
    ///
    /// # Errors
    /// - `NoArtifacts` if neither form declares a module
    /// - `DuplicateModule` / `EmptyModuleName` / `InvalidModuleName` for invalid names
    /// - `MissingArtifact` if a declared file does not exist
    pub fn resolve(wasm: &[PathBuf], wasm_names: Option<&WasmNames>) -> Result<Self> {
        let entries: Vec<(ModuleName, PathBuf)> = match wasm_names {
            Some(names) if !names.0.is_empty() => {
                if !wasm.is_empty() {
                    warn!("--wasm-names given, ignoring {} --wasm file(s)", wasm.len());
                }
                names
                    .0
                    .iter()
                    .map(|(name, path)| (ModuleName::new(name.as_str()), path.clone()))
                    .collect()
            }
            _ => wasm.iter().map(|path| (module_name_from_path(path), path.clone())).collect(),
        };

        Self::from_entries(entries)
    }

    /// Build the registry from explicit name/path pairs
    ///
    /// # Errors
    /// Same as [`ModuleRegistry::resolve`]
    pub fn from_entries(entries: Vec<(ModuleName, PathBuf)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(TranslateError::NoArtifacts);
        }

        let single = entries.len() == 1;
        let mut modules = BTreeMap::new();
        for (name, path) in entries {
            if name.is_empty() && !single {
                return Err(TranslateError::EmptyModuleName);
            }
            // Names become part of output file extensions
            if name.as_str().chars().any(std::path::is_separator) {
                return Err(TranslateError::InvalidModuleName(name));
            }
            if !path.exists() {
                return Err(TranslateError::MissingArtifact { module: name, path });
            }
            if modules.contains_key(&name) {
                return Err(TranslateError::DuplicateModule(name));
            }
            debug!("module '{name}' -> {}", path.display());
            modules.insert(name, path);
        }

        Ok(Self { modules })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The sole module, when exactly one is registered
    pub fn sole_module(&self) -> Option<&ModuleName> {
        if self.modules.len() == 1 {
            self.modules.keys().next()
        } else {
            None
        }
    }

    /// Look up a module by the name used in a symbol tag
    pub fn get(&self, name: &str) -> Option<(&ModuleName, &Path)> {
        self.modules.get_key_value(name).map(|(k, v)| (k, v.as_path()))
    }

    pub fn names(&self) -> impl Iterator<Item = &ModuleName> {
        self.modules.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleName, &Path)> {
        self.modules.iter().map(|(k, v)| (k, v.as_path()))
    }
}

/// Module name for a bare `--wasm` path: the file name without its extension
fn module_name_from_path(path: &Path) -> ModuleName {
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    ModuleName::new(stem)
}
