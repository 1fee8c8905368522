//! Invocation of WABT's `wasm-objdump`

use log::info;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::{Result, TranslateError};

/// Section queried with `wasm-objdump -j <section> -x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Import,
    Name,
}

impl Section {
    /// Section name as `wasm-objdump -j` expects it
    #[must_use]
    pub fn objdump_name(self) -> &'static str {
        match self {
            Section::Import => "Import",
            Section::Name => "name",
        }
    }
}

/// Captured text output of one section query
#[derive(Debug, Clone, Default)]
pub struct DumpOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Something that can print the details of one section of a wasm file
///
/// Implemented by [`WasmObjdump`]; tests substitute canned output.
pub trait SectionDumper {
    /// Dump `section` of the wasm file at `wasm`
    ///
    /// # Errors
    /// Returns `ExternalToolFailure` if the dump could not be produced
    fn dump(&self, section: Section, wasm: &Path) -> Result<DumpOutput>;
}

/// `wasm-objdump` from a WABT installation
#[derive(Debug, Clone)]
pub struct WasmObjdump {
    bin: PathBuf,
}

impl WasmObjdump {
    /// Locate `bin/wasm-objdump` under a WABT installation directory
    ///
    /// # Errors
    /// Returns `ExternalToolFailure` if the binary does not exist
    pub fn from_wabt_home(wabt_home: &Path) -> Result<Self> {
        let bin = wabt_home.join("bin").join("wasm-objdump");
        if !bin.is_file() {
            return Err(TranslateError::ExternalToolFailure {
                tool: bin.display().to_string(),
                reason: format!("not found under {}", wabt_home.display()),
            });
        }
        Ok(Self { bin })
    }

    #[must_use]
    pub fn bin(&self) -> &Path {
        &self.bin
    }
}

impl SectionDumper for WasmObjdump {
    fn dump(&self, section: Section, wasm: &Path) -> Result<DumpOutput> {
        info!("{} -j {} -x {}", self.bin.display(), section.objdump_name(), wasm.display());

        let output = Command::new(&self.bin)
            .arg("-j")
            .arg(section.objdump_name())
            .arg("-x")
            .arg(wasm)
            .output()
            .map_err(|e| TranslateError::ExternalToolFailure {
                tool: self.bin.display().to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        // wasm-objdump exits non-zero with a diagnostic when the section is
        // absent; only a silent failure is an error.
        if !output.status.success() && stderr.trim().is_empty() {
            return Err(TranslateError::ExternalToolFailure {
                tool: self.bin.display().to_string(),
                reason: format!("exited with {} on {}", output.status, wasm.display()),
            });
        }

        Ok(DumpOutput { stdout, stderr })
    }
}
