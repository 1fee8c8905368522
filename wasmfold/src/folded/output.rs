//! Translated output files
//!
//! One combined file plus one file per module. Every stream is staged in a
//! temporary file next to its destination and only persisted by
//! [`OutputStreams::commit`]; dropping the streams on an error path removes
//! the temporary files, so a failed run leaves no partial output behind.

use log::info;
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::domain::{ModuleName, Result, TranslateError};

const TRANSLATED_EXTENSION: &str = "translated";

/// `out.folded` → `out.translated`
#[must_use]
pub fn combined_output_path(folded: &Path) -> PathBuf {
    folded.with_extension(TRANSLATED_EXTENSION)
}

/// `out.folded` → `out.<module>.translated`
#[must_use]
pub fn module_output_path(folded: &Path, module: &ModuleName) -> PathBuf {
    folded.with_extension(format!("{module}.{TRANSLATED_EXTENSION}"))
}

/// Final location and line count of one persisted output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    /// `None` for the combined file
    pub module: Option<ModuleName>,
    pub path: PathBuf,
    pub lines: usize,
}

struct Stream {
    path: PathBuf,
    writer: BufWriter<NamedTempFile>,
    lines: usize,
}

impl Stream {
    fn create(path: PathBuf) -> Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = NamedTempFile::new_in(&dir).map_err(TranslateError::io(&path))?;
        info!("-> write into {}", path.display());
        Ok(Self { path, writer: BufWriter::new(file), lines: 0 })
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}").map_err(TranslateError::io(&self.path))?;
        self.lines += 1;
        Ok(())
    }

    fn persist(self) -> Result<(PathBuf, usize)> {
        let Stream { path, writer, lines } = self;
        let file = writer.into_inner().map_err(|e| TranslateError::Io {
            path: path.clone(),
            source: e.into_error(),
        })?;
        file.persist(&path)
            .map_err(|e| TranslateError::Io { path: path.clone(), source: e.error })?;
        Ok((path, lines))
    }
}

/// The combined stream and the per-module streams of one run
pub struct OutputStreams {
    combined: Stream,
    modules: BTreeMap<ModuleName, Stream>,
}

impl OutputStreams {
    /// Open staging files for `folded`'s outputs
    ///
    /// A module with an empty name (only possible when it is the single
    /// module) gets no file of its own; the combined file covers it.
    ///
    /// # Errors
    /// Returns `Io` if a staging file cannot be created
    pub fn create<'a>(
        folded: &Path,
        modules: impl IntoIterator<Item = &'a ModuleName>,
    ) -> Result<Self> {
        let mut streams = BTreeMap::new();
        for module in modules {
            if module.is_empty() {
                continue;
            }
            streams.insert(module.clone(), Stream::create(module_output_path(folded, module))?);
        }
        let combined = Stream::create(combined_output_path(folded))?;

        Ok(Self { combined, modules: streams })
    }

    /// Append a line to the combined stream and to `module`'s stream
    ///
    /// # Errors
    /// Returns `Io` if a write fails
    pub fn write_line(&mut self, line: &str, module: Option<&ModuleName>) -> Result<()> {
        self.combined.write_line(line)?;
        if let Some(stream) = module.and_then(|m| self.modules.get_mut(m)) {
            stream.write_line(line)?;
        }
        Ok(())
    }

    /// Flush every stream and move it to its final path
    ///
    /// Module files are persisted before the combined file, so a failure
    /// part way through never replaces the combined output. Summaries list
    /// the combined file first.
    ///
    /// # Errors
    /// Returns `Io` if flushing or renaming fails
    pub fn commit(self) -> Result<Vec<OutputSummary>> {
        let mut per_module = Vec::with_capacity(self.modules.len());
        for (module, stream) in self.modules {
            let (path, lines) = stream.persist()?;
            per_module.push(OutputSummary { module: Some(module), path, lines });
        }

        let (path, lines) = self.combined.persist()?;
        let mut summaries = vec![OutputSummary { module: None, path, lines }];
        summaries.extend(per_module);

        Ok(summaries)
    }
}
