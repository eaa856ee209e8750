//! Writing table documents to an output directory.

use crate::convert::Converter;
use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::model::Table;
use crate::render::markdown;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const INDEX_FILE_NAME: &str = "00_index.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
}

impl Format {
    pub fn from_str(s: &str) -> Result<Self> {
        match s {
            "markdown" => Ok(Self::Markdown),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Renders every table into `dir`, one file each plus an index.
///
/// Failures while writing single files do not stop the run; they are kept
/// and exposed through [`Publisher::errors`].
pub struct Publisher<'a> {
    format: Format,
    converter: Converter,
    locale: Locale,
    verbose: Option<&'a mut dyn Write>,
    errors: Vec<Error>,
}

impl<'a> Publisher<'a> {
    pub fn new(format: Format, converter: Converter, locale: Locale) -> Self {
        Self {
            format,
            converter,
            locale,
            verbose: None,
            errors: Vec::new(),
        }
    }

    /// Report every created file as `Created: <path>` on `out`.
    pub fn verbose(mut self, out: &'a mut dyn Write) -> Self {
        self.verbose = Some(out);
        self
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// Replace `dir` with freshly rendered documents of `tables`.
    ///
    /// Returns `Err` only when the directory itself cannot be prepared.
    pub fn publish(&mut self, dir: &Path, tables: &[Table]) -> Result<()> {
        clean_dir(dir)?;

        for table in tables {
            let doc = match self.format {
                Format::Markdown => markdown::table_document(table, self.converter, self.locale),
            };
            self.write(dir.join(markdown::file_name(table)), &doc);
        }

        let index = match self.format {
            Format::Markdown => markdown::index_document(tables, self.locale),
        };
        self.write(dir.join(INDEX_FILE_NAME), &index);

        info!(
            dir = %dir.display(),
            tables = tables.len(),
            errors = self.errors.len(),
            "published"
        );
        Ok(())
    }

    fn write(&mut self, path: PathBuf, content: &str) {
        match fs::write(&path, content) {
            Ok(()) => {
                debug!(path = %path.display(), bytes = content.len(), "file written");
                if let Some(out) = self.verbose.as_mut() {
                    if let Err(e) = writeln!(out, "Created: {}", path.display()) {
                        warn!(error = %e, "cannot write verbose log");
                    }
                }
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "cannot write file");
                self.errors.push(Error::Write { path, source });
            }
        }
    }
}

/// Make `dir` an empty directory, removing whatever a previous run left.
pub fn clean_dir(dir: &Path) -> Result<()> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            debug!(dir = %dir.display(), "removing previous output");
            fs::remove_dir_all(dir)?;
        }
        Ok(_) => return Err(Error::OutputIsFile(dir.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
