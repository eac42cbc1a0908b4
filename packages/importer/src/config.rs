//! Configuration constants, settings and input validation for the importer.

use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};

/// Extension of exchange format documents.
pub const XML_EXTENSION: &str = "xml";

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Import settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub database_url: String,
}

impl ImportConfig {
    /// Load settings from the environment.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var(DATABASE_URL_VAR)
            .map_err(|_| ImportError::Config(format!("{DATABASE_URL_VAR} not set")))?;

        Ok(Self::new(database_url))
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}

/// Validate that `path` is an existing `.xml` file.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use ruian_import::config::validate_input_file;
///
/// assert!(validate_input_file(Path::new("missing.xml")).is_err());
/// ```
pub fn validate_input_file(path: &Path) -> Result<()> {
    if path.is_file() && has_xml_extension(path) {
        Ok(())
    } else {
        Err(ImportError::InvalidInput(path.display().to_string()))
    }
}

/// Expand input paths into the list of documents to import.
///
/// Files are kept in the given order. A directory contributes its `.xml`
/// files (not recursively), sorted by name so that daily change files are
/// applied in sequence.
pub fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && has_xml_extension(&path) {
                    entries.push(path);
                }
            }
            entries.sort();
            files.extend(entries);
        } else {
            validate_input_file(input)?;
            files.push(input.clone());
        }
    }

    Ok(files)
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(XML_EXTENSION))
}
