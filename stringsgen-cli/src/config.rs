//! Optional `stringsgen.toml` project configuration.
//!
//! ```toml
//! root-name = "L10n"
//! access = "internal"
//! package = true
//! table = "Localizable"
//! message = "Run `make strings` to regenerate."
//! duplicates = "reject"
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use stringsgen::{AccessLevel, DuplicatePolicy, EmitOptions, GenerateOptions};
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "stringsgen.toml";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub root_name: Option<String>,
    pub access: Option<AccessLevel>,
    pub package: Option<bool>,
    pub table: Option<String>,
    pub message: Option<String>,
    pub duplicates: Option<DuplicatePolicy>,
}

/// Generation settings given on the command line.
#[derive(Debug, Default, Clone)]
pub struct OptionOverrides {
    pub root_name: Option<String>,
    pub access: Option<AccessLevel>,
    /// Only ever turns package mode on; absent means "use the file value".
    pub package: bool,
    pub table: Option<String>,
    pub message: Option<String>,
    pub duplicates: Option<DuplicatePolicy>,
}

impl FileConfig {
    /// Loads `explicit` when given, otherwise `stringsgen.toml` in `dir` if it exists.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    pub fn load(explicit: Option<&str>, dir: &Path) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => PathBuf::from(path),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    return Ok(FileConfig::default());
                }
                candidate
            }
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Layers defaults, then this file, then `overrides`.
    pub fn into_options(self, overrides: OptionOverrides) -> GenerateOptions {
        let defaults = EmitOptions::default();
        let emit = EmitOptions {
            root_name: overrides
                .root_name
                .or(self.root_name)
                .unwrap_or(defaults.root_name),
            access: overrides.access.or(self.access).unwrap_or(defaults.access),
            package: overrides.package || self.package.unwrap_or(defaults.package),
            table: overrides.table.or(self.table).or(defaults.table),
        };

        GenerateOptions {
            emit,
            message: overrides.message.or(self.message),
            duplicates: overrides
                .duplicates
                .or(self.duplicates)
                .unwrap_or_default(),
        }
    }
}
