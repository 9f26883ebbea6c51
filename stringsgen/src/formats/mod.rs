//! Supported localization source formats.
//!
//! This module re-exports the readers for each format and provides the
//! [`SourceFormat`] enum for picking a reader from a file name.

pub mod strings;
pub mod stringsdict;

use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};

pub use strings::Format as StringsFormat;
pub use stringsdict::Format as StringsdictFormat;

use crate::{Error, traits::Parser};

/// Every source format the generator can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Apple `.strings` key/value table.
    Strings,
    /// Apple `.stringsdict` plural dictionary.
    Stringsdict,
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Strings => write!(f, "strings"),
            SourceFormat::Stringsdict => write!(f, "stringsdict"),
        }
    }
}

/// Accepts `strings` and `stringsdict`, case-insensitively.
///
/// # Example
/// ```rust
/// use stringsgen::formats::SourceFormat;
/// use std::str::FromStr;
/// assert_eq!(SourceFormat::from_str("Strings").unwrap(), SourceFormat::Strings);
/// assert!(SourceFormat::from_str("xcstrings").is_err());
/// ```
impl FromStr for SourceFormat {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "strings" => Ok(SourceFormat::Strings),
            "stringsdict" => Ok(SourceFormat::Stringsdict),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl SourceFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Strings => "strings",
            SourceFormat::Stringsdict => "stringsdict",
        }
    }

    /// Infers the format from a file extension.
    ///
    /// ```rust
    /// use stringsgen::formats::SourceFormat;
    /// assert_eq!(SourceFormat::from_path("en.lproj/Localizable.stringsdict"), Some(SourceFormat::Stringsdict));
    /// assert_eq!(SourceFormat::from_path("Localizable.swift"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Reads `path` in this format and returns its flattened pairs.
    pub fn read_pairs<P: AsRef<Path>>(&self, path: P) -> Result<Vec<(String, String)>, Error> {
        match self {
            SourceFormat::Strings => StringsFormat::read_from(path).map(Parser::into_pairs),
            SourceFormat::Stringsdict => StringsdictFormat::read_from(path).map(Parser::into_pairs),
        }
    }
}
