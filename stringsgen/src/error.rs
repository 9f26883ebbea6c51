//! All error types for the stringsgen crate.
//!
//! These are returned from every fallible operation (reading sources, merging,
//! building the namespace tree).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "string for \"{path}\" does not contain the correct number of arguments: expected {expected}, found {found}"
    )]
    ArgumentCountMismatch {
        path: String,
        expected: usize,
        found: usize,
    },

    #[error("duplicate key `{key}` in {origin}")]
    DuplicateKey { key: String, origin: String },

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid property list: {0}")]
    InvalidPlist(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a new argument-count mismatch error.
    pub fn argument_count_mismatch(path: impl Into<String>, expected: usize, found: usize) -> Self {
        Error::ArgumentCountMismatch {
            path: path.into(),
            expected,
            found,
        }
    }
}
