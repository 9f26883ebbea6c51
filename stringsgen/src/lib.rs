#![forbid(unsafe_code)]
//! Type-safe Swift accessors for Apple localization files.
//!
//! Reads `.strings` tables and `.stringsdict` plural dictionaries and renders
//! one nested Swift struct per key namespace, with a constant for every plain
//! string and a function for every string that takes format arguments.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsgen::{Catalog, DuplicatePolicy, GenerateOptions, generate};
//!
//! let mut catalog = Catalog::new(DuplicatePolicy::Overwrite);
//! catalog.read_file_by_extension("en.lproj/Localizable.strings")?;
//! catalog.read_file_by_extension("en.lproj/Localizable.stringsdict")?;
//!
//! let generated = generate(&catalog, &GenerateOptions::default())?;
//! generated.write_if_changed("Sources/App/LocalizedString.swift")?;
//! # Ok::<(), stringsgen::Error>(())
//! ```
//!
//! # Key conventions
//!
//! - `.` separates namespaces: `settings.title` becomes `LocalizedString.Settings.title`.
//! - `_` separates argument labels: `greeting_name` with value `"Hello %@"`
//!   becomes `greeting(name arg0: String) -> String`.
//! - A `:` or `*` label declares an unlabeled argument: `days_:` becomes
//!   `days(_ arg0: Int)`. Repeated or trailing `_` add no arguments.
//! - The number of labels must match the number of format specifiers in the
//!   value, otherwise generation fails with [`Error::ArgumentCountMismatch`].

pub mod catalog;
pub mod emit;
pub mod entry;
pub mod error;
pub mod escape;
pub mod formats;
pub mod generator;
pub mod specifier;
pub mod traits;
pub mod tree;

// Re-export most used types for easy consumption
pub use crate::{
    catalog::{Catalog, DuplicatePolicy},
    emit::{AccessLevel, EmitOptions},
    entry::{Binding, Entry},
    error::Error,
    formats::SourceFormat,
    generator::{GenerateOptions, Generated, generate},
    specifier::ArgumentType,
    tree::NamespaceTree,
};
