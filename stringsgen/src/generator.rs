//! The generation pipeline: classify every value, build the namespace tree,
//! render it and prepend the file header.

use std::{fs, path::Path};

use indoc::indoc;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    catalog::{Catalog, DuplicatePolicy},
    emit::{EmitOptions, render},
    error::Error,
    specifier::{ArgumentType, classify},
    tree::NamespaceTree,
};

/// Everything that shapes one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerateOptions {
    #[serde(flatten)]
    pub emit: EmitOptions,
    /// Free text placed in the header comment of the generated file.
    pub message: Option<String>,
    pub duplicates: DuplicatePolicy,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_emit_options(mut self, emit: EmitOptions) -> Self {
        self.emit = emit;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The complete Swift source file.
    pub contents: String,
    /// The tree the file was rendered from, kept for debug output.
    pub tree: NamespaceTree,
}

impl Generated {
    /// Writes the file unless `path` already holds identical contents.
    ///
    /// Returns whether the file was written. Missing parent directories are created.
    pub fn write_if_changed<P: AsRef<Path>>(&self, path: P) -> Result<bool, Error> {
        let path = path.as_ref();
        if fs::read_to_string(path).is_ok_and(|existing| existing == self.contents) {
            debug!(path = %path.display(), "generated file is up to date");
            return Ok(false);
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &self.contents)?;
        Ok(true)
    }
}

/// Runs the whole pipeline over `catalog`.
///
/// Any malformed key aborts the run; nothing is produced in that case.
///
/// ```rust
/// use stringsgen::{catalog::Catalog, generator::{generate, GenerateOptions}};
/// let catalog: Catalog = [("greeting_name".to_string(), "Hello %@".to_string())]
///     .into_iter()
///     .collect();
/// let generated = generate(&catalog, &GenerateOptions::default())?;
/// assert!(generated.contents.contains("public static func greeting(name arg0: String) -> String {"));
/// # Ok::<(), stringsgen::Error>(())
/// ```
pub fn generate(catalog: &Catalog, options: &GenerateOptions) -> Result<Generated, Error> {
    let pairs = catalog.iter().collect::<Vec<_>>();
    let classified: Vec<(&str, Vec<ArgumentType>)> = pairs
        .par_iter()
        .map(|&(key, value)| (key, classify(value)))
        .collect();

    let mut tree = NamespaceTree::new();
    for (key, arguments) in classified {
        tree.insert(key, arguments)?;
    }
    for namespace in tree.struct_name_collisions() {
        warn!(namespace = %namespace, "namespace renders to the same struct name as a sibling");
    }

    let mut contents = file_header(options.message.as_deref());
    contents.push_str(&render(&tree, &options.emit));

    info!(
        keys = catalog.len(),
        entries = tree.entry_count(),
        namespaces = tree.node_count(),
        "generated accessors"
    );
    Ok(Generated { contents, tree })
}

fn file_header(message: Option<&str>) -> String {
    let mut header = indoc! {"
        // This file is automatically generated by stringsgen.
        // Do not edit it manually, as your changes will be overwritten.
    "}
    .to_string();

    if let Some(message) = message.filter(|m| !m.trim().is_empty()) {
        header.push_str("//\n");
        for line in message.lines() {
            if line.is_empty() {
                header.push_str("//\n");
            } else {
                header.push_str(&format!("// {}\n", line));
            }
        }
    }

    header.push_str("\nimport Foundation\n\n");
    header
}
