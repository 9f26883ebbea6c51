//! The `generate` and `check` commands.

use std::path::Path;

use stringsgen::{Catalog, DuplicatePolicy, Error, GenerateOptions, Generated, generate};
use tracing::{info, warn};

use crate::{
    inputs::InputFiles,
    validation::{validate_file_path, validate_output_path, validate_root_name},
};

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// There were no inputs; nothing was generated.
    NoInputs,
    /// The file was generated; `written` is false when it was already up to date.
    Generated { written: bool, entries: usize },
    /// `check` ran the whole pipeline without writing.
    Checked { keys: usize, entries: usize },
}

/// Reads every input in merge order into one catalog.
///
/// In lenient mode an unreadable or malformed file is logged and contributes
/// no keys. In strict mode it fails the run. A rejected duplicate key always
/// fails the run.
pub fn build_catalog(
    inputs: &InputFiles,
    policy: DuplicatePolicy,
    strict: bool,
) -> Result<Catalog, String> {
    let mut catalog = Catalog::new(policy);

    for (path, format) in inputs.ordered() {
        if let Err(e) = validate_file_path(path) {
            if strict {
                return Err(e);
            }
            warn!(path = %path.display(), "{}, treating it as empty", e);
            continue;
        }

        match catalog.read_file(path, format) {
            Ok(()) => {}
            Err(e @ Error::DuplicateKey { .. }) => return Err(e.to_string()),
            Err(e) if strict => {
                return Err(format!("Failed to read {}: {}", path.display(), e));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read input, treating it as empty");
            }
        }
    }

    Ok(catalog)
}

fn run_pipeline(
    inputs: &InputFiles,
    options: &GenerateOptions,
    strict: bool,
) -> Result<(Catalog, Generated), String> {
    validate_root_name(&options.emit.root_name)?;
    let catalog = build_catalog(inputs, options.duplicates, strict)?;
    let generated = generate(&catalog, options).map_err(|e| e.to_string())?;
    Ok((catalog, generated))
}

/// Generates the Swift file at `output`.
///
/// When `debug` is set the namespace tree is printed to stdout afterwards.
pub fn run_generate_command(
    inputs: &InputFiles,
    output: Option<&str>,
    options: &GenerateOptions,
    strict: bool,
    debug: bool,
) -> Result<Outcome, String> {
    let Some(output) = output else {
        return Err("No output file declared".to_string());
    };
    validate_output_path(output)?;

    if inputs.is_empty() {
        info!("no input files, nothing to generate");
        return Ok(Outcome::NoInputs);
    }

    let (_, generated) = run_pipeline(inputs, options, strict)?;
    let written = generated
        .write_if_changed(Path::new(output))
        .map_err(|e| format!("Failed to write {}: {}", output, e))?;

    if written {
        info!(path = output, "wrote generated accessors");
    } else {
        info!(path = output, "generated accessors are up to date");
    }

    if debug {
        print!("{}", generated.tree);
    }

    Ok(Outcome::Generated {
        written,
        entries: generated.tree.entry_count(),
    })
}

/// Runs the pipeline without writing and prints a one-line summary.
pub fn run_check_command(
    inputs: &InputFiles,
    options: &GenerateOptions,
    strict: bool,
) -> Result<Outcome, String> {
    if inputs.is_empty() {
        println!("No input files to check");
        return Ok(Outcome::NoInputs);
    }

    let (catalog, generated) = run_pipeline(inputs, options, strict)?;
    println!(
        "✅ {} keys in {} files: {} accessors in {} namespaces",
        catalog.len(),
        inputs.len(),
        generated.tree.entry_count(),
        generated.tree.node_count()
    );

    Ok(Outcome::Checked {
        keys: catalog.len(),
        entries: generated.tree.entry_count(),
    })
}
