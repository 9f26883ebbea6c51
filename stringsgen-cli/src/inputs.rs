//! Input file discovery: positional arguments or Xcode run-script variables.

use std::path::{Path, PathBuf};

use stringsgen::SourceFormat;

pub const SCRIPT_INPUT_FILE_COUNT: &str = "SCRIPT_INPUT_FILE_COUNT";
pub const SCRIPT_INPUT_FILE_PREFIX: &str = "SCRIPT_INPUT_FILE_";

/// Input files grouped by format, each group in command-line order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputFiles {
    pub strings: Vec<PathBuf>,
    pub stringsdict: Vec<PathBuf>,
}

impl InputFiles {
    /// Sorts `paths` into formats by extension. Unknown extensions are an error.
    pub fn classify<I, S>(paths: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inputs = InputFiles::default();
        for path in paths {
            let path = Path::new(path.as_ref());
            match SourceFormat::from_path(path) {
                Some(SourceFormat::Strings) => inputs.strings.push(path.to_path_buf()),
                Some(SourceFormat::Stringsdict) => inputs.stringsdict.push(path.to_path_buf()),
                None => {
                    return Err(format!(
                        "Unsupported input file: {} (expected .strings or .stringsdict)",
                        path.display()
                    ));
                }
            }
        }
        Ok(inputs)
    }

    /// Merge order: every `.strings` file, then every `.stringsdict` file.
    pub fn ordered(&self) -> impl Iterator<Item = (&Path, SourceFormat)> {
        self.strings
            .iter()
            .map(|p| (p.as_path(), SourceFormat::Strings))
            .chain(
                self.stringsdict
                    .iter()
                    .map(|p| (p.as_path(), SourceFormat::Stringsdict)),
            )
    }

    pub fn len(&self) -> usize {
        self.strings.len() + self.stringsdict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads the input list Xcode exports to run-script build phases.
///
/// `lookup` resolves an environment variable; pass `|k| std::env::var(k).ok()`.
pub fn script_inputs<F>(lookup: F) -> Result<Vec<String>, String>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(count) = lookup(SCRIPT_INPUT_FILE_COUNT) else {
        return Ok(Vec::new());
    };
    let count: usize = count.trim().parse().map_err(|_| {
        format!(
            "Invalid {}: expected a number, got `{}`",
            SCRIPT_INPUT_FILE_COUNT, count
        )
    })?;

    (0..count)
        .map(|index| {
            let name = format!("{}{}", SCRIPT_INPUT_FILE_PREFIX, index);
            lookup(&name).ok_or_else(|| format!("Missing environment variable {}", name))
        })
        .collect()
}

/// Positional inputs when given, otherwise the Xcode script inputs.
pub fn resolve_inputs<F>(positional: &[String], lookup: F) -> Result<InputFiles, String>
where
    F: Fn(&str) -> Option<String>,
{
    if positional.is_empty() {
        InputFiles::classify(script_inputs(lookup)?)
    } else {
        InputFiles::classify(positional)
    }
}
