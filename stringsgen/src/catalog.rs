//! The merged set of localization keys fed to the generator.
//!
//! Sources are merged in the order they are added. How a key that was
//! already seen is treated is decided by the [`DuplicatePolicy`].

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Error, formats::SourceFormat};

/// What to do when a key is defined more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The last definition wins.
    #[default]
    Overwrite,
    /// Any redefinition is an error.
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            other => Err(format!(
                "unknown duplicate policy `{}`, expected `overwrite` or `reject`",
                other
            )),
        }
    }
}

/// Flat mapping from full dotted key to localized value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    values: BTreeMap<String, String>,
    policy: DuplicatePolicy,
}

impl Catalog {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Catalog {
            values: BTreeMap::new(),
            policy,
        }
    }

    /// Adds `pairs` read from `origin`, a file name or other label used in errors.
    pub fn add_pairs<I>(&mut self, origin: &str, pairs: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut added = 0usize;
        for (key, value) in pairs {
            if self.values.contains_key(&key) {
                match self.policy {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateKey {
                            key,
                            origin: origin.to_string(),
                        });
                    }
                    DuplicatePolicy::Overwrite => {
                        debug!(key = %key, origin, "overwriting previously defined key");
                    }
                }
            }
            self.values.insert(key, value);
            added += 1;
        }
        debug!(origin, added, "merged localization source");
        Ok(())
    }

    /// Reads `path` in the given format and merges its pairs.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P, format: SourceFormat) -> Result<(), Error> {
        let path = path.as_ref();
        let pairs = format.read_pairs(path)?;
        self.add_pairs(&path.display().to_string(), pairs)
    }

    /// Reads `path`, inferring its format from the extension.
    pub fn read_file_by_extension<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| Error::UnknownFormat(path.display().to_string()))?;
        self.read_file(path, format)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// All pairs, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for Catalog {
    /// Collects pairs with the default (last write wins) policy.
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Catalog {
            values: iter.into_iter().collect(),
            policy: DuplicatePolicy::Overwrite,
        }
    }
}
