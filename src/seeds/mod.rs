//! Seed store for anonymization values.
//!
//! Seed values are grouped by kind (`phone-numbers`, `email`, `words`,
//! `addresses-1`, `businesses`, ...). The position of a value inside its kind
//! becomes the `idx` column of the inserted seed row, and the generated
//! updates pick a seed with `mod(id, total)`, so list order is part of the
//! output contract:
//! - embedded defaults come first
//! - override files are appended in the order they are given
//! - values are never sorted, deduplicated or interleaved

use crate::error::{ObfuscateError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Seed document compiled into the binary.
pub const DEFAULT_SEEDS_YAML: &str = include_str!("../../data/default-seeds.yaml");

const DEFAULT_SEEDS_ORIGIN: &str = "embedded default seeds";

/// Ordered seed values keyed by kind name.
///
/// Kinds iterate in ascending name order so that emitted scripts are
/// byte-identical across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedData {
    kinds: BTreeMap<String, Vec<String>>,
}

/// On-disk shape: `kind -> [value, ...]`. A kind may be listed with no values.
type SeedYaml = BTreeMap<String, Option<Vec<String>>>;

impl SeedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the embedded default seed set.
    pub fn defaults() -> Result<Self> {
        Self::from_yaml_str(DEFAULT_SEEDS_YAML, DEFAULT_SEEDS_ORIGIN)
    }

    /// Parse a `kind -> list of strings` YAML document.
    ///
    /// `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self> {
        let mut data = Self::new();
        data.extend_from_yaml_str(content, origin)?;
        Ok(data)
    }

    /// Append every kind of a YAML document after the values already stored.
    pub fn extend_from_yaml_str(&mut self, content: &str, origin: &str) -> Result<()> {
        // An empty file is a valid, empty override
        if content.trim().is_empty() {
            return Ok(());
        }

        let parsed: Option<SeedYaml> =
            serde_yaml_ng::from_str(content).map_err(|e| ObfuscateError::parse(origin, e))?;

        for (kind, values) in parsed.unwrap_or_default() {
            self.extend(kind, values.unwrap_or_default());
        }
        Ok(())
    }

    /// Read a YAML seed file and append its values.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| ObfuscateError::io(path, e))?;
        self.extend_from_yaml_str(&content, &path.display().to_string())
    }

    /// Append values to a kind, creating it if absent.
    pub fn extend<I, S>(&mut self, kind: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kinds
            .entry(kind.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Append every kind of `other` after the values already stored.
    pub fn append(&mut self, other: SeedData) {
        for (kind, values) in other.kinds {
            self.extend(kind, values);
        }
    }

    /// Values stored for a kind, in idx order
    pub fn get(&self, kind: &str) -> Option<&[String]> {
        self.kinds.get(kind).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.kinds
            .iter()
            .map(|(kind, values)| (kind.as_str(), values.as_slice()))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Total number of seed values across all kinds
    pub fn value_count(&self) -> usize {
        self.kinds.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Build the seed registry for one run.
///
/// `defaults` is the already-parsed embedded set; each override file is read
/// and appended in order. An unreadable override is an I/O error, a malformed
/// one a parse error.
pub fn load_seeds(defaults: SeedData, overrides: &[PathBuf]) -> Result<SeedData> {
    let mut seeds = defaults;

    for path in overrides {
        seeds.extend_from_file(path)?;
        debug!("appended seed overrides from {}", path.display());
    }

    debug!(
        "seed registry: {} kinds, {} values",
        seeds.kind_count(),
        seeds.value_count()
    );
    Ok(seeds)
}
