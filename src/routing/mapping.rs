//! Path mapping construction.
//!
//! # Responsibilities
//! - Build the exact-match lookup table from an ordered record sequence
//! - Convert static `(path, url)` collections into the same table
//!
//! # Design Decisions
//! - Built once, read-only afterwards (shared via `Arc` without locks)
//! - Later records overwrite earlier ones with the same path
//! - No validation here: decoding errors belong to the record decoder

use std::collections::HashMap;

use crate::routing::records::RedirectRecord;

/// Read-only lookup table from request path to redirect destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping {
    paths: HashMap<String, String>,
}

impl PathMapping {
    /// Build a mapping from records in order. Duplicate paths keep the last destination.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RedirectRecord>,
    {
        let mut paths = HashMap::new();
        for record in records {
            if let Some(previous) = paths.insert(record.path.clone(), record.destination) {
                tracing::debug!(
                    path = %record.path,
                    overridden = %previous,
                    "Duplicate redirect path, keeping the later destination"
                );
            }
        }
        Self { paths }
    }

    /// Destination for an exact path match.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.paths.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over `(path, destination)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(p, d)| (p.as_str(), d.as_str()))
    }
}

impl From<HashMap<String, String>> for PathMapping {
    fn from(paths: HashMap<String, String>) -> Self {
        Self { paths }
    }
}

impl<K, V> FromIterator<(K, V)> for PathMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_records(
            iter.into_iter()
                .map(|(path, destination)| RedirectRecord::new(path, destination)),
        )
    }
}

/// Build the path mapping consumed by the redirect resolver.
pub fn build_mapping<I>(records: I) -> PathMapping
where
    I: IntoIterator<Item = RedirectRecord>,
{
    PathMapping::from_records(records)
}
