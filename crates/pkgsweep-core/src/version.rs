//! Package versions and the protected set

use std::collections::HashSet;

/// A single published version of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Opaque registry identifier, the handle used for deletion
    pub id: String,
    /// Version string, optionally carrying a `-<sha>` source suffix
    pub label: String,
}

impl VersionInfo {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Key matched against the protected set
    ///
    /// `1.2.3-abc123` yields `abc123` (everything after the first `-`),
    /// a label without `-` is its own key. Release names are usually a bare
    /// commit SHA, so this lets them match labels that embed the SHA.
    pub fn protection_key(&self) -> &str {
        protection_key(&self.label)
    }
}

/// Compute the protection key for a version label
pub fn protection_key(label: &str) -> &str {
    match label.split_once('-') {
        Some((_, suffix)) => suffix,
        None => label,
    }
}

/// Labels (or label suffixes) that must never be deleted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedSet {
    keys: HashSet<String>,
}

impl ProtectedSet {
    /// An empty set, protecting nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from release names, each used verbatim as a key
    pub fn from_release_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether this version's protection key is in the set
    pub fn protects(&self, version: &VersionInfo) -> bool {
        self.keys.contains(version.protection_key())
    }
}
