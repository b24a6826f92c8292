//! Sweep configuration
//!
//! A [`SweepConfig`] is assembled once per run, from an optional YAML file
//! and then command-line flags or environment variables layered on top.
//! The core only reads it.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::{Result, SweepError};

/// Default GraphQL endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com/graphql";

/// Upper bound on how many versions one "all versions" query returns
pub const MAX_VERSIONS_PAGE: u32 = 100;

const MISSING_POLICY_MESSAGE: &str = "Could not get package version ids. Explicitly specify using the \
     'package-version-ids' input or provide the 'package-name' and 'num-old-versions-to-delete' \
     (or 'num-versions-to-keep') inputs to dynamically retrieve versions";

/// Opaque registry credential
///
/// `Debug` never prints the secret.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw secret, for building request headers
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only tokens count as missing
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            f.write_str("Token(<empty>)")
        } else {
            f.write_str("Token(<redacted>)")
        }
    }
}

/// Where a package lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub owner: String,
    pub repo: String,
    pub package: String,
}

impl PackageRef {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        package: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            package: package.into(),
        }
    }

    /// Error for a package that does not exist in this repository
    pub fn not_found(&self) -> SweepError {
        SweepError::not_found(&self.package, &self.owner, &self.repo)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.owner, self.repo, self.package)
    }
}

/// How versions to delete are chosen, in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Caller named the exact ids; no querying
    ExplicitIds(Vec<String>),
    /// Delete the `count` oldest versions
    DeleteOldest { package: PackageRef, count: u32 },
    /// Keep the `count` newest versions, delete the rest
    KeepNewest { package: PackageRef, count: u32 },
}

/// Everything one run needs to know
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SweepConfig {
    pub package_version_ids: Vec<String>,
    pub owner: String,
    pub repo: String,
    pub package_name: String,
    pub num_old_versions_to_delete: i64,
    pub num_versions_to_keep: i64,
    pub token: Token,
    pub keep_released: bool,
    pub api_url: String,
    pub max_versions_page: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            package_version_ids: Vec::new(),
            owner: String::new(),
            repo: String::new(),
            package_name: String::new(),
            num_old_versions_to_delete: 0,
            num_versions_to_keep: 0,
            token: Token::default(),
            keep_released: true,
            api_url: DEFAULT_API_URL.to_string(),
            max_versions_page: MAX_VERSIONS_PAGE,
        }
    }
}

impl SweepConfig {
    /// Load from a YAML file; absent keys take their defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SweepError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            SweepError::ConfigParse { message, .. } => SweepError::ConfigParse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| SweepError::ConfigParse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Fill an empty owner and/or repo from an `owner/repo` slug
    ///
    /// CI runners export the current repository this way. Fields that are
    /// already set win. Malformed slugs are ignored.
    pub fn fill_from_repository_slug(&mut self, slug: &str) {
        let Some((owner, repo)) = slug.trim().split_once('/') else {
            tracing::debug!(slug, "Ignoring repository slug without '/'");
            return;
        };
        if owner.is_empty() || repo.is_empty() {
            return;
        }
        if self.owner.is_empty() {
            self.owner = owner.to_string();
        }
        if self.repo.is_empty() {
            self.repo = repo.to_string();
        }
    }

    /// A usable credential was supplied
    pub fn has_token(&self) -> bool {
        !self.token.is_blank()
    }

    fn has_package_coordinates(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty() && !self.package_name.is_empty()
    }

    /// Enough information to query the oldest versions
    pub fn has_oldest_version_query_info(&self) -> bool {
        self.has_package_coordinates() && self.num_old_versions_to_delete > 0 && self.has_token()
    }

    /// Enough information to query everything but the newest N
    pub fn has_num_to_keep_query_info(&self) -> bool {
        self.has_package_coordinates() && self.num_versions_to_keep > 0 && self.has_token()
    }

    /// Neither threshold asks for anything and no ids were given
    pub fn nothing_configured(&self) -> bool {
        self.package_version_ids.is_empty()
            && self.num_old_versions_to_delete <= 0
            && self.num_versions_to_keep <= 0
    }

    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(&self.owner, &self.repo, &self.package_name)
    }

    /// Resolve the retention policy: explicit ids, then oldest-N, then keep-N
    pub fn policy(&self) -> Result<RetentionPolicy> {
        if !self.package_version_ids.is_empty() {
            return Ok(RetentionPolicy::ExplicitIds(self.package_version_ids.clone()));
        }
        if self.has_oldest_version_query_info() {
            return Ok(RetentionPolicy::DeleteOldest {
                package: self.package_ref(),
                count: clamp_count(self.num_old_versions_to_delete),
            });
        }
        if self.has_num_to_keep_query_info() {
            return Ok(RetentionPolicy::KeepNewest {
                package: self.package_ref(),
                count: clamp_count(self.num_versions_to_keep),
            });
        }
        Err(SweepError::configuration(MISSING_POLICY_MESSAGE))
    }
}

fn clamp_count(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

/// Split a comma-separated id list, dropping blanks
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
