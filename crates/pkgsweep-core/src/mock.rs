//! In-memory registry for testing
//!
//! Holds packages and releases in memory and counts every call, so
//! orchestration can be exercised without a network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::{PackageRef, Token};
use crate::error::{Result, SweepError};
use crate::registry::{MAX_RELEASES, PackageRegistry};
use crate::version::VersionInfo;

/// In-memory registry for testing
#[derive(Clone, Default)]
pub struct MockRegistry {
    /// (owner, repo, package) -> versions, oldest first
    packages: Arc<RwLock<HashMap<(String, String, String), Vec<VersionInfo>>>>,
    /// (owner, repo) -> release names
    releases: Arc<RwLock<HashMap<(String, String), Vec<String>>>>,
    failures: Arc<RwLock<Failures>>,
    page_cap: Option<usize>,
    operations: Arc<RwLock<OperationCounts>>,
    deleted: Arc<RwLock<Vec<String>>>,
}

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub oldest_queries: usize,
    pub all_queries: usize,
    pub release_queries: usize,
    pub delete_calls: usize,
}

impl OperationCounts {
    /// Total number of remote calls
    pub fn total(&self) -> usize {
        self.oldest_queries + self.all_queries + self.release_queries + self.delete_calls
    }
}

#[derive(Debug, Default)]
struct Failures {
    versions: Option<Option<String>>,
    releases: Option<Option<String>>,
    delete: Option<Option<String>>,
}

impl MockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package with versions in oldest-first order
    pub fn with_package(self, package: &PackageRef, versions: Vec<VersionInfo>) -> Self {
        self.packages.write().unwrap().insert(
            (
                package.owner.clone(),
                package.repo.clone(),
                package.package.clone(),
            ),
            versions,
        );
        self
    }

    /// Register release names for a repository
    pub fn with_releases<S: Into<String>>(self, owner: &str, repo: &str, names: Vec<S>) -> Self {
        self.releases.write().unwrap().insert(
            (owner.to_string(), repo.to_string()),
            names.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Cap what `fetch_all` returns, like a registry page limit
    pub fn with_page_cap(mut self, cap: usize) -> Self {
        self.page_cap = Some(cap);
        self
    }

    /// Make version queries fail with an optional remote detail
    pub fn fail_versions(self, detail: Option<&str>) -> Self {
        self.failures.write().unwrap().versions = Some(detail.map(String::from));
        self
    }

    /// Make the release query fail with an optional remote detail
    pub fn fail_releases(self, detail: Option<&str>) -> Self {
        self.failures.write().unwrap().releases = Some(detail.map(String::from));
        self
    }

    /// Make deletes fail with an optional remote detail
    pub fn fail_delete(self, detail: Option<&str>) -> Self {
        self.failures.write().unwrap().delete = Some(detail.map(String::from));
        self
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        self.operations.read().unwrap().clone()
    }

    /// Ids passed to delete, in call order
    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted.read().unwrap().clone()
    }

    fn versions_of(&self, package: &PackageRef, operation: &str) -> Result<Vec<VersionInfo>> {
        if let Some(detail) = &self.failures.read().unwrap().versions {
            return Err(SweepError::transport(operation, detail.clone()));
        }
        let key = (
            package.owner.clone(),
            package.repo.clone(),
            package.package.clone(),
        );
        self.packages
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or_else(|| package.not_found())
    }
}

#[async_trait]
impl PackageRegistry for MockRegistry {
    async fn fetch_oldest(
        &self,
        package: &PackageRef,
        count: u32,
        _token: &Token,
    ) -> Result<Vec<VersionInfo>> {
        self.operations.write().unwrap().oldest_queries += 1;

        let mut versions = self.versions_of(package, "query for oldest version")?;
        versions.truncate(count as usize);
        Ok(versions)
    }

    async fn fetch_all(&self, package: &PackageRef, _token: &Token) -> Result<Vec<VersionInfo>> {
        self.operations.write().unwrap().all_queries += 1;

        let mut versions = self.versions_of(package, "query for all versions")?;
        if let Some(cap) = self.page_cap {
            versions.truncate(cap);
        }
        Ok(versions)
    }

    async fn fetch_release_names(
        &self,
        owner: &str,
        repo: &str,
        _token: &Token,
    ) -> Result<Vec<String>> {
        self.operations.write().unwrap().release_queries += 1;

        if let Some(detail) = &self.failures.read().unwrap().releases {
            return Err(SweepError::transport("query for releases", detail.clone()));
        }
        let mut names = self
            .releases
            .read()
            .unwrap()
            .get(&(owner.to_string(), repo.to_string()))
            .cloned()
            .unwrap_or_default();
        names.truncate(MAX_RELEASES as usize);
        Ok(names)
    }

    async fn delete_versions(&self, ids: &[String], _token: &Token) -> Result<()> {
        self.operations.write().unwrap().delete_calls += 1;

        if let Some(detail) = &self.failures.read().unwrap().delete {
            return Err(SweepError::transport("delete version mutation", detail.clone()));
        }
        self.deleted.write().unwrap().extend(ids.iter().cloned());
        Ok(())
    }
}
