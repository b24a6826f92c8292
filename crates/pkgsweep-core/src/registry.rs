//! Registry transport seam
//!
//! The orchestrator only talks to a registry through [`PackageRegistry`].
//! Implementations own the wire format, authentication headers and any
//! retry policy; the core just reacts to data or an error.

use async_trait::async_trait;

use crate::config::{PackageRef, Token};
use crate::error::Result;
use crate::version::VersionInfo;

/// Most releases read when building the protected set
pub const MAX_RELEASES: u32 = 100;

/// Remote operations a sweep needs
///
/// Implementations must be Send + Sync for use across async tasks.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// The `count` oldest versions, oldest first
    ///
    /// Fewer than `count` is not an error. A missing package is
    /// [`SweepError::NotFound`](crate::SweepError::NotFound).
    async fn fetch_oldest(
        &self,
        package: &PackageRef,
        count: u32,
        token: &Token,
    ) -> Result<Vec<VersionInfo>>;

    /// All versions up to the implementation's page cap, oldest first
    ///
    /// When the cap truncates the listing the oldest versions are the ones
    /// returned.
    async fn fetch_all(&self, package: &PackageRef, token: &Token) -> Result<Vec<VersionInfo>>;

    /// Names of up to [`MAX_RELEASES`] releases of a repository
    async fn fetch_release_names(
        &self,
        owner: &str,
        repo: &str,
        token: &Token,
    ) -> Result<Vec<String>>;

    /// Delete every version in `ids`
    async fn delete_versions(&self, ids: &[String], token: &Token) -> Result<()>;
}
