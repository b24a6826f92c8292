//! pkgsweep registry transport
//!
//! GitHub Packages implementation of [`pkgsweep_core::PackageRegistry`]:
//!
//! - **Version fetcher**: oldest N versions, or all versions up to a page cap,
//!   always returned oldest first
//! - **Release fetcher**: up to 100 release names, for release protection
//! - **Bulk delete**: one `deletePackageVersion` mutation per id
//!
//! Failures surface as [`pkgsweep_core::SweepError::Transport`] with the
//! message `"<operation> failed. <detail>"`, where the detail is the
//! registry's own error message when it sent one.
//!
//! ## Security Notes
//!
//! - Redirects are never followed, so the bearer token cannot leak to
//!   another host

pub mod error;
pub mod queries;
pub mod graphql;
pub mod github;

// Re-exports for convenience
pub use error::{RegistryError, Result};
pub use graphql::GraphQlClient;
pub use github::GitHubRegistry;
