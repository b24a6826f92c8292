//! pkgsweep core
//!
//! Decides which versions of a published package to delete and drives the
//! deletion through a [`PackageRegistry`]:
//!
//! - **Retention policies**: explicit ids, delete the oldest N, or keep the newest N
//! - **Release protection**: versions whose label (or `-suffix`) matches a
//!   release name are never selected
//! - **Selection**: pure functions over the registry's oldest-first ordering
//! - **Orchestration**: a single fail-fast pass, no state between runs
//!
//! ## Example
//!
//! ```rust,no_run
//! use pkgsweep_core::{MockRegistry, SweepConfig, Sweeper, Token};
//!
//! # async fn example() -> pkgsweep_core::Result<()> {
//! let registry = MockRegistry::new();
//! let config = SweepConfig {
//!     owner: "octo".into(),
//!     repo: "hello".into(),
//!     package_name: "app".into(),
//!     num_versions_to_keep: 5,
//!     token: Token::new("ghp_..."),
//!     ..Default::default()
//! };
//!
//! let report = Sweeper::new(&registry).run(&config).await?;
//! println!("deleted {} versions", report.deleted.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod version;
pub mod config;
pub mod selector;
pub mod registry;
pub mod mock;
pub mod sweep;

// Re-exports for convenience
pub use error::{Result, SweepError};
pub use version::{ProtectedSet, VersionInfo, protection_key};
pub use config::{
    DEFAULT_API_URL, MAX_VERSIONS_PAGE, PackageRef, RetentionPolicy, SweepConfig, Token,
    parse_id_list,
};
pub use selector::{select_not_kept, select_oldest};
pub use registry::{MAX_RELEASES, PackageRegistry};
pub use mock::{MockRegistry, OperationCounts};
pub use sweep::{SweepPlan, SweepReport, Sweeper, preflight};
