//! Deletion orchestration
//!
//! One linear pass per run:
//!
//! 1. refuse to start without a credential
//! 2. succeed immediately when nothing is configured
//! 3. resolve the retention policy (explicit ids short-circuit to delete)
//! 4. read release names into the protected set, if asked to
//! 5. fetch versions and run the selector
//! 6. delete the selected ids, or do nothing when there are none
//!
//! Every error halts the pass. Nothing is retried and nothing is deleted
//! after a failed step.

use crate::config::{RetentionPolicy, SweepConfig};
use crate::error::{Result, SweepError};
use crate::registry::PackageRegistry;
use crate::selector::{select_not_kept, select_oldest};
use crate::version::{ProtectedSet, VersionInfo};

/// What a run decided to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepPlan {
    /// Neither threshold was set and no ids were given
    NothingConfigured,
    /// Ids supplied verbatim by the caller
    Explicit(Vec<String>),
    /// Versions picked by the selector, newest first
    Selected(Vec<VersionInfo>),
}

impl SweepPlan {
    /// Ids to delete, in deletion order
    pub fn ids(&self) -> Vec<String> {
        match self {
            SweepPlan::NothingConfigured => Vec::new(),
            SweepPlan::Explicit(ids) => ids.clone(),
            SweepPlan::Selected(versions) => versions.iter().map(|v| v.id.clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SweepPlan::NothingConfigured => true,
            SweepPlan::Explicit(ids) => ids.is_empty(),
            SweepPlan::Selected(versions) => versions.is_empty(),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub plan: SweepPlan,
    /// Ids handed to the registry for deletion; empty for a no-op run
    pub deleted: Vec<String>,
}

/// Checks that need no registry: the credential guard, then the
/// nothing-configured shortcut
///
/// `Some` means the run is already decided and no registry call is needed.
/// Callers that build their registry lazily run this first.
pub fn preflight(config: &SweepConfig) -> Result<Option<SweepPlan>> {
    if !config.has_token() {
        return Err(SweepError::authentication("No token found"));
    }

    if config.nothing_configured() {
        tracing::info!(
            "Either num-old-versions-to-delete or num-versions-to-keep needs to be specified. \
             No versions will be deleted."
        );
        return Ok(Some(SweepPlan::NothingConfigured));
    }

    Ok(None)
}

/// Drives a run against a registry
pub struct Sweeper<'a, R: PackageRegistry + ?Sized> {
    registry: &'a R,
}

impl<'a, R: PackageRegistry + ?Sized> Sweeper<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self { registry }
    }

    /// Decide what to delete without deleting anything
    pub async fn plan(&self, config: &SweepConfig) -> Result<SweepPlan> {
        if let Some(plan) = preflight(config)? {
            return Ok(plan);
        }

        let selected = match config.policy()? {
            RetentionPolicy::ExplicitIds(ids) => {
                tracing::debug!(count = ids.len(), "Using explicit package version ids");
                return Ok(SweepPlan::Explicit(ids));
            }
            RetentionPolicy::DeleteOldest { package, count } => {
                let protected = self.protected_set(config).await?;
                let oldest = self
                    .registry
                    .fetch_oldest(&package, count, &config.token)
                    .await?;
                select_oldest(&oldest, &protected)
            }
            RetentionPolicy::KeepNewest { package, count } => {
                let protected = self.protected_set(config).await?;
                let all = self.registry.fetch_all(&package, &config.token).await?;
                select_not_kept(&all, count as usize, &protected)
            }
        };

        tracing::info!(selected = selected.len(), "Selected versions for deletion");
        Ok(SweepPlan::Selected(selected))
    }

    async fn protected_set(&self, config: &SweepConfig) -> Result<ProtectedSet> {
        if !config.keep_released {
            return Ok(ProtectedSet::empty());
        }
        let names = self
            .registry
            .fetch_release_names(&config.owner, &config.repo, &config.token)
            .await?;
        tracing::info!(
            owner = %config.owner,
            repo = %config.repo,
            releases = names.len(),
            "Protecting released versions"
        );
        Ok(ProtectedSet::from_release_names(names))
    }

    /// Plan, then delete
    pub async fn run(&self, config: &SweepConfig) -> Result<SweepReport> {
        let plan = self.plan(config).await?;
        let ids = plan.ids();

        if ids.is_empty() {
            tracing::info!("No versions to delete");
            return Ok(SweepReport {
                plan,
                deleted: Vec::new(),
            });
        }

        self.registry.delete_versions(&ids, &config.token).await?;
        tracing::info!(count = ids.len(), "Deleted package versions");

        Ok(SweepReport { plan, deleted: ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PackageRef, Token};
    use crate::mock::MockRegistry;

    fn package() -> PackageRef {
        PackageRef::new("octo", "hello", "app")
    }

    fn base_config() -> SweepConfig {
        SweepConfig {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            package_name: "app".to_string(),
            token: Token::new("secret"),
            keep_released: false,
            ..Default::default()
        }
    }

    fn versions(labels: &[&str]) -> Vec<VersionInfo> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| VersionInfo::new(format!("id{}", i + 1), *label))
            .collect()
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_keep_one_deletes_oldest_two_newest_first() {
        let registry = MockRegistry::new().with_package(&package(), versions(&["0.1", "0.2", "0.3"]));
        let config = SweepConfig {
            num_versions_to_keep: 1,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        assert_eq!(report.deleted, strings(&["id2", "id1"]));
        assert_eq!(registry.deleted_ids(), strings(&["id2", "id1"]));
        let ops = registry.operation_counts();
        assert_eq!(ops.all_queries, 1);
        assert_eq!(ops.delete_calls, 1);
    }

    #[tokio::test]
    async fn test_oldest_three_skips_released_version() {
        let registry = MockRegistry::new()
            .with_package(
                &package(),
                versions(&["1.0.0-a1", "1.0.1-b2", "1.0.2-c3", "1.0.3-d4", "1.0.4-e5"]),
            )
            .with_releases("octo", "hello", vec!["b2"]);
        let config = SweepConfig {
            num_old_versions_to_delete: 3,
            keep_released: true,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        assert_eq!(report.deleted, strings(&["id3", "id1"]));
        assert_eq!(registry.operation_counts().release_queries, 1);
    }

    #[tokio::test]
    async fn test_explicit_ids_skip_all_queries() {
        let registry = MockRegistry::new();
        let config = SweepConfig {
            package_version_ids: strings(&["v1", "v2"]),
            keep_released: true,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        assert_eq!(report.plan, SweepPlan::Explicit(strings(&["v1", "v2"])));
        assert_eq!(registry.deleted_ids(), strings(&["v1", "v2"]));
        let ops = registry.operation_counts();
        assert_eq!(ops.oldest_queries + ops.all_queries + ops.release_queries, 0);
        assert_eq!(ops.delete_calls, 1);
    }

    #[tokio::test]
    async fn test_nothing_configured_makes_no_calls() {
        let registry = MockRegistry::new();
        let config = SweepConfig {
            num_old_versions_to_delete: 0,
            num_versions_to_keep: -1,
            keep_released: true,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        assert_eq!(report.plan, SweepPlan::NothingConfigured);
        assert!(report.deleted.is_empty());
        assert_eq!(registry.operation_counts().total(), 0);
    }

    #[tokio::test]
    async fn test_package_not_found_halts_before_delete() {
        let registry = MockRegistry::new();
        let config = SweepConfig {
            num_old_versions_to_delete: 2,
            ..base_config()
        };

        let err = Sweeper::new(&registry).run(&config).await.unwrap_err();

        assert!(matches!(err, SweepError::NotFound { .. }));
        assert_eq!(registry.operation_counts().delete_calls, 0);
    }

    #[tokio::test]
    async fn test_missing_token_fails_first() {
        let registry = MockRegistry::new();
        let config = SweepConfig {
            token: Token::new(""),
            package_version_ids: strings(&["v1"]),
            ..base_config()
        };

        let err = Sweeper::new(&registry).run(&config).await.unwrap_err();

        assert!(matches!(err, SweepError::Authentication { .. }));
        assert_eq!(err.to_string(), "No token found");
        assert_eq!(registry.operation_counts().total(), 0);
    }

    #[test]
    fn test_preflight_guard_precedes_shortcut() {
        let config = SweepConfig {
            token: Token::new("  "),
            ..base_config()
        };

        let err = preflight(&config).unwrap_err();
        assert!(matches!(err, SweepError::Authentication { .. }));
    }

    #[test]
    fn test_preflight_decides_nothing_configured() {
        assert_eq!(
            preflight(&base_config()).unwrap(),
            Some(SweepPlan::NothingConfigured)
        );
    }

    #[test]
    fn test_preflight_defers_configured_runs() {
        let config = SweepConfig {
            num_versions_to_keep: 2,
            ..base_config()
        };
        assert_eq!(preflight(&config).unwrap(), None);

        let config = SweepConfig {
            package_version_ids: strings(&["v1"]),
            ..base_config()
        };
        assert_eq!(preflight(&config).unwrap(), None);
    }

    #[tokio::test]
    async fn test_unusable_inputs_are_configuration_error() {
        let registry = MockRegistry::new();
        let config = SweepConfig {
            package_name: String::new(),
            num_versions_to_keep: 2,
            keep_released: true,
            ..base_config()
        };

        let err = Sweeper::new(&registry).run(&config).await.unwrap_err();

        assert!(matches!(err, SweepError::Configuration { .. }));
        assert_eq!(registry.operation_counts().total(), 0);
    }

    #[tokio::test]
    async fn test_keep_more_than_available_is_noop() {
        let registry = MockRegistry::new().with_package(&package(), versions(&["0.1", "0.2"]));
        let config = SweepConfig {
            num_versions_to_keep: 5,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        assert_eq!(report.plan, SweepPlan::Selected(Vec::new()));
        assert!(report.deleted.is_empty());
        assert_eq!(registry.operation_counts().delete_calls, 0);
    }

    #[tokio::test]
    async fn test_all_selected_versions_protected_is_noop() {
        let registry = MockRegistry::new()
            .with_package(&package(), versions(&["1-a", "2-b", "3-c"]))
            .with_releases("octo", "hello", vec!["a", "b"]);
        let config = SweepConfig {
            num_old_versions_to_delete: 2,
            keep_released: true,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        assert!(report.deleted.is_empty());
        assert_eq!(registry.operation_counts().delete_calls, 0);
    }

    #[tokio::test]
    async fn test_release_failure_halts_pipeline() {
        let registry = MockRegistry::new()
            .with_package(&package(), versions(&["0.1", "0.2"]))
            .fail_releases(Some("Bad credentials"));
        let config = SweepConfig {
            num_old_versions_to_delete: 1,
            keep_released: true,
            ..base_config()
        };

        let err = Sweeper::new(&registry).run(&config).await.unwrap_err();

        assert_eq!(err.to_string(), "query for releases failed. Bad credentials");
        let ops = registry.operation_counts();
        assert_eq!(ops.oldest_queries, 0);
        assert_eq!(ops.delete_calls, 0);
    }

    #[tokio::test]
    async fn test_version_query_failure_propagates() {
        let registry = MockRegistry::new().fail_versions(None);
        let config = SweepConfig {
            num_versions_to_keep: 1,
            ..base_config()
        };

        let err = Sweeper::new(&registry).run(&config).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "query for all versions failed. verify input parameters are correct"
        );
        assert_eq!(registry.operation_counts().delete_calls, 0);
    }

    #[tokio::test]
    async fn test_delete_failure_propagates() {
        let registry = MockRegistry::new().fail_delete(Some("Resource not accessible"));
        let config = SweepConfig {
            package_version_ids: strings(&["v1"]),
            ..base_config()
        };

        let err = Sweeper::new(&registry).run(&config).await.unwrap_err();
        assert!(matches!(err, SweepError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_keep_on_truncated_listing_only_under_deletes() {
        let labels: Vec<String> = (1..=8).map(|i| format!("0.{}", i)).collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        let registry = MockRegistry::new()
            .with_package(&package(), versions(&labels))
            .with_page_cap(5);
        let config = SweepConfig {
            num_versions_to_keep: 2,
            ..base_config()
        };

        let report = Sweeper::new(&registry).run(&config).await.unwrap();

        // Observed 5 of 8, so 3 go instead of 6, all from the oldest end
        assert_eq!(report.deleted, strings(&["id3", "id2", "id1"]));
    }

    #[tokio::test]
    async fn test_plan_does_not_delete() {
        let registry = MockRegistry::new().with_package(&package(), versions(&["0.1", "0.2", "0.3"]));
        let config = SweepConfig {
            num_old_versions_to_delete: 2,
            ..base_config()
        };

        let plan = Sweeper::new(&registry).plan(&config).await.unwrap();

        assert_eq!(plan.ids(), strings(&["id2", "id1"]));
        assert_eq!(registry.operation_counts().delete_calls, 0);
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let registry = MockRegistry::new().with_package(&package(), versions(&["0.1", "0.2"]));
        let dynamic: &dyn PackageRegistry = &registry;
        let config = SweepConfig {
            num_old_versions_to_delete: 1,
            ..base_config()
        };

        let report = Sweeper::new(dynamic).run(&config).await.unwrap();
        assert_eq!(report.deleted, strings(&["id1"]));
    }
}
