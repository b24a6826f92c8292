//! GitHub Packages backend
//!
//! Implements [`PackageRegistry`] on top of the GitHub GraphQL API.

use async_trait::async_trait;

use pkgsweep_core::{
    MAX_RELEASES, MAX_VERSIONS_PAGE, PackageRef, PackageRegistry, SweepConfig, Token, VersionInfo,
};

use crate::error::Result;
use crate::graphql::{GraphQlClient, PACKAGE_DELETES_PREVIEW, PACKAGES_PREVIEW};
use crate::queries::{
    DELETE_MUTATION, DeleteData, DeleteVariables, RELEASES_QUERY, ReleasesData,
    ReleasesVariables, VERSIONS_QUERY, VersionsData, VersionsVariables,
};
use crate::RegistryError;

const OP_OLDEST: &str = "query for oldest version";
const OP_ALL: &str = "query for all versions";
const OP_RELEASES: &str = "query for releases";
const OP_DELETE: &str = "delete version mutation";

/// GitHub Packages client
pub struct GitHubRegistry {
    client: GraphQlClient,
    max_versions_page: u32,
}

impl GitHubRegistry {
    /// Client for a GraphQL endpoint
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            client: GraphQlClient::new(api_url)?,
            max_versions_page: MAX_VERSIONS_PAGE,
        })
    }

    /// Client configured from a sweep configuration
    pub fn from_config(config: &SweepConfig) -> Result<Self> {
        Ok(Self::new(&config.api_url)?.with_max_versions_page(config.max_versions_page))
    }

    /// Cap on versions read by [`PackageRegistry::fetch_all`]
    pub fn with_max_versions_page(mut self, max: u32) -> Self {
        self.max_versions_page = max.max(1);
        self
    }

    pub fn api_url(&self) -> &str {
        self.client.endpoint()
    }

    /// The `last` N versions, reversed into oldest-first order
    async fn query_versions(
        &self,
        package: &PackageRef,
        last: u32,
        token: &Token,
        operation: &str,
    ) -> pkgsweep_core::Result<Vec<VersionInfo>> {
        let variables = VersionsVariables {
            owner: &package.owner,
            repo: &package.repo,
            package: &package.package,
            last,
        };

        let data: VersionsData = self
            .client
            .execute(VERSIONS_QUERY, variables, token, PACKAGES_PREVIEW)
            .await
            .map_err(|e| e.into_transport(operation))?;

        let nodes = data.into_versions().ok_or_else(|| package.not_found())?;

        Ok(nodes
            .into_iter()
            .rev()
            .map(|node| VersionInfo::new(node.id, node.version))
            .collect())
    }
}

#[async_trait]
impl PackageRegistry for GitHubRegistry {
    async fn fetch_oldest(
        &self,
        package: &PackageRef,
        count: u32,
        token: &Token,
    ) -> pkgsweep_core::Result<Vec<VersionInfo>> {
        let versions = self.query_versions(package, count, token, OP_OLDEST).await?;

        if versions.len() != count as usize {
            tracing::info!(
                package = %package,
                requested = count,
                found = versions.len(),
                "number of versions requested was: {}, but found: {}",
                count,
                versions.len()
            );
        }

        Ok(versions)
    }

    async fn fetch_all(
        &self,
        package: &PackageRef,
        token: &Token,
    ) -> pkgsweep_core::Result<Vec<VersionInfo>> {
        let versions = self
            .query_versions(package, self.max_versions_page, token, OP_ALL)
            .await?;

        if versions.len() >= self.max_versions_page as usize {
            tracing::warn!(
                package = %package,
                cap = self.max_versions_page,
                "Version listing hit the page cap; only the oldest {} versions are considered, \
                 so fewer versions than requested may be deleted",
                self.max_versions_page
            );
        }

        Ok(versions)
    }

    async fn fetch_release_names(
        &self,
        owner: &str,
        repo: &str,
        token: &Token,
    ) -> pkgsweep_core::Result<Vec<String>> {
        let variables = ReleasesVariables {
            owner,
            repo,
            last: MAX_RELEASES,
        };

        let data: ReleasesData = self
            .client
            .execute(RELEASES_QUERY, variables, token, PACKAGES_PREVIEW)
            .await
            .map_err(|e| e.into_transport(OP_RELEASES))?;

        Ok(data.into_names())
    }

    /// One mutation per id, in order; stops at the first failure
    async fn delete_versions(
        &self,
        ids: &[String],
        token: &Token,
    ) -> pkgsweep_core::Result<()> {
        for id in ids {
            let data: DeleteData = self
                .client
                .execute(
                    DELETE_MUTATION,
                    DeleteVariables {
                        package_version_id: id,
                    },
                    token,
                    PACKAGE_DELETES_PREVIEW,
                )
                .await
                .map_err(|e| e.into_transport(OP_DELETE))?;

            let success = data
                .delete_package_version
                .and_then(|payload| payload.success)
                .unwrap_or(false);
            if !success {
                return Err(RegistryError::Rejected {
                    message: format!("version {} was not deleted", id),
                }
                .into_transport(OP_DELETE));
            }

            tracing::debug!(id = %id, "Deleted package version");
        }

        Ok(())
    }
}
