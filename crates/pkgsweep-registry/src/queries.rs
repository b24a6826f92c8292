//! GraphQL documents and response shapes

use serde::{Deserialize, Serialize};

/// The `last` N versions of one package
///
/// The registry lists versions newest first, so `last: N` is the N oldest,
/// still in newest-first order.
pub const VERSIONS_QUERY: &str = r#"
  query getVersions($owner: String!, $repo: String!, $package: String!, $last: Int!) {
    repository(owner: $owner, name: $repo) {
      packages(first: 1, names: [$package]) {
        edges {
          node {
            name
            versions(last: $last) {
              edges {
                node {
                  id
                  version
                }
              }
            }
          }
        }
      }
    }
  }"#;

pub const RELEASES_QUERY: &str = r#"
  query getReleases($owner: String!, $repo: String!, $last: Int!) {
    repository(owner: $owner, name: $repo) {
      releases(last: $last) {
        edges {
          node {
            name
          }
        }
      }
    }
  }"#;

pub const DELETE_MUTATION: &str = r#"
  mutation deletePackageVersion($packageVersionId: ID!) {
    deletePackageVersion(input: {packageVersionId: $packageVersionId}) {
      success
    }
  }"#;

/// Request body
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// Response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

// ============ Versions ============

#[derive(Debug, Serialize)]
pub struct VersionsVariables<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub package: &'a str,
    pub last: u32,
}

#[derive(Debug, Deserialize)]
pub struct VersionsData {
    pub repository: Option<PackagesRepository>,
}

#[derive(Debug, Deserialize)]
pub struct PackagesRepository {
    pub packages: Connection<PackageNode>,
}

#[derive(Debug, Deserialize)]
pub struct PackageNode {
    pub versions: Connection<VersionNode>,
}

#[derive(Debug, Deserialize)]
pub struct VersionNode {
    pub id: String,
    pub version: String,
}

impl VersionsData {
    /// Version nodes of the first matching package, or `None` if there is no such package
    pub fn into_versions(self) -> Option<Vec<VersionNode>> {
        let package = self.repository?.packages.edges.into_iter().next()?.node;
        Some(package.versions.edges.into_iter().map(|e| e.node).collect())
    }
}

// ============ Releases ============

#[derive(Debug, Serialize)]
pub struct ReleasesVariables<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub last: u32,
}

#[derive(Debug, Deserialize)]
pub struct ReleasesData {
    pub repository: Option<ReleasesRepository>,
}

#[derive(Debug, Deserialize)]
pub struct ReleasesRepository {
    pub releases: Connection<ReleaseNode>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseNode {
    pub name: Option<String>,
}

impl ReleasesData {
    /// Names of all named releases
    pub fn into_names(self) -> Vec<String> {
        self.repository
            .map(|r| r.releases.edges)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|e| e.node.name)
            .collect()
    }
}

// ============ Delete ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVariables<'a> {
    pub package_version_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteData {
    pub delete_package_version: Option<DeletePayload>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePayload {
    pub success: Option<bool>,
}
