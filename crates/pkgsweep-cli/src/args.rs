//! Shared run arguments and how they layer onto a config file

use clap::{ArgAction, Args};
use std::path::PathBuf;

use pkgsweep_core::{SweepConfig, Token, parse_id_list};

use crate::error::Result;

/// Inputs shared by `delete` and `plan`
#[derive(Args, Debug, Clone, Default)]
pub struct SweepArgs {
    /// YAML file with settings; flags and environment override it
    #[arg(short = 'c', long, env = "PKGSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Repository owner (user or organization)
    #[arg(long, env = "PKGSWEEP_OWNER")]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, env = "PKGSWEEP_REPO")]
    pub repo: Option<String>,

    /// `owner/repo`, used for whichever of --owner/--repo is missing
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Package whose versions are swept
    #[arg(short = 'p', long, env = "PKGSWEEP_PACKAGE_NAME")]
    pub package_name: Option<String>,

    /// Comma-separated version ids to delete; skips all querying
    #[arg(long, env = "PKGSWEEP_PACKAGE_VERSION_IDS")]
    pub package_version_ids: Option<String>,

    /// Delete this many of the oldest versions
    #[arg(long, env = "PKGSWEEP_NUM_OLD_VERSIONS_TO_DELETE", allow_negative_numbers = true)]
    pub num_old_versions_to_delete: Option<i64>,

    /// Keep this many of the newest versions and delete the rest
    #[arg(long, env = "PKGSWEEP_NUM_VERSIONS_TO_KEEP", allow_negative_numbers = true)]
    pub num_versions_to_keep: Option<i64>,

    /// Token with read and delete access to packages
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Never delete versions whose label matches a release name [default: true]
    #[arg(long, env = "PKGSWEEP_KEEP_RELEASED", action = ArgAction::Set, value_name = "BOOL")]
    pub keep_released: Option<bool>,

    /// GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL")]
    pub api_url: Option<String>,

    /// Most versions read when keeping the newest N
    #[arg(long, env = "PKGSWEEP_MAX_VERSIONS_PAGE", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_versions_page: Option<u32>,
}

impl SweepArgs {
    /// Build the run configuration: file (or defaults), then these arguments
    pub fn into_config(self) -> Result<SweepConfig> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::load_from(path)?,
            None => SweepConfig::default(),
        };

        if let Some(owner) = self.owner {
            config.owner = owner;
        }
        if let Some(repo) = self.repo {
            config.repo = repo;
        }
        if let Some(package_name) = self.package_name {
            config.package_name = package_name;
        }
        if let Some(ids) = self.package_version_ids {
            config.package_version_ids = parse_id_list(&ids);
        }
        if let Some(n) = self.num_old_versions_to_delete {
            config.num_old_versions_to_delete = n;
        }
        if let Some(n) = self.num_versions_to_keep {
            config.num_versions_to_keep = n;
        }
        if let Some(token) = self.token {
            config.token = Token::new(token);
        }
        if let Some(keep) = self.keep_released {
            config.keep_released = keep;
        }
        if let Some(url) = self.api_url {
            config.api_url = url;
        }
        if let Some(max) = self.max_versions_page {
            config.max_versions_page = max;
        }
        if let Some(slug) = &self.repository {
            config.fill_from_repository_slug(slug);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        std::fs::write(
            &path,
            "owner: from-file\nrepo: hello\npackage-name: app\nnum-versions-to-keep: 10\n",
        )
        .unwrap();

        let args = SweepArgs {
            config: Some(path),
            owner: Some("octo".to_string()),
            num_versions_to_keep: Some(3),
            keep_released: Some(false),
            ..Default::default()
        };
        let config = args.into_config().unwrap();

        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "hello");
        assert_eq!(config.package_name, "app");
        assert_eq!(config.num_versions_to_keep, 3);
        assert!(!config.keep_released);
    }

    #[test]
    fn test_repository_slug_fills_gaps() {
        let args = SweepArgs {
            repo: Some("explicit".to_string()),
            repository: Some("octo/hello".to_string()),
            ..Default::default()
        };
        let config = args.into_config().unwrap();

        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "explicit");
    }

    #[test]
    fn test_ids_are_split() {
        let args = SweepArgs {
            package_version_ids: Some("PV_1, PV_2,".to_string()),
            ..Default::default()
        };
        let config = args.into_config().unwrap();
        assert_eq!(config.package_version_ids, vec!["PV_1", "PV_2"]);
    }

    #[test]
    fn test_missing_config_file() {
        let args = SweepArgs {
            config: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..Default::default()
        };
        let err = args.into_config().unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::CONFIG_ERROR);
    }
}
