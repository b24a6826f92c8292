//! Delete command - select package versions and delete them

use pkgsweep_core::{SweepReport, Sweeper, preflight};
use pkgsweep_registry::GitHubRegistry;

use crate::args::SweepArgs;
use crate::display;
use crate::error::Result;

/// Run the full sweep and delete what it selects
pub async fn run(args: SweepArgs) -> Result<()> {
    let config = args.into_config()?;

    // The API URL is only validated once a registry call is needed
    if let Some(plan) = preflight(&config)? {
        display::print_report(&SweepReport {
            plan,
            deleted: Vec::new(),
        });
        return Ok(());
    }

    let registry = GitHubRegistry::from_config(&config)?;

    tracing::debug!(
        owner = %config.owner,
        repo = %config.repo,
        package = %config.package_name,
        api_url = %registry.api_url(),
        "Starting sweep"
    );

    let report = Sweeper::new(&registry).run(&config).await?;
    display::print_report(&report);

    Ok(())
}
