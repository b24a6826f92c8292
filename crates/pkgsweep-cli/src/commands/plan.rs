//! Plan command - show what a sweep would delete

use pkgsweep_core::{Sweeper, preflight};
use pkgsweep_registry::GitHubRegistry;

use crate::args::SweepArgs;
use crate::display;
use crate::error::Result;

/// Select versions without deleting anything
pub async fn run(args: SweepArgs) -> Result<()> {
    let config = args.into_config()?;

    if let Some(plan) = preflight(&config)? {
        display::print_plan(&plan);
        return Ok(());
    }

    let registry = GitHubRegistry::from_config(&config)?;

    let plan = Sweeper::new(&registry).plan(&config).await?;
    display::print_plan(&plan);

    Ok(())
}
