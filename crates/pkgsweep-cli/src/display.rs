//! Display formatting for CLI output

use console::style;

use pkgsweep_core::{SweepPlan, SweepReport};

/// Print what a dry run would delete
pub fn print_plan(plan: &SweepPlan) {
    match plan {
        SweepPlan::NothingConfigured => print_nothing_configured(),
        SweepPlan::Explicit(ids) if !ids.is_empty() => {
            println!(
                "{} {} explicitly listed version(s) would be deleted:",
                style("→").cyan(),
                ids.len()
            );
            for id in ids {
                println!("  {}", id);
            }
        }
        SweepPlan::Selected(versions) if !versions.is_empty() => {
            println!(
                "{} {} version(s) would be deleted:",
                style("→").cyan(),
                versions.len()
            );
            let width = versions.iter().map(|v| v.id.len()).max().unwrap_or(0);
            for version in versions {
                println!(
                    "  {:<width$}  {}",
                    version.id,
                    style(&version.label).dim(),
                    width = width
                );
            }
        }
        _ => print_nothing_selected(),
    }
}

/// Print the outcome of a run
pub fn print_report(report: &SweepReport) {
    if matches!(report.plan, SweepPlan::NothingConfigured) {
        print_nothing_configured();
        return;
    }
    if report.deleted.is_empty() {
        print_nothing_selected();
        return;
    }

    println!(
        "{} Deleted {} package version(s)",
        style("✓").green().bold(),
        report.deleted.len()
    );
    for id in &report.deleted {
        println!("  {}", id);
    }
}

fn print_nothing_configured() {
    println!(
        "{} Either num-old-versions-to-delete or num-versions-to-keep needs to be specified. \
         No versions will be deleted.",
        style("!").yellow()
    );
}

fn print_nothing_selected() {
    println!("{} No package versions to delete", style("✓").green());
}
