use anyhow::Result;
use colored::Colorize;
use sharemount_core::{
    CommandExecutor, MountOrchestrator, MountOutcome, PlannedShare, RunSummary, ShareReport,
    SystemExecutor,
};
use std::path::Path;
use std::sync::Arc;

pub async fn execute(config: Option<&Path>, dry_run: bool, json: bool) -> Result<()> {
    let loaded = super::load_config(config)?;
    let shares = loaded.config.shares();

    let executor: Arc<dyn CommandExecutor> = Arc::new(SystemExecutor::new());
    let orchestrator = MountOrchestrator::new(executor, loaded.config.settings);

    if dry_run {
        let planned = orchestrator.plan(&shares).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&planned)?);
        } else {
            print_plan(&planned);
        }
        return Ok(());
    }

    let reports = orchestrator.run(&shares).await?;
    let summary = RunSummary::from_reports(&reports);

    if json {
        let output = serde_json::json!({
            "shares": reports,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_reports(&reports, summary);
    }

    // Per-share failures are reported, not turned into a failing exit status
    Ok(())
}

fn print_plan(planned: &[PlannedShare]) {
    if planned.is_empty() {
        println!("No shares configured");
        return;
    }

    println!("{}", "Planned actions (dry run):".bold());
    for share in planned {
        println!();
        println!("{} {}", share.name.cyan(), format!("[{}]", share.kind).dimmed());
        if let Some(detail) = &share.detail {
            println!("  {} {}", "✗".red(), detail);
            continue;
        }
        if let Some(target) = &share.target {
            println!("  Target: {target}");
        }
        if share.already_mounted {
            println!("  {} already mounted, nothing to do", "✓".green());
            continue;
        }
        if share.needs_provisioning {
            println!("  {} mount point would be created", "+".yellow());
        }
        if let Some(command) = &share.command {
            println!("  Run: {command}");
        }
    }
}

fn print_reports(reports: &[ShareReport], summary: RunSummary) {
    if reports.is_empty() {
        println!("No shares configured");
        return;
    }

    println!();
    for report in reports {
        let marker = match report.outcome {
            MountOutcome::Mounted => "✓".green(),
            MountOutcome::AlreadyMounted => "•".dimmed(),
            MountOutcome::ProvisioningFailed | MountOutcome::MountCommandFailed => "✗".red(),
        };
        let outcome = if report.outcome.is_failure() {
            report.outcome.to_string().red()
        } else {
            report.outcome.to_string().normal()
        };
        println!("{marker} {:<20} {outcome}  {}", report.name, report.target.dimmed());
        if let Some(detail) = &report.detail {
            println!("    {}", detail.dimmed());
        }
    }

    println!();
    let line = format!(
        "{} mounted, {} already mounted, {} failed",
        summary.mounted,
        summary.already_mounted,
        summary.failures()
    );
    if summary.failures() > 0 {
        println!("{}", line.yellow());
    } else {
        println!("{}", line.green());
    }
}
