//! `foray subdomains` - wordlist-driven subdomain discovery.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use colored::Colorize;
use foray::enumerate;
use foray::{run_scan, DnsProber};
use foray_core::{ProbeStatus, ScanJob, ScanReport};

use super::{status_tag, Context};
use crate::cli::args::SubdomainsArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: SubdomainsArgs) -> Result<()> {
    let labels = match &args.wordlist {
        Some(path) => read_wordlist(path)?,
        None => enumerate::common_labels(),
    };
    let targets = enumerate::subdomains(&args.domain, &labels)?;

    let mut job = ScanJob::new(targets)
        .concurrency(ctx.concurrency)
        .timeout(ctx.timeout);
    if let Some(ms) = args.deadline_ms {
        job = job.deadline(Duration::from_millis(ms));
    }
    super::cancel_on_ctrl_c(&job);

    if ctx.output_format == OutputFormat::Pretty {
        println!(
            "{} {} ({} candidates, {} workers)",
            "Sweeping".bold(),
            args.domain.cyan(),
            job.targets.len(),
            job.concurrency.min(job.targets.len())
        );
        println!();
    }

    let report = run_scan(&job, Arc::new(DnsProber::new())).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => print_pretty(&ctx, &report),
    }

    ctx.export_json(&report)?;

    Ok(())
}

fn read_wordlist(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read wordlist {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn print_pretty(ctx: &Context, report: &ScanReport) {
    for result in &report.results {
        if !result.status.is_positive() && !ctx.verbose {
            continue;
        }

        match result.status {
            ProbeStatus::Found => {
                let address = result
                    .address
                    .map_or_else(|| "-".to_string(), |a| a.to_string());
                println!(
                    "  {} {:<32} {}",
                    status_tag(result.status),
                    result.target.fqdn(),
                    address
                );
            }
            ProbeStatus::Error => {
                let detail = result.detail.as_deref().unwrap_or("unknown fault");
                println!(
                    "  {} {:<32} {}",
                    status_tag(result.status),
                    result.target.fqdn(),
                    detail.dimmed()
                );
            }
            _ => {
                println!("  {} {}", status_tag(result.status), result.target.fqdn());
            }
        }
    }

    let t = &report.tally;
    println!();
    println!(
        "{} found out of {} candidates in {:.2}s",
        t.found.to_string().green().bold(),
        report.requested,
        report.duration.as_secs_f64()
    );

    if report.partial {
        println!(
            "{}",
            format!(
                "Partial sweep: {} of {} candidates probed.",
                report.results.len(),
                report.requested
            )
            .yellow()
        );
    }
}
