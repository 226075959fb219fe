//! `foray ports` - TCP connect probes against one host.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use foray::enumerate::{self, PortSpec};
use foray::{run_scan, TcpProber};
use foray_core::{ProbeStatus, ScanJob, ScanReport};

use super::{status_tag, Context};
use crate::cli::args::PortsArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: PortsArgs) -> Result<()> {
    let spec = match &args.ports {
        Some(s) => s.parse::<PortSpec>()?,
        None => PortSpec::Common,
    };
    let targets = enumerate::ports(&args.host, &spec)?;

    let mut job = ScanJob::new(targets)
        .concurrency(ctx.concurrency)
        .timeout(ctx.timeout);
    if let Some(ms) = args.deadline_ms {
        job = job.deadline(Duration::from_millis(ms));
    }
    super::cancel_on_ctrl_c(&job);

    if ctx.output_format == OutputFormat::Pretty {
        println!(
            "{} {} ({} ports, {} workers)",
            "Scanning".bold(),
            args.host.cyan(),
            job.targets.len(),
            job.concurrency.min(job.targets.len())
        );
        println!();
    }

    let report = run_scan(&job, Arc::new(TcpProber::new())).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => print_pretty(&ctx, &report),
    }

    ctx.export_json(&report)?;

    Ok(())
}

fn print_pretty(ctx: &Context, report: &ScanReport) {
    for result in &report.results {
        if !result.status.is_positive() && !ctx.verbose {
            continue;
        }

        let port = result.target.port_number().unwrap_or_default();
        let endpoint = format!("{port}/tcp");
        match result.status {
            ProbeStatus::Open => {
                let service = result.service.as_deref().unwrap_or("unknown");
                println!(
                    "  {:<10} {} {:<14} {}ms",
                    endpoint,
                    status_tag(result.status),
                    service,
                    result.elapsed.as_millis()
                );
            }
            ProbeStatus::Error => {
                let detail = result.detail.as_deref().unwrap_or("unknown fault");
                println!(
                    "  {:<10} {} {}",
                    endpoint,
                    status_tag(result.status),
                    detail.dimmed()
                );
            }
            _ => {
                println!("  {:<10} {}", endpoint, status_tag(result.status));
            }
        }
    }

    let t = &report.tally;
    println!();
    println!(
        "{} open, {} closed, {} timed out, {} errors in {:.2}s",
        t.open.to_string().green().bold(),
        t.closed,
        t.timed_out,
        t.errored,
        report.duration.as_secs_f64()
    );

    if report.partial {
        println!(
            "{}",
            format!(
                "Partial scan: {} of {} targets probed.",
                report.results.len(),
                report.requested
            )
            .yellow()
        );
    }
}
