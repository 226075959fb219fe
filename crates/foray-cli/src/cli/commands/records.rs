//! `foray records` - DNS record survey for one domain.

use anyhow::Result;
use colored::Colorize;
use foray::{DomainRecords, DomainSurvey};

use super::Context;
use crate::cli::args::RecordsArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: RecordsArgs) -> Result<()> {
    let survey = DomainSurvey::new();
    let records = survey.collect(&args.domain).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        OutputFormat::Pretty => print_pretty(&records),
    }

    ctx.export_json(&records)?;

    Ok(())
}

fn print_pretty(records: &DomainRecords) {
    println!("{} {}", "Domain:".bold(), records.domain.cyan());
    println!();

    if records.is_empty() {
        println!("  {}", "No records found.".dimmed());
        return;
    }

    let a: Vec<String> = records.a.iter().map(ToString::to_string).collect();
    let aaaa: Vec<String> = records.aaaa.iter().map(ToString::to_string).collect();

    print_section("A", &a);
    print_section("AAAA", &aaaa);
    print_section("MX", &records.mx);
    print_section("NS", &records.ns);
    print_section("TXT", &records.txt);
    print_section("SOA", &records.soa);
    print_section("CNAME", &records.cname);
}

fn print_section(label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }

    println!("  {}", label.bold());
    for value in values {
        println!("    {value}");
    }
    println!();
}
