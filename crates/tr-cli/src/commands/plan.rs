//! Plan command: spreading planned hours across ISO weeks.

use std::fmt::Write as _;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tr_core::{RawAllocation, WeekDistribution, distribute, parse_allocations};

use super::util::load_json;

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// JSON file with resource allocations (`-` for stdin).
    #[arg(short, long)]
    pub input: PathBuf,

    /// List hours per project instead of summing them.
    #[arg(long)]
    pub by_project: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Formats a distribution as a plain-text table.
pub fn format_plan(distribution: &WeekDistribution) -> String {
    let mut output = String::new();
    match distribution {
        WeekDistribution::Total(weeks) => {
            if weeks.is_empty() {
                writeln!(output, "No planned hours.").unwrap();
            }
            for (week, hours) in weeks {
                writeln!(output, "{week}  {hours:>8.2} h").unwrap();
            }
        }
        WeekDistribution::ByProject(weeks) => {
            if weeks.is_empty() {
                writeln!(output, "No planned hours.").unwrap();
            }
            for (week, shares) in weeks {
                writeln!(output, "{week}").unwrap();
                for share in shares {
                    let name = share.project_name.as_deref().unwrap_or("(no project)");
                    writeln!(output, "  {name:<24}{:>8.2} h", share.hours).unwrap();
                }
            }
        }
    }
    output
}

pub fn run<W: Write>(writer: &mut W, args: &PlanArgs) -> Result<()> {
    let raw: Vec<RawAllocation> = load_json(&args.input)?;
    let allocations = parse_allocations(raw)?;
    let distribution = distribute(&allocations, args.by_project)?;

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&distribution)?)?;
    } else {
        write!(writer, "{}", format_plan(&distribution))?;
    }
    Ok(())
}
