//! Week command: ISO week lookup for a date.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use tr_core::WeekKey;
use tr_core::record::parse_date;

#[derive(Debug, Args)]
pub struct WeekArgs {
    /// Date or timestamp (ISO 8601).
    pub date: String,
}

pub fn run<W: Write>(writer: &mut W, args: &WeekArgs) -> Result<()> {
    let key = WeekKey::of(parse_date(&args.date)?);
    writeln!(writer, "{}\t{key}", key.week)?;
    Ok(())
}
