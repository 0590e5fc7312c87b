//! Command-line parsing for the closer.

use anyhow::{Context, bail};
use chrono::NaiveDate;

pub const USAGE: &str = "\
Usage:
  closer close <year> <month> [note...]  Close a month
  closer status <year> <month>           Show whether a month is closed
  closer list [year]                     List closed months, newest first
  closer check [YYYY-MM-DD]              Fail if the date's month is closed (default: today)";

/// A parsed closer invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Close a month.
    Close {
        year: i32,
        month: u32,
        note: Option<String>,
    },
    /// Report whether a month is closed.
    Status { year: i32, month: u32 },
    /// List closed months.
    List { year: Option<i32> },
    /// Check a business date against the lock; `None` means today.
    Check { date: Option<NaiveDate> },
}

impl Command {
    /// Parses the arguments that follow the program name.
    pub fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command\n\n{USAGE}");
        };

        match (name.as_str(), rest) {
            ("close", [year, month, note @ ..]) => Ok(Self::Close {
                year: parse_year(year)?,
                month: parse_month(month)?,
                note: (!note.is_empty()).then(|| note.join(" ")),
            }),
            ("status", [year, month]) => Ok(Self::Status {
                year: parse_year(year)?,
                month: parse_month(month)?,
            }),
            ("list", []) => Ok(Self::List { year: None }),
            ("list", [year]) => Ok(Self::List {
                year: Some(parse_year(year)?),
            }),
            ("check", []) => Ok(Self::Check { date: None }),
            ("check", [date]) => Ok(Self::Check {
                date: Some(
                    NaiveDate::parse_from_str(date, "%Y-%m-%d")
                        .with_context(|| format!("invalid date '{date}', expected YYYY-MM-DD"))?,
                ),
            }),
            _ => bail!("unrecognized arguments: {}\n\n{USAGE}", args.join(" ")),
        }
    }
}

fn parse_year(raw: &str) -> anyhow::Result<i32> {
    raw.parse()
        .with_context(|| format!("invalid year '{raw}'"))
}

fn parse_month(raw: &str) -> anyhow::Result<u32> {
    raw.parse()
        .with_context(|| format!("invalid month '{raw}'"))
}
