// src/config/mod.rs

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use clap::Parser;
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

pub const DEFAULT_PROVIDER: &str = "https://finance.yahoo.com";

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Fetches options chain data for a stock symbol and prints it as TSV"
)]
pub struct Args {
    /// The stock symbol
    #[arg(long = "s", value_name = "SYMBOL")]
    pub symbol: Option<String>,

    /// The year (defaults to the current UTC year)
    #[arg(long = "y", value_name = "YEAR")]
    pub year: Option<i32>,

    /// The month as a number from 1 to 12
    #[arg(long = "m", value_name = "MONTH")]
    pub month: Option<u32>,

    /// The day
    #[arg(long = "d", value_name = "DAY")]
    pub day: Option<u32>,

    /// Show headings
    #[arg(long = "h")]
    pub headings: bool,

    /// Comma-separated zero-based field indices to leave out; empty keeps all
    #[arg(long, value_name = "LIST", default_value = "1", value_parser = parse_skip)]
    pub skip: BTreeSet<usize>,

    /// Print JSON lines instead of tab-separated text
    #[arg(long)]
    pub json: bool,

    /// Base URL of the quote provider
    #[arg(long, env = "OPTIONS_PROVIDER", default_value = DEFAULT_PROVIDER)]
    pub provider: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,
}

/// Symbol plus expiration date, the two things that select a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub symbol: String,
    pub date: NaiveDate,
}

impl Args {
    /// Resolve the target against today's UTC date.
    pub fn target(&self) -> Result<Target> {
        self.target_on(Utc::now().date_naive())
    }

    /// Missing date parts are taken from `today`.
    pub fn target_on(&self, today: NaiveDate) -> Result<Target> {
        let symbol = match self.symbol.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => bail!("Please enter a symbol."),
        };

        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());
        let day = self.day.unwrap_or(today.day());
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| anyhow!("Invalid date: {year}-{month:02}-{day:02}"))?;

        Ok(Target { symbol, date })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Target {
    /// Seconds since the epoch at UTC midnight of `date`.
    pub fn timestamp(&self) -> i64 {
        self.date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or_default()
    }

    /// `<provider>/quote/<SYMBOL>/options?date=<timestamp>`
    pub fn url(&self, provider: &str) -> Result<Url> {
        let mut url =
            Url::parse(provider).with_context(|| format!("parsing provider URL {}", provider))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("provider URL cannot take a path: {}", provider))?
            .pop_if_empty()
            .extend(["quote", self.symbol.as_str(), "options"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("date", &self.timestamp().to_string());
        Ok(url)
    }
}

fn parse_skip(s: &str) -> Result<BTreeSet<usize>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|e| format!("bad field index {part:?}: {e}"))
        })
        .collect()
}
