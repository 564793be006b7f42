// src/app/mod.rs

use anyhow::Result;
use std::future::Future;
use std::io::Write;
use tracing::{debug, info};
use url::Url;

use crate::config::Args;
use crate::extract::extract_records;
use crate::output;

/// How a run ended. Every variant is a clean exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Bad symbol, date or provider; nothing was fetched.
    ConfigError,
    /// The page (or the empty document after a failed fetch) had no data rows.
    NoData,
    Printed(usize),
}

/// Resolve the target, fetch it with `fetch`, and print the rows to `out`.
///
/// User-facing problems go to `err`. A failed fetch is reported and then
/// parsed as an empty document. Only write errors are returned.
pub async fn run<F, Fut, O, E>(args: &Args, fetch: F, out: &mut O, err: &mut E) -> Result<Outcome>
where
    F: FnOnce(Url) -> Fut,
    Fut: Future<Output = Result<String>>,
    O: Write,
    E: Write,
{
    // ─── 1) resolve target ───────────────────────────────────────────
    let target = match args.target() {
        Ok(t) => t,
        Err(e) => {
            writeln!(err, "{e}")?;
            return Ok(Outcome::ConfigError);
        }
    };
    let url = match target.url(&args.provider) {
        Ok(u) => u,
        Err(e) => {
            writeln!(err, "{e:#}")?;
            return Ok(Outcome::ConfigError);
        }
    };
    info!(symbol = %target.symbol, date = %target.date, %url, "resolved target");

    // ─── 2) fetch; a failed fetch parses as an empty page ────────────
    let html = match fetch(url.clone()).await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %format!("{e:#}"), "fetch failed");
            writeln!(err, "[{}] {}", e.root_cause(), url)?;
            String::new()
        }
    };

    // ─── 3) extract ──────────────────────────────────────────────────
    let records = extract_records(&html);
    if records.is_empty() {
        writeln!(err, "No data for this date: {}", target.date.format("%Y-%m-%d"))?;
        return Ok(Outcome::NoData);
    }
    info!(records = records.len(), "extracted");

    // ─── 4) print ────────────────────────────────────────────────────
    if args.json {
        output::dump_json(out, &records, &args.skip)?;
    } else {
        output::dump(out, &records, args.headings, &args.skip)?;
    }
    Ok(Outcome::Printed(records.len()))
}
