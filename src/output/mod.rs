// src/output/mod.rs

use anyhow::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::io::Write;

use crate::extract::Record;

pub const HEADINGS: [&str; 12] = [
    "Type",
    "ID",
    "Last Trade",
    "Strike",
    "Price",
    "Bid",
    "Ask",
    "Chg",
    "% Chg",
    "Vol",
    "OI",
    "IV",
];

/// Field 1 is the contract ID, left out unless asked for.
pub fn default_skip() -> BTreeSet<usize> {
    BTreeSet::from([1])
}

/// Tab-join the fields whose position is not in `skip`.
pub fn to_line<'a, I>(fields: I, skip: &BTreeSet<usize>) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    fields
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !skip.contains(i))
        .map(|(_, v)| v)
        .collect::<Vec<_>>()
        .join("\t")
}

/// Write the optional headings line followed by one line per record.
pub fn dump<W: Write>(
    out: &mut W,
    records: &[Record],
    headings: bool,
    skip: &BTreeSet<usize>,
) -> Result<()> {
    if headings {
        writeln!(out, "{}", to_line(HEADINGS, skip))?;
    }
    for record in records {
        writeln!(out, "{}", to_line(record.fields(), skip))?;
    }
    out.flush()?;
    Ok(())
}

fn heading_for(i: usize) -> String {
    HEADINGS
        .get(i)
        .map(|h| h.to_string())
        .unwrap_or_else(|| format!("col{i}"))
}

/// A record viewed as a JSON object keyed by heading, in column order.
pub struct JsonRecord<'a> {
    pub record: &'a Record,
    pub skip: &'a BTreeSet<usize>,
}

impl Serialize for JsonRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (i, v) in self.record.fields().enumerate() {
            if !self.skip.contains(&i) {
                map.serialize_entry(&heading_for(i), v)?;
            }
        }
        map.end()
    }
}

pub fn to_json(record: &Record, skip: &BTreeSet<usize>) -> Result<Value> {
    Ok(serde_json::to_value(JsonRecord { record, skip })?)
}

/// JSON Lines rendering of `records`.
pub fn dump_json<W: Write>(out: &mut W, records: &[Record], skip: &BTreeSet<usize>) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, &JsonRecord { record, skip })?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
