// src/extract/mod.rs

//! Turns an options-chain page into classified rows.
//!
//! The page is tokenized as a flat stream of tag/text events (see [`events`]).
//! [`RecordExtractor`] runs those events through the [`state::ParseState`]
//! machine: tables whose class starts with `calls`/`puts` set the section,
//! `tr` rows whose class starts with `data-row` become one [`Record`] each.

pub mod events;
pub mod state;

use std::fmt;
use tracing::debug;

pub use events::{drive, has_class_prefix, Attribute, MarkupVisitor};
pub use state::{ParseState, RowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    Call,
    Put,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Call => "CALL",
            ContractKind::Put => "PUT",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One data row: the section it was found in plus its non-empty cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub kind: Option<ContractKind>,
    pub cells: Vec<String>,
}

impl Record {
    pub fn new(kind: Option<ContractKind>) -> Self {
        Self {
            kind,
            cells: Vec::new(),
        }
    }

    /// Flat field view: field 0 is the kind (empty when unclassified), then the cells.
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.kind.map_or("", |k| k.as_str()))
            .chain(self.cells.iter().map(String::as_str))
    }
}

/// Collects records from a stream of markup events.
#[derive(Debug, Default)]
pub struct RecordExtractor {
    state: ParseState,
    records: Vec<Record>,
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows that were never closed are dropped.
    pub fn finish(self) -> Vec<Record> {
        if let RowState::InRow(partial) = &self.state.row {
            debug!(cells = partial.cells.len(), "discarding unterminated row");
        }
        self.records
    }
}

impl MarkupVisitor for RecordExtractor {
    fn on_tag_open(&mut self, name: &str, attributes: &[Attribute]) {
        self.state = std::mem::take(&mut self.state).tag_open(name, attributes);
    }

    fn on_tag_close(&mut self, name: &str) {
        let (state, done) = std::mem::take(&mut self.state).tag_close(name);
        self.state = state;
        if let Some(record) = done {
            self.records.push(record);
        }
    }

    fn on_text(&mut self, content: &str) {
        self.state = std::mem::take(&mut self.state).text(content);
    }
}

/// Extract every complete data row from `markup`, in document order.
pub fn extract_records(markup: &str) -> Vec<Record> {
    let mut extractor = RecordExtractor::new();
    drive(markup, &mut extractor);
    let records = extractor.finish();
    debug!(records = records.len(), bytes = markup.len(), "extracted records");
    records
}
