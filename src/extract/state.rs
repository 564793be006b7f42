// src/extract/state.rs

use super::events::{has_class_prefix, Attribute};
use super::{ContractKind, Record};

const CALLS_PREFIX: &str = "calls";
const PUTS_PREFIX: &str = "puts";
const DATA_ROW_PREFIX: &str = "data-row";

/// Where the extractor is relative to a data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowState {
    #[default]
    Idle,
    InRow(Record),
}

/// Parse state for one extraction pass. Every handler consumes the current
/// state and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    pub row: RowState,
    /// Sticky: only replaced by a table whose class matches calls/puts.
    pub section: Option<ContractKind>,
}

impl ParseState {
    pub fn tag_open(self, name: &str, attributes: &[Attribute]) -> Self {
        match name {
            "table" => {
                let section = if has_class_prefix(attributes, CALLS_PREFIX) {
                    Some(ContractKind::Call)
                } else if has_class_prefix(attributes, PUTS_PREFIX) {
                    Some(ContractKind::Put)
                } else {
                    self.section
                };
                Self { section, ..self }
            }
            "tr" if has_class_prefix(attributes, DATA_ROW_PREFIX) => Self {
                row: RowState::InRow(Record::new(self.section)),
                ..self
            },
            _ => self,
        }
    }

    /// Returns the finished record when `name` closes an open data row.
    pub fn tag_close(self, name: &str) -> (Self, Option<Record>) {
        match (name, self.row) {
            ("tr", RowState::InRow(record)) => (
                Self {
                    row: RowState::Idle,
                    section: self.section,
                },
                Some(record),
            ),
            (_, row) => (
                Self {
                    row,
                    section: self.section,
                },
                None,
            ),
        }
    }

    pub fn text(self, content: &str) -> Self {
        let content = content.trim();
        match self.row {
            RowState::InRow(mut record) if !content.is_empty() => {
                record.cells.push(content.to_string());
                Self {
                    row: RowState::InRow(record),
                    ..self
                }
            }
            row => Self { row, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(value: &str) -> Vec<Attribute> {
        vec![("class".to_string(), value.to_string())]
    }

    #[test]
    fn test_table_classification_is_sticky() {
        let s = ParseState::default().tag_open("table", &class("calls-table"));
        assert_eq!(s.section, Some(ContractKind::Call));

        let s = s.tag_open("table", &class("decorative"));
        assert_eq!(s.section, Some(ContractKind::Call));

        let s = s.tag_open("table", &[]);
        assert_eq!(s.section, Some(ContractKind::Call));

        let s = s.tag_open("table", &class("w-100 putsTable"));
        assert_eq!(s.section, Some(ContractKind::Put));
    }

    #[test]
    fn test_calls_wins_over_puts_on_same_table() {
        let s = ParseState::default().tag_open("table", &class("puts calls"));
        assert_eq!(s.section, Some(ContractKind::Call));
    }

    #[test]
    fn test_prefix_over_matches() {
        let s = ParseState::default().tag_open("table", &class("callsExpired"));
        assert_eq!(s.section, Some(ContractKind::Call));
    }

    #[test]
    fn test_row_lifecycle() {
        let s = ParseState::default()
            .tag_open("table", &class("puts"))
            .tag_open("tr", &class("data-row"))
            .text("  \n ")
            .text(" 12.5 ");
        let (s, rec) = s.tag_close("td");
        assert!(rec.is_none());
        let (s, rec) = s.tag_close("tr");
        assert_eq!(s.row, RowState::Idle);
        assert_eq!(s.section, Some(ContractKind::Put));
        let rec = rec.expect("row closed");
        assert_eq!(rec.kind, Some(ContractKind::Put));
        assert_eq!(rec.cells, vec!["12.5"]);
    }

    #[test]
    fn test_close_without_open_is_noop() {
        let (s, rec) = ParseState::default().tag_close("tr");
        assert!(rec.is_none());
        assert_eq!(s, ParseState::default());
    }

    #[test]
    fn test_text_outside_row_discarded() {
        let s = ParseState::default().text("orphan");
        assert_eq!(s, ParseState::default());
    }

    #[test]
    fn test_plain_tr_does_not_open_row() {
        let s = ParseState::default().tag_open("tr", &class("header"));
        assert_eq!(s.row, RowState::Idle);
    }

    #[test]
    fn test_reopen_discards_partial_row() {
        let s = ParseState::default()
            .tag_open("tr", &class("data-row"))
            .text("stale")
            .tag_open("tr", &class("data-row"))
            .text("fresh");
        let (_, rec) = s.tag_close("tr");
        let rec = rec.expect("row closed");
        assert_eq!(rec.kind, None);
        assert_eq!(rec.cells, vec!["fresh"]);
    }
}
