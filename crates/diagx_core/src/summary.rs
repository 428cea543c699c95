use serde::Serialize;

use crate::{Category, Cell};

/// Provenance of one processed file (or of one whole JSON-line batch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryEntry {
    EventLog {
        index: usize,
        filename: String,
        ip_device: String,
        system_name: String,
    },
    Syslog {
        index: usize,
        filename: String,
        system_name: String,
    },
    /// Link and equipment feeds report once per batch: the file count and the
    /// last file of the batch.
    Batch { file_count: usize, filename: String },
}

impl SummaryEntry {
    pub fn filename(&self) -> &str {
        match self {
            SummaryEntry::EventLog { filename, .. }
            | SummaryEntry::Syslog { filename, .. }
            | SummaryEntry::Batch { filename, .. } => filename,
        }
    }

    pub fn row(&self) -> Vec<Cell> {
        match self {
            SummaryEntry::EventLog {
                index,
                filename,
                ip_device,
                system_name,
            } => vec![
                Cell::from(*index),
                Cell::from(filename.as_str()),
                Cell::from(ip_device.as_str()),
                Cell::from(system_name.as_str()),
            ],
            SummaryEntry::Syslog {
                index,
                filename,
                system_name,
            } => vec![
                Cell::from(*index),
                Cell::from(filename.as_str()),
                Cell::from(system_name.as_str()),
            ],
            SummaryEntry::Batch {
                file_count,
                filename,
            } => vec![Cell::from(*file_count), Cell::from(filename.as_str())],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummarySection {
    pub category: Category,
    pub header: Vec<String>,
    pub entries: Vec<SummaryEntry>,
}

/// Per-request provenance ledger, one section per category present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    sections: Vec<SummarySection>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the section for `category`, creating it with its header on first use.
    pub fn section(&mut self, category: Category) -> &mut SummarySection {
        let idx = match self.sections.iter().position(|s| s.category == category) {
            Some(idx) => idx,
            None => {
                self.sections.push(SummarySection {
                    category,
                    header: category.summary_header(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx]
    }

    pub fn push(&mut self, category: Category, entry: SummaryEntry) {
        self.section(category).entries.push(entry);
    }

    pub fn sections(&self) -> &[SummarySection] {
        &self.sections
    }

    pub fn entries(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// Number of summary rows across all sections.
    pub fn total_files(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}
