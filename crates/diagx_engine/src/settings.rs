use std::path::PathBuf;

use encoding_rs::Encoding;

use crate::decode::{resolve_encodings, DecodeError, DEFAULT_ENCODING_LABELS};

/// Sheet row cap used by common spreadsheet formats.
pub const DEFAULT_MAX_ROWS_PER_TABLE: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSettings {
    /// Encoding labels tried in order by the reader.
    pub encodings: Vec<String>,
    /// Equipment tables spill into a new table beyond this many rows.
    pub max_rows_per_table: usize,
    /// Where uploads are staged. `None` means a fresh temporary directory.
    pub staging_dir: Option<PathBuf>,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            encodings: DEFAULT_ENCODING_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
            max_rows_per_table: DEFAULT_MAX_ROWS_PER_TABLE,
            staging_dir: None,
        }
    }
}

impl ExtractSettings {
    pub fn candidate_encodings(&self) -> Result<Vec<&'static Encoding>, DecodeError> {
        resolve_encodings(self.encodings.as_slice())
    }
}
