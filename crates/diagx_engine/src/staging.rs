use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use diagx_core::Category;
use diagx_logging::{diagx_debug, diagx_warn};
use tempfile::Builder;

use crate::persist::{ensure_output_dir, PersistError};
use crate::{RawFile, Upload};

/// Display name of an upload: its last path component.
pub fn display_name(upload_name: &str) -> &str {
    upload_name
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(upload_name)
}

/// Filesystem-safe rendition of an upload name, keeping the extension.
pub fn secure_filename(upload_name: &str) -> String {
    let mut cleaned: String = upload_name
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();

    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }
    if compacted.is_empty() {
        compacted = "upload".to_string();
    }
    let stem = compacted.split('.').next().unwrap_or_default();
    if is_reserved_windows_name(stem) {
        compacted.insert(stem.len(), '_');
    }
    compacted
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Write one upload into `dir` under a unique, sanitized name.
pub fn stage_upload(
    dir: &Path,
    upload: &Upload,
    position: usize,
) -> Result<RawFile, PersistError> {
    let safe = secure_filename(display_name(&upload.filename));
    let (stem, suffix) = match safe.rfind('.') {
        Some(idx) if idx > 0 => (&safe[..idx], &safe[idx..]),
        _ => (safe.as_str(), ""),
    };
    let prefix = format!("{stem}-");
    let mut tmp = Builder::new()
        .prefix(&prefix)
        .suffix(suffix)
        .tempfile_in(dir)?;
    tmp.write_all(&upload.bytes)?;
    tmp.flush()?;
    let (_file, path) = tmp.keep().map_err(|e| PersistError::Io(e.error))?;
    diagx_debug!("Staged {} at {:?}", upload.filename, path);
    Ok(RawFile {
        path,
        filename: display_name(&upload.filename).to_string(),
        category: upload.category,
        position,
    })
}

/// Stage every upload, skipping (and logging) the ones that cannot be written.
/// Positions count every upload of a category, staged or not.
pub fn stage_uploads(dir: &Path, uploads: &[Upload]) -> Result<Vec<RawFile>, PersistError> {
    ensure_output_dir(dir)?;
    let mut staged = Vec::with_capacity(uploads.len());
    let mut seen: BTreeMap<Category, usize> = BTreeMap::new();
    for upload in uploads {
        let position = seen.entry(upload.category).or_default();
        *position += 1;
        match stage_upload(dir, upload, *position) {
            Ok(raw) => staged.push(raw),
            Err(err) => diagx_warn!("Could not stage {}: {}", upload.filename, err),
        }
    }
    Ok(staged)
}

/// Removes the staged file when dropped, whatever the processing result.
pub struct StagedFileGuard {
    path: PathBuf,
}

impl StagedFileGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Drop for StagedFileGuard {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => diagx_warn!("Failed to remove staged file {:?}: {}", self.path, err),
        }
    }
}
