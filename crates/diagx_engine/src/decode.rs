use std::fs;
use std::io;
use std::path::Path;

use diagx_logging::diagx_debug;
use encoding_rs::Encoding;

use crate::ExtractError;

/// Candidate labels tried in order when no configuration overrides them.
///
/// WHATWG maps `iso-8859-1` onto `windows-1252`, so the last two collapse into
/// one decoder that accepts any byte sequence. Bytes 0x80..=0x9F therefore
/// decode as cp1252 glyphs (0x80 is `€`), not as the C1 controls of true Latin-1.
pub const DEFAULT_ENCODING_LABELS: [&str; 3] = ["utf-8", "iso-8859-1", "windows-1252"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("no candidate encodings configured")]
    NoCandidates,
    #[error("unknown encoding label {0:?}")]
    UnknownLabel(String),
    #[error("every candidate encoding failed (tried {})", .tried.join(", "))]
    AllCandidatesFailed { tried: Vec<String> },
}

/// Resolve encoding labels into decoders, keeping first-seen order and
/// dropping labels that resolve to an encoding already listed.
///
/// Labels follow WHATWG, so `latin1` and `iso-8859-1` yield `windows-1252`.
pub fn resolve_encodings<S: AsRef<str>>(
    labels: &[S],
) -> Result<Vec<&'static Encoding>, DecodeError> {
    let mut resolved: Vec<&'static Encoding> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.as_ref();
        let enc = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| DecodeError::UnknownLabel(label.to_string()))?;
        if !resolved.contains(&enc) {
            resolved.push(enc);
        }
    }
    if resolved.is_empty() {
        return Err(DecodeError::NoCandidates);
    }
    Ok(resolved)
}

/// Decode bytes with the first candidate that reports no malformed sequence.
pub fn decode_with_candidates(
    bytes: &[u8],
    candidates: &[&'static Encoding],
) -> Result<DecodedText, DecodeError> {
    if candidates.is_empty() {
        return Err(DecodeError::NoCandidates);
    }
    let mut tried = Vec::with_capacity(candidates.len());
    for enc in candidates {
        match enc.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => {
                return Ok(DecodedText {
                    text: text.into_owned(),
                    encoding_label: enc.name().to_string(),
                });
            }
            None => {
                diagx_debug!("Failed to decode with {}, trying next encoding", enc.name());
                tried.push(enc.name().to_string());
            }
        }
    }
    Err(DecodeError::AllCandidatesFailed { tried })
}

/// Read a whole file and decode it with the candidate list.
pub fn read_with_candidates(
    path: &Path,
    candidates: &[&'static Encoding],
) -> Result<DecodedText, ExtractError> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ExtractError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ExtractError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    decode_with_candidates(&bytes, candidates).map_err(|source| ExtractError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
