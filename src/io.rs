//! Reads provider logs from disk. Each log is read into memory in its
//! entirety, since every record borrows its hash from the log's buffer.
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RaceError, Result};

/// A provider log named on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    /// Provider name for the report
    pub name: String,
    /// Where the log lives
    pub path: PathBuf,
}

impl LogSource {
    /// `NAME=PATH` names the provider explicitly; a bare `PATH` is named after
    /// its file stem, so `Alchemy Subway.txt` becomes `Alchemy Subway`.
    /// An argument that names an existing file is always a `PATH`, and a
    /// `NAME` never contains a path separator, so `run=3/a.txt` is a path.
    #[must_use]
    pub fn from_arg(arg: &str) -> LogSource {
        let whole = Path::new(arg);
        if !whole.exists() {
            if let Some((name, path)) = arg.split_once('=') {
                if !name.is_empty() && !path.is_empty() && !name.contains(['/', '\\']) {
                    return LogSource { name: name.to_owned(), path: PathBuf::from(path) };
                }
            }
        }
        LogSource { name: provider_name(whole), path: whole.to_path_buf() }
    }
}

fn provider_name(path: &Path) -> String {
    match path.file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

/// Reads every source, in order. The first unreadable file stops the run
/// before any log is parsed.
pub fn read_logs(sources: &[LogSource]) -> Result<Vec<Vec<u8>>> {
    sources.iter().map(read_log).collect()
}

/// Returns the contents of `source`, decoded to UTF-8 if it is UTF-16, with
/// any Byte Order Mark removed.
pub fn read_log(source: &LogSource) -> Result<Vec<u8>> {
    let contents = fs::read(&source.path).map_err(|e| RaceError::InputUnavailable {
        provider: source.name.clone(),
        path: source.path.clone(),
        source: e,
    })?;
    Ok(strip_bom(decode_if_utf16(contents)))
}

/// Decode UTF-16 to UTF-8 if we see a UTF-16 Byte Order Mark at the beginning of `candidate`.
/// Otherwise return `candidate` unchanged
fn decode_if_utf16(candidate: Vec<u8>) -> Vec<u8> {
    // `decode_without_bom_handling` turns the UTF-16 BOM into a UTF-8 BOM, and
    // malformed sequences into the Unicode REPLACEMENT CHARACTER.
    if let Some((enc, _)) = encoding_rs::Encoding::for_bom(&candidate) {
        if [encoding_rs::UTF_16LE, encoding_rs::UTF_16BE].contains(&enc) {
            let (translated, _had_malformed_sequences) =
                enc.decode_without_bom_handling(&candidate);
            return translated.into_owned().into_bytes();
        }
    }
    return candidate;
}

const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";
fn strip_bom(mut contents: Vec<u8>) -> Vec<u8> {
    if contents.starts_with(BOM_BYTES) {
        contents.drain(..BOM_BYTES.len());
    }
    contents
}
