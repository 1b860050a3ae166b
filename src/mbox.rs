//! Mbox archive reading.
//!
//! Splits an mbox file into raw RFC 822 records. Tolerant of mixed line
//! endings, a UTF-8 BOM and `From ` lines not preceded by a blank line.

use crate::error::{ParseError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Split an mbox archive into records.
///
/// Each record starts after its `From ` separator line; the separator is not
/// part of the record.
#[must_use]
pub fn split_mbox(data: &[u8]) -> Vec<&[u8]> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut records = Vec::new();
    let mut record_start: Option<usize> = None;
    let mut prev_line_was_empty = true;
    let mut offset = 0;

    while offset < data.len() {
        let line_end = data[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(data.len(), |pos| offset + pos + 1);
        let line = &data[offset..line_end];

        if is_mbox_separator(line) {
            if !prev_line_was_empty {
                warn!(offset, "Found 'From ' separator without preceding blank line");
            }
            if let Some(start) = record_start {
                records.push(&data[start..offset]);
            }
            record_start = Some(line_end);
        }

        prev_line_was_empty = is_blank_line(line);
        offset = line_end;
    }

    if let Some(start) = record_start {
        records.push(&data[start..]);
    }

    debug!(count = records.len(), "Split mbox archive");
    records
}

/// Read an mbox file and return its records as owned buffers
pub fn read_mbox(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| ParseError::io(path, e))?;
    Ok(split_mbox(&data).into_iter().map(<[u8]>::to_vec).collect())
}

/// List the `.mbox` files directly inside `dir`, sorted by path
pub fn find_mbox_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| ParseError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ParseError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "mbox") {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Check whether a line is an mbox separator (`From ` at the start)
fn is_mbox_separator(line: &[u8]) -> bool {
    line.starts_with(b"From ")
}

/// Check whether a line is blank (empty or only whitespace / CR / LF)
fn is_blank_line(line: &[u8]) -> bool {
    line.iter()
        .all(|&b| b == b'\n' || b == b'\r' || b == b' ' || b == b'\t')
}
