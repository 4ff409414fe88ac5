//! Parser for gazetteer alias tables.
//!
//! Format, one region per line:
//! - `Canonical Region::alias|alias|alias`
//! - blank lines and lines starting with `#` are ignored
//!
//! The `::` / `|` layout matches the other `.dat` resources we ship so the
//! table stays easy to diff and extend by hand.

use crate::error::{GazetteerError, Result};
use crate::types::GazetteerEntry;
use std::fs;
use std::path::Path;

/// Parse a gazetteer table from its text form.
///
/// `file` is only used for error messages.
pub fn parse_entries(content: &str, file: &str) -> Result<Vec<GazetteerEntry>> {
    let mut entries = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
            continue;
        }

        let (region, aliases) = line_trimmed
            .split_once("::")
            .ok_or_else(|| GazetteerError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing '::' separator".to_string(),
            })?;

        let region = region.trim();
        if region.is_empty() {
            return Err(GazetteerError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Missing canonical region".to_string(),
            });
        }

        let aliases = parse_aliases(aliases);
        if aliases.is_empty() {
            return Err(GazetteerError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Region '{}' has no aliases", region),
            });
        }

        entries.push(GazetteerEntry::new(region, aliases));
    }

    Ok(entries)
}

/// Parse a gazetteer table from disk.
pub fn parse_file(path: &Path) -> Result<Vec<GazetteerEntry>> {
    if !path.exists() {
        return Err(GazetteerError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_entries(&content, &file)
}

/// Split a pipe-separated alias list, dropping empty items.
///
/// Example: "manali| shimla ||kasol" -> ["manali", "shimla", "kasol"]
fn parse_aliases(s: &str) -> Vec<&str> {
    s.split('|')
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .collect()
}
