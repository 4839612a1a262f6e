//! Loading list files into EntrySets.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::list::EntrySet;

/// Why a line was skipped during loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The token is not a valid IP address or CIDR range
    InvalidAddress,
    /// The line is not valid UTF-8
    EncodingError,
}

impl DiagnosticKind {
    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::InvalidAddress => "invalid address",
            DiagnosticKind::EncodingError => "encoding error",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One skipped or invalid line, recorded during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based line number in the source file
    pub line_number: u32,
    /// The offending line as read (lossily decoded for encoding errors)
    pub raw_text: String,
    /// Why the line was rejected
    pub kind: DiagnosticKind,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line_number, self.kind, self.raw_text)
    }
}

/// Summary counts for one load operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Total lines read from the file
    pub total_lines: usize,
    /// Valid unique entries kept
    pub valid: usize,
    /// Duplicate entries collapsed (not errors)
    pub duplicates: usize,
    /// Lines rejected with a diagnostic
    pub invalid: usize,
    /// Blank and full-comment lines (not errors)
    pub skipped: usize,
}

/// Aggregate result of loading one list file. Read-only once produced.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The resulting entry set
    pub set: EntrySet,
    /// Diagnostics for rejected lines, in file order
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Summary counts
    pub stats: LoadStats,
}

/// Result of loading every list file in a directory.
///
/// Reports are keyed by list name in a BTreeMap so display order is
/// alphabetical and stable regardless of directory iteration order.
#[derive(Debug)]
pub struct DirectoryReport {
    /// Per-list load reports, keyed by list name
    pub reports: BTreeMap<String, LoadReport>,
    /// Files that could not be read, with the failure for each
    pub failures: Vec<(PathBuf, Error)>,
}

impl DirectoryReport {
    /// Total valid entries across all loaded lists.
    pub fn total_entries(&self) -> usize {
        self.reports.values().map(|r| r.set.len()).sum()
    }
}

/// Load one list file into a [`LoadReport`].
///
/// The list name is the file stem. Blank and full-comment lines are skipped
/// silently; invalid tokens and undecodable lines become diagnostics; in-file
/// duplicates are collapsed first-wins and counted. Only an unreadable file
/// is a hard failure.
pub fn load(path: &Path) -> Result<LoadReport> {
    let bytes = fs::read(path).map_err(|source| Error::LoadFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let name = list_name(path);
    let report = parse_bytes(&bytes, &name);

    log::info!(
        "Loaded {}: {} entries, {} duplicates, {} invalid",
        name,
        report.stats.valid,
        report.stats.duplicates,
        report.stats.invalid
    );

    Ok(report)
}

/// Load every `*.txt` list file in a directory.
///
/// Each file is loaded independently; a file that cannot be read is recorded
/// in [`DirectoryReport::failures`] and does not abort its siblings. A
/// missing or unreadable directory is a hard failure.
pub fn load_all(dir: &Path) -> Result<DirectoryReport> {
    let read_dir = fs::read_dir(dir).map_err(|source| Error::LoadFailure {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = read_dir
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut reports = BTreeMap::new();
    let mut failures = Vec::new();

    for path in paths {
        match load(&path) {
            Ok(report) => {
                reports.insert(list_name(&path), report);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                failures.push((path, e));
            }
        }
    }

    Ok(DirectoryReport { reports, failures })
}

/// Parse list content that is already in memory.
///
/// Used by [`load`] and by callers that obtain list text some other way
/// (e.g. re-importing a structured export).
pub fn parse_bytes(bytes: &[u8], name: &str) -> LoadReport {
    let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
    // A trailing newline does not start a new line
    if bytes.last() == Some(&b'\n') {
        lines.pop();
    }

    let mut set = EntrySet::new(name);
    let mut diagnostics = Vec::new();
    let mut stats = LoadStats {
        total_lines: lines.len(),
        ..LoadStats::default()
    };

    for (idx, raw_line) in lines.iter().copied().enumerate() {
        let line_number = (idx + 1) as u32;
        let raw_line = match raw_line.strip_suffix(b"\r") {
            Some(stripped) => stripped,
            None => raw_line,
        };

        let line = match std::str::from_utf8(raw_line) {
            Ok(s) => s,
            Err(_) => {
                diagnostics.push(ParseDiagnostic {
                    line_number,
                    raw_text: String::from_utf8_lossy(raw_line).into_owned(),
                    kind: DiagnosticKind::EncodingError,
                });
                stats.invalid += 1;
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            stats.skipped += 1;
            continue;
        }

        match Entry::parse(trimmed, name, line_number) {
            Ok(entry) => {
                if set.push(entry) {
                    stats.valid += 1;
                } else {
                    // Duplicates are expected, not erroneous
                    stats.duplicates += 1;
                }
            }
            Err(_) => {
                log::warn!("{}: invalid address at line {}: {}", name, line_number, trimmed);
                diagnostics.push(ParseDiagnostic {
                    line_number,
                    raw_text: trimmed.to_string(),
                    kind: DiagnosticKind::InvalidAddress,
                });
                stats.invalid += 1;
            }
        }
    }

    LoadReport {
        set,
        diagnostics,
        stats,
    }
}

fn list_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_counts() {
        let content = b"# comment\n192.0.2.10\n198.51.100.0/24\nnot-an-ip\n192.0.2.10\n2001:db8::/32\n";
        let report = parse_bytes(content, "sample");

        assert_eq!(report.stats.total_lines, 6);
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(report.stats.valid, 3);
        assert_eq!(report.stats.duplicates, 1);
        assert_eq!(report.stats.invalid, 1);
        assert_eq!(report.set.len(), 3);

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].line_number, 4);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::InvalidAddress);
        assert_eq!(report.diagnostics[0].raw_text, "not-an-ip");
    }

    #[test]
    fn test_parse_bytes_blank_lines_and_crlf() {
        let content = b"\r\n192.0.2.1\r\n\r\n   \r\n10.0.0.0/8\r\n";
        let report = parse_bytes(content, "crlf");

        assert_eq!(report.stats.total_lines, 5);
        assert_eq!(report.stats.valid, 2);
        assert_eq!(report.stats.skipped, 3);
        assert_eq!(report.stats.invalid, 0);
    }

    #[test]
    fn test_parse_bytes_encoding_error_skips_line_only() {
        let mut content = Vec::new();
        content.extend_from_slice(b"192.0.2.1\n");
        content.extend_from_slice(&[0xff, 0xfe, 0xfd]);
        content.extend_from_slice(b"\n10.0.0.0/8\n");
        let report = parse_bytes(&content, "bad-bytes");

        assert_eq!(report.stats.valid, 2);
        assert_eq!(report.stats.invalid, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::EncodingError);
        assert_eq!(report.diagnostics[0].line_number, 2);
    }

    #[test]
    fn test_parse_bytes_inline_comment_is_invalid() {
        // Only full-comment lines are comments; trailing text after a token
        // makes the whole line invalid
        let report = parse_bytes(b"192.0.2.1 # seen today\n# real comment\n", "inline");

        assert_eq!(report.stats.valid, 0);
        assert_eq!(report.stats.invalid, 1);
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::InvalidAddress);
        assert_eq!(report.diagnostics[0].raw_text, "192.0.2.1 # seen today");
    }

    #[test]
    fn test_parse_bytes_signed_prefix_is_invalid() {
        let report = parse_bytes(b"192.0.2.0/+24\n", "signed");

        assert_eq!(report.stats.valid, 0);
        assert_eq!(report.stats.invalid, 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::InvalidAddress);
    }

    #[test]
    fn test_parse_bytes_no_trailing_newline() {
        let report = parse_bytes(b"192.0.2.1", "tail");
        assert_eq!(report.stats.total_lines, 1);
        assert_eq!(report.stats.valid, 1);
    }

    #[test]
    fn test_load_missing_file_is_load_failure() {
        let err = load(Path::new("/nonexistent/list.txt")).unwrap_err();
        assert!(matches!(err, Error::LoadFailure { .. }));
    }
}
