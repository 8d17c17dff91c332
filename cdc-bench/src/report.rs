//! Run report for the randomized workload.
//!
//! One text file per calendar day, appended to across runs: a timestamp
//! header, one `{sequence, table, kind, rows}` line per iteration, and a
//! trailing commit/rollback marker.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use table_def::TableName;

use crate::dml::DmlKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub sequence: u64,
    pub table: TableName,
    pub kind: DmlKind,
    pub rows: u64,
}

pub fn render_run(
    started: DateTime<Local>,
    entries: &[ReportEntry],
    committed: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(64));
    let _ = writeln!(out, "{}", started.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{:>6}  {:<24} {:<7} {:>10}", "SEQ", "TABLE", "DML", "ROWS");
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<7} {:>10}",
            entry.sequence,
            entry.table.as_str(),
            entry.kind.as_str(),
            entry.rows
        );
    }
    let _ = writeln!(
        out,
        "Result: {}",
        if committed { "COMMIT" } else { "ROLLBACK" }
    );
    out
}

/// Appends the run to the day's report file, creating the directory and
/// file as needed. Returns the path written to.
pub fn append_run(
    dir: &Path,
    started: DateTime<Local>,
    entries: &[ReportEntry],
    committed: bool,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("workload_{}.report", started.format("%Y%m%d")));
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    file.write_all(render_run(started, entries, committed).as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<ReportEntry> {
        vec![
            ReportEntry {
                sequence: 1,
                table: TableName::from("STRING_TEST"),
                kind: DmlKind::Insert,
                rows: 120,
            },
            ReportEntry {
                sequence: 2,
                table: TableName::from("NUMERIC_TEST"),
                kind: DmlKind::Delete,
                rows: 40,
            },
        ]
    }

    #[test]
    fn renders_header_rows_and_marker() {
        let rendered = render_run(Local::now(), &entries(), true);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("===="));
        assert!(lines[2].contains("SEQ"));
        assert!(lines[3].contains("STRING_TEST"));
        assert!(lines[3].contains("INSERT"));
        assert!(lines[4].contains("NUMERIC_TEST"));
        assert_eq!(lines.last().copied(), Some("Result: COMMIT"));

        let rolled_back = render_run(Local::now(), &[], false);
        assert!(rolled_back.ends_with("Result: ROLLBACK\n"));
    }

    #[test]
    fn appends_to_one_file_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let started = Local::now();
        let first = append_run(dir.path(), started, &entries(), true).unwrap();
        let second = append_run(dir.path(), started, &entries(), false).unwrap();
        assert_eq!(first, second);

        let content = std::fs::read_to_string(&first).unwrap();
        assert_eq!(content.matches("Result:").count(), 2);
        assert!(content.contains("Result: COMMIT"));
        assert!(content.contains("Result: ROLLBACK"));
    }
}
