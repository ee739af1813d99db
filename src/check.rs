//! Read-only diagnostic scan over a form export.
//!
//! `scan_document` is a pure fold over the data lines; it never touches the
//! order store, so its counts can be checked against what an import of the
//! same file does. The command wrapper renders the report.

use std::{collections::BTreeMap, fmt};

use anyhow::Result;
use log::{info, warn};

use crate::{
    cli::CheckArgs,
    import::{MIN_COLUMNS, MOBILE_INDEX},
    io_utils, row, table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Fewer fields than the export shape requires; payload is the count.
    ColumnCount(usize),
    MissingMobile,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::ColumnCount(count) => {
                write!(f, "invalid column count ({count})")
            }
            InvalidReason::MissingMobile => write!(f, "missing mobile"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRow {
    /// 1-based line number in the document (the header is line 1).
    pub line: usize,
    pub reason: InvalidReason,
}

/// Aggregate results of one scan. All mobile frequencies are local to the
/// report; nothing is accumulated across calls.
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    pub valid_rows: usize,
    pub invalid: Vec<InvalidRow>,
    pub mobile_counts: BTreeMap<String, usize>,
}

impl ScanReport {
    /// Non-blank data lines considered, valid or not.
    pub fn data_rows(&self) -> usize {
        self.valid_rows + self.invalid.len()
    }

    pub fn unique_mobiles(&self) -> usize {
        self.mobile_counts.len()
    }

    /// Mobiles that appear more than once, with their counts.
    pub fn duplicates(&self) -> Vec<(&str, usize)> {
        self.mobile_counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(mobile, count)| (mobile.as_str(), *count))
            .collect()
    }

    /// `sum(count - 1)` over duplicated mobiles: the number of rows an
    /// import would collapse away.
    pub fn extra_duplicates(&self) -> usize {
        self.mobile_counts
            .values()
            .filter(|count| **count > 1)
            .map(|count| count - 1)
            .sum()
    }
}

/// Scans the full document text. Line 1 is the header and is skipped;
/// whitespace-only lines are skipped entirely. A row is invalid when it has
/// fewer than [`MIN_COLUMNS`] fields or an empty mobile; only valid rows
/// feed the mobile frequency map.
pub fn scan_document(text: &str) -> ScanReport {
    let mut report = ScanReport::default();

    for (idx, raw_line) in text.lines().enumerate() {
        if idx == 0 || raw_line.trim().is_empty() {
            continue;
        }
        let line = idx + 1;
        let parsed = row::split_row(raw_line);
        if parsed.fields.len() < MIN_COLUMNS {
            report.invalid.push(InvalidRow {
                line,
                reason: InvalidReason::ColumnCount(parsed.fields.len()),
            });
            continue;
        }
        let mobile = row::strip_field(&parsed.fields[MOBILE_INDEX]);
        if mobile.is_empty() {
            report.invalid.push(InvalidRow {
                line,
                reason: InvalidReason::MissingMobile,
            });
            continue;
        }
        *report.mobile_counts.entry(mobile).or_insert(0) += 1;
        report.valid_rows += 1;
    }

    report
}

pub fn execute(args: &CheckArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let text = io_utils::read_document(&args.input, encoding)?;
    let report = scan_document(&text);

    for invalid in &report.invalid {
        warn!("Line {}: {}", invalid.line, invalid.reason);
    }

    if !args.duplicates_only {
        println!("Total data rows: {}", report.data_rows());
        println!("Valid rows: {}", report.valid_rows);
        println!("Invalid rows: {}", report.invalid.len());
        println!("Unique mobiles: {}", report.unique_mobiles());
        println!("Extra duplicates: {}", report.extra_duplicates());
    }

    let duplicates = report.duplicates();
    if duplicates.is_empty() {
        if !args.duplicates_only {
            println!("No duplicate mobiles.");
        }
    } else {
        let headers = vec!["Mobile".to_string(), "Count".to_string()];
        let rows = duplicates
            .iter()
            .map(|(mobile, count)| vec![mobile.to_string(), count.to_string()])
            .collect::<Vec<_>>();
        table::print_table(&headers, &rows);
    }

    info!(
        "Scanned {:?}: {} valid, {} invalid, {} unique mobile(s)",
        args.input,
        report.valid_rows,
        report.invalid.len(),
        report.unique_mobiles()
    );
    Ok(())
}
