//! Bulk import of orders from a form export, reconciled against the order
//! store by mobile number.
//!
//! The pipeline has two stages so parsing stays testable without a store:
//! `parse_candidates` folds the document into accepted candidates and
//! rejected rows with reasons, then `apply` upserts the accepted ones. A
//! failed upsert is logged and counted, never fatal; only an unreadable
//! input or an unloadable store fails the run.

use std::fmt;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{
    cli::ImportArgs,
    io_utils, row,
    settings::Settings,
    store::{JsonStore, OrderStore, OrderUpdate, UpsertOutcome},
};

// Fixed column layout of the form export. Columns past the mobile are
// ignored; column 0 is the form timestamp.
pub const MIN_COLUMNS: usize = 5;
pub const FULL_NAME_INDEX: usize = 1;
pub const TSHIRT_NAME_INDEX: usize = 2;
pub const SIZE_INDEX: usize = 3;
pub const MOBILE_INDEX: usize = 4;

/// One row that passed validation and is ready to upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 1-based line number, for operator-facing messages.
    pub line: usize,
    pub full_name: String,
    pub tshirt_name: String,
    pub size: String,
    pub mobile: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    ColumnCount(usize),
    MissingMobile,
    MissingFullName,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::ColumnCount(count) => {
                write!(f, "invalid column count ({count})")
            }
            RejectReason::MissingMobile => write!(f, "missing mobile"),
            RejectReason::MissingFullName => write!(f, "missing full name"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: RejectReason,
    /// Raw line text, so the operator can fix the source file.
    pub raw: String,
}

#[derive(Debug, Default, Clone)]
pub struct ParseOutcome {
    pub accepted: Vec<Candidate>,
    pub rejected: Vec<RejectedRow>,
}

/// Folds the document into candidates and rejections. The header line is
/// skipped (columns are addressed by fixed index, not by label) and blank
/// lines are ignored. Field values go through the same double-strip cleanup
/// as the diagnostic scan.
pub fn parse_candidates(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (idx, raw_line) in text.lines().enumerate() {
        if idx == 0 || raw_line.trim().is_empty() {
            continue;
        }
        let line = idx + 1;
        let parsed = row::split_row(raw_line);
        if parsed.fields.len() < MIN_COLUMNS {
            outcome.rejected.push(RejectedRow {
                line,
                reason: RejectReason::ColumnCount(parsed.fields.len()),
                raw: raw_line.to_string(),
            });
            continue;
        }
        let full_name = row::strip_field(&parsed.fields[FULL_NAME_INDEX]);
        let tshirt_name = row::strip_field(&parsed.fields[TSHIRT_NAME_INDEX]);
        let size = row::strip_field(&parsed.fields[SIZE_INDEX]);
        let mobile = row::strip_field(&parsed.fields[MOBILE_INDEX]);

        if mobile.is_empty() {
            outcome.rejected.push(RejectedRow {
                line,
                reason: RejectReason::MissingMobile,
                raw: raw_line.to_string(),
            });
            continue;
        }
        if full_name.is_empty() {
            outcome.rejected.push(RejectedRow {
                line,
                reason: RejectReason::MissingFullName,
                raw: raw_line.to_string(),
            });
            continue;
        }

        outcome.accepted.push(Candidate {
            line,
            full_name,
            tshirt_name,
            size,
            mobile,
        });
    }

    outcome
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
}

impl ImportSummary {
    pub fn upserted(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Upserts each candidate in file order, so a later row for the same mobile
/// wins within one run. A per-row store failure is logged with its line
/// context and the loop continues.
pub fn apply<S: OrderStore>(
    candidates: &[Candidate],
    store: &mut S,
    default_amount: f64,
) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for candidate in candidates {
        let update = OrderUpdate {
            full_name: &candidate.full_name,
            tshirt_name: &candidate.tshirt_name,
            size: &candidate.size,
        };
        match store.upsert(&candidate.mobile, update, default_amount) {
            Ok(UpsertOutcome::Inserted) => summary.inserted += 1,
            Ok(UpsertOutcome::Updated) => summary.updated += 1,
            Err(err) => {
                warn!(
                    "Line {}: upsert for mobile '{}' failed: {err}",
                    candidate.line, candidate.mobile
                );
                summary.failed += 1;
            }
        }
    }
    summary
}

pub fn execute(args: &ImportArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let text = io_utils::read_document(&args.input, encoding)?;

    let default_amount = match &args.settings {
        Some(path) => Settings::load_or_default(path)?.tshirt_price(),
        None => crate::store::DEFAULT_AMOUNT,
    };

    let outcome = parse_candidates(&text);
    for rejected in &outcome.rejected {
        warn!(
            "Line {}: skipping row ({}): {}",
            rejected.line, rejected.reason, rejected.raw
        );
    }
    info!(
        "Parsed {} candidate(s), rejected {} row(s) from {:?}",
        outcome.accepted.len(),
        outcome.rejected.len(),
        args.input
    );

    if args.dry_run {
        info!("Dry run: store untouched");
        return Ok(());
    }

    let mut store = JsonStore::load_or_default(&args.store)
        .with_context(|| format!("Loading order store {:?}", args.store))?;
    let summary = apply(&outcome.accepted, &mut store, default_amount);
    store
        .save(&args.store)
        .with_context(|| format!("Persisting order store {:?}", args.store))?;

    info!(
        "Imported/updated {} order(s) ({} inserted, {} updated, {} failed) -> {:?}",
        summary.upserted(),
        summary.inserted,
        summary.updated,
        summary.failed,
        args.store
    );
    Ok(())
}
