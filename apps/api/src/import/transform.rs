//! Row transformation: one raw spreadsheet row in, one canonical interview
//! record (or a skip/error verdict) out.
//!
//! This is the single transform behind both the preview endpoint and the
//! committed import; the two surfaces must never disagree on how a row reads.

use uuid::Uuid;

use crate::import::dates::normalize_date;
use crate::import::headers::ColumnMap;
use crate::models::interview::{InterviewStatus, NewInterview, IMPORT_SOURCE};

/// Verdict for a single data row.
///
/// Skips and failures are both terminal for the row but are reported through
/// different summary fields: a skip is an expected, benign exclusion (blank
/// required cell), a failure carries a reason into the caller-facing errors
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Imported(Box<NewInterview>),
    SkippedMissingRequired,
    Failed(String),
}

fn cell<'a>(row: &'a [String], index: Option<usize>) -> &'a str {
    index
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Transforms one raw row into a canonical record for `user_id`.
///
/// Rows whose company or date cell is empty or absent are skipped. A company
/// cell that holds only whitespace is not a usable name, so the row fails
/// with a reason instead. Columns absent from the sheet pass through as empty
/// strings; a missing status column defaults to `Applied`.
pub fn transform_row(row: &[String], columns: &ColumnMap, user_id: Uuid) -> RowOutcome {
    let company = cell(row, columns.company);
    let date_raw = cell(row, columns.date_applied);

    if company.is_empty() || date_raw.is_empty() {
        return RowOutcome::SkippedMissingRequired;
    }
    if company.trim().is_empty() {
        return RowOutcome::Failed("company cell is blank".to_string());
    }

    RowOutcome::Imported(Box::new(NewInterview {
        user_id,
        company: company.to_string(),
        role: cell(row, columns.role).to_string(),
        date_applied: normalize_date(date_raw),
        status: InterviewStatus::normalize(cell(row, columns.status)),
        notes: cell(row, columns.notes).to_string(),
        location: cell(row, columns.location).to_string(),
        source: IMPORT_SOURCE.to_string(),
    }))
}
