//! Header resolution: mapping free-text spreadsheet column headers onto the
//! fixed semantic fields of an interview record.

/// Column positions resolved from a sheet's header row. `None` means no
/// header matched that field. Built once per sheet and reused for every row.
///
/// `company` and `date_applied` are required for a sheet to be importable;
/// the orchestrator enforces that and reports the headers it actually saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub company: Option<usize>,
    pub role: Option<usize>,
    pub date_applied: Option<usize>,
    pub status: Option<usize>,
    pub notes: Option<usize>,
    pub location: Option<usize>,
}

impl ColumnMap {
    pub fn has_required(&self) -> bool {
        self.company.is_some() && self.date_applied.is_some()
    }
}

fn contains_any(header: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| header.contains(needle))
}

/// Resolves semantic fields from header cells that have already been
/// lowercased and trimmed by the caller.
///
/// Each header is tested against the field predicates in a fixed priority
/// order (company, role, date applied, status, notes, location), so a column
/// maps to at most one field. Scanning left to right, the first header to
/// match a field claims it; later matches never overwrite an earlier one.
pub fn resolve_headers(headers: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (index, header) in headers.iter().enumerate() {
        if header.contains("company") {
            map.company.get_or_insert(index);
        } else if contains_any(header, &["role", "position", "title", "job"]) {
            map.role.get_or_insert(index);
        } else if contains_any(header, &["date", "applied", "application", "submit"])
            || header == "when"
        {
            map.date_applied.get_or_insert(index);
        } else if contains_any(header, &["status", "stage"]) {
            map.status.get_or_insert(index);
        } else if contains_any(header, &["note", "comment", "description"]) {
            map.notes.get_or_insert(index);
        } else if contains_any(header, &["location", "city", "remote", "place"]) {
            map.location.get_or_insert(index);
        }
    }

    map
}
