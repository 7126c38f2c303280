use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source tag stamped on every record created by the sheet importer.
pub const IMPORT_SOURCE: &str = "import";

/// Application pipeline stage. Declaration order matters: status
/// normalization tests candidates in this order and returns the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewStatus {
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl InterviewStatus {
    /// Match stems, one per variant, in declaration order. Stems rather than
    /// full names so that free text like "Interview scheduled" or "Rejection
    /// email" still lands on the right stage.
    const STEMS: [(InterviewStatus, &'static str); 4] = [
        (InterviewStatus::Applied, "appli"),
        (InterviewStatus::Interviewing, "interview"),
        (InterviewStatus::Offer, "offer"),
        (InterviewStatus::Rejected, "reject"),
    ];

    /// Maps free-text status cells onto a canonical stage. Unrecognized or
    /// empty input defaults to `Applied`.
    pub fn normalize(raw: &str) -> Self {
        let folded = raw.trim().to_lowercase();
        Self::STEMS
            .iter()
            .find(|(_, stem)| folded.contains(stem))
            .map(|(status, _)| *status)
            .unwrap_or(InterviewStatus::Applied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Applied => "Applied",
            InterviewStatus::Interviewing => "Interviewing",
            InterviewStatus::Offer => "Offer",
            InterviewStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized interview record ready for insertion, produced by the row
/// transformer. Never mutated after construction.
///
/// `date_applied` is a `YYYY-MM-DD` string when normalization succeeded,
/// empty when the cell was blank, and the original cell text when no
/// interpretation was possible (the importer preserves rather than corrupts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterview {
    pub user_id: Uuid,
    pub company: String,
    pub role: String,
    pub date_applied: String,
    pub status: InterviewStatus,
    pub notes: String,
    pub location: String,
    pub source: String,
}
