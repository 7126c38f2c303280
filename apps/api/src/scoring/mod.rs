//! Resume heuristics: text parsing and job-description relevance scoring.

pub mod handlers;
pub mod relevance;
pub mod resume;
