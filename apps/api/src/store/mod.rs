//! Interview persistence.
//!
//! The importer commits all valid rows in one statement: the insert either
//! lands the whole filtered set or fails the import. Re-importing the same
//! sheet inserts duplicates — there is no dedup key on imported rows, by
//! product decision.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::NewInterview;

/// Write access to the interviews table. Carried in `AppState` as
/// `Arc<dyn InterviewStore>`.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Inserts every record in a single statement and returns the inserted
    /// row count.
    async fn insert_interviews(&self, rows: &[NewInterview]) -> Result<u64, AppError>;
}

pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn insert_interviews(&self, rows: &[NewInterview]) -> Result<u64, AppError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let user_ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
        let companies: Vec<String> = rows.iter().map(|r| r.company.clone()).collect();
        let roles: Vec<String> = rows.iter().map(|r| r.role.clone()).collect();
        let dates_applied: Vec<String> = rows.iter().map(|r| r.date_applied.clone()).collect();
        let statuses: Vec<String> = rows.iter().map(|r| r.status.to_string()).collect();
        let notes: Vec<String> = rows.iter().map(|r| r.notes.clone()).collect();
        let locations: Vec<String> = rows.iter().map(|r| r.location.clone()).collect();
        let sources: Vec<String> = rows.iter().map(|r| r.source.clone()).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO interviews
                (user_id, company, role, date_applied, status, notes, location, source)
            SELECT * FROM UNNEST(
                $1::uuid[], $2::text[], $3::text[], $4::text[],
                $5::text[], $6::text[], $7::text[], $8::text[]
            )
            "#,
        )
        .bind(user_ids)
        .bind(companies)
        .bind(roles)
        .bind(dates_applied)
        .bind(statuses)
        .bind(notes)
        .bind(locations)
        .bind(sources)
        .execute(&self.pool)
        .await?;

        info!("Inserted {} interview rows", result.rows_affected());
        Ok(result.rows_affected())
    }
}
