use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::submissions::models::{
    reminder, Coordinates, NewSubmission, Submission, SubmissionContent, SubmissionKind,
    SubmissionStatus, Submitter, Workflow,
};

/// Storage for submissions, one collection per kind
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Persist a new record. Assigns `id`, `submitted_at` and `updated_at`.
    async fn create(&self, data: &NewSubmission) -> Result<Submission>;

    async fn get_by_id(&self, kind: SubmissionKind, id: Uuid) -> Result<Option<Submission>>;

    /// Full replace of content and workflow. Identity columns are never written.
    async fn update(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        record: &Submission,
    ) -> Result<Submission>;

    async fn list_by_submitter(
        &self,
        kind: SubmissionKind,
        user_id: &str,
    ) -> Result<Vec<Submission>>;

    async fn list_by_status(
        &self,
        kind: SubmissionKind,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>>;

    /// Records whose earliest unsent reminder fires at or before `now`, earliest first.
    /// Records holding only future reminders never take a slot in the batch.
    async fn list_with_due_reminders(
        &self,
        kind: SubmissionKind,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Submission>>;
}

const COLUMNS: &str = r#"
    id, submitted_by, submitter_name, submitter_email,
    title, description, location, address, latitude, longitude,
    contact_email, contact_phone, target_audience, duration_estimate, notes,
    requirements, details, checklist, reminders, heads, image,
    status, reviewed_at, reviewed_by, admin_comments, rejection_reason, audit_trail,
    submitted_at, updated_at
"#;

/// Postgres-backed repository
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn table(kind: SubmissionKind) -> &'static str {
        kind.descriptor().collection
    }

    fn decode(kind: SubmissionKind, row: &PgRow) -> std::result::Result<Submission, sqlx::Error> {
        let latitude: Option<f64> = row.try_get("latitude")?;
        let longitude: Option<f64> = row.try_get("longitude")?;
        let coordinates = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        let Json(details) = row.try_get("details")?;
        let Json(checklist) = row.try_get("checklist")?;
        let Json(reminders) = row.try_get("reminders")?;
        let Json(heads) = row.try_get("heads")?;
        let Json(audit_trail) = row.try_get("audit_trail")?;

        let submission = Submission {
            id: row.try_get("id")?,
            submitter: Submitter {
                user_id: row.try_get("submitted_by")?,
                name: row.try_get("submitter_name")?,
                email: row.try_get("submitter_email")?,
            },
            content: SubmissionContent {
                title: row.try_get("title")?,
                description: row.try_get("description")?,
                location: row.try_get("location")?,
                address: row.try_get("address")?,
                coordinates,
                contact_email: row.try_get("contact_email")?,
                contact_phone: row.try_get("contact_phone")?,
                target_audience: row.try_get("target_audience")?,
                duration_estimate: row.try_get("duration_estimate")?,
                notes: row.try_get("notes")?,
                requirements: row.try_get("requirements")?,
                details,
                checklist,
                reminders,
                heads,
                image: row.try_get("image")?,
            },
            workflow: Workflow {
                status: row.try_get("status")?,
                reviewed_at: row.try_get("reviewed_at")?,
                reviewed_by: row.try_get("reviewed_by")?,
                admin_comments: row.try_get("admin_comments")?,
                rejection_reason: row.try_get("rejection_reason")?,
                audit_trail,
            },
            submitted_at: row.try_get("submitted_at")?,
            updated_at: row.try_get("updated_at")?,
        };

        if submission.kind() != kind {
            return Err(sqlx::Error::Decode(
                format!(
                    "{} row {} holds {} details",
                    Self::table(kind),
                    submission.id,
                    submission.kind()
                )
                .into(),
            ));
        }

        Ok(submission)
    }

    fn decode_all(kind: SubmissionKind, rows: &[PgRow]) -> Result<Vec<Submission>> {
        rows.iter()
            .map(|row| Self::decode(kind, row).map_err(AppError::Database))
            .collect()
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    async fn create(&self, data: &NewSubmission) -> Result<Submission> {
        let kind = data.content.kind();
        let content = &data.content;
        let workflow = &data.workflow;

        let sql = format!(
            r#"
            INSERT INTO {} (
                submitted_by, submitter_name, submitter_email,
                title, description, location, address, latitude, longitude,
                contact_email, contact_phone, target_audience, duration_estimate, notes,
                requirements, details, checklist, reminders, heads, image,
                status, reviewed_at, reviewed_by, admin_comments, rejection_reason, audit_trail,
                next_reminder_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27)
            RETURNING {}
            "#,
            Self::table(kind),
            COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&data.submitter.user_id)
            .bind(&data.submitter.name)
            .bind(&data.submitter.email)
            .bind(&content.title)
            .bind(&content.description)
            .bind(&content.location)
            .bind(&content.address)
            .bind(content.coordinates.map(|c| c.latitude))
            .bind(content.coordinates.map(|c| c.longitude))
            .bind(&content.contact_email)
            .bind(&content.contact_phone)
            .bind(&content.target_audience)
            .bind(&content.duration_estimate)
            .bind(&content.notes)
            .bind(&content.requirements)
            .bind(Json(&content.details))
            .bind(Json(&content.checklist))
            .bind(Json(&content.reminders))
            .bind(Json(&content.heads))
            .bind(&content.image)
            .bind(workflow.status)
            .bind(workflow.reviewed_at)
            .bind(&workflow.reviewed_by)
            .bind(&workflow.admin_comments)
            .bind(&workflow.rejection_reason)
            .bind(Json(&workflow.audit_trail))
            .bind(reminder::next_due_at(&content.reminders))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create {} submission: {:?}", kind, e);
                AppError::Database(e)
            })?;

        let submission = Self::decode(kind, &row).map_err(AppError::Database)?;

        tracing::info!(
            "Created {} submission: {} by user: {} ({})",
            kind,
            submission.id,
            submission.submitter.user_id,
            submission.status()
        );

        Ok(submission)
    }

    async fn get_by_id(&self, kind: SubmissionKind, id: Uuid) -> Result<Option<Submission>> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, Self::table(kind));

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {} submission {}: {:?}", kind, id, e);
                AppError::Database(e)
            })?;

        row.map(|r| Self::decode(kind, &r).map_err(AppError::Database))
            .transpose()
    }

    async fn update(
        &self,
        kind: SubmissionKind,
        id: Uuid,
        record: &Submission,
    ) -> Result<Submission> {
        let content = &record.content;
        let workflow = &record.workflow;

        let sql = format!(
            r#"
            UPDATE {}
            SET
                title = $2, description = $3, location = $4, address = $5,
                latitude = $6, longitude = $7,
                contact_email = $8, contact_phone = $9, target_audience = $10,
                duration_estimate = $11, notes = $12,
                requirements = $13, details = $14, checklist = $15, reminders = $16,
                heads = $17, image = $18,
                status = $19, reviewed_at = $20, reviewed_by = $21,
                admin_comments = $22, rejection_reason = $23, audit_trail = $24,
                next_reminder_at = $25,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            Self::table(kind),
            COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&content.title)
            .bind(&content.description)
            .bind(&content.location)
            .bind(&content.address)
            .bind(content.coordinates.map(|c| c.latitude))
            .bind(content.coordinates.map(|c| c.longitude))
            .bind(&content.contact_email)
            .bind(&content.contact_phone)
            .bind(&content.target_audience)
            .bind(&content.duration_estimate)
            .bind(&content.notes)
            .bind(&content.requirements)
            .bind(Json(&content.details))
            .bind(Json(&content.checklist))
            .bind(Json(&content.reminders))
            .bind(Json(&content.heads))
            .bind(&content.image)
            .bind(workflow.status)
            .bind(workflow.reviewed_at)
            .bind(&workflow.reviewed_by)
            .bind(&workflow.admin_comments)
            .bind(&workflow.rejection_reason)
            .bind(Json(&workflow.audit_trail))
            .bind(reminder::next_due_at(&content.reminders))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update {} submission {}: {:?}", kind, id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Submission {} not found", id)))?;

        let submission = Self::decode(kind, &row).map_err(AppError::Database)?;
        tracing::info!(
            "Updated {} submission: {} ({})",
            kind,
            id,
            submission.status()
        );

        Ok(submission)
    }

    async fn list_by_submitter(
        &self,
        kind: SubmissionKind,
        user_id: &str,
    ) -> Result<Vec<Submission>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE submitted_by = $1 ORDER BY updated_at DESC",
            COLUMNS,
            Self::table(kind)
        );

        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {} submissions for {}: {:?}", kind, user_id, e);
                AppError::Database(e)
            })?;

        Self::decode_all(kind, &rows)
    }

    async fn list_by_status(
        &self,
        kind: SubmissionKind,
        status: SubmissionStatus,
    ) -> Result<Vec<Submission>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE status = $1 ORDER BY submitted_at ASC",
            COLUMNS,
            Self::table(kind)
        );

        let rows = sqlx::query(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {} {} submissions: {:?}", status, kind, e);
                AppError::Database(e)
            })?;

        Self::decode_all(kind, &rows)
    }

    async fn list_with_due_reminders(
        &self,
        kind: SubmissionKind,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Submission>> {
        let sql = format!(
            r#"
            SELECT {} FROM {}
            WHERE next_reminder_at IS NOT NULL AND next_reminder_at <= $1
            ORDER BY next_reminder_at ASC
            LIMIT $2
            "#,
            COLUMNS,
            Self::table(kind)
        );

        let rows = sqlx::query(&sql)
            .bind(now)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {} submissions with due reminders: {:?}", kind, e);
                AppError::Database(e)
            })?;

        Self::decode_all(kind, &rows)
    }
}
