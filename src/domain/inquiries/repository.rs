//! Inquiries Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::database::Db;

use super::{
    errors::InquiriesServiceError,
    models::{Inquiry, InquiryStats, InquiryUpdate, InquiryUuid},
};

const CREATE_INQUIRY_SQL: &str = include_str!("sql/create_inquiry.sql");
const LIST_INQUIRIES_SQL: &str = include_str!("sql/list_inquiries.sql");
const UPDATE_INQUIRY_SQL: &str = include_str!("sql/update_inquiry.sql");
const DELETE_INQUIRY_SQL: &str = include_str!("sql/delete_inquiry.sql");
const INQUIRY_STATS_SQL: &str = include_str!("sql/inquiry_stats.sql");

/// Storage port for contact inquiries.
#[async_trait]
pub trait InquiriesRepository: Send + Sync {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), InquiriesServiceError>;

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, InquiriesServiceError>;

    /// Apply the populated fields of `update`, leaving the rest untouched.
    async fn update_inquiry(
        &self,
        inquiry: InquiryUuid,
        update: &InquiryUpdate,
        updated_at: Timestamp,
    ) -> Result<Inquiry, InquiriesServiceError>;

    /// Returns the number of rows removed (0 when the inquiry is unknown).
    async fn delete_inquiry(&self, inquiry: InquiryUuid) -> Result<u64, InquiriesServiceError>;

    async fn inquiry_stats(&self) -> Result<InquiryStats, InquiriesServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgInquiriesRepository {
    db: Db,
}

impl PgInquiriesRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InquiriesRepository for PgInquiriesRepository {
    async fn insert_inquiry(&self, inquiry: &Inquiry) -> Result<(), InquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        query(CREATE_INQUIRY_SQL)
            .bind(inquiry.uuid.into_uuid())
            .bind(&inquiry.name)
            .bind(&inquiry.email)
            .bind(inquiry.phone.as_deref())
            .bind(inquiry.service.as_str())
            .bind(&inquiry.message)
            .bind(inquiry.status.as_str())
            .bind(inquiry.admin_notes.as_deref())
            .bind(SqlxTimestamp::from(inquiry.created_at))
            .bind(SqlxTimestamp::from(inquiry.updated_at))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, InquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let inquiries = query_as::<Postgres, Inquiry>(LIST_INQUIRIES_SQL)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(inquiries)
    }

    async fn update_inquiry(
        &self,
        inquiry: InquiryUuid,
        update: &InquiryUpdate,
        updated_at: Timestamp,
    ) -> Result<Inquiry, InquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = query_as::<Postgres, Inquiry>(UPDATE_INQUIRY_SQL)
            .bind(inquiry.into_uuid())
            .bind(update.status.map(|s| s.as_str()))
            .bind(update.admin_notes.as_deref())
            .bind(SqlxTimestamp::from(updated_at))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_inquiry(&self, inquiry: InquiryUuid) -> Result<u64, InquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_INQUIRY_SQL)
            .bind(inquiry.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn inquiry_stats(&self) -> Result<InquiryStats, InquiriesServiceError> {
        let mut tx = self.db.begin().await?;

        let row = query(INQUIRY_STATS_SQL).fetch_one(&mut *tx).await?;

        tx.commit().await?;

        Ok(InquiryStats {
            total: try_get_count(&row, "total")?,
            new: try_get_count(&row, "new")?,
            contacted: try_get_count(&row, "contacted")?,
            resolved: try_get_count(&row, "resolved")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Inquiry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let service: String = row.try_get("service")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: InquiryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            service: service.parse().map_err(|e| decode_error("service", e))?,
            message: row.try_get("message")?,
            status: status.parse().map_err(|e| decode_error("status", e))?,
            admin_notes: row.try_get("admin_notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_count(row: &PgRow, col: &str) -> Result<u64, InquiriesServiceError> {
    let count: i64 = row.try_get(col).map_err(InquiriesServiceError::from)?;

    u64::try_from(count)
        .map_err(|e| decode_error(col, e))
        .map_err(Into::into)
}

fn decode_error(
    col: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}
