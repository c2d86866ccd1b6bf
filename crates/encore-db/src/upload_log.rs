use async_trait::async_trait;
use encore_core::models::NewUploadLog;
use encore_core::AppError;
use sqlx::PgPool;

/// Persistence seam for the upload-log endpoint. The API is written against
/// this trait so handler tests can run with an in-memory store.
#[async_trait]
pub trait UploadLogStore: Send + Sync {
    /// Insert one upload record with a server-assigned timestamp and return
    /// the generated row id.
    async fn insert(&self, log: NewUploadLog) -> Result<i64, AppError>;
}

/// Postgres-backed upload log.
#[derive(Clone)]
pub struct PgUploadLogRepository {
    pool: PgPool,
}

impl PgUploadLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadLogStore for PgUploadLogRepository {
    async fn insert(&self, log: NewUploadLog) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO karaoke_image_data
            (image_url, username, user_email, file_type, file_size, cloudinary_public_id, upload_date)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id
            "#,
        )
        .bind(&log.image_url)
        .bind(&log.username)
        .bind(&log.user_email)
        .bind(&log.file_type)
        .bind(log.file_size)
        .bind(&log.cloudinary_public_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id, file_type = %log.file_type, "Upload logged");

        Ok(id)
    }
}
