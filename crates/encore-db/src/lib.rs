//! Database repositories for the upload log.
//!
//! Queries are dynamic (no sqlx macros) so no DATABASE_URL is needed at
//! compile time. Migrations live in the workspace `migrations/` directory
//! and are applied by the API service at startup.

pub mod upload_log;

pub use upload_log::{PgUploadLogRepository, UploadLogStore};
