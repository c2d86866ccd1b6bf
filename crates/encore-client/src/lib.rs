//! Attendee-side client for the Encore media backend.
//!
//! Provides the session store (with swappable persistence), the identity
//! provider adapters, the media-host and log-endpoint HTTP clients, and the
//! upload pipeline tying them together.

pub mod identity;
pub mod log_api;
pub mod media_host;
pub mod pipeline;
pub mod session;

pub use identity::{FacebookIdentityProvider, GoogleIdentityProvider, IdentityProvider};
pub use log_api::{LogApiClient, UploadSink};
pub use media_host::{CloudinaryClient, MediaHost};
pub use pipeline::{BatchReport, Rejection, Selection, UploadOutcome, UploadPipeline, UploadStatus};
pub use session::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SessionStore};
