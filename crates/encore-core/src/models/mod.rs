pub mod identity;
pub mod media;
pub mod upload_log;

pub use identity::{Identity, Provider};
pub use media::{HostedMedia, MediaKind, SelectedFile};
pub use upload_log::{LogUploadRequest, LogUploadResponse, NewUploadLog};
