//! Client-side file validation.
//!
//! Files are routed to a kind-specific size cap by their declared MIME type
//! and rejected before any network call when the type is unsupported or the
//! payload exceeds the cap.

use crate::models::{MediaKind, SelectedFile};

const MIB: u64 = 1024 * 1024;

/// Default caps matching the public upload form: 25 MiB for images, 200 MiB
/// for videos.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 25 * MIB;
pub const DEFAULT_MAX_VIDEO_BYTES: u64 = 200 * MIB;

/// Validation errors raised before a file enters the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Unsupported file type: {content_type} (only image/* and video/* are accepted)")]
    UnsupportedType { content_type: String },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },
}

/// Kind-specific upload size caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_image_bytes: u64,
    pub max_video_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_video_bytes: DEFAULT_MAX_VIDEO_BYTES,
        }
    }
}

impl UploadLimits {
    pub fn new(max_image_bytes: u64, max_video_bytes: u64) -> Self {
        Self {
            max_image_bytes,
            max_video_bytes,
        }
    }

    fn cap_for(&self, kind: MediaKind) -> u64 {
        match kind {
            MediaKind::Image => self.max_image_bytes,
            MediaKind::Video => self.max_video_bytes,
        }
    }

    /// Validate a selected file: route it by MIME type and check the
    /// kind-specific cap. Returns the media kind on acceptance.
    pub fn validate(&self, file: &SelectedFile) -> Result<MediaKind, ValidationError> {
        let kind = file
            .kind()
            .ok_or_else(|| ValidationError::UnsupportedType {
                content_type: file.content_type.clone(),
            })?;

        let max = self.cap_for(kind);
        if file.size() > max {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max,
            });
        }

        Ok(kind)
    }
}
