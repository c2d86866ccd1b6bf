use serde::{Deserialize, Serialize};

/// Media kind, determined from the declared MIME type. Only images and
/// videos enter the upload pipeline; everything else is rejected before any
/// network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Route a declared MIME type: `image/*` maps to Image, `video/*` to
    /// Video, anything else to None.
    pub fn from_content_type(content_type: &str) -> Option<MediaKind> {
        if content_type.starts_with("image/") {
            Some(MediaKind::Image)
        } else if content_type.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// Tag stored in the upload log (`image` or `video`; the endpoint itself
    /// defaults to `unknown` when no tag is supplied).
    pub fn tag(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Media-host endpoint segment for this kind.
    pub fn endpoint_segment(&self) -> &'static str {
        self.tag()
    }
}

/// A file selected for upload. Transient: exists only between selection and
/// either removal or successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display name (usually the original filename).
    pub name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw payload.
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_content_type(&self.content_type)
    }
}

/// Media-host response for a completed upload. Both values are opaque and
/// passed through unmodified to the upload log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedMedia {
    pub secure_url: String,
    pub public_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_prefix_routing() {
        assert_eq!(
            MediaKind::from_content_type("image/jpeg"),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_content_type("video/quicktime"),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_content_type("application/pdf"), None);
        assert_eq!(MediaKind::from_content_type("audio/mpeg"), None);
        // Prefix match, not substring match
        assert_eq!(MediaKind::from_content_type("text/image"), None);
    }

    #[test]
    fn kind_tags() {
        assert_eq!(MediaKind::Image.tag(), "image");
        assert_eq!(MediaKind::Video.tag(), "video");
    }

    #[test]
    fn selected_file_size_is_payload_length() {
        let file = SelectedFile::new("a.png", "image/png", vec![0u8; 1234]);
        assert_eq!(file.size(), 1234);
        assert_eq!(file.kind(), Some(MediaKind::Image));
    }
}
