use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/log-upload`.
///
/// `image_url`, `username`, `user_email`, and `cloudinary_public_id` are
/// required; the endpoint rejects the request with 400 before touching the
/// database when any of them is missing. `file_type` and `file_size` are
/// optional and default server-side to `"unknown"` and `0`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogUploadRequest {
    pub image_url: Option<String>,
    pub username: Option<String>,
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    pub cloudinary_public_id: Option<String>,
}

/// Successful response from the upload-log endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogUploadResponse {
    pub success: bool,
    /// Generated row id.
    pub id: i64,
    pub message: String,
}

/// A validated upload-log record, ready to insert. Produced by the endpoint
/// after the required-field check and optional-field defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUploadLog {
    pub image_url: String,
    pub username: String,
    pub user_email: String,
    pub file_type: String,
    pub file_size: i64,
    pub cloudinary_public_id: String,
}

impl LogUploadRequest {
    /// Names of the required fields that are missing or empty, in the order
    /// the endpoint reports them.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        fn absent(v: &Option<String>) -> bool {
            v.as_deref().map_or(true, |s| s.is_empty())
        }

        let mut missing = Vec::new();
        if absent(&self.image_url) {
            missing.push("image_url");
        }
        if absent(&self.username) {
            missing.push("username");
        }
        if absent(&self.user_email) {
            missing.push("user_email");
        }
        if absent(&self.cloudinary_public_id) {
            missing.push("cloudinary_public_id");
        }
        missing
    }

    /// Check required fields and apply optional-field defaults, producing an
    /// insertable record. On failure returns the missing field names.
    pub fn into_new_log(self) -> Result<NewUploadLog, Vec<&'static str>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(NewUploadLog {
            image_url: self.image_url.unwrap_or_default(),
            username: self.username.unwrap_or_default(),
            user_email: self.user_email.unwrap_or_default(),
            file_type: self.file_type.unwrap_or_else(|| "unknown".to_string()),
            file_size: self.file_size.unwrap_or(0),
            cloudinary_public_id: self.cloudinary_public_id.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> LogUploadRequest {
        LogUploadRequest {
            image_url: Some("https://res.example.com/v1/abc.jpg".to_string()),
            username: Some("Megan".to_string()),
            user_email: Some("megan@example.com".to_string()),
            file_type: Some("image".to_string()),
            file_size: Some(2048),
            cloudinary_public_id: Some("abc".to_string()),
        }
    }

    #[test]
    fn complete_request_has_no_missing_fields() {
        assert!(full_request().missing_fields().is_empty());
    }

    #[test]
    fn each_required_field_is_reported() {
        let mut req = full_request();
        req.image_url = None;
        assert_eq!(req.missing_fields(), vec!["image_url"]);

        let mut req = full_request();
        req.username = None;
        assert_eq!(req.missing_fields(), vec!["username"]);

        let mut req = full_request();
        req.user_email = Some(String::new());
        assert_eq!(req.missing_fields(), vec!["user_email"]);

        let mut req = full_request();
        req.cloudinary_public_id = None;
        assert_eq!(req.missing_fields(), vec!["cloudinary_public_id"]);
    }

    #[test]
    fn optional_fields_default_on_insert() {
        let mut req = full_request();
        req.file_type = None;
        req.file_size = None;
        let log = req.into_new_log().unwrap();
        assert_eq!(log.file_type, "unknown");
        assert_eq!(log.file_size, 0);
    }

    #[test]
    fn into_new_log_rejects_incomplete_requests() {
        let mut req = full_request();
        req.username = None;
        req.cloudinary_public_id = None;
        assert_eq!(
            req.into_new_log().unwrap_err(),
            vec!["username", "cloudinary_public_id"]
        );
    }

    #[test]
    fn request_serializes_with_wire_field_names() {
        let json = serde_json::to_value(full_request()).unwrap();
        for field in [
            "image_url",
            "username",
            "user_email",
            "file_type",
            "file_size",
            "cloudinary_public_id",
        ] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
    }
}
