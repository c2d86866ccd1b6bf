//! Upload pipeline.
//!
//! Per-file state machine: `selected -> validating -> (rejected | uploading)
//! -> (uploaded | upload_failed) -> (logged | log_failed)`. Rejected files
//! never enter the selection; a log row is written only after the host
//! upload succeeded.

use std::sync::Arc;

use anyhow::Result;
use encore_core::models::{Identity, LogUploadRequest, SelectedFile};
use encore_core::validation::{UploadLimits, ValidationError};

use crate::log_api::UploadSink;
use crate::media_host::MediaHost;

/// Username recorded when no identity is present.
pub const FALLBACK_USERNAME: &str = "Unknown User";
/// Email recorded when no identity is present.
pub const FALLBACK_EMAIL: &str = "unknown@email.com";

/// A file turned away at selection time, reported immediately and per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub file_name: String,
    pub reason: ValidationError,
}

/// The set of files waiting to be uploaded. Only validated files are held.
#[derive(Debug, Default)]
pub struct Selection {
    files: Vec<SelectedFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate candidates against the limits; accepted files join the
    /// selection, each rejected file is returned without blocking the rest.
    pub fn add_files(
        &mut self,
        candidates: impl IntoIterator<Item = SelectedFile>,
        limits: &UploadLimits,
    ) -> Vec<Rejection> {
        let mut rejections = Vec::new();
        for file in candidates {
            match limits.validate(&file) {
                Ok(_) => self.files.push(file),
                Err(reason) => rejections.push(Rejection {
                    file_name: file.name,
                    reason,
                }),
            }
        }
        rejections
    }

    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// Per-file result of a processed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Success { url: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub file_name: String,
    pub status: UploadStatus,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, UploadStatus::Success { .. })
    }
}

/// Summary of one processed batch: one outcome per file, in selection order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(UploadOutcome::is_success)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }
}

/// Drives a selection through upload and logging.
pub struct UploadPipeline {
    host: Arc<dyn MediaHost>,
    sink: Arc<dyn UploadSink>,
}

impl UploadPipeline {
    pub fn new(host: Arc<dyn MediaHost>, sink: Arc<dyn UploadSink>) -> Self {
        Self { host, sink }
    }

    /// Process every file in the selection, one at a time. Files are
    /// uploaded strictly sequentially; a batch holds at most one payload in
    /// flight. A failure at either the upload or the logging step is
    /// recorded as that file's outcome and the batch continues. When every
    /// outcome succeeded the selection is cleared; otherwise it is left
    /// intact so the failed files can be retried.
    pub async fn process(
        &self,
        selection: &mut Selection,
        identity: Option<&Identity>,
    ) -> BatchReport {
        let mut outcomes = Vec::with_capacity(selection.len());

        for file in selection.files() {
            let status = match self.upload_and_log(file, identity).await {
                Ok(url) => UploadStatus::Success { url },
                Err(e) => {
                    let error = format!("{:#}", e);
                    tracing::warn!(file = %file.name, error = %error, "Upload failed");
                    UploadStatus::Failed { error }
                }
            };
            outcomes.push(UploadOutcome {
                file_name: file.name.clone(),
                status,
            });
        }

        let report = BatchReport { outcomes };
        if report.all_succeeded() {
            selection.clear();
        }
        report
    }

    async fn upload_and_log(&self, file: &SelectedFile, identity: Option<&Identity>) -> Result<String> {
        let hosted = self.host.upload(file).await?;

        let request = LogUploadRequest {
            image_url: Some(hosted.secure_url.clone()),
            username: Some(
                identity.map_or_else(|| FALLBACK_USERNAME.to_string(), |i| i.name.clone()),
            ),
            user_email: Some(
                identity.map_or_else(|| FALLBACK_EMAIL.to_string(), |i| i.email.clone()),
            ),
            file_type: file.kind().map(|k| k.tag().to_string()),
            file_size: Some(file.size() as i64),
            cloudinary_public_id: Some(hosted.public_id),
        };

        // A failure past this point leaves the asset hosted with no log row;
        // nothing reconciles that.
        self.sink.log_upload(&request).await?;

        Ok(hosted.secure_url)
    }
}
