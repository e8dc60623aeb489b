//! Attachment cache and the sequential upload pipeline.

use mailblast_api::{ApiClient, Attachment};
use tracing::error;

use crate::error::{Result, ValidationError};

/// Per-file upload limit.
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Combined upload batch limit.
pub const MAX_BATCH_BYTES: u64 = 50 * 1024 * 1024;

/// A file queued for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Name presented to the server (the original filename).
    pub name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates an upload entry.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Result of an upload batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Number of files the backend accepted.
    pub uploaded: usize,
    /// Names of the files whose upload failed.
    pub failed: Vec<String>,
}

/// Cache of the server-held attachment list.
///
/// The list is replaced wholesale after every mutation; there is no
/// incremental patching.
#[derive(Debug, Default)]
pub struct AttachmentTray {
    attachments: Vec<Attachment>,
}

impl AttachmentTray {
    /// Creates an empty tray.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Number of cached attachments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    /// Server-assigned filenames, as carried by a send request.
    #[must_use]
    pub fn filenames(&self) -> Vec<String> {
        self.attachments.iter().map(|a| a.filename.clone()).collect()
    }

    /// Replaces the cache from the server. On failure the previous cache
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the API error on transport or backend failure.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<()> {
        self.attachments = api.attachments().await?;
        Ok(())
    }

    /// Uploads a batch of files, one request per file, sequentially and
    /// in order.
    ///
    /// The whole batch is rejected before any network call if it is
    /// empty, any single file exceeds [`MAX_FILE_BYTES`], or the
    /// combined size exceeds [`MAX_BATCH_BYTES`]. Individual upload
    /// failures are logged and recorded without aborting the remaining
    /// files; after all attempts the list is reloaded exactly once.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the preflight rejects the
    /// batch.
    pub async fn upload(
        &mut self,
        api: &ApiClient,
        files: Vec<UploadFile>,
    ) -> Result<UploadOutcome> {
        preflight(&files)?;

        let mut outcome = UploadOutcome::default();
        for file in files {
            let name = file.name;
            match api.upload_attachment(&name, file.bytes).await {
                Ok(()) => outcome.uploaded += 1,
                Err(err) => {
                    error!("upload of \"{name}\" failed: {err}");
                    outcome.failed.push(name);
                }
            }
        }

        // One reload after the batch, regardless of individual failures.
        if let Err(err) = self.refresh(api).await {
            error!("attachment list reload after upload failed: {err}");
        }

        Ok(outcome)
    }
}

/// Client-side batch validation. Runs before any network call.
fn preflight(files: &[UploadFile]) -> std::result::Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::EmptyUploadBatch);
    }
    let mut total: u64 = 0;
    for file in files {
        let size = file.bytes.len() as u64;
        if size > MAX_FILE_BYTES {
            return Err(ValidationError::FileTooLarge {
                name: file.name.clone(),
            });
        }
        total += size;
    }
    if total > MAX_BATCH_BYTES {
        return Err(ValidationError::BatchTooLarge);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file_of(name: &str, size: usize) -> UploadFile {
        UploadFile::new(name, vec![0u8; size])
    }

    #[test]
    fn preflight_rejects_empty_batch() {
        assert_eq!(preflight(&[]), Err(ValidationError::EmptyUploadBatch));
    }

    #[test]
    fn preflight_rejects_single_file_over_10mb() {
        let files = vec![
            file_of("ok.bin", 1024),
            file_of("big.bin", (MAX_FILE_BYTES + 1) as usize),
        ];
        assert_eq!(
            preflight(&files),
            Err(ValidationError::FileTooLarge {
                name: "big.bin".to_owned()
            })
        );
    }

    #[test]
    fn preflight_accepts_file_at_exactly_10mb() {
        let files = vec![file_of("edge.bin", MAX_FILE_BYTES as usize)];
        assert!(preflight(&files).is_ok());
    }

    #[test]
    fn preflight_rejects_batch_over_50mb() {
        // Six files of 9 MB each: all under the per-file cap, 54 MB total.
        let files: Vec<_> = (0..6)
            .map(|i| file_of(&format!("part{i}.bin"), 9 * 1024 * 1024))
            .collect();
        assert_eq!(preflight(&files), Err(ValidationError::BatchTooLarge));
    }

    #[test]
    fn filenames_come_from_server_assigned_names() {
        let tray = AttachmentTray {
            attachments: vec![
                Attachment {
                    filename: "abc123.pdf".to_owned(),
                    original_name: "report.pdf".to_owned(),
                    size: 100,
                },
                Attachment {
                    filename: "def456.png".to_owned(),
                    original_name: "logo.png".to_owned(),
                    size: 200,
                },
            ],
        };
        assert_eq!(tray.filenames(), vec!["abc123.pdf", "def456.png"]);
    }
}
