// src/checks/upload.rs
use super::{Check, Evidence, ProbeContext};
use crate::probe::{fields, FailureReason};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

pub const PATH: &str = "/upload";

/// Name the document is uploaded under, independent of the scratch file name.
pub const UPLOAD_FILENAME: &str = "test_document.txt";

pub const TEST_DOCUMENT: &str = "
    Disaster Recovery Assessment - Test Document

    This is a test document for the Resilience2Relief AI system.

    Key sectors:
    - Housing reconstruction
    - Infrastructure repair
    - Healthcare system strengthening

    Estimated budget: $50 million
    Timeline: 24 months
    Beneficiaries: 100,000 people
";

/// A document on disk for the lifetime of the value. Dropping it deletes the
/// file, so every exit path of the upload check cleans up.
pub struct ScratchDocument {
    file: NamedTempFile,
}

impl ScratchDocument {
    /// Write `contents` to a fresh `.txt` file in `dir`, or the system temp
    /// dir when `dir` is `None`.
    pub fn create(dir: Option<&Path>, contents: &str) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("relief-smoke-").suffix(".txt");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        debug!(path = %file.path().display(), "Created scratch document");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

pub struct FileUploadCheck;

#[async_trait]
impl Check for FileUploadCheck {
    fn name(&self) -> &str {
        "File Upload"
    }

    async fn probe(&self, ctx: &ProbeContext) -> Result<Evidence, FailureReason> {
        let document = ScratchDocument::create(ctx.config.scratch_dir.as_deref(), TEST_DOCUMENT)?;
        let bytes = tokio::fs::read(document.path()).await?;

        let part = Part::bytes(bytes)
            .file_name(UPLOAD_FILENAME)
            .mime_str("text/plain")
            .map_err(|e| FailureReason::Setup(e.to_string()))?;
        let request = ctx.client.post(PATH)?.multipart(Form::new().part("file", part));

        let body = ctx
            .client
            .exchange(request, ctx.config.upload_timeout())
            .await?
            .ok_json()?;

        fields::require_success(&body)?;
        let filename = fields::require_str(&body, "data.filename")?;
        let file_size = fields::require_u64(&body, "data.file_size")?;

        Ok(Evidence::new(format!("File upload passed: {}", filename))
            .note(format!("📊 File size: {} bytes", file_size)))
    }
}
