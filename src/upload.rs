// Two-phase upload: ask the API for one pre-signed POST per file, then send
// each file straight to its storage target as multipart/form-data.

use crate::api::{decode, ensure_ok, UtApi};
use crate::error::{Result, UtApiError};
use crate::file::FileSource;
use crate::types::{FileForUpload, UploadDescriptor, UploadFilesRequest, UploadResult};
use mime_guess::Mime;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// `uploadFiles` answers with a bare array; newer deployments wrap it in
/// `{"data": [...]}`. Both are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum PresignResponse {
    Bare(Vec<UploadDescriptor>),
    Wrapped { data: Vec<UploadDescriptor> },
}

impl PresignResponse {
    fn into_descriptors(self) -> Vec<UploadDescriptor> {
        match self {
            Self::Bare(list) | Self::Wrapped { data: list } => list,
        }
    }
}

impl UtApi {
    /// Upload a batch of files and return one result per file, in input
    /// order.
    ///
    /// Descriptor `i` from the presign call is used for file `i`. The first
    /// failing transfer aborts the batch; files already sent stay on the
    /// storage backend. An empty batch issues no request at all, and a file
    /// with an unparsable content type fails the batch before any request.
    ///
    /// The descriptor count is not checked against the batch: if the API
    /// answers with fewer descriptors than files, only the paired prefix is
    /// transferred and the returned vector is shorter than `files`.
    #[instrument(skip_all, fields(count = files.len()))]
    pub fn upload_files<F: FileSource>(&self, files: &[F]) -> Result<Vec<UploadResult>> {
        self.check_availability()?;
        if files.is_empty() {
            debug!("empty batch, nothing to upload");
            return Ok(Vec::new());
        }

        let descriptors = self.presign(files)?;
        if descriptors.len() != files.len() {
            warn!(
                files = files.len(),
                descriptors = descriptors.len(),
                "presign returned a different number of descriptors"
            );
        }

        let mut results = Vec::with_capacity(descriptors.len());
        for (file, descriptor) in files.iter().zip(&descriptors) {
            self.transfer(file, descriptor)?;
            results.push(UploadResult::from(descriptor));
        }

        info!(uploaded = results.len(), "upload batch complete");
        Ok(results)
    }

    /// Phase 1: request one upload descriptor per file.
    fn presign<F: FileSource>(&self, files: &[F]) -> Result<Vec<UploadDescriptor>> {
        for file in files {
            check_content_type(file)?;
        }
        let summaries = files
            .iter()
            .map(|file| FileForUpload {
                name: file.file_name().to_string(),
                size: file.size(),
                file_type: file.content_type().to_string(),
            })
            .collect();

        let res = self.post_json("uploadFiles", &UploadFilesRequest::new(summaries))?;
        let response: PresignResponse = decode(res)?;
        Ok(response.into_descriptors())
    }

    /// Phase 2: POST the descriptor's fields followed by the file bytes to
    /// the storage target. Only the status code of the answer matters.
    fn transfer<F: FileSource>(&self, file: &F, descriptor: &UploadDescriptor) -> Result<()> {
        let target = resolve_target(&self.config.base_url, &descriptor.url)?;

        let mut form = Form::new();
        for (name, value) in &descriptor.fields {
            form = form.text(name.clone(), value.clone());
        }
        let part = Part::reader_with_length(file.open()?, file.size())
            .file_name(file.file_name().to_string())
            .mime_str(file.content_type())?;
        let form = form.part("file", part);

        debug!(%target, key = %descriptor.key, file = file.file_name(), "transferring file");
        let res = self
            .client
            .post(target)
            .header(ACCEPT, "application/xml")
            .multipart(form)
            .send()?;
        ensure_ok(res)?;
        Ok(())
    }
}

/// The transfer sends the content type as the file part's MIME type, so it
/// has to parse as one.
fn check_content_type<F: FileSource>(file: &F) -> Result<()> {
    match file.content_type().parse::<Mime>() {
        Ok(_) => Ok(()),
        Err(_) => Err(UtApiError::InvalidContentType {
            file_name: file.file_name().to_string(),
            content_type: file.content_type().to_string(),
        }),
    }
}

/// Absolute targets are used as-is; relative ones hang off the API root.
fn resolve_target(base_url: &str, target: &str) -> Result<Url> {
    Url::parse(base_url)
        .and_then(|base| base.join(target))
        .map_err(|e| UtApiError::InvalidUrl(format!("{target}: {e}")))
}
