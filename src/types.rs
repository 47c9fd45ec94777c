// Wire types for the UploadThing API. Field names follow the camelCase JSON
// the API speaks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Access control requested for new uploads.
pub const DEFAULT_ACL: &str = "public-read";

/// Content-Disposition requested for new uploads.
pub const DEFAULT_CONTENT_DISPOSITION: &str = "inline";

/// Summary of one file sent in the presign request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileForUpload {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub file_type: String,
}

/// Body of `POST uploadFiles`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadFilesRequest {
    pub files: Vec<FileForUpload>,
    pub acl: String,
    pub content_disposition: String,
}

impl UploadFilesRequest {
    pub fn new(files: Vec<FileForUpload>) -> Self {
        Self {
            files,
            acl: DEFAULT_ACL.to_string(),
            content_disposition: DEFAULT_CONTENT_DISPOSITION.to_string(),
        }
    }
}

/// Pre-signed upload authorization issued for one file.
///
/// `fields` must be replayed verbatim in the multipart body ahead of the
/// file part.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadDescriptor {
    pub url: String,
    #[serde(default)]
    pub fields: HashMap<String, String>,
    pub key: String,
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_url: String,
    #[serde(default)]
    pub app_url: String,
    #[serde(default)]
    pub content_disposition: String,
    #[serde(default)]
    pub polling_url: String,
    #[serde(default)]
    pub polling_jwt: String,
    #[serde(default)]
    pub custom_id: Option<String>,
}

/// One completed upload.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
}

impl From<&UploadDescriptor> for UploadResult {
    fn from(descriptor: &UploadDescriptor) -> Self {
        Self {
            file_name: descriptor.file_name.clone(),
            file_type: descriptor.file_type.clone(),
            file_url: descriptor.file_url.clone(),
        }
    }
}

/// A file as reported by `listFiles`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListedFile {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub custom_id: Option<String>,
    pub status: String,
}

/// Envelope returned by `listFiles`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    #[serde(default)]
    pub has_more: bool,
    pub files: Vec<ListedFile>,
}

/// Paging options for `listFiles`. The default serializes as `{}`.
#[derive(Serialize, Debug, Clone, Default)]
pub struct ListFilesOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Storage usage of the app owning the secret.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageInfo {
    pub total_bytes: u64,
    pub app_total_bytes: u64,
    pub files_uploaded: u64,
    pub limit_bytes: u64,
}

/// Body of `POST deleteFiles`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileKeys {
    pub file_keys: Vec<String>,
}

/// A single rename in a `renameFiles` call.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenameUpdate {
    pub file_key: String,
    pub new_name: String,
}

impl RenameUpdate {
    pub fn new(file_key: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            file_key: file_key.into(),
            new_name: new_name.into(),
        }
    }
}

/// Body of `POST renameFiles`.
#[derive(Serialize, Debug)]
pub struct RenameFilesRequest {
    pub updates: Vec<RenameUpdate>,
}
