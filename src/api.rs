// API client module: a small blocking HTTP client for the UploadThing REST
// API. Every call is a signed JSON POST against the configured API root;
// the multi-step upload flow lives in `upload.rs` on top of the helpers here.

use crate::config::ClientConfig;
use crate::error::{Result, UtApiError};
use crate::types::{
    FileKeys, ListFilesOptions, ListFilesResponse, ListedFile, RenameFilesRequest, RenameUpdate,
    UsageInfo,
};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Header carrying the API secret.
pub const API_KEY_HEADER: &str = "x-uploadthing-api-key";

/// UploadThing API client. Holds the immutable configuration and a
/// reusable blocking reqwest client; cloning is cheap.
#[derive(Clone, Debug)]
pub struct UtApi {
    pub(crate) client: Client,
    pub(crate) config: ClientConfig,
}

impl UtApi {
    /// Create a client for the public API. The secret is not checked here.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(secret))
    }

    /// Create a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a client configured from the environment. See
    /// [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fails with [`UtApiError::Auth`] when no secret is attached.
    pub fn check_availability(&self) -> Result<()> {
        if self.config.secret.is_empty() {
            return Err(UtApiError::Auth);
        }
        Ok(())
    }

    /// List the app's files (first page, server defaults).
    #[instrument(skip(self))]
    pub fn list_files(&self) -> Result<Vec<ListedFile>> {
        Ok(self.list_files_with(&ListFilesOptions::default())?.files)
    }

    /// List files with explicit paging; returns the whole envelope so the
    /// caller can look at `has_more`.
    #[instrument(skip(self))]
    pub fn list_files_with(&self, options: &ListFilesOptions) -> Result<ListFilesResponse> {
        self.check_availability()?;
        let res = self.post_json("listFiles", options)?;
        let listing: ListFilesResponse = decode(res)?;
        debug!(count = listing.files.len(), has_more = listing.has_more, "listed files");
        Ok(listing)
    }

    /// Delete files by key. Keys are sent in the order given.
    #[instrument(skip_all)]
    pub fn delete_files<I, S>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_availability()?;
        let body = FileKeys {
            file_keys: keys.into_iter().map(Into::into).collect(),
        };
        debug!(count = body.file_keys.len(), "deleting files");
        self.post_json("deleteFiles", &body)?;
        Ok(())
    }

    /// Storage usage of the app.
    #[instrument(skip(self))]
    pub fn get_usage_info(&self) -> Result<UsageInfo> {
        self.check_availability()?;
        let res = self.post_json("getUsageInfo", &serde_json::json!({}))?;
        decode(res)
    }

    /// Rename files by key.
    #[instrument(skip_all)]
    pub fn rename_files<I>(&self, updates: I) -> Result<()>
    where
        I: IntoIterator<Item = RenameUpdate>,
    {
        self.check_availability()?;
        let body = RenameFilesRequest {
            updates: updates.into_iter().collect(),
        };
        debug!(count = body.updates.len(), "renaming files");
        self.post_json("renameFiles", &body)?;
        Ok(())
    }

    /// Headers shared by every authenticated call.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // a secret that is not a valid header value can never authenticate
        let key = HeaderValue::from_str(&self.config.secret).map_err(|_| UtApiError::Auth)?;
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }

    /// POST a JSON body to an API endpoint and require a 200.
    pub(crate) fn post_json<B>(&self, endpoint: &str, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(endpoint);
        debug!(%url, "sending api request");
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()?;
        ensure_ok(res)
    }
}

/// Only a plain 200 counts as success. The response is dropped on failure.
pub(crate) fn ensure_ok(res: Response) -> Result<Response> {
    let status = res.status();
    if status != StatusCode::OK {
        warn!(status = status.as_u16(), url = %res.url(), "request failed");
        return Err(UtApiError::Http {
            status: status.as_u16(),
        });
    }
    Ok(res)
}

/// Read the whole body and decode it as JSON. Bytes go to serde as-is so
/// invalid UTF-8 is a decode error rather than a replacement character.
pub(crate) fn decode<T: DeserializeOwned>(res: Response) -> Result<T> {
    let body = res.bytes()?;
    Ok(serde_json::from_slice(&body)?)
}
