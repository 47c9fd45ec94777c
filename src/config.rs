// Client configuration: the API secret and root, read from the environment
// or set explicitly.

use tracing::debug;

/// Root of the UploadThing v6 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.uploadthing.com/v6/";

/// Environment variable holding the API secret.
pub const SECRET_ENV: &str = "UPLOADTHING_SECRET";

/// Optional environment override for the API root.
pub const BASE_URL_ENV: &str = "UPLOADTHING_API_URL";

/// Client configuration. Immutable once handed to [`crate::UtApi`].
#[derive(Clone)]
pub struct ClientConfig {
    /// API secret sent as `x-uploadthing-api-key`
    pub secret: String,
    /// API root, endpoints are appended to it verbatim
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the public API with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("uploadthing-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Point the client at another API root. A trailing slash is added
    /// when missing so endpoint names can be appended directly.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Build a config from `UPLOADTHING_SECRET` and `UPLOADTHING_API_URL`,
    /// loading a `.env` file first when one exists. A missing secret is not
    /// an error here; the first authenticated call reports it.
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            debug!("loaded .env file");
        }
        let secret = std::env::var(SECRET_ENV).unwrap_or_default();
        let config = Self::new(secret);
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.is_empty() => config.with_base_url(url),
            _ => config,
        }
    }

    /// Full URL of an API endpoint.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}{}", self.base_url, name)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("secret", &if self.secret.is_empty() { "<empty>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
