#![allow(dead_code)]

use serde_json::{json, Value};
use uploadthing_client::{ClientConfig, UtApi};

pub const SECRET: &str = "sk_test_123";

/// The blocking client must be built, used and dropped off the async
/// runtime threads.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

pub fn client(server_uri: &str) -> UtApi {
    client_with_secret(server_uri, SECRET)
}

pub fn client_with_secret(server_uri: &str, secret: &str) -> UtApi {
    let config = ClientConfig::new(secret).with_base_url(format!("{}/v6/", server_uri));
    UtApi::with_config(config).unwrap()
}

/// Upload descriptor pointing at `{server}/upload/{index}`.
pub fn descriptor(server_uri: &str, index: usize, file_name: &str, file_type: &str) -> Value {
    json!({
        "url": format!("{}/upload/{}", server_uri, index),
        "fields": {
            "key": format!("key-{}", index),
            "Policy": format!("policy-{}", index)
        },
        "key": format!("key-{}", index),
        "contentDisposition": "inline",
        "fileUrl": format!("https://utfs.io/f/key-{}", index),
        "appUrl": format!("https://utfs.io/a/app/key-{}", index),
        "fileName": file_name,
        "pollingUrl": format!("{}/v6/pollUpload/key-{}", server_uri, index),
        "pollingJwt": "jwt",
        "fileType": file_type,
        "customId": null
    })
}

/// Paths of every request the mock server saw, in arrival order.
pub async fn received_paths(server: &wiremock::MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}
