mod common;

use common::{blocking, client, descriptor, received_paths, SECRET};
use serde_json::json;
use std::io::Write;
use uploadthing_client::{LocalFile, MemoryFile, UploadResult, UtApiError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_files(n: usize) -> Vec<MemoryFile> {
    (0..n)
        .map(|i| {
            MemoryFile::new(
                format!("file-{}.txt", i),
                "text/plain",
                format!("contents {}", i),
            )
        })
        .collect()
}

async fn mount_presign(server: &MockServer, descriptors: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v6/uploadFiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(descriptors))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_target(server: &MockServer, index: usize, status: u16, expected: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/upload/{}", index)))
        .and(header("accept", "application/xml"))
        .respond_with(ResponseTemplate::new(status).set_body_string("<PostResponse/>"))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn uploads_batch_in_input_order() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("POST"))
        .and(path("/v6/uploadFiles"))
        .and(header("x-uploadthing-api-key", SECRET))
        .and(body_json(json!({
            "files": [
                {"name": "file-0.txt", "size": 10, "type": "text/plain"},
                {"name": "file-1.txt", "size": 10, "type": "text/plain"},
                {"name": "file-2.txt", "size": 10, "type": "text/plain"}
            ],
            "acl": "public-read",
            "contentDisposition": "inline"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            descriptor(&uri, 0, "file-0.txt", "text/plain"),
            descriptor(&uri, 1, "file-1.txt", "text/plain"),
            descriptor(&uri, 2, "file-2.txt", "text/plain"),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    for i in 0..3 {
        mount_target(&server, i, 200, 1).await;
    }

    let base = uri.clone();
    let results = blocking(move || client(&base).upload_files(&text_files(3)))
        .await
        .unwrap();

    let expected: Vec<UploadResult> = (0..3)
        .map(|i| UploadResult {
            file_name: format!("file-{}.txt", i),
            file_type: "text/plain".to_string(),
            file_url: format!("https://utfs.io/f/key-{}", i),
        })
        .collect();
    assert_eq!(results, expected);
    assert_eq!(
        received_paths(&server).await,
        vec!["/v6/uploadFiles", "/upload/0", "/upload/1", "/upload/2"]
    );
}

#[tokio::test]
async fn transfer_replays_fields_before_file_part() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_presign(&server, json!([descriptor(&uri, 0, "file-0.txt", "text/plain")])).await;
    mount_target(&server, 0, 200, 1).await;

    let base = uri.clone();
    blocking(move || client(&base).upload_files(&text_files(1)))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let upload = &requests[1];
    let content_type = upload.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(upload.headers.get("x-uploadthing-api-key").is_none());

    let body = String::from_utf8_lossy(&upload.body);
    let key_field = body.find("name=\"key\"").expect("key field");
    let policy_field = body.find("name=\"Policy\"").expect("policy field");
    let file_part = body
        .find("name=\"file\"; filename=\"file-0.txt\"")
        .expect("file part");
    assert!(key_field < file_part && policy_field < file_part);
    assert!(body.contains("key-0"));
    assert!(body.contains("policy-0"));
    assert!(body.contains("contents 0"));
}

#[tokio::test]
async fn presign_failure_stops_before_transfer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v6/uploadFiles"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_target(&server, 0, 200, 0).await;

    let uri = server.uri();
    let err = blocking(move || client(&uri).upload_files(&text_files(2)))
        .await
        .unwrap_err();

    assert!(matches!(err, UtApiError::Http { status: 500 }));
    assert_eq!(received_paths(&server).await, vec!["/v6/uploadFiles"]);
}

#[tokio::test]
async fn kth_transfer_failure_aborts_batch() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_presign(
        &server,
        json!([
            descriptor(&uri, 0, "file-0.txt", "text/plain"),
            descriptor(&uri, 1, "file-1.txt", "text/plain"),
            descriptor(&uri, 2, "file-2.txt", "text/plain"),
        ]),
    )
    .await;
    mount_target(&server, 0, 200, 1).await;
    mount_target(&server, 1, 403, 1).await;
    mount_target(&server, 2, 200, 0).await;

    let base = uri.clone();
    let err = blocking(move || client(&base).upload_files(&text_files(3)))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(
        received_paths(&server).await,
        vec!["/v6/uploadFiles", "/upload/0", "/upload/1"]
    );
}

#[tokio::test]
async fn empty_batch_sends_nothing() {
    let server = MockServer::start().await;

    let uri = server.uri();
    let results = blocking(move || client(&uri).upload_files::<MemoryFile>(&[]))
        .await
        .unwrap();

    assert!(results.is_empty());
    assert!(received_paths(&server).await.is_empty());
}

#[tokio::test]
async fn accepts_wrapped_presign_response() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_presign(
        &server,
        json!({"data": [descriptor(&uri, 0, "file-0.txt", "text/plain")]}),
    )
    .await;
    mount_target(&server, 0, 200, 1).await;

    let base = uri.clone();
    let results = blocking(move || client(&base).upload_files(&text_files(1)))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_url, "https://utfs.io/f/key-0");
}

#[tokio::test]
async fn malformed_presign_response_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v6/uploadFiles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"url\": 1}]"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || client(&uri).upload_files(&text_files(1)))
        .await
        .unwrap_err();
    assert!(matches!(err, UtApiError::Decode(_)));
    assert_eq!(received_paths(&server).await, vec!["/v6/uploadFiles"]);
}

#[tokio::test]
async fn uploads_local_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path_a = dir.path().join("report.json");
    let mut f = std::fs::File::create(&path_a).unwrap();
    f.write_all(br#"{"ok":true}"#).unwrap();
    drop(f);

    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("POST"))
        .and(path("/v6/uploadFiles"))
        .and(body_json(json!({
            "files": [{"name": "report.json", "size": 11, "type": "application/json"}],
            "acl": "public-read",
            "contentDisposition": "inline"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            descriptor(&uri, 0, "report.json", "application/json")
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_target(&server, 0, 200, 1).await;

    let base = uri.clone();
    let results = blocking(move || {
        let file = LocalFile::new(&path_a)?;
        client(&base).upload_files(&[file])
    })
    .await
    .unwrap();
    assert_eq!(results[0].file_type, "application/json");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[1].body);
    assert!(body.contains("filename=\"report.json\""));
    assert!(body.contains("Content-Type: application/json"));
    assert!(body.contains(r#"{"ok":true}"#));
}

#[tokio::test]
async fn short_descriptor_list_uploads_paired_prefix() {
    let server = MockServer::start().await;
    let uri = server.uri();
    mount_presign(&server, json!([descriptor(&uri, 0, "file-0.txt", "text/plain")])).await;
    mount_target(&server, 0, 200, 1).await;

    let base = uri.clone();
    let results = blocking(move || client(&base).upload_files(&text_files(3)))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].file_name, "file-0.txt");
    assert_eq!(
        received_paths(&server).await,
        vec!["/v6/uploadFiles", "/upload/0"]
    );
}

#[tokio::test]
async fn bad_content_type_fails_before_any_request() {
    let server = MockServer::start().await;

    let uri = server.uri();
    let err = blocking(move || {
        let files = vec![
            MemoryFile::new("ok.txt", "text/plain", "fine"),
            MemoryFile::new("a", "", "a"),
        ];
        client(&uri).upload_files(&files)
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        UtApiError::InvalidContentType { ref file_name, .. } if file_name == "a"
    ));
    assert!(received_paths(&server).await.is_empty());
}
