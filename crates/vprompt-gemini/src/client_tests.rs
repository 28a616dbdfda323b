//! Tests for the Gemini REST client against a local mock server.

use std::io::Write;

use serde_json::json;
use vprompt_models::{MediaAsset, RemoteFile, RemoteFileState};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::{GeminiClient, GeminiConfig};
use crate::error::GeminiError;
use crate::service::InferenceService;

// =============================================================================
// Test Helpers
// =============================================================================

fn test_client(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig::new("test-key").with_base_url(server.uri());
    GeminiClient::new(config).unwrap()
}

fn active_file() -> RemoteFile {
    RemoteFile {
        name: "files/abc123".to_string(),
        display_name: None,
        uri: "https://example.test/v1beta/files/abc123".to_string(),
        mime_type: "video/mp4".to_string(),
        state: RemoteFileState::Active,
    }
}

fn text_response(parts: &[&str]) -> serde_json::Value {
    let parts: Vec<_> = parts.iter().map(|t| json!({ "text": t })).collect();
    json!({
        "candidates": [{ "content": { "role": "model", "parts": parts } }]
    })
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn test_upload_resumable_handshake() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .and(query_param("key", "test-key"))
        .and(header("X-Goog-Upload-Protocol", "resumable"))
        .and(body_partial_json(json!({ "file": { "display_name": "clip.mp4" } })))
        .respond_with(ResponseTemplate::new(200).insert_header(
            "x-goog-upload-url",
            format!("{}/resumable/session-1", server.uri()),
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/resumable/session-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "file": {
                "name": "files/abc123",
                "displayName": "clip.mp4",
                "mimeType": "video/mp4",
                "uri": "https://example.test/v1beta/files/abc123",
                "state": "PROCESSING"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let video_path = dir.path().join("clip.mp4");
    std::fs::File::create(&video_path)
        .unwrap()
        .write_all(b"not really a video")
        .unwrap();

    let client = test_client(&server);
    let file = client
        .upload_file(&MediaAsset::new(&video_path))
        .await
        .unwrap();

    assert_eq!(file.name, "files/abc123");
    assert_eq!(file.state, RemoteFileState::Processing);
}

#[tokio::test]
async fn test_upload_without_session_url_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    let client = test_client(&server);
    let err = client
        .upload_file(&MediaAsset::new(file.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_upload_missing_local_file_is_io_error() {
    let server = MockServer::start().await;
    let client = test_client(&server);

    let err = client
        .upload_file(&MediaAsset::new("/no/such/video.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::Io(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// File metadata
// =============================================================================

#[tokio::test]
async fn test_get_file_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc123"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "files/abc123",
            "mimeType": "video/mp4",
            "uri": "https://example.test/v1beta/files/abc123",
            "state": "ACTIVE"
        })))
        .mount(&server)
        .await;

    let file = test_client(&server).get_file("files/abc123").await.unwrap();
    assert_eq!(file.state, RemoteFileState::Active);
}

#[tokio::test]
async fn test_delete_file() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1beta/files/abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server).delete_file("files/abc123").await.unwrap();
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn test_generate_with_file_sends_file_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {
                        "fileData": {
                            "mimeType": "video/mp4",
                            "fileUri": "https://example.test/v1beta/files/abc123"
                        }
                    },
                    { "text": "Who is in the video?" }
                ]
            }]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(&["BEST_TIMESTAMP: 12.5\n", "PEOPLE_COUNT: 1"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = test_client(&server)
        .generate_with_file(&active_file(), "Who is in the video?")
        .await
        .unwrap();

    assert_eq!(text, "BEST_TIMESTAMP: 12.5\nPEOPLE_COUNT: 1");
}

#[tokio::test]
async fn test_generate_text_uses_configured_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-custom:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&["styled"])))
        .mount(&server)
        .await;

    let config = GeminiConfig::new("test-key")
        .with_base_url(format!("{}/", server.uri()))
        .with_model("gemini-custom");
    let client = GeminiClient::new(config).unwrap();

    assert_eq!(client.generate_text("make it anime").await.unwrap(), "styled");
}

#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = test_client(&server).generate_text("hi").await.unwrap_err();
    assert_eq!(err.http_status(), Some(403));
    assert!(err.to_string().contains("API key not valid"));
}

#[tokio::test]
async fn test_no_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = test_client(&server).generate_text("hi").await.unwrap_err();
    assert!(matches!(err, GeminiError::EmptyResponse));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_debug_redacts_key() {
    let config = GeminiConfig::new("secret-key");
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("secret-key"));
    assert!(rendered.contains("gemini-2.5-flash"));
}
