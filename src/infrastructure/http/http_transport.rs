use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{StreamExt, stream};
use reqwest::{
    Body, Client, Response,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
    multipart::{Form, Part},
};
use tracing::debug;

use crate::config::config_model::GatewayConfig;
use crate::domain::value_objects::{
    gateway_errors::TransportError,
    uploads::{ByteProgressFn, UploadPayload, VIDEO_FIELD},
};

/// Upload bodies are streamed in slices of this size; one progress tick per slice.
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

const ERROR_BODY_PREVIEW: usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Raw HTTP exchange used by the gateway. Any non-2xx status is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;

    async fn post_multipart(
        &self,
        url: &str,
        payload: UploadPayload,
        on_bytes: ByteProgressFn,
    ) -> Result<TransportResponse, TransportError>;
}

/// `reqwest` transport. One pooled client, JSON by default, fixed timeout.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_response(response).await
    }

    async fn post_multipart(
        &self,
        url: &str,
        payload: UploadPayload,
        on_bytes: ByteProgressFn,
    ) -> Result<TransportResponse, TransportError> {
        let total = payload.len();
        let body = Body::wrap_stream(progress_stream(payload.bytes, on_bytes));

        // Setting the multipart body replaces the JSON default content type.
        let video = Part::stream_with_length(body, total)
            .file_name(payload.file_name)
            .mime_str(&payload.mime_type)
            .map_err(|err| TransportError::Request(format!("invalid upload mime type: {err}")))?;

        let form = payload
            .fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part(VIDEO_FIELD, video);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        read_response(response).await
    }
}

/// Splits the upload into slices and reports cumulative bytes as each slice
/// is handed to the connection.
fn progress_stream(
    bytes: Bytes,
    on_bytes: ByteProgressFn,
) -> impl futures_util::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let total = bytes.len() as u64;
    let chunks: Vec<Bytes> = (0..bytes.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| bytes.slice(start..(start + UPLOAD_CHUNK_SIZE).min(bytes.len())))
        .collect();

    let mut loaded = 0u64;
    stream::iter(chunks).map(move |chunk| {
        loaded += chunk.len() as u64;
        on_bytes(loaded, Some(total));
        Ok(chunk)
    })
}

async fn read_response(response: Response) -> Result<TransportResponse, TransportError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        let preview = String::from_utf8_lossy(&body)
            .trim()
            .chars()
            .take(ERROR_BODY_PREVIEW)
            .collect::<String>();
        debug!(status = status.as_u16(), "transport: non-success status");
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: preview,
        });
    }

    Ok(TransportResponse {
        status: status.as_u16(),
        body,
    })
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        return TransportError::Timeout;
    }
    if error.is_connect() {
        return TransportError::Connect(error.to_string());
    }
    TransportError::Request(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&GatewayConfig::default()).unwrap()
    }

    fn recorder() -> (Arc<Mutex<Vec<(u64, Option<u64>)>>>, ByteProgressFn) {
        let ticks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ticks);
        let on_bytes: ByteProgressFn = Box::new(move |loaded, total| {
            sink.lock().unwrap().push((loaded, total));
        });
        (ticks, on_bytes)
    }

    #[tokio::test]
    async fn get_returns_the_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(header_regex("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let response = transport()
            .get(&format!("{}/videos", server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from_static(b"[]"));
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos/missing/info"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>"))
            .mount(&server)
            .await;

        let err = transport()
            .get(&format!("{}/videos/missing/info", server.uri()))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 404,
                body: "<h1>Not Found</h1>".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let err = transport()
            .get("http://127.0.0.1:1/videos")
            .await
            .unwrap_err();

        assert!(
            matches!(err, TransportError::Connect(_) | TransportError::Request(_)),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn multipart_upload_reports_every_slice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .respond_with(
                ResponseTemplate::new(202)
                    .set_body_string(r#"{"id":"v1","title":"Trip","status":"pending"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let size = UPLOAD_CHUNK_SIZE * 2 + 10;
        let payload = UploadPayload::new("trip.mp4", vec![7u8; size]).with_title("Trip");
        let (ticks, on_bytes) = recorder();

        let response = transport()
            .post_multipart(&format!("{}/videos", server.uri()), payload, on_bytes)
            .await
            .unwrap();

        assert_eq!(response.status, 202);
        let total = Some(size as u64);
        assert_eq!(
            *ticks.lock().unwrap(),
            vec![
                (UPLOAD_CHUNK_SIZE as u64, total),
                ((UPLOAD_CHUNK_SIZE * 2) as u64, total),
                (size as u64, total),
            ]
        );

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body).to_lowercase();
        assert!(body.contains("name=\"title\""));
        assert!(body.contains("trip"));
        assert!(body.contains("name=\"video\"; filename=\"trip.mp4\""));
        assert!(body.contains("content-type: video/mp4"));
    }

    #[tokio::test]
    async fn rejected_upload_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/videos"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"Invalid file"}"#),
            )
            .mount(&server)
            .await;

        let (_, on_bytes) = recorder();
        let err = transport()
            .post_multipart(
                &format!("{}/videos", server.uri()),
                UploadPayload::new("notes.txt", b"hello".to_vec()),
                on_bytes,
            )
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(400));
    }
}
