//! Test helpers: tiny images and a fake inference server.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::inference::InferenceClient;

pub(crate) const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G'];

fn encode(format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, image::Rgb([200, 40, 90])));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode test image");
    bytes
}

pub(crate) fn png_bytes() -> Vec<u8> {
    encode(ImageFormat::Png)
}

pub(crate) fn jpeg_bytes() -> Vec<u8> {
    encode(ImageFormat::Jpeg)
}

/// Stands in for the hosted inference API, answering every POST the same way.
#[derive(Clone, Debug)]
pub(crate) struct FakeInference {
    pub(crate) endpoint: String,
    status: StatusCode,
    body: Bytes,
    hits: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<Value>>>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

impl FakeInference {
    pub(crate) async fn spawn(status: StatusCode, body: Vec<u8>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake inference server");
        let addr = listener.local_addr().expect("local addr");
        let fake = Self {
            endpoint: format!("http://{addr}/models/test-model"),
            status,
            body: Bytes::from(body),
            hits: Arc::new(AtomicUsize::new(0)),
            last_payload: Arc::new(Mutex::new(None)),
            last_authorization: Arc::new(Mutex::new(None)),
        };
        let app = Router::new()
            .route("/models/test-model", axum::routing::post(fake_generate))
            .with_state(fake.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        fake
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn last_payload(&self) -> Option<Value> {
        self.last_payload.lock().expect("payload lock").clone()
    }

    pub(crate) fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().expect("auth lock").clone()
    }
}

async fn fake_generate(
    State(fake): State<FakeInference>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    *fake.last_payload.lock().expect("payload lock") = serde_json::from_slice(&body).ok();
    *fake.last_authorization.lock().expect("auth lock") = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    (fake.status, fake.body.clone())
}

/// An endpoint on a port nothing is listening on.
pub(crate) async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/models/test-model")
}

/// An endpoint that answers once with `status`, then hangs up partway through the body.
pub(crate) async fn truncated_response_endpoint(status: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        while !request_complete(&request) {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(read) => request.extend_from_slice(&chunk[..read]),
            }
        }
        let response = format!("HTTP/1.1 {status}\r\nContent-Length: 100\r\n\r\nshort");
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.flush().await;
        let _ = stream.shutdown().await;
    });
    format!("http://{addr}/models/test-model")
}

/// Whether `buf` holds the headers plus a body of the advertised length.
fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    buf.len() >= header_end + 4 + content_length
}

/// Inference client that ignores proxy settings, the fake server is local.
pub(crate) fn local_client(endpoint: &str, token: Option<String>) -> InferenceClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build http client");
    InferenceClient::with_http_client(client, endpoint, token)
}
