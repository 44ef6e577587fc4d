// HTTP response utilities for JSON, downloads and error pages
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::Level;

use crate::domain::error::{DashboardError, ErrorClass};

/// True when the client sent `Accept-Encoding` containing `br`.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

async fn brotli(bytes: Vec<u8>) -> Result<Vec<u8>, std::io::Error> {
    let mut encoder = BrotliEncoder::new(std::io::Cursor::new(bytes));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Serialize `data` as JSON, optionally Brotli-compressed.
pub async fn json_response<T: Serialize>(
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let json = serde_json::to_vec(data).map_err(|e| {
        tracing::error!("JSON serialization error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (body_bytes, content_encoding) = if compress {
        let original = json.len();
        let compressed = brotli(json).await.map_err(|e| {
            tracing::error!("Brotli compression error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::debug!("Compressed JSON {} -> {} bytes", original, compressed.len());
        (compressed, Some("br"))
    } else {
        (json, None)
    };

    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body_bytes.len());

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Attachment download with a fixed file name.
pub fn download_response(
    bytes: Vec<u8>,
    content_type: &'static str,
    file_name: &str,
) -> Result<Response<Body>, StatusCode> {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub fn status_for(err: &DashboardError) -> StatusCode {
    match err.class() {
        ErrorClass::FatalConfiguration => StatusCode::SERVICE_UNAVAILABLE,
        ErrorClass::Client => StatusCode::BAD_REQUEST,
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Client mistakes are routine and logged at debug; everything else is an error.
pub fn log_level(err: &DashboardError) -> Level {
    match err.class() {
        ErrorClass::Client => Level::DEBUG,
        ErrorClass::FatalConfiguration | ErrorClass::Internal => Level::ERROR,
    }
}

pub fn log_error(err: &DashboardError) {
    if log_level(err) == Level::DEBUG {
        tracing::debug!("Rejected request: {}", err);
    } else {
        tracing::error!("Request failed: {}", err);
    }
}

/// Map a pipeline error to a status code and a JSON message.
pub fn error_response(err: &DashboardError) -> Response<Body> {
    let status = status_for(err);
    log_error(err);
    (
        status,
        axum::Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
