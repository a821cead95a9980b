//! Student payload extractor.
//!
//! Accepts `application/json` and `application/x-www-form-urlencoded` bodies.
//! Any other content type is treated as an empty body.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::{Map, Value};

use crate::domain::StudentPayload;
use crate::error::AppError;

/// How a request body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Unsupported,
}

impl BodyKind {
    fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(mime) = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
        else {
            return Self::Unsupported;
        };

        if mime == "application/x-www-form-urlencoded" {
            Self::Form
        } else if mime == "application/json" || mime.ends_with("+json") {
            Self::Json
        } else {
            Self::Unsupported
        }
    }
}

impl<S> FromRequest<S> for StudentPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = BodyKind::from_content_type(
            req.headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;

        let fields = match kind {
            BodyKind::Json => parse_json(&bytes)?,
            BodyKind::Form => parse_form(&bytes),
            BodyKind::Unsupported => Map::new(),
        };

        Ok(Self::new(fields))
    }
}

fn parse_json(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice(bytes) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(AppError::MalformedBody(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(AppError::MalformedBody(e.to_string())),
    }
}

/// Repeated keys keep their last value.
fn parse_form(bytes: &[u8]) -> Map<String, Value> {
    url::form_urlencoded::parse(bytes)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}
