//! Unified client error model.
//! Transport responses are classified into this tagged enum exactly once, at
//! the HTTP boundary; everything above it matches on variants instead of
//! re-inspecting status codes.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Login rejected by the backend (wrong email or password).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// A write was rejected with a per-field message map (HTTP 400). Consumed
    /// by form layers; the listing/session core never produces input for it.
    #[error("validation failed: {fields:?}")]
    Validation { fields: BTreeMap<String, Vec<String>> },

    /// The credential cookie is gone or no longer accepted. Absorbed into
    /// session state by the store/scheduler, not shown to the user directly.
    #[error("session expired")]
    SessionExpired,

    /// Could not reach the backend at all.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Reached the backend, got a non-success status outside the cases above.
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    /// 2xx with a body we could not decode.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// A page fetch failed; the previously loaded page is retained.
    #[error("page load failed: {source}")]
    PageLoad {
        #[source]
        source: Box<ApiError>,
    },

    #[error("invalid base url: {url}")]
    InvalidBaseUrl { url: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn transport<S: Into<String>>(message: S) -> Self {
        ApiError::Transport { message: message.into() }
    }

    pub fn decode<S: Into<String>>(message: S) -> Self {
        ApiError::Decode { message: message.into() }
    }

    pub(crate) fn page_load(source: ApiError) -> Self {
        ApiError::PageLoad { source: Box::new(source) }
    }

    /// True when the condition is transient and a later retry could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Http { status, .. } => *status >= 500,
            ApiError::PageLoad { source } => source.is_retryable(),
            _ => false,
        }
    }

    /// Classify a non-success response body. A 400 whose body is an object of
    /// field -> message(s) is the backend's form-validation shape; everything
    /// else stays a plain HTTP error.
    pub(crate) fn from_response(status: u16, body: &[u8]) -> Self {
        if status == 400 {
            if let Some(fields) = parse_field_errors(body) {
                return ApiError::Validation { fields };
            }
        }
        let body = String::from_utf8_lossy(body).trim().to_string();
        ApiError::Http { status, body }
    }
}

fn parse_field_errors(body: &[u8]) -> Option<BTreeMap<String, Vec<String>>> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let obj = value.as_object()?;
    // "detail" alone is the generic error envelope, not a field map
    if obj.is_empty() || (obj.len() == 1 && obj.contains_key("detail")) {
        return None;
    }
    let mut fields = BTreeMap::new();
    for (name, messages) in obj {
        let msgs: Vec<String> = match messages {
            serde_json::Value::String(s) => vec![s.clone()],
            serde_json::Value::Array(arr) => {
                arr.iter().filter_map(|m| m.as_str().map(str::to_string)).collect()
            }
            _ => return None,
        };
        fields.insert(name.clone(), msgs);
    }
    Some(fields)
}
