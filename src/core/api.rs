// Backend endpoints, the shared JSON envelope and CSRF cookie parsing.

use serde::Deserialize;
use thiserror::Error;

pub const GREETING_CHECK: &str = "/api/new-year-greeting/check/";
pub const GREETING_LIST: &str = "/api/new-year-greeting/list/";
pub const GREETING_SUBMIT: &str = "/api/new-year-greeting/submit/";
pub const GREETING_SEEN: &str = "/api/new-year-greeting/seen/";

pub const WISH_STATS: &str = "/api/tet-wishes/stats/";
pub const WISH_LIST: &str = "/api/tet-wishes/list/";
pub const WISH_SEND: &str = "/api/tet-wishes/send/";
pub const WISH_SET_LIMIT: &str = "/api/tet-wishes/set-limit/";
pub const WISH_MARK_READ: &str = "/api/tet-wishes/mark-read/";
const WISH_SEARCH_USERS: &str = "/api/tet-wishes/search-users/";
const WISH_GET_LIMIT: &str = "/api/tet-wishes/get-limit/";

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

pub fn search_users_url(query: &str) -> String {
    format!("{}?q={}", WISH_SEARCH_USERS, urlencoding::encode(query))
}

pub fn get_limit_url(user_id: u64) -> String {
    format!("{}?user_id={}", WISH_GET_LIMIT, user_id)
}

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    /// `success: false` with the server's own message.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Inline status text for a failed request.
    pub fn status_text(&self) -> String {
        match self {
            ApiError::Rejected(msg) => format!("❌ {}", msg),
            _ => "❌ Lỗi kết nối".to_string(),
        }
    }
}

/// `{ "success": bool, "error"?: string, ...payload }`
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| "Yêu cầu thất bại".to_string()),
            ))
        }
    }
}

pub fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<Envelope<T>, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Success response carrying only a human-readable message.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Ack {
    pub message: String,
}

/// Value of the CSRF cookie from a `document.cookie` string.
pub fn csrf_token_from_cookie(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix(CSRF_COOKIE)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}
