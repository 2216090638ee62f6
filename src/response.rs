use crate::header::Headers;
use crate::message::Version;
use crate::status::StatusCode;

/// A response head, as returned by `Connection::http_response`.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub version: Version,
    pub status_code: StatusCode,
    pub reason: String,
    pub headers: Headers,
}

impl ResponseHead {
    pub fn new(version: Version, status_code: StatusCode, reason: impl Into<String>) -> Self {
        ResponseHead {
            version,
            status_code,
            reason: reason.into(),
            headers: Headers::new(),
        }
    }
}
