use crate::header::Headers;
use crate::message::Version;
use crate::method::Method;

/// A request head, as handed to `Connection::submit_request` by the
/// protocol handler. The URI type is omitted deliberately: URI parsing is
/// delegated to the connection, so the target is kept as an opaque string.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub target: String,
    pub version: Version,
    pub headers: Headers,
}

impl RequestHead {
    pub fn new(method: Method, target: impl Into<String>, version: Version) -> Self {
        RequestHead {
            method,
            target: target.into(),
            version,
            headers: Headers::new(),
        }
    }

    pub fn has_entity(&self) -> bool {
        self.headers.content_length().map_or(false, |len| len > 0)
            || self.headers.has_chunked_transfer_encoding()
    }

    pub fn expects_continue(&self) -> bool {
        self.headers.expects_continue()
    }
}
