//! A non-blocking HTTP/1.x client exchange engine.
//!
//! This crate is the event-driven glue between a byte-oriented, non-blocking
//! connection (wire parsing, reactor, and socket management all live
//! elsewhere) and a user-supplied [`handler::ExchangeHandler`] that
//! synthesizes requests incrementally and consumes responses incrementally.
//! The [`protocol::ProtocolHandler`] is the state machine that sequences one
//! request/response exchange after another on a single connection: request
//! head submission, the optional 100-continue handshake, request body
//! streaming, response head reception (including early/1xx responses),
//! response body streaming, and the connection-reuse decision — without ever
//! buffering a whole message body.
//!
//! HTTP/2, request pipelining, TLS, connection pooling, and routing are all
//! out of scope here; those concerns live in the connection implementation
//! and in the code that drives this crate.

pub mod connection;
pub mod context;
pub mod error;
pub mod handler;
pub mod header;
pub mod message;
pub mod method;
pub mod protocol;
pub mod request;
pub mod response;
pub mod state;
pub mod status;

pub use connection::{ConnStatus, Connection, ContentDecoder, ContentEncoder, IoControl};
pub use context::{ConnectionContext, HttpContext};
pub use error::{Error, ExchangeError, Result};
pub use handler::{ConnectionReuseStrategy, DefaultReuseStrategy, ExchangeHandler};
pub use header::{Header, Headers};
pub use message::{MessageState, Version};
pub use method::Method;
pub use protocol::ProtocolHandler;
pub use request::RequestHead;
pub use response::ResponseHead;
pub use state::ExchangeState;
pub use status::StatusCode;
