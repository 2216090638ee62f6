//! Error plumbing for the exchange engine.
//!
//! A `failure`-based `Error`/`Result` pair plus a small `Fail`-derived enum
//! for the cases this crate needs to distinguish by kind rather than just by
//! message.

pub use failure::{err_msg, format_err, Error};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error taxonomy specific to a single exchange.
///
/// `IOError` is intentionally generic over the connection's own error type
/// (via `format_err!` at the call site) rather than a type parameter here:
/// the connection is a trait object by the time an error reaches the
/// handler, so there is no concrete IO error type to borrow.
#[derive(Clone, Debug, PartialEq)]
pub enum ExchangeError {
    /// A 1xx response other than 100 Continue was received.
    Protocol(String),

    /// The connection, encoder, or decoder reported a failure.
    Io(String),

    /// A precondition the handler or connection was supposed to uphold did
    /// not hold (e.g. a callback fired with no handler attached).
    IllegalState(String),

    /// The socket timed out outside of the 100-continue wait window.
    SocketTimeout,
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeError::Protocol(msg) => write!(f, "protocol error: {}", msg),
            ExchangeError::Io(msg) => write!(f, "i/o error: {}", msg),
            ExchangeError::IllegalState(msg) => write!(f, "illegal state: {}", msg),
            ExchangeError::SocketTimeout => write!(f, "socket timeout"),
        }
    }
}

impl failure::Fail for ExchangeError {}
