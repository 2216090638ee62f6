use crate::context::ConnectionContext;
use crate::error::Result;
use crate::request::RequestHead;
use crate::response::ResponseHead;

/// Lifecycle status of the underlying connection, as reported by the
/// connection itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnStatus {
    Active,
    Closing,
    Closed,
}

/// Non-blocking streaming sink for an outgoing request body.
///
/// The encoder is owned by the connection and handed to the handler's
/// `produce_content` by reference for the duration of one `output_ready`
/// event; it is never buffered by this crate.
pub trait ContentEncoder {
    /// Writes as much of `src` as the connection's output buffer has room
    /// for right now, returning the number of bytes consumed.
    fn write(&mut self, src: &[u8]) -> Result<usize>;

    /// Marks the body as fully written. Must be called by the handler
    /// exactly once, after its last `write`.
    fn complete(&mut self);

    /// Whether `complete` has been called.
    fn is_completed(&self) -> bool;
}

/// Non-blocking streaming source for an incoming response body.
pub trait ContentDecoder {
    /// Reads as much of the body as is currently buffered into `dst`,
    /// returning the number of bytes read. Returns `Ok(0)` when the body is
    /// fully consumed (`is_completed()` becomes true at that point).
    fn read(&mut self, dst: &mut [u8]) -> Result<usize>;

    /// Whether the full body has been delivered.
    fn is_completed(&self) -> bool;
}

/// The connection-control surface handed to the handler's content callbacks
/// (`produce_content`/`consume_content`) so a handler can suspend or resume
/// output, discard buffered body state, or adjust the socket timeout from
/// inside a callback that's mid-body.
///
/// This is split out of `Connection` rather than passed as `&mut dyn
/// Connection` directly because `Connection` carries an associated `Error`
/// type, which would make a trait object of it impossible to name here;
/// `IoControl` only needs the subset of the connection's surface that
/// doesn't depend on that type. `Connection` requires it as a supertrait, so
/// every connection implementation already provides it.
pub trait IoControl {
    /// Stops `output_ready` events from firing and discards any pending
    /// outbound body.
    fn suspend_output(&mut self);

    /// Resumes `output_ready` events.
    fn request_output(&mut self);

    /// Discards any pending outbound body state without affecting whether
    /// output events fire.
    fn reset_output(&mut self);

    /// Discards any remaining inbound body.
    fn reset_input(&mut self);

    fn socket_timeout(&self) -> u64;

    fn set_socket_timeout(&mut self, ms: u64);

    fn status(&self) -> ConnStatus;

    /// Graceful close: lets any in-flight write/peer-ack complete.
    fn close(&mut self);

    /// Immediate close: drops the connection without waiting on the peer.
    fn shutdown(&mut self);
}

/// The non-blocking connection contract consumed by the protocol handler.
///
/// Wire parsing/formatting and reactor/socket management are out of scope
/// here (delegated to the implementation); this trait only exposes the
/// control surface the protocol handler needs to drive one exchange.
pub trait Connection: IoControl {
    type Error: std::fmt::Display;

    /// The attribute slot used to hand an `ExchangeHandler` to the core.
    fn context(&mut self) -> &mut ConnectionContext;

    /// Enqueues a request head for transmission.
    fn submit_request(&mut self, request: &RequestHead) -> Result<(), Self::Error>;

    /// The most recently parsed response head, if any.
    fn http_response(&self) -> Option<&ResponseHead>;
}
