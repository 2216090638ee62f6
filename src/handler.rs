use crate::connection::{ContentDecoder, ContentEncoder, IoControl};
use crate::context::HttpContext;
use crate::error::Error;
use crate::request::RequestHead;
use crate::response::ResponseHead;

/// Decides, given a completed response, whether the connection that served
/// it may be reused for another exchange.
///
/// Split out of `ExchangeHandler` into its own single-method trait so a
/// reuse policy is swappable independently of the rest of the handler.
pub trait ConnectionReuseStrategy {
    fn keep_alive(&self, response: &ResponseHead, ctx: &HttpContext) -> bool;
}

/// The default strategy: RFC 7230 §6.1 persistence rules.
///
/// HTTP/1.1 connections persist unless a `Connection: close` option is
/// present; HTTP/1.0 connections close unless `Connection: keep-alive` is
/// present.
pub struct DefaultReuseStrategy;

impl ConnectionReuseStrategy for DefaultReuseStrategy {
    fn keep_alive(&self, response: &ResponseHead, _ctx: &HttpContext) -> bool {
        use crate::header::CONNECTION;
        use crate::message::Version;

        match response.version {
            Version::Http11 => !response.headers.has_token(CONNECTION, "close"),
            Version::Http10 => response.headers.has_token(CONNECTION, "keep-alive"),
        }
    }
}

/// The caller-supplied capability set that drives one or more exchanges on
/// a connection. The protocol handler's sole user-facing extension point.
///
/// Callback ordering (enforced by the protocol handler, not by this trait):
/// `generate_request`, zero or more `produce_content`, `request_completed`,
/// `response_received`, zero or more `consume_content`, `response_completed`
/// — with `failed` able to preempt any remaining step, always followed by
/// exactly one `close`.
///
/// The per-exchange `HttpContext` is owned by the handler itself (see
/// `context()`) rather than threaded through every callback as a separate
/// argument: unlike the connection (a distinct object the protocol handler
/// genuinely borrows), the context is just the handler's own bookkeeping,
/// so callbacks reach it through `self` the same way any other field would
/// be reached.
pub trait ExchangeHandler: Send {
    /// Produces the next request head, or `None` to defer (the connection
    /// stays idle until the caller re-attaches a handler and signals output
    /// readiness).
    fn generate_request(&mut self) -> Option<RequestHead>;

    /// Writes the next chunk of the request body to `encoder`. Must call
    /// `encoder.complete()` exactly once, on the call where the body ends.
    /// `ioctrl` gives the handler the same connection-control surface
    /// `ProtocolHandler` itself uses, so it can suspend/resume output or
    /// adjust the socket timeout from within this callback.
    fn produce_content(&mut self, encoder: &mut dyn ContentEncoder, ioctrl: &mut dyn IoControl);

    /// The request (head and body) has been fully written.
    fn request_completed(&mut self);

    /// Called once with the final (>= 200) response head.
    fn response_received(&mut self, response: &ResponseHead);

    /// Reads the next chunk of the response body from `decoder`. `ioctrl`
    /// carries the same connection-control surface as `produce_content`.
    fn consume_content(&mut self, decoder: &mut dyn ContentDecoder, ioctrl: &mut dyn IoControl);

    /// The response body has been fully consumed.
    fn response_completed(&mut self);

    /// True once the handler has no further exchanges to drive on this
    /// connection.
    fn is_done(&self) -> bool;

    /// Called exactly once if the exchange aborts; always followed by
    /// `close`.
    fn failed(&mut self, cause: Error);

    /// Scoped release of handler-owned resources. Must be idempotent: it
    /// may be reached from more than one terminal path in principle, and
    /// implementations should tolerate being called once per their own
    /// lifetime without double-freeing anything.
    fn close(&mut self);

    /// Per-exchange context shared with user code.
    fn context(&mut self) -> &mut HttpContext;

    fn reuse_strategy(&self) -> &dyn ConnectionReuseStrategy;
}
