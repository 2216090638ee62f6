use std::collections::HashMap;

use crate::handler::ExchangeHandler;

/// Default 100-continue wait timeout, per `http.protocol.wait-for-continue`.
pub const DEFAULT_WAIT_FOR_CONTINUE_MS: u64 = 3000;

const WAIT_FOR_CONTINUE_PARAM: &str = "http.protocol.wait-for-continue";

/// Per-exchange attribute/parameter bag, shared between the exchange
/// handler and the protocol handler for the duration of one exchange.
///
/// Kept statically typed rather than an `Any`-typed attribute bag: a small
/// map of named integer parameters plus typed accessors, since the only
/// parameter the core itself reads is the 100-continue wait timeout.
#[derive(Debug, Clone, Default)]
pub struct HttpContext {
    params: HashMap<String, i64>,
}

impl HttpContext {
    pub fn new() -> Self {
        HttpContext::default()
    }

    pub fn set_param(&mut self, name: impl Into<String>, value: i64) {
        self.params.insert(name.into(), value);
    }

    pub fn param(&self, name: &str) -> Option<i64> {
        self.params.get(name).copied()
    }

    /// The 100-continue wait timeout, in milliseconds, falling back to the
    /// protocol default when the exchange hasn't overridden it.
    pub fn wait_for_continue_ms(&self) -> u64 {
        self.param(WAIT_FOR_CONTINUE_PARAM)
            .map(|v| v.max(0) as u64)
            .unwrap_or(DEFAULT_WAIT_FOR_CONTINUE_MS)
    }

    pub fn set_wait_for_continue_ms(&mut self, ms: u64) {
        self.set_param(WAIT_FOR_CONTINUE_PARAM, ms as i64);
    }
}

/// The connection-owned attribute slot used to hand an `ExchangeHandler` to
/// the protocol handler and back. The `ProtocolHandler` owns its
/// `ExchangeState` directly as a field rather than stashing it back in this
/// bag, so this slot only ever carries the handler, not the state.
#[derive(Default)]
pub struct ConnectionContext {
    pending_handler: Option<Box<dyn ExchangeHandler>>,
}

impl ConnectionContext {
    pub fn new() -> Self {
        ConnectionContext::default()
    }

    /// Caller-side: attach the next handler and (separately) signal output
    /// readiness on the connection to kick off `request_ready`.
    pub fn attach(&mut self, handler: Box<dyn ExchangeHandler>) {
        self.pending_handler = Some(handler);
    }

    /// Core-side: take whatever handler the caller attached, if any.
    pub fn take(&mut self) -> Option<Box<dyn ExchangeHandler>> {
        self.pending_handler.take()
    }
}
