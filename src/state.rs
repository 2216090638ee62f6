use crate::handler::ExchangeHandler;
use crate::message::MessageState;
use crate::request::RequestHead;
use crate::response::ResponseHead;

/// Per-connection mutable record carrying everything the protocol handler
/// needs to drive the current exchange. Created once per connection (in
/// `connected`) and lives until the connection closes; `reset()` returns it
/// to its initial shape between exchanges without discarding it.
pub struct ExchangeState {
    pub handler: Option<Box<dyn ExchangeHandler>>,
    pub request_state: MessageState,
    pub response_state: MessageState,
    pub request: Option<RequestHead>,
    pub response: Option<ResponseHead>,
    pub saved_timeout: Option<u64>,
    pub valid: bool,
}

impl ExchangeState {
    pub fn new() -> Self {
        ExchangeState {
            handler: None,
            request_state: MessageState::Ready,
            response_state: MessageState::Ready,
            request: None,
            response: None,
            saved_timeout: None,
            valid: true,
        }
    }

    /// Returns this side to `READY` for the next exchange, breaking the
    /// handler/connection reference cycle by dropping the handler (the
    /// connection's context no longer points to it once this runs, and
    /// `closed()` is what eventually drops the `ExchangeState` itself).
    pub fn reset(&mut self) {
        self.handler = None;
        self.request_state = MessageState::Ready;
        self.response_state = MessageState::Ready;
        self.request = None;
        self.response = None;
        self.saved_timeout = None;
        self.valid = true;
    }
}

impl Default for ExchangeState {
    fn default() -> Self {
        ExchangeState::new()
    }
}
