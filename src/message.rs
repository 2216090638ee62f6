//! Shared message-level types: the HTTP version and the discrete phases a
//! request or response passes through on one side of an exchange.
//!
//! `MessageState` is kept as a tagged enum with an explicit transition table
//! in `protocol.rs` rather than a set of booleans: booleans on a struct can
//! be set in combinations the protocol never actually reaches, while a
//! match on this enum can't.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// No message in flight on this side.
    Ready,

    /// Request head submitted with `Expect: 100-continue`; awaiting either
    /// 100 or a final response. Output is suspended.
    AckExpected,

    /// 100-continue received; output re-enabled, body streaming imminent.
    Ack,

    /// Body bytes are being written (request side) or read (response side).
    BodyStream,

    /// This side of the exchange has finished; awaiting the other side or a
    /// reset.
    Completed,
}

impl Default for MessageState {
    fn default() -> Self {
        MessageState::Ready
    }
}
