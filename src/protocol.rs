use std::sync::Mutex;

use crate::connection::{ConnStatus, Connection, ContentDecoder, ContentEncoder};
use crate::error::{format_err, Error, ExchangeError};
use crate::handler::{ConnectionReuseStrategy, ExchangeHandler};
use crate::message::MessageState;
use crate::method::Method;
use crate::state::ExchangeState;
use crate::status::{self, StatusCode};

/// Fixed idle timeout set on a connection after a graceful close, so the
/// peer gets a chance to observe the close without the socket hanging open
/// indefinitely.
pub const GRACE_CLOSE_TIMEOUT_MS: u64 = 250;

/// Dispatches connection events into a per-connection `ExchangeState`,
/// forwarding content production/consumption to the attached
/// `ExchangeHandler`. Stateless itself — all mutable state lives in the
/// `Mutex`-guarded `ExchangeState` — so one instance is created per
/// connection, in `connected`, and discarded when the connection closes.
///
/// The mutex is held for the entire body of every event method below, per
/// the concurrency model: no event callback ever suspends mid-way, so a
/// plain blocking `Mutex` (rather than an async one) is the correct and
/// cheapest tool here.
pub struct ProtocolHandler {
    state: Mutex<ExchangeState>,
}

impl ProtocolHandler {
    pub fn new() -> Self {
        ProtocolHandler {
            state: Mutex::new(ExchangeState::new()),
        }
    }

    /// Creates a fresh exchange state and kicks off the first exchange.
    pub fn connected<C: Connection>(&self, conn: &mut C) {
        {
            let mut state = self.state.lock().unwrap();
            *state = ExchangeState::new();
        }
        self.request_ready(conn);
    }

    /// Starts (or restarts) the request side of the next exchange. A no-op
    /// if the request side is already past `READY` (the body is still being
    /// written).
    pub fn request_ready<C: Connection>(&self, conn: &mut C) {
        let mut state = self.state.lock().unwrap();

        if state.request_state != MessageState::Ready {
            return;
        }

        if let Some(handler) = state.handler.as_mut() {
            if handler.is_done() {
                handler.close();
                state.reset();
            }
        }

        if state.handler.is_none() {
            match conn.context().take() {
                Some(handler) => state.handler = Some(handler),
                None => return,
            }
        }

        let request = {
            let handler = state.handler.as_mut().expect("handler attached above");
            match handler.generate_request() {
                Some(request) => request,
                None => {
                    log::debug!("handler deferred request generation");
                    return;
                }
            }
        };

        if let Err(e) = conn.submit_request(&request) {
            let err = format_err!("failed to submit request: {}", e);
            conn.shutdown();
            fail_exchange(&mut state, err);
            return;
        }

        let has_entity = request.has_entity();
        let expects_continue = request.expects_continue();
        log::debug!(
            "submitted {} {} (entity={}, expect-continue={})",
            request.method.as_str(),
            request.target,
            has_entity,
            expects_continue
        );
        state.request = Some(request);

        if has_entity && expects_continue {
            let saved = conn.socket_timeout();
            state.saved_timeout = Some(saved);
            let wait_ms = state
                .handler
                .as_mut()
                .map(|h| h.context().wait_for_continue_ms())
                .unwrap_or(crate::context::DEFAULT_WAIT_FOR_CONTINUE_MS);
            conn.set_socket_timeout(wait_ms);
            state.request_state = MessageState::AckExpected;
        } else if has_entity {
            state.request_state = MessageState::BodyStream;
        } else {
            if let Some(handler) = state.handler.as_mut() {
                handler.request_completed();
            }
            state.request_state = MessageState::Completed;
        }
    }

    /// The connection can accept more output right now.
    pub fn output_ready<C: Connection>(&self, conn: &mut C, encoder: &mut dyn ContentEncoder) {
        let mut state = self.state.lock().unwrap();

        if state.request_state == MessageState::AckExpected {
            conn.suspend_output();
            return;
        }

        if let Some(handler) = state.handler.as_mut() {
            handler.produce_content(encoder, conn);
        }
        state.request_state = MessageState::BodyStream;

        if encoder.is_completed() {
            if let Some(handler) = state.handler.as_mut() {
                handler.request_completed();
            }
            state.request_state = MessageState::Completed;
        }
    }

    /// The connection has parsed a response head (intermediate or final).
    pub fn response_received<C: Connection>(&self, conn: &mut C) {
        let mut state = self.state.lock().unwrap();

        let response = match conn.http_response() {
            Some(response) => response.clone(),
            None => {
                log::error!("response_received fired with no parsed response head");
                return;
            }
        };

        let status_code = response.status_code;

        if status_code.is_informational() {
            if status_code != status::CONTINUE {
                let err = Error::from(ExchangeError::Protocol(format!(
                    "unexpected intermediate response: {}",
                    status_code.as_u16()
                )));
                conn.shutdown();
                fail_exchange(&mut state, err);
                return;
            }

            if state.request_state == MessageState::AckExpected {
                if let Some(saved) = state.saved_timeout.take() {
                    conn.set_socket_timeout(saved);
                }
                conn.request_output();
                state.request_state = MessageState::Ack;
            } else {
                log::debug!("spurious 100 Continue outside ack-expected state; ignoring");
            }
            return;
        }

        // Final (>= 200) response: reconcile the request side first.
        match state.request_state {
            MessageState::AckExpected => {
                if let Some(saved) = state.saved_timeout.take() {
                    conn.set_socket_timeout(saved);
                }
                conn.reset_output();
                state.request_state = MessageState::Completed;
            }
            MessageState::BodyStream => {
                // Early response: the server answered before we finished
                // writing the body. The connection can't be reused.
                conn.reset_output();
                conn.suspend_output();
                state.valid = false;
                state.request_state = MessageState::Completed;
                log::warn!("early response received mid-body; connection marked not reusable");
            }
            _ => {}
        }

        state.response = Some(response.clone());

        if let Some(handler) = state.handler.as_mut() {
            handler.response_received(&response);
        }
        state.response_state = MessageState::BodyStream;

        let method = state.request.as_ref().map(|r| r.method);
        if let Some(method) = method {
            if !can_have_response_body(method, status_code) {
                conn.reset_input();
                Self::process_response(conn, &mut state);
            }
        }
    }

    /// The connection has response body bytes available to read.
    pub fn input_ready<C: Connection>(&self, conn: &mut C, decoder: &mut dyn ContentDecoder) {
        let mut state = self.state.lock().unwrap();

        if let Some(handler) = state.handler.as_mut() {
            handler.consume_content(decoder, conn);
        }
        state.response_state = MessageState::BodyStream;

        if decoder.is_completed() {
            Self::process_response(conn, &mut state);
        }
    }

    /// The connection's idle/IO timeout elapsed.
    pub fn timeout<C: Connection>(&self, conn: &mut C) {
        let mut state = self.state.lock().unwrap();

        if state.request_state == MessageState::AckExpected {
            if let Some(saved) = state.saved_timeout.take() {
                conn.set_socket_timeout(saved);
            }
            conn.request_output();
            state.request_state = MessageState::BodyStream;
            log::debug!("100-continue wait elapsed; resuming body write");
            return;
        }

        log::warn!("socket timeout outside 100-continue wait");
        fail_exchange(&mut state, Error::from(ExchangeError::SocketTimeout));

        match conn.status() {
            ConnStatus::Active => {
                conn.close();
                if conn.status() == ConnStatus::Closing {
                    conn.set_socket_timeout(GRACE_CLOSE_TIMEOUT_MS);
                }
            }
            ConnStatus::Closing | ConnStatus::Closed => conn.shutdown(),
        }
    }

    /// The reactor reported an unrecoverable error on the connection.
    pub fn exception<C: Connection>(&self, conn: &mut C, cause: Error) {
        let mut state = self.state.lock().unwrap();

        conn.shutdown();

        if state.handler.is_some() {
            fail_exchange(&mut state, cause);
        } else {
            log::error!("connection exception with no active exchange: {}", cause);
        }
    }

    /// The connection has fully closed.
    pub fn closed<C: Connection>(&self, _conn: &mut C) {
        let mut state = self.state.lock().unwrap();

        if let Some(handler) = state.handler.as_mut() {
            handler.close();
        }
        state.reset();
    }

    /// Finalizes a completed exchange: decides reuse, notifies the handler,
    /// and resets the state for the next exchange.
    fn process_response<C: Connection>(conn: &mut C, state: &mut ExchangeState) {
        let response = state.response.clone();
        let method = state.request.as_ref().map(|r| r.method);

        let successful_connect = matches!(method, Some(Method::Connect))
            && response
                .as_ref()
                .map_or(false, |r| r.status_code.as_u16() < 300);

        if !state.valid {
            conn.close();
        } else if !successful_connect {
            if let (Some(handler), Some(response)) = (state.handler.as_mut(), response.as_ref()) {
                let ctx_snapshot = handler.context().clone();
                let keep_alive = handler.reuse_strategy().keep_alive(response, &ctx_snapshot);
                if !keep_alive {
                    conn.close();
                }
            }
        }

        if let Some(handler) = state.handler.as_mut() {
            handler.response_completed();
        }

        state.reset();
    }
}

impl Default for ProtocolHandler {
    fn default() -> Self {
        ProtocolHandler::new()
    }
}

fn fail_exchange(state: &mut ExchangeState, cause: Error) {
    if let Some(handler) = state.handler.as_mut() {
        handler.failed(cause);
        handler.close();
    }
    state.reset();
}

/// A response cannot carry a body for a HEAD request, a successful CONNECT
/// tunnel, or the bodyless 2xx/3xx statuses (204, 205, 304). 1xx statuses
/// never reach this decision point (handled earlier in `response_received`)
/// but are guarded here too for defensiveness.
fn can_have_response_body(method: Method, status: StatusCode) -> bool {
    if status.is_informational() {
        return false;
    }
    if method.is_head() {
        return false;
    }
    if method.is_connect() && status.as_u16() < 300 {
        return false;
    }
    if matches!(status.as_u16(), 204 | 205 | 304) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::status::{NOT_MODIFIED, NO_CONTENT, OK, RESET_CONTENT};

    #[test]
    fn head_never_has_body() {
        assert!(!can_have_response_body(Method::Head, OK));
    }

    #[test]
    fn successful_connect_has_no_body() {
        assert!(!can_have_response_body(
            Method::Connect,
            StatusCode::from_u16(200).unwrap()
        ));
        assert!(can_have_response_body(
            Method::Connect,
            StatusCode::from_u16(400).unwrap()
        ));
    }

    #[test]
    fn bodyless_statuses() {
        assert!(!can_have_response_body(Method::Get, NO_CONTENT));
        assert!(!can_have_response_body(Method::Get, RESET_CONTENT));
        assert!(!can_have_response_body(Method::Get, NOT_MODIFIED));
        assert!(can_have_response_body(Method::Get, OK));
    }
}
