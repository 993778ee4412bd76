//! Integration tests module for beekeeper
//!
//! Shared helpers for the pipeline and transport tests.

pub mod http_transport_test;
pub mod pipeline_test;

use beekeeper::{RenderedRequest, ResponseEnvelope, TransportError};
use std::cell::RefCell;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Transport stub that records requests and replays a canned response.
pub struct StubTransport {
    pub sent: RefCell<Vec<RenderedRequest>>,
    pub reply: ResponseEnvelope,
}

impl StubTransport {
    pub fn new(reply: ResponseEnvelope) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            reply,
        }
    }
}

impl beekeeper::Transport for StubTransport {
    fn send(&self, request: &RenderedRequest) -> Result<ResponseEnvelope, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        Ok(self.reply.clone())
    }
}
