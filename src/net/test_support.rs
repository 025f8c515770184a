use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Transport, TransportError};

type Script = Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>;

// Replays queued outcomes in order and records every request it sees.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Script,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, outcome: Result<HttpResponse, TransportError>) -> Self {
        self.script.lock().expect("script mutex poisoned").push_back(outcome);
        self
    }

    pub(crate) fn reply_json(self, status: u16, body: &Value) -> Self {
        self.reply(Ok(HttpResponse::json(status, body)))
    }

    pub(crate) fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }

    pub(crate) fn sent_count(&self) -> usize {
        self.sent.lock().expect("sent mutex poisoned").len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().expect("sent mutex poisoned").push(request);
        self.script
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NoResponse("script exhausted".to_owned())))
    }
}
