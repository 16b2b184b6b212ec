use crate::{ApiRequest, RequestScope, Transport};
use roborally_core::{RequestFailure, ResponseEnvelope};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Script {
    requests: Vec<ApiRequest>,
    replies: VecDeque<Result<ResponseEnvelope, RequestFailure>>,
}

/// Clones share one script of replies and recorded requests.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    script: Arc<Mutex<Script>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn reply(&self, envelope: ResponseEnvelope) -> &Self {
        self.script().replies.push_back(Ok(envelope));
        self
    }

    pub fn reply_ok(&self, data: Value) -> &Self {
        self.reply(ResponseEnvelope::ok(data))
    }

    pub fn fail(&self, failure: RequestFailure) -> &Self {
        self.script().replies.push_back(Err(failure));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.script().requests.len()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &ApiRequest) -> Result<ResponseEnvelope, RequestFailure> {
        let mut script = self.script();
        script.requests.push(request.clone());
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(RequestFailure::Transport("no scripted reply".to_string())))
    }
}

/// Cancels `scope` once more than `after` requests have been answered.
#[derive(Debug, Clone)]
pub struct CancelDuringReply {
    inner: RecordingTransport,
    scope: RequestScope,
    after: usize,
}

impl CancelDuringReply {
    pub fn new(inner: RecordingTransport, scope: RequestScope, after: usize) -> Self {
        Self {
            inner,
            scope,
            after,
        }
    }
}

impl Transport for CancelDuringReply {
    fn send(&self, request: &ApiRequest) -> Result<ResponseEnvelope, RequestFailure> {
        let reply = self.inner.send(request);
        if self.inner.request_count() > self.after {
            self.scope.cancel();
        }
        reply
    }
}
