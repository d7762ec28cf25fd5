#![allow(dead_code)]

use apichain::prelude::*;
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&NetworkRequest) -> Result<NetworkResponse, TransportError> + Send + Sync>;

/// In-memory transport that records every request it is handed.
pub struct RecordingTransport {
    requests: Mutex<Vec<NetworkRequest>>,
    responder: Responder,
}

impl RecordingTransport {
    /// Answers every request with `200` and a JSON echo of its URL.
    pub fn echo() -> Arc<Self> {
        Self::responding(|request| {
            let body = serde_json::json!({ "url": request.url }).to_string();
            Ok(NetworkResponse::new(200, body).with_url(request.url.clone()))
        })
    }

    pub fn responding<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&NetworkRequest) -> Result<NetworkResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    pub fn requests(&self) -> Vec<NetworkRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for RecordingTransport {
    fn request(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError> {
        let response = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

/// A node for `http://test.local{path}` dispatching through `transport`.
pub fn node(transport: &Arc<RecordingTransport>, path: &str) -> Api {
    Api::parse(format!("http://test.local{path}"))
        .unwrap()
        .transport(transport.clone())
}
