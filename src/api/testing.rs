//! Scripted transport for exercising the client without a network.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::client::{ApiClient, ApiError};
use crate::api::transport::{HttpRequest, HttpResponse, Transport};
use crate::session::MemoryStore;

/// Replays queued responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub(crate) fn fail_network(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Network { message }),
            None => Err(ApiError::Network {
                message: "no scripted response".to_string(),
            }),
        }
    }
}

pub(crate) fn client_with_token(
    base_url: &str,
    token: &str,
) -> (ApiClient, Arc<FakeTransport>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_token(token));
    let transport = FakeTransport::new();
    let client = ApiClient::with_transport(base_url, store.clone(), transport.clone());
    (client, transport, store)
}

pub(crate) fn logged_out_client() -> (ApiClient, Arc<FakeTransport>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let transport = FakeTransport::new();
    let client = ApiClient::with_transport(
        crate::api::client::DEFAULT_BASE_URL,
        store.clone(),
        transport.clone(),
    );
    (client, transport, store)
}
