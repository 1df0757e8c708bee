#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use vnfeed::domain::error::UpstreamError;
use vnfeed::domain::udf::UdfOperation;
use vnfeed::domain::upstream::UpstreamResponse;
use vnfeed::ports::upstream_port::UpstreamPort;

/// Scripted [`UpstreamPort`] that records every call it receives.
/// Operations with no stubbed response fail with a transport error.
pub struct MockUpstreamPort {
    responses: HashMap<UdfOperation, UpstreamResponse>,
    failures: HashMap<UdfOperation, UpstreamError>,
    calls: Mutex<Vec<(UdfOperation, Vec<(String, String)>)>>,
}

impl MockUpstreamPort {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            failures: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, op: UdfOperation, response: UpstreamResponse) -> Self {
        self.responses.insert(op, response);
        self
    }

    pub fn with_json(self, op: UdfOperation, status: u16, body: &str) -> Self {
        self.with_response(op, json_response(status, body))
    }

    pub fn with_failure(mut self, op: UdfOperation, error: UpstreamError) -> Self {
        self.failures.insert(op, error);
        self
    }

    pub fn calls(&self) -> Vec<(UdfOperation, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Query pairs the mock saw for `op`, panicking if it was never called.
    pub fn params_for(&self, op: UdfOperation) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .find(|(called, _)| *called == op)
            .map(|(_, params)| params)
            .unwrap_or_else(|| panic!("no call recorded for {op}"))
    }
}

#[async_trait]
impl UpstreamPort for MockUpstreamPort {
    async fn fetch(
        &self,
        op: UdfOperation,
        params: &[(String, String)],
    ) -> Result<UpstreamResponse, UpstreamError> {
        self.calls.lock().unwrap().push((op, params.to_vec()));
        if let Some(error) = self.failures.get(&op) {
            return Err(error.clone());
        }
        match self.responses.get(&op) {
            Some(response) => Ok(response.clone()),
            None => Err(UpstreamError::Transport("no stubbed response".to_string())),
        }
    }
}

pub fn json_response(status: u16, body: &str) -> UpstreamResponse {
    UpstreamResponse {
        status,
        content_type: Some("application/json".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

pub fn text_response(status: u16, body: &str) -> UpstreamResponse {
    UpstreamResponse {
        status,
        content_type: Some("text/plain; charset=utf-8".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

pub fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
