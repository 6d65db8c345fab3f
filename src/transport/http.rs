//! Real transport over `reqwest::blocking`.
//!
//! One synchronous request per dispatch, form-encoded body on POST, form
//! fields as query parameters on GET. No retries and no timeout beyond the
//! client-wide one configured at construction.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::PagewireError;
use crate::transport::{Method, RequestSpec, Transport, TransportResponse};

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, PagewireError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PagewireError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, spec: &RequestSpec) -> Result<TransportResponse, PagewireError> {
        let builder = match spec.method {
            Method::Get => self.client.get(&spec.url).query(&spec.form),
            Method::Post => self.client.post(&spec.url).form(&spec.form),
        };

        let response = builder
            .send()
            .map_err(|e| PagewireError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| PagewireError::Request(e.to_string()))?;

        tracing::trace!(status, bytes = body.len(), url = %spec.url, "response received");
        Ok(TransportResponse { status, body })
    }
}
