//! Blocking HTTP transport using reqwest.

use super::config::TransportConfig;
use super::error::TransportError;
use super::Transport;
use crate::models::request::{HttpMethod, RenderedRequest};
use crate::models::response::ResponseEnvelope;
use log::debug;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::collections::HashMap;

/// Sends rendered requests over the network.
///
/// One blocking exchange per [`send`](Transport::send) call; the timeout and
/// redirect policy come from the [`TransportConfig`] it was built with.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let redirect = match config.max_redirects {
            0 => Policy::none(),
            n => Policy::limited(n as usize),
        };
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Builds a transport from the global configuration.
    pub fn from_global_config() -> Result<Self, TransportError> {
        Self::new(TransportConfig::from_global_config())
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &RenderedRequest) -> Result<ResponseEnvelope, TransportError> {
        let url = url::Url::parse(&request.url)?;
        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::HEAD => reqwest::Method::HEAD,
            HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        };

        debug!("{} {}", request.method, url);
        let mut builder = self.client.request(method, url);

        for (name, value) in &self.config.default_headers {
            if request.header(name).is_none() {
                builder = builder.header(name, value);
            }
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.data {
            builder = builder.body(body.clone());
        }

        let response = builder.send()?;
        let code = response.status().as_u16();

        // First value wins for repeated headers such as Set-Cookie.
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers
                    .entry(name.as_str().to_string())
                    .or_insert_with(|| value_str.to_string());
            }
        }

        let data = response.bytes()?.to_vec();
        debug!("received {} with {} byte(s)", code, data.len());

        Ok(ResponseEnvelope {
            headers,
            data,
            code,
        })
    }
}
