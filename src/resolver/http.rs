//! Shared blocking HTTP client for JSON lookups.
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Blocking JSON client with a per-call timeout.
#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            user_agent: user_agent.to_string(),
        }
    }

    /// GET `url` with query parameters and decode the body as JSON.
    ///
    /// A 404 is reported as `Ok(None)`; every other non-2xx status is an error.
    pub fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<Value>> {
        let mut request = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str());
        for (key, value) in query {
            request = request.query(*key, *value);
        }

        let start = Instant::now();
        let result = request.call();
        let elapsed_ms = start.elapsed().as_millis();
        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => {
                tracing::debug!(url, elapsed_ms, "lookup returned 404");
                return Ok(None);
            }
            Err(err) => return Err(err).with_context(|| format!("GET {url}")),
        };
        tracing::debug!(url, elapsed_ms, status = response.status().as_u16(), "lookup complete");

        let value: Value = response
            .body_mut()
            .read_json()
            .with_context(|| format!("decode JSON from {url}"))?;
        Ok(Some(value))
    }
}
