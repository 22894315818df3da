//! Openverse image search, used to replace generated stand-in images.
use super::{non_empty, HttpClient, Resolver};
use anyhow::Result;
use serde_json::Value;

pub struct OpenverseResolver {
    client: HttpClient,
    base_url: String,
}

impl OpenverseResolver {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Resolver for OpenverseResolver {
    fn name(&self) -> &'static str {
        "openverse"
    }

    fn resolve(&self, key: &str) -> Result<Option<String>> {
        let url = format!("{}/v1/images/", self.base_url);
        let query = [("q", key), ("page_size", "1"), ("mature", "false")];
        Ok(self
            .client
            .get_json(&url, &query)?
            .and_then(|body| extract_image_url(&body)))
    }
}

fn extract_image_url(body: &Value) -> Option<String> {
    body.pointer("/results/0/url")
        .and_then(Value::as_str)
        .and_then(non_empty)
}
