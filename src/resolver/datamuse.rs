//! Datamuse word lookup (`md=d` returns tab-prefixed definitions).
use super::{non_empty, HttpClient, Resolver};
use anyhow::{anyhow, Result};
use serde_json::Value;

pub struct DatamuseResolver {
    client: HttpClient,
    base_url: String,
}

impl DatamuseResolver {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Resolver for DatamuseResolver {
    fn name(&self) -> &'static str {
        "datamuse"
    }

    fn resolve(&self, key: &str) -> Result<Option<String>> {
        let url = format!("{}/words", self.base_url);
        let query = [("sp", key), ("md", "d"), ("max", "1")];
        match self.client.get_json(&url, &query)? {
            Some(body) => extract_definition(&body),
            None => Ok(None),
        }
    }
}

/// Take the first definition of the first match, dropping the `pos\t` prefix.
fn extract_definition(body: &Value) -> Result<Option<String>> {
    let entries = body
        .as_array()
        .ok_or_else(|| anyhow!("datamuse response is not an array"))?;
    let Some(first) = entries.first() else {
        return Ok(None);
    };
    let raw = first
        .get("defs")
        .and_then(Value::as_array)
        .and_then(|defs| defs.first())
        .and_then(Value::as_str);
    Ok(raw.and_then(|raw| {
        let text = raw.split_once('\t').map_or(raw, |(_, text)| text);
        non_empty(text)
    }))
}
