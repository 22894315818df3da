//! Free Dictionary API lookup (`/api/v2/entries/en/{word}`).
use super::{non_empty, HttpClient, Resolver};
use anyhow::{anyhow, Result};
use serde_json::Value;

pub struct DictionaryApiResolver {
    client: HttpClient,
    base_url: String,
}

impl DictionaryApiResolver {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Resolver for DictionaryApiResolver {
    fn name(&self) -> &'static str {
        "dictionary-api"
    }

    fn resolve(&self, key: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/api/v2/entries/en/{}",
            self.base_url,
            urlencoding::encode(key)
        );
        match self.client.get_json(&url, &[])? {
            Some(body) => extract_definition(&body),
            None => Ok(None),
        }
    }
}

/// First definition of the first meaning of the first entry.
fn extract_definition(body: &Value) -> Result<Option<String>> {
    let entries = body
        .as_array()
        .ok_or_else(|| anyhow!("dictionary response is not an array"))?;
    let definition = entries
        .first()
        .and_then(|entry| entry.get("meanings"))
        .and_then(Value::as_array)
        .and_then(|meanings| meanings.first())
        .and_then(|meaning| meaning.get("definitions"))
        .and_then(Value::as_array)
        .and_then(|definitions| definitions.first())
        .and_then(|definition| definition.get("definition"))
        .and_then(Value::as_str);
    Ok(definition.and_then(non_empty))
}
