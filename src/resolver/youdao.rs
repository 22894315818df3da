//! Youdao suggest endpoint for Chinese translations.
use super::{non_empty, HttpClient, Resolver};
use anyhow::Result;
use serde_json::Value;

pub struct YoudaoResolver {
    client: HttpClient,
    base_url: String,
}

impl YoudaoResolver {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Resolver for YoudaoResolver {
    fn name(&self) -> &'static str {
        "youdao"
    }

    fn resolve(&self, key: &str) -> Result<Option<String>> {
        let url = format!("{}/suggest", self.base_url);
        let query = [("num", "1"), ("doctype", "json"), ("q", key)];
        Ok(self
            .client
            .get_json(&url, &query)?
            .and_then(|body| extract_translation(&body)))
    }
}

fn extract_translation(body: &Value) -> Option<String> {
    body.pointer("/data/entries/0/explain")
        .and_then(Value::as_str)
        .and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_translation_reads_first_entry() {
        let body = json!({
            "result": { "code": 200 },
            "data": { "entries": [{ "entry": "cat", "explain": "n. 猫；猫科动物" }] }
        });
        assert_eq!(extract_translation(&body), Some("n. 猫；猫科动物".to_string()));
    }

    #[test]
    fn extract_translation_handles_no_entries() {
        let body = json!({ "result": { "code": 404, "msg": "not found" } });
        assert_eq!(extract_translation(&body), None);
        let empty = json!({ "data": { "entries": [] } });
        assert_eq!(extract_translation(&empty), None);
    }
}
