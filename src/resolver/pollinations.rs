//! Generated-image URLs; builds the URL locally without a request.
use super::Resolver;
use anyhow::Result;

pub struct PollinationsResolver {
    base_url: String,
}

impl PollinationsResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Resolver for PollinationsResolver {
    fn name(&self) -> &'static str {
        "pollinations"
    }

    fn resolve(&self, key: &str) -> Result<Option<String>> {
        let prompt = format!(
            "minimalist vector illustration of {key}, simple, bright colors, white background"
        );
        Ok(Some(format!(
            "{}/prompt/{}?width=400&height=400&nologo=true",
            self.base_url,
            urlencoding::encode(&prompt)
        )))
    }

    fn is_remote(&self) -> bool {
        false
    }
}
