//! Field resolvers: lookups that turn a word into a candidate field value.
//!
//! Each resolver performs at most one request per call. `Ok(None)` means the
//! service answered but had nothing usable; `Err` covers transport failures,
//! timeouts, and unexpected payloads. The enricher treats both as "no value".
mod datamuse;
mod dictionary_api;
mod http;
mod openverse;
mod pollinations;
mod youdao;

use anyhow::Result;

pub use datamuse::DatamuseResolver;
pub use dictionary_api::DictionaryApiResolver;
pub use http::HttpClient;
pub use openverse::OpenverseResolver;
pub use pollinations::PollinationsResolver;
pub use youdao::YoudaoResolver;

/// Lookup capability used by enrichment passes.
pub trait Resolver {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Resolve a normalized lookup key into a field value.
    fn resolve(&self, key: &str) -> Result<Option<String>>;

    /// Whether calls reach an external service and should be rate limited.
    fn is_remote(&self) -> bool {
        true
    }
}

/// Trim an extracted value, mapping empty strings to `None`.
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
