use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn part_of_speech_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:\((?:n|v|adj|adv|prep|conj|pron|det|exclam|phr v)\.?\)|(?:n|v|adj|adv|prep|conj|pron|det|exclam)\.)\s+",
        )
        .expect("valid part-of-speech pattern")
    })
}

/// Normalize a record's word into the key sent to resolvers.
///
/// Lowercases, trims, and drops a leading part-of-speech tag such as `n.` or
/// `(v)`.
pub fn lookup_key(word: &str) -> String {
    let trimmed = word.trim();
    let stripped = part_of_speech_prefix().replace(trimmed, "");
    stripped.trim().to_lowercase()
}

pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

pub fn truncate_string(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut truncated = String::new();
    for ch in text.chars() {
        if truncated.len() + ch.len_utf8() > max_bytes {
            break;
        }
        truncated.push(ch);
    }
    truncated
}
