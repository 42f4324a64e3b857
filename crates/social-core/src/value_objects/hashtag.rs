//! Hashtag extraction from captions

/// Extract hashtags from a caption.
///
/// The caption is lowercased and split on whitespace. Every token that starts
/// with `#` is split on `#` again so `#a#b` yields `a` and `b`. Empty parts are
/// dropped and duplicates removed, keeping first-seen order.
pub fn extract_hashtags(caption: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for token in caption.to_lowercase().split_whitespace() {
        if !token.starts_with('#') {
            continue;
        }
        for part in token.split('#').filter(|p| !p.is_empty()) {
            if !tags.iter().any(|t| t == part) {
                tags.push(part.to_string());
            }
        }
    }

    tags
}

/// Normalize a search term to the stored tag form: trimmed, lowercase, no leading `#`.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_lowercase()
}
