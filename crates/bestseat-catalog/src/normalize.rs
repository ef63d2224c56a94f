use unicode_normalization::UnicodeNormalization;

/// Lookup key for catalog names: NFKC, single spaces, lowercase
pub fn lookup_key(text: &str) -> String {
    let text: String = text.trim().nfkc().collect();

    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
