//! URL slug generation.

/// Generate a URL-safe slug from free text.
///
/// Folds the Turkish characters the site's content uses to ASCII,
/// lowercases, drops everything outside `[a-z0-9 _-]`, and collapses runs
/// of whitespace, underscores, and hyphens into single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars().map(fold_char) {
        for ch in ch.to_lowercase() {
            if ch.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(ch);
            } else if ch.is_whitespace() || ch == '-' || ch == '_' {
                pending_separator = true;
            }
            // Anything else is dropped without forcing a separator.
        }
    }

    slug
}

/// Fold Turkish-specific characters to their ASCII counterpart.
fn fold_char(ch: char) -> char {
    match ch {
        'ç' | 'Ç' => 'c',
        'ğ' | 'Ğ' => 'g',
        'ı' | 'İ' => 'i',
        'ö' | 'Ö' => 'o',
        'ş' | 'Ş' => 's',
        'ü' | 'Ü' => 'u',
        other => other,
    }
}
