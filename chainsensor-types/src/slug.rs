//! Derivation of sensor API endpoints from display names.

/// Slugifies a sensor name: lower-cased, with every run of
/// non-alphanumeric characters collapsed to a single hyphen. Leading
/// and trailing hyphens are dropped.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            // Case folding can expand to multiple chars; keep only the
            // ones still alphanumeric (e.g. dotted capital I folds to
            // "i" plus a combining mark).
            slug.extend(c.to_lowercase().filter(|c| c.is_alphanumeric()));
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Derives the API endpoint for a sensor name:
/// `<base_url>/<slugified-name>`.
#[must_use]
pub fn api_endpoint(base_url: &str, name: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slugify(name))
}
