//! Joining API roots and endpoint paths without doubled or missing slashes.

/// Strip trailing slashes from an API root.
///
/// ```
/// use tabchat::utils::url::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url("https://generativelanguage.googleapis.com/v1beta/"),
///     "https://generativelanguage.googleapis.com/v1beta"
/// );
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Append `endpoint` to `base_url` with exactly one slash between them.
///
/// ```
/// use tabchat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://example.com/v1beta/", "/models/m:generateContent"),
///     "https://example.com/v1beta/models/m:generateContent"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base_url),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_only_trailing_slashes() {
        assert_eq!(normalize_base_url("http://localhost:8080"), "http://localhost:8080");
        assert_eq!(normalize_base_url("http://localhost:8080///"), "http://localhost:8080");
        assert_eq!(normalize_base_url("  http://h/v1/ "), "http://h/v1");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn construct_handles_slashes_on_both_sides() {
        for (base, endpoint) in [
            ("http://h/v1beta", "models/x:generateContent"),
            ("http://h/v1beta/", "models/x:generateContent"),
            ("http://h/v1beta", "/models/x:generateContent"),
            ("http://h/v1beta//", "//models/x:generateContent"),
        ] {
            assert_eq!(
                construct_api_url(base, endpoint),
                "http://h/v1beta/models/x:generateContent",
                "base={base} endpoint={endpoint}"
            );
        }
    }
}
