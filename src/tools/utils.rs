/// Normalize an incomplete URL: add a missing scheme, default localhost to
/// http, and leave special schemes and relative paths alone.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    const PASSTHROUGH: [&str; 5] = ["http://", "https://", "file://", "data:", "about:"];
    if PASSTHROUGH.iter().any(|scheme| trimmed.starts_with(scheme)) {
        return trimmed.to_string();
    }

    if trimmed.starts_with('/') || trimmed.starts_with("./") || trimmed.starts_with("../") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_urls_unchanged() {
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com/a"), "http://example.com/a");
        assert_eq!(normalize_url("about:blank"), "about:blank");
        assert_eq!(normalize_url("file:///tmp/x.html"), "file:///tmp/x.html");
        assert_eq!(
            normalize_url("data:text/html,<p>hi</p>"),
            "data:text/html,<p>hi</p>"
        );
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("sub.example.com/p"), "https://sub.example.com/p");
    }

    #[test]
    fn test_localhost_defaults_to_http() {
        assert_eq!(normalize_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_url("127.0.0.1:8080"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_relative_paths_unchanged() {
        assert_eq!(normalize_url("/path"), "/path");
        assert_eq!(normalize_url("./rel"), "./rel");
        assert_eq!(normalize_url("../up"), "../up");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
    }
}
