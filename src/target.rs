//! Target URL normalization.
use std::fmt;

/// The URL every request of a run is sent to.
///
/// A target without an `http://` or `https://` scheme gets `http://` prepended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    /// Creates a normalized target from a user supplied string.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if has_http_scheme(&raw) { Self(raw) } else { Self(format!("http://{raw}")) }
    }

    /// Returns the normalized URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn has_http_scheme(s: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| s.get(..scheme.len()).is_some_and(|p| p.eq_ignore_ascii_case(scheme)))
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_http_scheme() {
        assert_eq!(Target::new("example.com").as_str(), "http://example.com");
        assert_eq!(Target::new("127.0.0.1:8080/ping").as_str(), "http://127.0.0.1:8080/ping");
        assert_eq!(Target::new("httpbin.org/get").as_str(), "http://httpbin.org/get");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(Target::new("http://example.com").as_str(), "http://example.com");
        assert_eq!(Target::new("https://example.com/a?b=c").as_str(), "https://example.com/a?b=c");
        assert_eq!(Target::new("HTTPS://example.com").as_str(), "HTTPS://example.com");
    }
}
