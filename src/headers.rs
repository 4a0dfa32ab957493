//! Request headers given as raw `Key:Value` strings.
use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::RequestError;

/// An ordered set of raw `Key:Value` header strings.
///
/// Only the first colon separates key from value. Entries without a colon
/// are dropped when parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    raw: Vec<String>,
}

impl HeaderSet {
    /// Creates a header set from raw strings.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { raw: raw.into_iter().map(Into::into).collect() }
    }

    /// Returns the raw header strings in insertion order.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Returns the key/value pairs in insertion order, skipping entries without a colon.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.raw.iter().filter_map(|h| h.split_once(':'))
    }

    /// Builds a header map for a request. Repeated keys are appended, not replaced.
    pub fn to_header_map(&self) -> Result<HeaderMap, RequestError> {
        let mut map = HeaderMap::new();
        for (name, value) in self.pairs() {
            let key = HeaderName::from_bytes(name.as_bytes())
                .map_err(|source| RequestError::InvalidHeaderName { name: name.to_owned(), source })?;
            let value = HeaderValue::from_str(value)
                .map_err(|source| RequestError::InvalidHeaderValue { name: name.to_owned(), source })?;
            map.append(key, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_entries_without_colon() {
        let headers = HeaderSet::new(["Accept:text/plain", "garbage", "X-Id:7"]);
        let pairs: Vec<_> = headers.pairs().collect();
        assert_eq!(pairs, vec![("Accept", "text/plain"), ("X-Id", "7")]);
        assert_eq!(headers.raw().len(), 3);
    }

    #[test]
    fn test_only_first_colon_delimits() {
        let headers = HeaderSet::new(["A:B", "Referer:http://example.com:8080/x", "Empty:"]);
        let map = headers.to_header_map().unwrap();
        assert_eq!(map["a"], "B");
        assert_eq!(map["referer"], "http://example.com:8080/x");
        assert_eq!(map["empty"], "");
    }

    #[test]
    fn test_repeated_keys_are_kept() {
        let map = HeaderSet::new(["X-Tag:one", "X-Tag:two"]).to_header_map().unwrap();
        let values: Vec<_> = map.get_all("x-tag").iter().collect();
        assert_eq!(values, vec!["one", "two"]);
    }

    #[test]
    fn test_invalid_name_is_an_error() {
        let err = HeaderSet::new(["bad key:v"]).to_header_map().unwrap_err();
        assert!(matches!(err, RequestError::InvalidHeaderName { ref name, .. } if name == "bad key"));
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let err = HeaderSet::new(["X-Bad:line\nbreak"]).to_header_map().unwrap_err();
        assert!(matches!(err, RequestError::InvalidHeaderValue { .. }));
    }
}
