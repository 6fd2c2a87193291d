//! Query-string parameters.

use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::http::Uri;

/// Decoded query parameters in order of appearance.
///
/// Pairs with an empty value are dropped, so a blank filter behaves as if it
/// was never supplied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Decode the query string of `uri`.
    ///
    /// # Errors
    ///
    /// Returns the extractor's [`QueryRejection`] when the query cannot be
    /// decoded.
    pub fn from_uri(uri: &Uri) -> Result<Self, QueryRejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(uri)?;
        Ok(Self(
            pairs.into_iter().filter(|(_, value)| !value.is_empty()).collect(),
        ))
    }

    /// First value supplied for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(uri: &'static str) -> QueryParams {
        QueryParams::from_uri(&Uri::from_static(uri)).unwrap()
    }

    #[test]
    fn should_take_first_of_repeated_names() {
        let params = parse("/incidents?reported_by=7&reported_by=8");
        assert_eq!(params.first("reported_by"), Some("7"));
    }

    #[test]
    fn should_decode_percent_escapes_and_plus() {
        let params = parse("/comments?q=a+b%20c&caf%C3%A9=%E2%9C%93");
        assert_eq!(params.first("q"), Some("a b c"));
        assert_eq!(params.first("café"), Some("✓"));
    }

    #[test]
    fn should_drop_blank_and_bare_pairs() {
        let params = parse("/comments?incident_id=&flag&&x=1");
        assert_eq!(params.first("incident_id"), None);
        assert_eq!(params.first("flag"), None);
        assert_eq!(params.first("x"), Some("1"));
    }

    #[test]
    fn should_parse_missing_query() {
        assert_eq!(parse("/users"), QueryParams::default());
    }

    #[test]
    fn should_replace_invalid_utf8() {
        let params = parse("/comments?q=%FF");
        assert_eq!(params.first("q"), Some("\u{FFFD}"));
    }
}
