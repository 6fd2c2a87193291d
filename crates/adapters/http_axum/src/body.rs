//! Request body reading.
//!
//! With a `Content-Length` header exactly that many bytes are read, however
//! the client splits them across writes. Without one the body is read until
//! the stream ends, which covers `Transfer-Encoding: chunked`. Either way no
//! more than the configured limit is buffered.

use axum::body::Body;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_LENGTH;
use http_body_util::{BodyExt, LengthLimitError, Limited};

/// Largest body read when the router is not told otherwise.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Failure while reading a request body.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("invalid content-length header")]
    InvalidContentLength,

    #[error("body exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("body ended after {received} of {expected} bytes")]
    Truncated { expected: usize, received: usize },

    #[error("failed to read body")]
    Stream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Read the complete body of a request, buffering at most `limit` bytes.
///
/// # Errors
///
/// Returns [`BodyError::InvalidContentLength`] for an unparsable length,
/// [`BodyError::TooLarge`] when the declared or streamed size passes `limit`,
/// [`BodyError::Truncated`] when the stream ends early, or
/// [`BodyError::Stream`] when the connection fails.
pub async fn read_body(headers: &HeaderMap, body: Body, limit: usize) -> Result<Vec<u8>, BodyError> {
    let expected = content_length(headers)?;
    if expected.is_some_and(|expected| expected > limit) {
        return Err(BodyError::TooLarge { limit });
    }

    let mut body = Limited::new(body, limit);
    let mut buf = Vec::new();

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|err| {
            if err.is::<LengthLimitError>() {
                BodyError::TooLarge { limit }
            } else {
                BodyError::Stream(err)
            }
        })?;
        let Ok(data) = frame.into_data() else {
            continue;
        };
        buf.extend_from_slice(&data);
        if let Some(expected) = expected
            && buf.len() >= expected
        {
            buf.truncate(expected);
            return Ok(buf);
        }
    }

    match expected {
        Some(expected) if buf.len() < expected => Err(BodyError::Truncated {
            expected,
            received: buf.len(),
        }),
        _ => Ok(buf),
    }
}

fn content_length(headers: &HeaderMap) -> Result<Option<usize>, BodyError> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .map(Some)
        .ok_or(BodyError::InvalidContentLength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::HeaderValue;

    const LIMIT: usize = 64;

    fn chunked(parts: &[&'static str]) -> Body {
        let chunks: Vec<Result<Bytes, std::io::Error>> =
            parts.iter().map(|part| Ok(Bytes::from_static(part.as_bytes()))).collect();
        Body::from_stream(tokio_stream::iter(chunks))
    }

    fn with_length(length: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_str(length).unwrap());
        headers
    }

    #[tokio::test]
    async fn should_read_declared_length_across_frames() {
        let body = chunked(&["{\"a\"", ":", "1}"]);
        let bytes = read_body(&with_length("7"), body, LIMIT).await.unwrap();
        assert_eq!(bytes, b"{\"a\":1}");
    }

    #[tokio::test]
    async fn should_stop_at_declared_length() {
        let body = chunked(&["hello", "world", "!!"]);
        let bytes = read_body(&with_length("10"), body, LIMIT).await.unwrap();
        assert_eq!(bytes, b"helloworld");
    }

    #[tokio::test]
    async fn should_read_until_end_without_length() {
        let body = chunked(&["a", "bc", "", "def"]);
        let bytes = read_body(&HeaderMap::new(), body, LIMIT).await.unwrap();
        assert_eq!(bytes, b"abcdef");
    }

    #[tokio::test]
    async fn should_fail_when_stream_ends_early() {
        let body = chunked(&["abcd"]);
        let err = read_body(&with_length("10"), body, LIMIT).await.unwrap_err();
        assert!(matches!(
            err,
            BodyError::Truncated {
                expected: 10,
                received: 4
            }
        ));
    }

    #[tokio::test]
    async fn should_reject_unparsable_length() {
        let err = read_body(&with_length("ten"), Body::empty(), LIMIT).await.unwrap_err();
        assert!(matches!(err, BodyError::InvalidContentLength));
    }

    #[tokio::test]
    async fn should_read_empty_body() {
        let bytes = read_body(&with_length("0"), Body::empty(), LIMIT).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn should_refuse_huge_declared_length_before_reading() {
        for length in ["18446744073709551615", "1125899906842624"] {
            let err = read_body(&with_length(length), chunked(&["{}"]), LIMIT)
                .await
                .unwrap_err();
            assert!(matches!(err, BodyError::TooLarge { limit: LIMIT }), "{length}");
        }
    }

    #[tokio::test]
    async fn should_refuse_stream_growing_past_limit() {
        let body = chunked(&["0123456789abcdef"; 5]);
        let err = read_body(&HeaderMap::new(), body, LIMIT).await.unwrap_err();
        assert!(matches!(err, BodyError::TooLarge { limit: LIMIT }));
    }

    #[tokio::test]
    async fn should_accept_body_of_exactly_the_limit() {
        let body = chunked(&["0123456789abcdef"; 4]);
        let bytes = read_body(&HeaderMap::new(), body, LIMIT).await.unwrap();
        assert_eq!(bytes.len(), LIMIT);
    }
}
