//! Request extractors whose rejections use the service's JSON error format.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use todo_core::{IdError, TodoFields, TodoId};
use tracing::debug;

use crate::error::ApiError;

/// The `{id}` path segment, validated as a [`TodoId`].
///
/// A segment the router cannot decode (e.g. percent-encoded bytes that are
/// not UTF-8) is reported as a malformed id, using the raw segment.
#[derive(Debug, Clone, Copy)]
pub struct TodoIdPath(pub TodoId);

impl<S> FromRequestParts<S> for TodoIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => Ok(Self(TodoId::parse(&raw)?)),
            Err(rejection) => {
                debug!(error = %rejection, "undecodable id segment");
                Err(IdError::Malformed(raw_last_segment(parts)).into())
            }
        }
    }
}

fn raw_last_segment(parts: &Parts) -> String {
    parts
        .uri
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A request body decoded as caller fields.
///
/// The body is read as JSON whatever the declared content type.
#[derive(Debug, Clone)]
pub struct FieldsBody(pub TodoFields);

impl<S> FromRequest<S> for FieldsBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        parse_fields(&body).map(Self)
    }
}

fn parse_fields(body: &Bytes) -> Result<TodoFields, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    #[test]
    fn parse_fields_accepts_objects() {
        let fields = parse_fields(&Bytes::from_static(br#"{"title":"buy milk"}"#)).unwrap();
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn parse_fields_rejects_bad_bodies() {
        for body in [
            &b""[..],
            b"{",
            b"[1,2]",
            b"\"title\"",
            br#"{"_id":"x"}"#,
            br#"{"a.b":1}"#,
        ] {
            let err = parse_fields(&Bytes::copy_from_slice(body)).unwrap_err();
            assert!(matches!(err, ApiError::InvalidBody(_)));
        }
    }

    #[test]
    fn raw_segment_is_taken_from_the_uri() {
        let (parts, _) = HttpRequest::builder()
            .uri("/todos/%FF%FE")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(raw_last_segment(&parts), "%FF%FE");
    }
}
