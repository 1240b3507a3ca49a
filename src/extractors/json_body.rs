//! JSON body extractor that tells an empty body apart from a malformed one.

use crate::error::{AppError, DecodeError};
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// Decodes the request body as JSON regardless of `Content-Type`.
///
/// A body with no data (or only whitespace) is [`DecodeError::Empty`];
/// anything serde cannot turn into `T` is [`DecodeError::Malformed`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Body {
                status: e.status(),
                message: e.body_text(),
            })?;
        decode(&bytes).map(JsonBody).map_err(AppError::from)
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    serde_json::from_slice(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassPayload;

    #[test]
    fn empty_and_blank_bodies_are_empty() {
        assert!(matches!(decode::<ClassPayload>(b""), Err(DecodeError::Empty)));
        assert!(matches!(decode::<ClassPayload>(b" \n\t"), Err(DecodeError::Empty)));
    }

    #[test]
    fn unparseable_body_is_malformed() {
        assert!(matches!(decode::<ClassPayload>(b"not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode::<ClassPayload>(br#"{"name": 12}"#),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn missing_fields_still_decode() {
        let payload: ClassPayload = decode(br#"{"name":"Physics Laboratory"}"#).unwrap();
        assert_eq!(payload.name, "Physics Laboratory");
        assert!(payload.grade.is_empty());
    }
}
