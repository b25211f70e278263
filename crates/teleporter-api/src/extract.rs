//! Request extractors.
//!
//! Actor headers are trusted input. The service authenticates no one, so it
//! must sit behind a gateway that sets these headers for its callers and
//! strips any the client sent. A caller that can set `x-actor-elevated`
//! bypasses every ownership check.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use teleporter_core::actor::Actor;
use teleporter_core::error::DomainError;
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the acting user's id.
pub const ACTOR_ID_HEADER: &str = "x-actor-id";

/// Header marking the acting user as a game master.
pub const ACTOR_ELEVATED_HEADER: &str = "x-actor-elevated";

/// The actor a request runs on behalf of, read from the request headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestActor(pub Actor);

fn header<'a>(parts: &'a Parts, name: &str) -> Result<Option<&'a str>, ApiError> {
    parts
        .headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| {
                ApiError(DomainError::Validation(format!("{name} header is not valid text")))
            })
        })
        .transpose()
}

impl<S> FromRequestParts<S> for RequestActor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = header(parts, ACTOR_ID_HEADER)?.ok_or_else(|| {
            ApiError(DomainError::Validation(format!(
                "{ACTOR_ID_HEADER} header is required"
            )))
        })?;
        let id = Uuid::parse_str(raw_id.trim()).map_err(|e| {
            ApiError(DomainError::Validation(format!(
                "{ACTOR_ID_HEADER} header is not a valid id: {e}"
            )))
        })?;
        let elevated = match header(parts, ACTOR_ELEVATED_HEADER)? {
            None => false,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" | "" => false,
                other => {
                    return Err(ApiError(DomainError::Validation(format!(
                        "{ACTOR_ELEVATED_HEADER} header must be true or false, got {other}"
                    ))));
                }
            },
        };

        Ok(Self(Actor { id, elevated }))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(headers: &[(&str, &str)]) -> Result<RequestActor, ApiError> {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        RequestActor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_player_by_default() {
        let id = Uuid::new_v4();
        let raw = id.to_string();

        let RequestActor(actor) = extract(&[(ACTOR_ID_HEADER, raw.as_str())])
            .await
            .unwrap();

        assert_eq!(actor, Actor::player(id));
    }

    #[tokio::test]
    async fn test_extracts_elevated_actor() {
        let id = Uuid::new_v4();
        let raw = id.to_string();

        let RequestActor(actor) = extract(&[
            (ACTOR_ID_HEADER, raw.as_str()),
            (ACTOR_ELEVATED_HEADER, "True"),
        ])
        .await
        .unwrap();

        assert_eq!(actor, Actor::game_master(id));
    }

    #[tokio::test]
    async fn test_rejects_missing_or_malformed_id() {
        let missing = extract(&[]).await;
        let malformed = extract(&[(ACTOR_ID_HEADER, "not-a-uuid")]).await;

        assert!(matches!(missing, Err(ApiError(DomainError::Validation(_)))));
        assert!(matches!(malformed, Err(ApiError(DomainError::Validation(_)))));
    }

    #[tokio::test]
    async fn test_rejects_unrecognized_elevation_flag() {
        let raw = Uuid::new_v4().to_string();

        let result = extract(&[
            (ACTOR_ID_HEADER, raw.as_str()),
            (ACTOR_ELEVATED_HEADER, "sometimes"),
        ])
        .await;

        assert!(matches!(result, Err(ApiError(DomainError::Validation(_)))));
    }
}
