//! Route modules organized by bounded context.

use axum::Router;

use crate::state::AppState;

pub mod elevation;
pub mod groups;
pub mod health;
pub mod prompts;
pub mod teleport;

/// Returns the full API router. Used by `main` and the integration tests.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/scenes", groups::router())
        .nest("/api/v1/teleport", teleport::router())
        .nest("/api/v1/prompts", prompts::router())
        .nest("/api/v1/elevation", elevation::router())
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory application state and request helpers for route tests.

    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use teleporter_core::actor::Actor;
    use teleporter_core::registry::GroupRegistry;
    use teleporter_test_support::{
        FailingGroupRegistry, FixedClock, InMemoryGroupRegistry, InMemorySceneStore,
        RecordingNotifier,
    };
    use tower::ServiceExt;

    use crate::extract::{ACTOR_ELEVATED_HEADER, ACTOR_ID_HEADER};
    use crate::state::AppState;

    pub(crate) struct TestWorld {
        pub store: Arc<InMemorySceneStore>,
        pub registry: Arc<InMemoryGroupRegistry>,
        pub notifier: Arc<RecordingNotifier>,
        pub state: AppState,
    }

    fn state_with(
        store: Arc<InMemorySceneStore>,
        registry: Arc<dyn GroupRegistry>,
        notifier: Arc<RecordingNotifier>,
    ) -> AppState {
        AppState::new(store, registry, Arc::new(FixedClock::default()), notifier)
    }

    impl TestWorld {
        pub fn new() -> Self {
            let store = Arc::new(InMemorySceneStore::new());
            let registry = Arc::new(InMemoryGroupRegistry::new());
            let notifier = Arc::new(RecordingNotifier::new());
            let state = state_with(store.clone(), registry.clone(), notifier.clone());
            Self {
                store,
                registry,
                notifier,
                state,
            }
        }
    }

    pub(crate) fn failing_state() -> AppState {
        state_with(
            Arc::new(InMemorySceneStore::new()),
            Arc::new(FailingGroupRegistry),
            Arc::new(RecordingNotifier::new()),
        )
    }

    /// Sends one request and returns the status and JSON body (`Null` when
    /// the body is empty). Plain-text bodies, such as axum's extractor
    /// rejections, come back as a JSON string.
    pub(crate) async fn send(
        app: Router,
        method: Method,
        uri: &str,
        actor: Option<Actor>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor) = actor {
            builder = builder
                .header(ACTOR_ID_HEADER, actor.id.to_string())
                .header(ACTOR_ELEVATED_HEADER, actor.elevated.to_string());
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
            })
        };

        (status, json)
    }
}
