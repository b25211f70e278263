//! HTTP-backed interaction surface.
//!
//! A teleport request parks its prompt here and waits. The addressed actor
//! lists its pending prompts and answers one, which wakes the waiting
//! request. If the waiting request goes away first, its prompt is withdrawn.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use teleporter_core::actor::Actor;
use teleporter_core::clock::Clock;
use teleporter_core::error::DomainError;
use teleporter_core::interaction::{InteractionSurface, Prompt, PromptOutcome};
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

struct PendingPrompt {
    actor: Actor,
    prompt: Prompt,
    opened_at: DateTime<Utc>,
    responder: oneshot::Sender<PromptOutcome>,
}

/// A prompt awaiting an answer, as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPromptView {
    /// Handle used to answer the prompt.
    pub prompt_id: Uuid,
    /// The actor the prompt is addressed to.
    pub actor_id: Uuid,
    /// When the prompt was opened.
    pub opened_at: DateTime<Utc>,
    /// What to show.
    pub prompt: Prompt,
}

/// Pending prompts keyed by id.
pub struct PromptHub {
    clock: Arc<dyn Clock>,
    pending: Mutex<HashMap<Uuid, PendingPrompt>>,
}

impl std::fmt::Debug for PromptHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptHub").finish_non_exhaustive()
    }
}

/// Withdraws a prompt when its waiting request is dropped.
struct Withdraw<'a> {
    hub: &'a PromptHub,
    prompt_id: Uuid,
}

impl Drop for Withdraw<'_> {
    fn drop(&mut self) {
        let mut pending = self.hub.pending.lock().unwrap_or_else(|poisoned| {
            warn!(
                prompt_id = %self.prompt_id,
                "prompt registry lock poisoned, withdrawing anyway"
            );
            PoisonError::into_inner(poisoned)
        });
        if pending.remove(&self.prompt_id).is_some() {
            debug!(prompt_id = %self.prompt_id, "prompt withdrawn");
        }
    }
}

impl PromptHub {
    /// Creates an empty hub stamping prompts with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            pending: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, PendingPrompt>>, DomainError> {
        self.pending
            .lock()
            .map_err(|_| DomainError::Infrastructure("prompt registry lock poisoned".into()))
    }

    /// Lists pending prompts, oldest first. With `actor_id`, only the
    /// prompts addressed to that actor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn pending(&self, actor_id: Option<Uuid>) -> Result<Vec<PendingPromptView>, DomainError> {
        let mut views: Vec<PendingPromptView> = self
            .lock()?
            .iter()
            .filter(|(_, p)| actor_id.is_none_or(|id| p.actor.id == id))
            .map(|(id, p)| PendingPromptView {
                prompt_id: *id,
                actor_id: p.actor.id,
                opened_at: p.opened_at,
                prompt: p.prompt.clone(),
            })
            .collect();
        views.sort_by(|a, b| {
            a.opened_at
                .cmp(&b.opened_at)
                .then(a.prompt_id.cmp(&b.prompt_id))
        });
        Ok(views)
    }

    /// Answers a pending prompt on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no such prompt is pending.
    /// Returns `DomainError::Validation` if the prompt is addressed to a
    /// different actor or the choice was not offered; the prompt stays open.
    pub fn respond(
        &self,
        prompt_id: Uuid,
        actor: &Actor,
        outcome: PromptOutcome,
    ) -> Result<(), DomainError> {
        let mut pending = self.lock()?;
        let entry = pending
            .get(&prompt_id)
            .ok_or_else(|| DomainError::NotFound(format!("prompt {prompt_id}")))?;
        if entry.actor.id != actor.id {
            return Err(DomainError::Validation(format!(
                "prompt {prompt_id} is addressed to another actor"
            )));
        }
        if let PromptOutcome::Chosen(choice) = outcome {
            if !entry.prompt.offers(choice) {
                return Err(DomainError::Validation(format!(
                    "{choice} is not an option of prompt {prompt_id}"
                )));
            }
        }

        let entry = pending
            .remove(&prompt_id)
            .ok_or_else(|| DomainError::NotFound(format!("prompt {prompt_id}")))?;
        drop(pending);

        entry
            .responder
            .send(outcome)
            .map_err(|_| DomainError::NotFound(format!("prompt {prompt_id} is no longer waiting")))
    }
}

#[async_trait]
impl InteractionSurface for PromptHub {
    async fn present(&self, actor: &Actor, prompt: Prompt) -> Result<PromptOutcome, DomainError> {
        let (responder, answer) = oneshot::channel();
        let prompt_id = Uuid::new_v4();
        self.lock()?.insert(
            prompt_id,
            PendingPrompt {
                actor: *actor,
                prompt,
                opened_at: self.clock.now(),
                responder,
            },
        );
        let _withdraw = Withdraw {
            hub: self,
            prompt_id,
        };
        debug!(%prompt_id, actor_id = %actor.id, "prompt opened");

        // A dropped responder means the prompt was discarded unanswered.
        Ok(answer.await.unwrap_or(PromptOutcome::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use teleporter_core::interaction::{PromptActions, PromptButton};
    use teleporter_test_support::FixedClock;

    use super::*;

    fn hub() -> Arc<PromptHub> {
        Arc::new(PromptHub::new(Arc::new(FixedClock::default())))
    }

    fn ladder_prompt(up: Uuid) -> Prompt {
        Prompt {
            title: "Ladder".to_owned(),
            body: "Would you like to go up to Attic?".to_owned(),
            actions: PromptActions::Buttons {
                buttons: vec![PromptButton {
                    action: "up".to_owned(),
                    label: "Up".to_owned(),
                    payload: up,
                }],
            },
        }
    }

    async fn wait_for_prompt(hub: &PromptHub) -> PendingPromptView {
        loop {
            if let Some(view) = hub.pending(None).unwrap().into_iter().next() {
                return view;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_respond_wakes_the_waiting_request() {
        // Arrange
        let hub = hub();
        let actor = Actor::player(Uuid::new_v4());
        let up = Uuid::new_v4();
        let waiting = tokio::spawn({
            let hub = Arc::clone(&hub);
            async move { hub.present(&actor, ladder_prompt(up)).await }
        });
        let view = wait_for_prompt(&hub).await;

        // Act
        hub.respond(view.prompt_id, &actor, PromptOutcome::Chosen(up))
            .unwrap();

        // Assert
        assert_eq!(waiting.await.unwrap().unwrap(), PromptOutcome::Chosen(up));
        assert!(hub.pending(None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pending_lists_prompts_for_addressed_actor() {
        let hub = hub();
        let actor = Actor::player(Uuid::new_v4());
        let waiting = tokio::spawn({
            let hub = Arc::clone(&hub);
            async move { hub.present(&actor, ladder_prompt(Uuid::new_v4())).await }
        });
        let view = wait_for_prompt(&hub).await;

        assert_eq!(view.actor_id, actor.id);
        assert_eq!(view.opened_at, FixedClock::default().0);
        assert_eq!(hub.pending(Some(actor.id)).unwrap().len(), 1);
        assert!(hub.pending(Some(Uuid::new_v4())).unwrap().is_empty());

        hub.respond(view.prompt_id, &actor, PromptOutcome::Cancelled)
            .unwrap();
        assert_eq!(waiting.await.unwrap().unwrap(), PromptOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_respond_rejects_other_actor_and_unoffered_choice() {
        // Arrange
        let hub = hub();
        let actor = Actor::player(Uuid::new_v4());
        let up = Uuid::new_v4();
        let waiting = tokio::spawn({
            let hub = Arc::clone(&hub);
            async move { hub.present(&actor, ladder_prompt(up)).await }
        });
        let view = wait_for_prompt(&hub).await;

        // Act
        let stranger = hub.respond(
            view.prompt_id,
            &Actor::player(Uuid::new_v4()),
            PromptOutcome::Chosen(up),
        );
        let unoffered = hub.respond(
            view.prompt_id,
            &actor,
            PromptOutcome::Chosen(Uuid::new_v4()),
        );

        // Assert
        assert!(matches!(stranger, Err(DomainError::Validation(_))));
        assert!(matches!(unoffered, Err(DomainError::Validation(_))));
        assert_eq!(hub.pending(None).unwrap().len(), 1);

        hub.respond(view.prompt_id, &actor, PromptOutcome::Chosen(up))
            .unwrap();
        assert_eq!(waiting.await.unwrap().unwrap(), PromptOutcome::Chosen(up));
    }

    #[tokio::test]
    async fn test_respond_to_unknown_prompt_returns_not_found() {
        let hub = hub();

        let result = hub.respond(
            Uuid::new_v4(),
            &Actor::player(Uuid::new_v4()),
            PromptOutcome::Cancelled,
        );

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_dropping_the_waiting_request_withdraws_the_prompt() {
        let hub = hub();
        let actor = Actor::player(Uuid::new_v4());
        let waiting = tokio::spawn({
            let hub = Arc::clone(&hub);
            async move { hub.present(&actor, ladder_prompt(Uuid::new_v4())).await }
        });
        wait_for_prompt(&hub).await;

        waiting.abort();
        let _ = waiting.await;

        assert!(hub.pending(None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_withdraw_clears_prompt_from_poisoned_registry() {
        // Arrange
        let hub = hub();
        let actor = Actor::player(Uuid::new_v4());
        let waiting = tokio::spawn({
            let hub = Arc::clone(&hub);
            async move { hub.present(&actor, ladder_prompt(Uuid::new_v4())).await }
        });
        wait_for_prompt(&hub).await;
        let poisoner = std::thread::spawn({
            let hub = Arc::clone(&hub);
            move || {
                let _guard = hub.pending.lock().unwrap();
                panic!("poison the prompt registry");
            }
        });
        assert!(poisoner.join().is_err());

        // Act
        waiting.abort();
        let _ = waiting.await;

        // Assert
        assert!(hub.pending(None).is_err());
        let pending = hub.pending.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(pending.is_empty());
    }
}
