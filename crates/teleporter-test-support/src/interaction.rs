//! Scripted interaction surface.

use std::sync::Mutex;

use async_trait::async_trait;
use teleporter_core::actor::Actor;
use teleporter_core::error::DomainError;
use teleporter_core::interaction::{InteractionSurface, Prompt, PromptActions, PromptOutcome};
use uuid::Uuid;

/// How a `ScriptedSurface` answers every prompt.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedResponse {
    /// Dismiss the prompt.
    Cancel,
    /// Pick the action carrying this payload, whether or not it was offered.
    Choose(Uuid),
    /// Pick the first button, or confirm the pre-selected list entry.
    AcceptDefault,
    /// Pick the button with this action name; cancel if there is none.
    Press(&'static str),
}

/// A surface that answers with a fixed script and records what it was shown.
#[derive(Debug)]
pub struct ScriptedSurface {
    response: ScriptedResponse,
    presented: Mutex<Vec<(Actor, Prompt)>>,
}

impl ScriptedSurface {
    /// Creates a surface that always answers with `response`.
    #[must_use]
    pub fn new(response: ScriptedResponse) -> Self {
        Self {
            response,
            presented: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt shown so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn presented(&self) -> Vec<(Actor, Prompt)> {
        self.presented.lock().unwrap().clone()
    }
}

#[async_trait]
impl InteractionSurface for ScriptedSurface {
    async fn present(&self, actor: &Actor, prompt: Prompt) -> Result<PromptOutcome, DomainError> {
        let outcome = match (self.response, &prompt.actions) {
            (ScriptedResponse::Cancel, _) => PromptOutcome::Cancelled,
            (ScriptedResponse::Choose(id), _) => PromptOutcome::Chosen(id),
            (ScriptedResponse::AcceptDefault, PromptActions::Buttons { buttons }) => buttons
                .first()
                .map_or(PromptOutcome::Cancelled, |b| PromptOutcome::Chosen(b.payload)),
            (ScriptedResponse::AcceptDefault, PromptActions::ChoiceList { choices, selected }) => {
                choices
                    .get(*selected)
                    .map_or(PromptOutcome::Cancelled, |c| PromptOutcome::Chosen(c.value))
            }
            (ScriptedResponse::Press(action), PromptActions::Buttons { buttons }) => buttons
                .iter()
                .find(|b| b.action == action)
                .map_or(PromptOutcome::Cancelled, |b| PromptOutcome::Chosen(b.payload)),
            (ScriptedResponse::Press(_), PromptActions::ChoiceList { .. }) => {
                PromptOutcome::Cancelled
            }
        };
        self.presented.lock().unwrap().push((*actor, prompt));
        Ok(outcome)
    }
}
