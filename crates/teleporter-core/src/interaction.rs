//! Interaction surface port.
//!
//! A prompt is shown to a single actor and suspends the caller until the
//! actor picks an action, cancels, or the surface is dismissed. Cancel and
//! dismissal are ordinary outcomes, not errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::actor::Actor;
use crate::error::DomainError;

/// A labelled button whose activation yields `payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptButton {
    /// Machine-readable action name (e.g. `up`).
    pub action: String,
    /// Human-readable label.
    pub label: String,
    /// Identifier returned when the button is chosen.
    pub payload: Uuid,
}

/// One entry of a choice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptChoice {
    /// Identifier returned when the entry is confirmed.
    pub value: Uuid,
    /// Human-readable label.
    pub label: String,
}

/// The actions a prompt offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromptActions {
    /// Up to two named buttons; any other response cancels.
    Buttons {
        /// The buttons, in display order.
        buttons: Vec<PromptButton>,
    },
    /// A single-select list with a confirm action and a default close action.
    ChoiceList {
        /// The entries, in display order.
        choices: Vec<PromptChoice>,
        /// Index of the pre-selected entry.
        selected: usize,
    },
}

/// A prompt ready to be presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Window title.
    pub title: String,
    /// Body markup.
    pub body: String,
    /// The actions on offer.
    pub actions: PromptActions,
}

impl Prompt {
    /// Returns `true` if `id` is a payload this prompt can legitimately yield.
    #[must_use]
    pub fn offers(&self, id: Uuid) -> bool {
        match &self.actions {
            PromptActions::Buttons { buttons } => buttons.iter().any(|b| b.payload == id),
            PromptActions::ChoiceList { choices, .. } => choices.iter().any(|c| c.value == id),
        }
    }
}

/// How a presented prompt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptOutcome {
    /// The actor picked an action carrying this payload.
    Chosen(Uuid),
    /// The actor cancelled, or the surface was dismissed.
    Cancelled,
}

/// Presents prompts to actors and awaits their response.
#[async_trait]
pub trait InteractionSurface: Send + Sync {
    /// Shows `prompt` to `actor` and waits, without timeout, for the outcome.
    async fn present(&self, actor: &Actor, prompt: Prompt) -> Result<PromptOutcome, DomainError>;
}
