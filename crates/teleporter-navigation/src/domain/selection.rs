//! Destination selection.
//!
//! Turns a group and a source region into the candidates an actor may pick
//! from, and renders them as a prompt for the interaction surface.

use serde::{Deserialize, Serialize};
use teleporter_core::error::DomainError;
use teleporter_core::geometry::Point;
use teleporter_core::interaction::{Prompt, PromptActions, PromptButton, PromptChoice};
use teleporter_groups::domain::aggregates::RegionGroup;
use uuid::Uuid;

/// Body shown by free-mode prompts unless the caller supplies one.
pub const FREE_MODE_BODY: &str = "<p>Where would you like to go?</p>";

/// How destinations are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Only the members directly above and below the source region.
    Ladder,
    /// Every member of the group.
    #[default]
    Free,
}

impl SelectionMode {
    fn default_title(self) -> &'static str {
        match self {
            Self::Ladder => "Ladder",
            Self::Free => "Elevator",
        }
    }
}

/// Presentation options for a selection prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptOptions {
    /// Window title; defaults per mode.
    #[serde(default)]
    pub title: Option<String>,
    /// Body markup; defaults per mode.
    #[serde(default)]
    pub body: Option<String>,
    /// Selection mode.
    #[serde(default)]
    pub mode: SelectionMode,
    /// Accepted for compatibility; teleport always preserves the entity's
    /// offset within its region.
    #[serde(default)]
    pub token_offset: Option<Point>,
}

/// A request to pick a destination for an entity standing in a region.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    /// The region the entity is standing in.
    pub source_region_id: Uuid,
    /// The entity that triggered the prompt.
    pub entity_id: Uuid,
    /// The group offering destinations.
    pub group: String,
    /// Presentation options.
    pub options: PromptOptions,
}

/// The outcome of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionResult {
    /// The actor picked this region.
    Destination(Uuid),
    /// The actor cancelled, does not own the entity, or nothing was on offer.
    NoSelection,
}

impl SelectionResult {
    /// The chosen region, if any.
    #[must_use]
    pub fn destination(self) -> Option<Uuid> {
        match self {
            Self::Destination(id) => Some(id),
            Self::NoSelection => None,
        }
    }
}

/// A destination on offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The destination region.
    pub region_id: Uuid,
    /// The destination's display name.
    pub name: String,
}

/// The destinations on offer, shaped by mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSet {
    /// Neighbours of the source region in group order.
    Ladder {
        /// The member before the source region.
        up: Option<Candidate>,
        /// The member after the source region.
        down: Option<Candidate>,
    },
    /// Every member of the group, in group order.
    Free {
        /// The members.
        choices: Vec<Candidate>,
    },
}

impl CandidateSet {
    /// Computes the candidates for `source_region_id` in `group`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for ladder mode on a group of fewer
    /// than two regions, and `DomainError::NotFound` for ladder mode when the
    /// source region is not a member.
    pub fn build(
        group: &RegionGroup,
        source_region_id: Uuid,
        mode: SelectionMode,
    ) -> Result<Self, DomainError> {
        let candidate_at = |index: usize| {
            group.member_at(index).map(|r| Candidate {
                region_id: r.id,
                name: r.name.clone(),
            })
        };

        match mode {
            SelectionMode::Ladder => {
                if group.len() <= 1 {
                    return Err(DomainError::Validation(
                        "ladder mode needs at least two regions".into(),
                    ));
                }
                let curr = group.position(source_region_id).ok_or_else(|| {
                    DomainError::NotFound(format!(
                        "region {source_region_id} is not in group \"{}\"",
                        group.name()
                    ))
                })?;
                Ok(Self::Ladder {
                    up: curr.checked_sub(1).and_then(candidate_at),
                    down: candidate_at(curr + 1),
                })
            }
            SelectionMode::Free => Ok(Self::Free {
                choices: (0..group.len()).filter_map(candidate_at).collect(),
            }),
        }
    }

    /// Returns `true` if nothing is on offer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Ladder { up, down } => up.is_none() && down.is_none(),
            Self::Free { choices } => choices.is_empty(),
        }
    }

    /// Renders the candidates as a prompt, honouring caller overrides.
    #[must_use]
    pub fn to_prompt(&self, options: &PromptOptions) -> Prompt {
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| options.mode.default_title().to_owned());

        match self {
            Self::Ladder { up, down } => {
                let buttons: Vec<PromptButton> = [("up", "Up", up), ("down", "Down", down)]
                    .into_iter()
                    .filter_map(|(action, label, candidate)| {
                        candidate.as_ref().map(|c| PromptButton {
                            action: action.to_owned(),
                            label: label.to_owned(),
                            payload: c.region_id,
                        })
                    })
                    .collect();
                let body = options
                    .body
                    .clone()
                    .unwrap_or_else(|| ladder_body(up.as_ref(), down.as_ref()));
                Prompt {
                    title,
                    body,
                    actions: PromptActions::Buttons { buttons },
                }
            }
            Self::Free { choices } => Prompt {
                title,
                // An empty override falls back here; ladder mode keeps it.
                body: options
                    .body
                    .clone()
                    .filter(|body| !body.is_empty())
                    .unwrap_or_else(|| FREE_MODE_BODY.to_owned()),
                actions: PromptActions::ChoiceList {
                    choices: choices
                        .iter()
                        .map(|c| PromptChoice {
                            value: c.region_id,
                            label: c.name.clone(),
                        })
                        .collect(),
                    selected: 0,
                },
            },
        }
    }
}

fn ladder_body(up: Option<&Candidate>, down: Option<&Candidate>) -> String {
    let mut body = String::from("Would you like to go ");
    if let Some(up) = up {
        body.push_str("up to ");
        body.push_str(&up.name);
    }
    if up.is_some() && down.is_some() {
        body.push_str(" or ");
    }
    if let Some(down) = down {
        body.push_str("down to ");
        body.push_str(&down.name);
    }
    body.push('?');
    body
}
