//! Aggregate root for the Region Groups context.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use teleporter_core::document::ResolvedDocument;
use teleporter_core::error::DomainError;
use teleporter_core::scene::RegionRef;
use uuid::Uuid;

/// A named, ordered, membership-unique collection of regions in one scene.
///
/// Invariants:
/// - `order` never contains the same region twice;
/// - the keys of `members` are exactly the ids in `order`;
/// - every member belongs to `scene_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionGroup {
    name: String,
    scene_id: Uuid,
    order: Vec<Uuid>,
    members: HashMap<Uuid, RegionRef>,
}

impl RegionGroup {
    /// Creates a group from already-fetched regions.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` is blank or any region
    /// belongs to a scene other than `scene_id`.
    pub fn create(
        name: &str,
        scene_id: Uuid,
        regions: impl IntoIterator<Item = RegionRef>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("group name is required".into()));
        }

        let mut group = Self {
            name: name.to_owned(),
            scene_id,
            order: Vec::new(),
            members: HashMap::new(),
        };

        for region in regions {
            group.check_scene(region.id, region.scene_id)?;
            if group.members.contains_key(&region.id) {
                continue;
            }
            group.order.push(region.id);
            group.members.insert(region.id, region);
        }

        Ok(group)
    }

    /// Rebuilds a group from its serialized state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the state cannot be decoded
    /// or violates the group invariants.
    pub fn from_state(state: serde_json::Value) -> Result<Self, DomainError> {
        let group: Self = serde_json::from_value(state).map_err(|e| {
            DomainError::Infrastructure(format!("group deserialization failed: {e}"))
        })?;
        group.check_invariants()?;
        Ok(group)
    }

    /// Serializes the group for the registry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn to_state(&self) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::Infrastructure(format!("group serialization failed: {e}")))
    }

    /// Group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning scene.
    #[must_use]
    pub fn scene_id(&self) -> Uuid {
        self.scene_id
    }

    /// Member ids in group order.
    #[must_use]
    pub fn order(&self) -> &[Uuid] {
        &self.order
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if `region_id` is a member.
    #[must_use]
    pub fn contains(&self, region_id: Uuid) -> bool {
        self.members.contains_key(&region_id)
    }

    /// Position of `region_id` in group order.
    #[must_use]
    pub fn position(&self, region_id: Uuid) -> Option<usize> {
        self.order.iter().position(|id| *id == region_id)
    }

    /// The member stored under `region_id`.
    #[must_use]
    pub fn member(&self, region_id: Uuid) -> Option<&RegionRef> {
        self.members.get(&region_id)
    }

    /// The member at position `index`.
    #[must_use]
    pub fn member_at(&self, index: usize) -> Option<&RegionRef> {
        self.order.get(index).and_then(|id| self.members.get(id))
    }

    /// Members in group order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionRef> {
        self.order.iter().filter_map(|id| self.members.get(id))
    }

    /// Inserts a region at `index`, or appends when `index` is `None` or
    /// past the end. Returns the position the region landed at.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the region is already a member
    /// or belongs to another scene. The group is unchanged on error.
    pub fn insert(&mut self, region: RegionRef, index: Option<usize>) -> Result<usize, DomainError> {
        if self.members.contains_key(&region.id) {
            return Err(DomainError::Validation(format!(
                "region {} is already in group \"{}\"",
                region.id, self.name
            )));
        }
        self.check_scene(region.id, region.scene_id)?;

        let position = match index {
            Some(i) if i < self.order.len() => {
                self.order.insert(i, region.id);
                i
            }
            _ => {
                self.order.push(region.id);
                self.order.len() - 1
            }
        };
        self.members.insert(region.id, region);
        Ok(position)
    }

    /// Removes a region. Returns `false` if it was not a member.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the region belongs to another
    /// scene.
    pub fn remove(&mut self, region: &ResolvedDocument) -> Result<bool, DomainError> {
        self.check_scene(region.local_id, region.scene_id)?;

        let Some(position) = self.position(region.local_id) else {
            return Ok(false);
        };
        self.order.remove(position);
        self.members.remove(&region.local_id);
        Ok(true)
    }

    /// Replaces the stored copy of a member with `region`. Returns `false`,
    /// leaving the group unchanged, if `region` is not a member of this
    /// scene.
    pub fn refresh(&mut self, region: RegionRef) -> bool {
        if region.scene_id != self.scene_id {
            return false;
        }
        match self.members.get_mut(&region.id) {
            Some(member) => {
                *member = region;
                true
            }
            None => false,
        }
    }

    /// Drops every member whose id is not in `live`, returning the dropped
    /// ids in their former group order.
    pub fn validate(&mut self, live: &HashSet<Uuid>) -> Vec<Uuid> {
        let (kept, stale): (Vec<Uuid>, Vec<Uuid>) =
            self.order.iter().copied().partition(|id| live.contains(id));
        for id in &stale {
            self.members.remove(id);
        }
        self.order = kept;
        stale
    }

    /// Exchanges the members at positions `i` and `j`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Index` if either position is out of range.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), DomainError> {
        self.check_index(i)?;
        self.check_index(j)?;
        self.order.swap(i, j);
        Ok(())
    }

    /// Moves the member at `from` to `to`, shifting the members between.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Index` if either position is out of range.
    pub fn move_member(&mut self, from: usize, to: usize) -> Result<(), DomainError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let id = self.order.remove(from);
        self.order.insert(to, id);
        Ok(())
    }

    /// Rearranges the members so that position `k` holds the member that
    /// was at `new_order[k]`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `new_order` is a permutation
    /// of `0..len`.
    pub fn reorder(&mut self, new_order: &[usize]) -> Result<(), DomainError> {
        let len = self.order.len();
        if new_order.len() != len {
            return Err(DomainError::Validation(format!(
                "reorder must list each of the {len} positions exactly once"
            )));
        }
        let mut seen = vec![false; len];
        for &index in new_order {
            if index >= len || seen[index] {
                return Err(DomainError::Validation(format!(
                    "reorder must list each of the {len} positions exactly once"
                )));
            }
            seen[index] = true;
        }

        self.order = new_order.iter().map(|&index| self.order[index]).collect();
        Ok(())
    }

    fn check_scene(&self, region_id: Uuid, region_scene: Uuid) -> Result<(), DomainError> {
        if region_scene != self.scene_id {
            return Err(DomainError::Validation(format!(
                "region {region_id} is not in the same scene as group \"{}\"",
                self.name
            )));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.order.len() {
            return Err(DomainError::Index {
                index,
                len: self.order.len(),
            });
        }
        Ok(())
    }

    fn check_invariants(&self) -> Result<(), DomainError> {
        let unique: HashSet<&Uuid> = self.order.iter().collect();
        if unique.len() != self.order.len() {
            return Err(DomainError::Infrastructure(format!(
                "group \"{}\" holds duplicate regions",
                self.name
            )));
        }
        if unique.len() != self.members.len() || !self.members.keys().all(|k| unique.contains(k))
        {
            return Err(DomainError::Infrastructure(format!(
                "group \"{}\" order and members disagree",
                self.name
            )));
        }
        if self.members.values().any(|r| r.scene_id != self.scene_id) {
            return Err(DomainError::Infrastructure(format!(
                "group \"{}\" holds a region from another scene",
                self.name
            )));
        }
        Ok(())
    }
}
