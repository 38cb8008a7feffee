//! Which play types the entered numbers allow

use serde::{Deserialize, Serialize};
use shared::PlayType;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::draft::{Draft, InputTarget};
use crate::errors::{ComposerError, Result};

/// One entry of the backend's play-type catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTypeCatalogEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

impl PlayTypeCatalogEntry {
    /// The play type this entry describes, matched by name then code
    pub fn play_type(&self) -> Option<PlayType> {
        PlayType::from_name(&self.name)
            .or_else(|_| PlayType::from_name(&self.code))
            .ok()
    }
}

/// Backend identifiers for each play type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayTypeIds(BTreeMap<PlayType, Uuid>);

impl Default for PlayTypeIds {
    fn default() -> Self {
        Self(
            PlayType::ALL
                .iter()
                .map(|t| (*t, t.default_id()))
                .collect(),
        )
    }
}

impl PlayTypeIds {
    /// Identifiers announced by the catalog, falling back to the static table
    pub fn from_catalog(catalog: &[PlayTypeCatalogEntry]) -> Self {
        let mut ids = Self::default();
        for entry in catalog {
            if let Some(play_type) = entry.play_type() {
                ids.0.insert(play_type, entry.id);
            }
        }
        ids
    }

    pub fn id_for(&self, play_type: PlayType) -> Uuid {
        self.0
            .get(&play_type)
            .copied()
            .unwrap_or_else(|| play_type.default_id())
    }
}

/// Play types the current tokens make legal, in canonical order
pub fn available_types(draft: &Draft) -> Vec<PlayType> {
    PlayType::ALL
        .into_iter()
        .filter(|t| draft.eligible_tokens(*t).len() >= t.min_tokens())
        .collect()
}

/// Available types that the backend also offers, in catalog order
pub fn offered_types(draft: &Draft, catalog: &[PlayTypeCatalogEntry]) -> Vec<PlayType> {
    let available = available_types(draft);
    let mut offered = Vec::new();
    for play_type in catalog.iter().filter_map(PlayTypeCatalogEntry::play_type) {
        if available.contains(&play_type) && !offered.contains(&play_type) {
            offered.push(play_type);
        }
    }
    offered
}

impl Draft {
    /// Select or deselect a play type
    ///
    /// Deselecting always succeeds; selecting requires the type to be offered.
    pub fn toggle_type(
        &mut self,
        play_type: PlayType,
        catalog: &[PlayTypeCatalogEntry],
    ) -> Result<bool> {
        if let Some(pos) = self.selected_types.iter().position(|t| *t == play_type) {
            self.selected_types.remove(pos);
            if self.target == InputTarget::Amounts(play_type) {
                self.target = InputTarget::Numbers;
            }
            return Ok(false);
        }

        if !offered_types(self, catalog).contains(&play_type) {
            return Err(ComposerError::PlayTypeUnavailable(play_type));
        }
        self.selected_types.push(play_type);
        Ok(true)
    }

    /// Switch the keypad between the numbers and a selected type's amounts
    pub fn select_tab(&mut self, target: InputTarget) -> Result<()> {
        if let InputTarget::Amounts(play_type) = target {
            if !self.is_selected(play_type) {
                return Err(ComposerError::PlayTypeNotSelected(play_type));
            }
        }
        self.target = target;
        Ok(())
    }
}
