//! Separated plays and the compose session
//!
//! A [`Play`] is an immutable snapshot of a priced draft. The
//! [`BetComposer`] owns the live draft plus the plays separated so far for
//! one compose-and-submit session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Amount, PlayType};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::draft::{AmountBuffer, Draft, InputTarget};
use crate::eligibility::PlayTypeIds;
use crate::errors::{ComposerError, Result};
use crate::pricing::{self, ValidPlay};
use crate::submission::{assemble_submission, BetSubmission};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub(crate) id: Uuid,
    /// Raw numbers blob as typed
    pub(crate) numbers: String,
    pub(crate) tokens: Vec<String>,
    pub(crate) selected_types: Vec<PlayType>,
    pub(crate) valid_plays: Vec<ValidPlay>,
    pub(crate) amount: Amount,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) type_amount_inputs: BTreeMap<PlayType, AmountBuffer>,
}

impl Play {
    pub(crate) fn snapshot(draft: &Draft, timestamp: DateTime<Utc>) -> Result<Self> {
        let valid_plays = pricing::valid_plays_for(draft)?;
        Ok(Self {
            id: Uuid::new_v4(),
            numbers: draft.numbers_blob(),
            tokens: draft.tokens().to_vec(),
            selected_types: draft.selected_types().to_vec(),
            amount: Amount::checked_sum(valid_plays.iter().map(|p| p.total_cost))?,
            valid_plays,
            timestamp,
            type_amount_inputs: draft.amount_buffers().clone(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn numbers(&self) -> &str {
        &self.numbers
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn selected_types(&self) -> &[PlayType] {
        &self.selected_types
    }

    pub fn valid_plays(&self) -> &[ValidPlay] {
        &self.valid_plays
    }

    /// Total cost of the play
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn type_amount_inputs(&self) -> &BTreeMap<PlayType, AmountBuffer> {
        &self.type_amount_inputs
    }

    fn into_draft(self) -> Draft {
        Draft {
            target: self
                .selected_types
                .first()
                .map(|t| InputTarget::Amounts(*t))
                .unwrap_or_default(),
            tokens: self.tokens,
            trailing_delimiter: self.numbers.ends_with(shared::DELIMITER),
            selected_types: self.selected_types,
            amount_buffers: self.type_amount_inputs,
            al_mode: Default::default(),
            edited_len: None,
        }
    }
}

/// Reject repeated numbers unless the play includes Parlet
pub fn validate_no_illegal_duplicates(tokens: &[String], selected: &[PlayType]) -> Result<()> {
    if selected.contains(&PlayType::Parlet) {
        return Ok(());
    }
    let mut seen = BTreeSet::new();
    let mut duplicates = Vec::new();
    for token in tokens {
        if !seen.insert(token.as_str()) && !duplicates.contains(token) {
            duplicates.push(token.clone());
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ComposerError::DuplicateNumbers(duplicates))
    }
}

/// Draft plus separated plays for one session
#[derive(Debug, Clone, Default)]
pub struct BetComposer {
    draft: Draft,
    plays: Vec<Play>,
}

impl BetComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn current_amount(&self) -> Result<Amount> {
        pricing::calculate_current_amount(&self.draft)
    }

    pub fn total_amount(&self) -> Result<Amount> {
        pricing::calculate_total_amount(&self.plays, &self.draft)
    }

    pub fn has_valid_amounts(&self) -> bool {
        pricing::has_valid_amounts(&self.plays, &self.draft)
    }

    /// Move the priced draft into the list of plays and start a fresh draft
    pub fn separate_play(&mut self) -> Result<&Play> {
        self.separate_play_at(Utc::now())
    }

    pub fn separate_play_at(&mut self, now: DateTime<Utc>) -> Result<&Play> {
        let mut draft = self.draft.clone();
        draft.expand_al_range()?;
        draft.settle_edited_token();

        if draft.is_empty() {
            return Err(ComposerError::EmptyDraft);
        }
        if draft.selected_types().is_empty() {
            return Err(ComposerError::NoPlayTypeSelected);
        }
        if let Err(err) = validate_no_illegal_duplicates(draft.tokens(), draft.selected_types()) {
            tracing::warn!(error = %err, "Play not separated");
            return Err(err);
        }
        if !pricing::calculate_current_amount(&draft)?.is_positive() {
            return Err(ComposerError::ZeroAmount);
        }

        let play = Play::snapshot(&draft, now)?;
        tracing::info!(
            play_id = %play.id,
            amount = %play.amount,
            types = play.valid_plays.len(),
            "Play separated"
        );
        self.plays.push(play);
        self.draft.clear();
        Ok(&self.plays[self.plays.len() - 1])
    }

    pub fn remove_play(&mut self, id: Uuid) -> Option<Play> {
        let pos = self.plays.iter().position(|p| p.id == id)?;
        let play = self.plays.remove(pos);
        tracing::info!(play_id = %id, "Play removed");
        Some(play)
    }

    /// Pull a play out of the list and load it back into the draft
    ///
    /// The list entry is gone until the draft is separated again.
    pub fn edit_play(&mut self, id: Uuid) -> Result<()> {
        let pos = self
            .plays
            .iter()
            .position(|p| p.id == id)
            .ok_or(ComposerError::PlayNotFound(id))?;
        if !self.draft.is_empty() {
            tracing::debug!("Replacing unsaved draft with edited play");
        }
        let play = self.plays.remove(pos);
        self.draft = play.into_draft();
        tracing::info!(play_id = %id, "Play loaded for editing");
        Ok(())
    }

    /// Build the payload for `throw_id` without touching the session
    pub fn submission(
        &self,
        throw_id: &str,
        ids: &PlayTypeIds,
        now: DateTime<Utc>,
    ) -> Result<BetSubmission> {
        assemble_submission(throw_id, &self.plays, &self.draft, ids, now)
    }

    /// Discard everything after the backend accepted the bet
    pub fn reset(&mut self) {
        self.draft.clear();
        self.plays.clear();
    }
}
