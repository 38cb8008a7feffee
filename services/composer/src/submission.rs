//! Submission payload assembly
//!
//! Flattens the separated plays plus any still-priced draft into the wire
//! format the betting API expects. Nothing in the session is mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Amount, PlayType, PARLET_SEPARATOR};
use uuid::Uuid;

use crate::draft::Draft;
use crate::eligibility::PlayTypeIds;
use crate::errors::{ComposerError, Result};
use crate::plays::{validate_no_illegal_duplicates, Play};
use crate::pricing::{self, ValidPlay};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetSubmission {
    pub throw_id: String,
    pub date: DateTime<Utc>,
    pub bet_plays: Vec<BetPlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetPlay {
    pub moves: Vec<Move>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub play_type_id: Uuid,
    pub move_details: Vec<MoveDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDetail {
    pub number: u32,
    pub second_number: Option<u32>,
    pub amount: Amount,
}

impl BetSubmission {
    pub fn move_count(&self) -> usize {
        self.bet_plays
            .iter()
            .flat_map(|p| p.moves.iter())
            .map(|m| m.move_details.len())
            .sum()
    }

    pub fn total(&self) -> Result<Amount> {
        let total = Amount::checked_sum(
            self.bet_plays
                .iter()
                .flat_map(|p| p.moves.iter())
                .flat_map(|m| m.move_details.iter())
                .map(|d| d.amount),
        )?;
        Ok(total)
    }
}

fn parse_number(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| ComposerError::InvalidNumber(text.to_string()))
}

fn move_details(valid_play: &ValidPlay) -> Result<Vec<MoveDetail>> {
    valid_play
        .combinations
        .iter()
        .zip(valid_play.line_amounts.iter())
        .map(|(combination, amount)| -> Result<MoveDetail> {
            let (number, second_number) = match valid_play.play_type {
                PlayType::Parlet => {
                    let (a, b) = combination
                        .split_once(PARLET_SEPARATOR)
                        .ok_or_else(|| ComposerError::InvalidNumber(combination.clone()))?;
                    (parse_number(a)?, Some(parse_number(b)?))
                }
                _ => (parse_number(combination)?, None),
            };
            Ok(MoveDetail {
                number,
                second_number,
                amount: *amount,
            })
        })
        .collect()
}

/// Build the payload from the separated plays and the live draft
pub fn assemble_submission(
    throw_id: &str,
    plays: &[Play],
    draft: &Draft,
    ids: &PlayTypeIds,
    now: DateTime<Utc>,
) -> Result<BetSubmission> {
    let mut pending = draft.clone();
    pending.expand_al_range()?;
    pending.settle_edited_token();

    let mut all_plays = plays.to_vec();
    if pricing::calculate_current_amount(&pending)?.is_positive() {
        all_plays.push(Play::snapshot(&pending, now)?);
    }

    for play in &all_plays {
        validate_no_illegal_duplicates(&play.tokens, &play.selected_types)?;
    }
    if all_plays.is_empty() {
        return Err(ComposerError::NothingToSubmit);
    }
    if !pricing::has_valid_amounts(&all_plays, &Draft::default()) {
        return Err(ComposerError::ZeroAmount);
    }

    let bet_plays = all_plays
        .iter()
        .map(|play| -> Result<BetPlay> {
            let moves = play
                .valid_plays
                .iter()
                .map(|vp| -> Result<Move> {
                    Ok(Move {
                        play_type_id: ids.id_for(vp.play_type),
                        move_details: move_details(vp)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(BetPlay { moves })
        })
        .collect::<Result<Vec<_>>>()?;

    let submission = BetSubmission {
        throw_id: throw_id.to_string(),
        date: now,
        bet_plays,
    };
    let total = submission.total()?;
    tracing::debug!(
        throw_id,
        total = %total,
        plays = submission.bet_plays.len(),
        moves = submission.move_count(),
        "Submission assembled"
    );
    Ok(submission)
}
