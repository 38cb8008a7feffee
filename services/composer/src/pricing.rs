//! Valid-play derivation and pricing
//!
//! Everything here is a pure function of the draft: calling it twice without
//! a mutation in between yields identical plays.

use serde::{Deserialize, Serialize};
use shared::{Amount, PlayType, PARLET_SEPARATOR};

use crate::draft::{AmountBuffer, Draft};
use crate::errors::Result;
use crate::plays::Play;

/// One priced play type derived from the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidPlay {
    pub play_type: PlayType,
    /// Tokens played, or "A X B" pairs for Parlet
    pub combinations: Vec<String>,
    /// Parlet base amount, otherwise the first line's amount
    pub amount: Amount,
    pub total_cost: Amount,
    /// Amount wagered on each combination, index-aligned with `combinations`
    pub line_amounts: Vec<Amount>,
    pub details: String,
}

/// Zero-pad single digits for Parlet display ("5" -> "05")
pub fn format_parlet_number(token: &str) -> String {
    if token.len() == 1 {
        format!("0{}", token)
    } else {
        token.to_string()
    }
}

/// Every unordered pair `i < j` in index order, formatted "A X B"
pub fn parlet_combinations(tokens: &[&str]) -> Vec<String> {
    let mut pairs = Vec::with_capacity(tokens.len() * tokens.len().saturating_sub(1) / 2);
    for (i, a) in tokens.iter().enumerate() {
        for b in &tokens[i + 1..] {
            pairs.push(format!(
                "{}{}{}",
                format_parlet_number(a),
                PARLET_SEPARATOR,
                format_parlet_number(b)
            ));
        }
    }
    pairs
}

fn parlet_play(draft: &Draft, buffer: Option<&AmountBuffer>) -> Result<Option<ValidPlay>> {
    let eligible = draft.eligible_tokens(PlayType::Parlet);
    if eligible.len() < PlayType::Parlet.min_tokens() {
        return Ok(None);
    }
    let combinations = parlet_combinations(&eligible);
    let base = buffer.map(AmountBuffer::base_amount).unwrap_or(Amount::ZERO);
    let total_cost = base.checked_mul(combinations.len() as u64)?;
    if !total_cost.is_positive() {
        return Ok(None);
    }

    Ok(Some(ValidPlay {
        play_type: PlayType::Parlet,
        details: format!(
            "{}: {} pairs x {}",
            PlayType::Parlet,
            combinations.len(),
            base
        ),
        line_amounts: vec![base; combinations.len()],
        combinations,
        amount: base,
        total_cost,
    }))
}

/// Fijo, Corrido and Centena: one line per eligible token
///
/// A type with no amount lines sums to zero and is not emitted.
fn per_token_play(
    draft: &Draft,
    play_type: PlayType,
    buffer: Option<&AmountBuffer>,
) -> Result<Option<ValidPlay>> {
    let eligible = draft.eligible_tokens(play_type);
    let Some(buffer) = buffer else {
        return Ok(None);
    };
    if eligible.is_empty() || buffer.is_empty() {
        return Ok(None);
    }
    let total_cost = buffer.sum()?;
    if !total_cost.is_positive() {
        return Ok(None);
    }

    let line_amounts = (0..eligible.len()).map(|i| buffer.amount_for(i)).collect();
    Ok(Some(ValidPlay {
        play_type,
        details: format!("{}: {}", play_type, eligible.join(", ")),
        combinations: eligible.into_iter().map(str::to_string).collect(),
        amount: buffer.amount_for(0),
        total_cost,
        line_amounts,
    }))
}

fn price(draft: &Draft) -> Result<Vec<ValidPlay>> {
    let mut plays = Vec::new();
    for play_type in draft.selected_types() {
        let buffer = draft.amount_buffer(*play_type);
        let play = match play_type {
            PlayType::Parlet => parlet_play(draft, buffer)?,
            _ => per_token_play(draft, *play_type, buffer)?,
        };
        plays.extend(play);
    }
    Ok(plays)
}

/// Priced plays for every selected type, in selection order
///
/// A token still being backspaced is priced as it stands now.
pub fn valid_plays_for(draft: &Draft) -> Result<Vec<ValidPlay>> {
    if draft.edited_len.is_some() {
        let mut settled = draft.clone();
        settled.settle_edited_token();
        return price(&settled);
    }
    price(draft)
}

/// Total of the live draft
pub fn calculate_current_amount(draft: &Draft) -> Result<Amount> {
    let plays = valid_plays_for(draft)?;
    Ok(Amount::checked_sum(plays.iter().map(|p| p.total_cost))?)
}

/// Separated plays plus the live draft
pub fn calculate_total_amount(plays: &[Play], draft: &Draft) -> Result<Amount> {
    let separated = Amount::checked_sum(plays.iter().map(Play::amount))?;
    Ok(separated.checked_add(calculate_current_amount(draft)?)?)
}

/// Whether every play about to be submitted carries a positive cost
///
/// Amounts too large to price count as invalid.
pub fn has_valid_amounts(plays: &[Play], draft: &Draft) -> bool {
    let separated_ok = plays
        .iter()
        .flat_map(|p| p.valid_plays().iter())
        .all(|vp| vp.total_cost.is_positive());
    if !separated_ok {
        return false;
    }
    if draft.is_empty() || draft.selected_types().is_empty() {
        return true;
    }
    valid_plays_for(draft)
        .map(|vps| vps.iter().all(|vp| vp.total_cost.is_positive()))
        .unwrap_or(false)
}
