//! AL range-fill
//!
//! "AL" captures one number, waits for a second, then replaces both with the
//! inclusive sequence between them.

use shared::{AL_DENSE_RANGE_MAX_DIFF, AL_WIDE_STEP};

use crate::draft::{AlMode, Draft};
use crate::errors::{ComposerError, Result};

/// Enumerate the numbers between two AL endpoints
///
/// Two-digit endpoints at most 10 apart are enumerated one by one, wider
/// ranges on the step-10 lattice with the upper endpoint always included.
/// One-digit endpoints step by one. Any other shape yields nothing.
pub fn generate_al_range(first: &str, second: &str) -> Vec<String> {
    let (Ok(a), Ok(b)) = (first.parse::<u32>(), second.parse::<u32>()) else {
        return Vec::new();
    };
    let (min, max) = (a.min(b), a.max(b));

    match (first.len(), second.len()) {
        (2, 2) => {
            let padded = first.starts_with('0') || second.starts_with('0');
            let format = |n: u32| {
                if padded {
                    format!("{:02}", n)
                } else {
                    n.to_string()
                }
            };

            let mut numbers: Vec<u32> = if max - min <= AL_DENSE_RANGE_MAX_DIFF {
                (min..=max).collect()
            } else {
                (min..=max).step_by(AL_WIDE_STEP as usize).collect()
            };
            if numbers.last() != Some(&max) {
                numbers.push(max);
            }
            numbers.into_iter().map(format).collect()
        }
        (1, 1) => (min..=max).map(|n| n.to_string()).collect(),
        _ => Vec::new(),
    }
}

impl Draft {
    /// Capture the only entered number as the first AL endpoint
    pub fn apply_al(&mut self) -> Result<()> {
        if self.tokens.len() != 1 {
            return Err(ComposerError::AlTokenCount(self.tokens.len()));
        }
        self.settle_edited_token();
        self.al_mode = AlMode {
            active: true,
            first_number: self.tokens.first().cloned(),
        };
        self.trailing_delimiter = true;

        tracing::debug!(first_number = ?self.al_mode.first_number, "AL mode started");
        Ok(())
    }

    /// Replace the two AL endpoints with their range
    ///
    /// Returns `Ok(false)` when there is nothing to expand yet.
    pub fn expand_al_range(&mut self) -> Result<bool> {
        if !self.al_mode.active || self.tokens.len() != 2 {
            return Ok(false);
        }
        let (first, second) = (&self.tokens[0], &self.tokens[1]);
        let range = generate_al_range(first, second);
        if range.is_empty() {
            tracing::warn!(%first, %second, "AL range undefined");
            return Err(ComposerError::InvalidAlRange {
                first: first.clone(),
                second: second.clone(),
            });
        }

        tracing::debug!(count = range.len(), "AL range expanded");
        self.tokens = range;
        self.trailing_delimiter = true;
        self.edited_len = None;
        self.al_mode = AlMode::default();
        Ok(true)
    }
}
