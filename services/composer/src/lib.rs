//! Bet composition engine for numbers-lottery plays
//!
//! Owns the in-progress draft (typed numbers, selected play types, amount
//! lines, AL state), derives priced plays from it and flattens separated
//! plays into the submission payload.

pub mod al_range;
pub mod draft;
pub mod eligibility;
pub mod errors;
pub mod plays;
pub mod pricing;
pub mod submission;
pub mod tokenizer;

pub use al_range::generate_al_range;
pub use draft::{AlMode, AmountBuffer, Draft, InputTarget};
pub use eligibility::{available_types, offered_types, PlayTypeCatalogEntry, PlayTypeIds};
pub use errors::ComposerError;
pub use plays::{validate_no_illegal_duplicates, BetComposer, Play};
pub use pricing::{
    calculate_current_amount, calculate_total_amount, has_valid_amounts, valid_plays_for,
    ValidPlay,
};
pub use submission::{assemble_submission, BetPlay, BetSubmission, Move, MoveDetail};
pub use tokenizer::{Key, KeyOutcome};
