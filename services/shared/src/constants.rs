/// Shared constants for the lotería bet composer
///
/// This module centralizes the keypad limits, range-fill thresholds and the
/// backend's fixed play-type identifiers so the composer and the terminal agree.

use uuid::{uuid, Uuid};

/// Maximum number of tokens a single draft may hold
///
/// Further digits are ignored once the cap is reached.
pub const MAX_TOKENS: usize = 30;

/// Maximum digits per token (a centena)
pub const MAX_TOKEN_DIGITS: usize = 3;

/// Two-digit prefixes that may grow into a 3-digit token with a trailing `0`
///
/// "10" + "0" = "100" is allowed, "12" + "0" = "120" is not.
pub const TEN_MULTIPLES: [&str; 10] = ["00", "10", "20", "30", "40", "50", "60", "70", "80", "90"];

/// Delay before a completed 3-digit token is closed automatically
pub const AUTO_ADVANCE_DELAY_MS: u64 = 300;

/// Largest endpoint distance an AL range enumerates with step 1
///
/// Wider two-digit ranges are enumerated on the step-10 lattice.
pub const AL_DENSE_RANGE_MAX_DIFF: u32 = 10;

/// Step used for wide two-digit AL ranges
pub const AL_WIDE_STEP: u32 = 10;

/// Delimiter between tokens and between amount lines
pub const DELIMITER: char = '\n';

/// Separator used when displaying a Parlet pair ("25 X 07")
pub const PARLET_SEPARATOR: &str = " X ";

/// Minor units per currency unit
pub const CENTS_PER_UNIT: u64 = 100;

/// Fixed backend identifiers for each play type
///
/// Used when the catalog does not carry an entry for a type.
pub const FIJO_PLAY_TYPE_ID: Uuid = uuid!("3f1c2a6e-8b1d-4c55-9a0e-0d6b7f1e2a01");
pub const CORRIDO_PLAY_TYPE_ID: Uuid = uuid!("3f1c2a6e-8b1d-4c55-9a0e-0d6b7f1e2a02");
pub const CENTENA_PLAY_TYPE_ID: Uuid = uuid!("3f1c2a6e-8b1d-4c55-9a0e-0d6b7f1e2a03");
pub const PARLET_PLAY_TYPE_ID: Uuid = uuid!("3f1c2a6e-8b1d-4c55-9a0e-0d6b7f1e2a04");
