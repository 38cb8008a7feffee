/// Type-safe wrappers for domain primitives
///
/// These types enforce validation at construction time and provide checked
/// arithmetic for money.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use crate::constants::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown play type: {0}")]
    UnknownPlayType(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow in operation")]
    AmountOverflow,
}

/// Lottery play types the composer knows how to price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayType {
    Fijo,
    Corrido,
    Centena,
    Parlet,
}

impl PlayType {
    pub const ALL: [PlayType; 4] = [
        PlayType::Fijo,
        PlayType::Corrido,
        PlayType::Centena,
        PlayType::Parlet,
    ];

    /// Parse a human type name ("Fijo", "parlet", ...)
    pub fn from_name(name: &str) -> Result<Self, ValidationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fijo" => Ok(PlayType::Fijo),
            "corrido" => Ok(PlayType::Corrido),
            "centena" => Ok(PlayType::Centena),
            "parlet" => Ok(PlayType::Parlet),
            _ => Err(ValidationError::UnknownPlayType(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayType::Fijo => "fijo",
            PlayType::Corrido => "corrido",
            PlayType::Centena => "centena",
            PlayType::Parlet => "parlet",
        }
    }

    /// Whether a token of `len` digits can be played with this type
    pub fn accepts_len(&self, len: usize) -> bool {
        match self {
            PlayType::Fijo | PlayType::Corrido | PlayType::Parlet => len == 1 || len == 2,
            PlayType::Centena => len == MAX_TOKEN_DIGITS,
        }
    }

    /// Minimum eligible tokens required before the type can be offered
    pub fn min_tokens(&self) -> usize {
        match self {
            PlayType::Parlet => 2,
            _ => 1,
        }
    }

    /// Backend identifier from the static table
    pub fn default_id(&self) -> Uuid {
        match self {
            PlayType::Fijo => FIJO_PLAY_TYPE_ID,
            PlayType::Corrido => CORRIDO_PLAY_TYPE_ID,
            PlayType::Centena => CENTENA_PLAY_TYPE_ID,
            PlayType::Parlet => PARLET_PLAY_TYPE_ID,
        }
    }
}

impl std::fmt::Display for PlayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayType::Fijo => "Fijo",
            PlayType::Corrido => "Corrido",
            PlayType::Centena => "Centena",
            PlayType::Parlet => "Parlet",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for PlayType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Money amount in cents with overflow protection
///
/// Serialized on the wire as a number of currency units (1050 cents -> 10.5).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn from_units(units: u64) -> Self {
        Self(units * CENTS_PER_UNIT)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parse a typed amount line such as "10", "2.5" or "0.75"
    ///
    /// Fractional digits past the second are truncated.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let invalid = || ValidationError::InvalidAmount(text.to_string());

        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let units: u64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| invalid())?
        };
        let mut frac: String = frac_part.chars().take(2).collect();
        while frac.len() < 2 {
            frac.push('0');
        }
        let cents: u64 = frac.parse().map_err(|_| invalid())?;

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .map(Self)
            .ok_or(ValidationError::AmountOverflow)
    }

    /// Lenient parse used for pricing: anything unparseable counts as zero
    pub fn parse_or_zero(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::ZERO)
    }

    pub fn checked_add(&self, other: Amount) -> Result<Self, ValidationError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ValidationError::AmountOverflow)
    }

    pub fn checked_mul(&self, multiplier: u64) -> Result<Self, ValidationError> {
        self.0
            .checked_mul(multiplier)
            .map(Self)
            .ok_or(ValidationError::AmountOverflow)
    }

    /// Sum that fails instead of wrapping or capping
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Result<Self, ValidationError> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, a| acc.checked_add(a))
    }

    pub fn to_units(&self) -> f64 {
        self.0 as f64 / CENTS_PER_UNIT as f64
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let units = self.0 / CENTS_PER_UNIT;
        let cents = self.0 % CENTS_PER_UNIT;
        if cents == 0 {
            write!(f, "{}", units)
        } else {
            write!(f, "{}.{:02}", units, cents)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_units())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        if !units.is_finite() || units < 0.0 {
            return Err(serde::de::Error::custom(format!("Invalid amount: {}", units)));
        }
        Ok(Self((units * CENTS_PER_UNIT as f64).round() as u64))
    }
}
