use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled draw a bet is placed against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Throw {
    pub id: String,
    #[serde(default)]
    pub lottery_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub closes_at: DateTime<Utc>,
}

/// Error body returned by the betting API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}
