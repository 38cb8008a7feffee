/// Common test fixtures for terminal integration tests
use async_trait::async_trait;
use chrono::{Duration, Utc};
use composer::{BetSubmission, PlayTypeCatalogEntry};
use std::sync::{Arc, Mutex};
use terminal::domain::Throw;
use terminal::errors::{ApiError, Result};
use terminal::BettingApi;
use uuid::Uuid;

pub fn catalog() -> Vec<PlayTypeCatalogEntry> {
    ["Fijo", "Corrido", "Centena", "Parlet"]
        .iter()
        .map(|name| PlayTypeCatalogEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: name.to_uppercase(),
        })
        .collect()
}

pub fn open_throw(id: &str) -> Throw {
    Throw {
        id: id.to_string(),
        lottery_id: Some("florida".to_string()),
        name: "Florida noche".to_string(),
        closes_at: Utc::now() + Duration::hours(2),
    }
}

/// How the mock answers bet submissions
#[derive(Clone, Copy)]
pub enum SubmitBehavior {
    Accept,
    ThrowClosed,
    SessionExpired,
}

#[derive(Clone)]
pub struct MockApi {
    pub catalog: Vec<PlayTypeCatalogEntry>,
    pub behavior: SubmitBehavior,
    pub submitted: Arc<Mutex<Vec<BetSubmission>>>,
}

impl MockApi {
    pub fn new(behavior: SubmitBehavior) -> Self {
        Self {
            catalog: catalog(),
            behavior,
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn submissions(&self) -> Vec<BetSubmission> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl BettingApi for MockApi {
    async fn play_types(&self) -> Result<Vec<PlayTypeCatalogEntry>> {
        Ok(self.catalog.clone())
    }

    async fn throws(&self) -> Result<Vec<Throw>> {
        Ok(vec![open_throw("throw-1")])
    }

    async fn submit_bet(&self, submission: &BetSubmission) -> Result<()> {
        match self.behavior {
            SubmitBehavior::Accept => {
                self.submitted.lock().unwrap().push(submission.clone());
                Ok(())
            }
            SubmitBehavior::ThrowClosed => {
                Err(ApiError::ThrowClosed("The throw is closed".to_string()))
            }
            SubmitBehavior::SessionExpired => Err(ApiError::SessionExpired),
        }
    }
}
