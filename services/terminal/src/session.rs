//! Line-driven bet-placement session
//!
//! Each input line is either keypad text (digits, `.`, `,`) or a command.
//! The session owns one [`BetComposer`] and talks to the API only for the
//! catalog and the final submission.

use chrono::Utc;
use composer::{
    offered_types, BetComposer, ComposerError, InputTarget, Key, KeyOutcome,
    PlayTypeCatalogEntry, PlayTypeIds,
};
use shared::errors::{ErrorCode, ServiceError};
use shared::PlayType;
use std::time::Duration;

use crate::api::BettingApi;
use crate::countdown::{format_countdown, time_remaining};
use crate::domain::Throw;

/// What the session wants printed, plus whether to keep going
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Error(String),
    /// The session can not continue; sign-in has to happen again
    SessionExpired(String),
    Quit,
}

pub struct Session<A: BettingApi> {
    api: A,
    composer: BetComposer,
    catalog: Vec<PlayTypeCatalogEntry>,
    ids: PlayTypeIds,
    throws: Vec<Throw>,
    throw_id: Option<String>,
    auto_advance_delay: Duration,
}

impl<A: BettingApi> Session<A> {
    pub fn new(api: A, throw_id: Option<String>, auto_advance_delay: Duration) -> Self {
        Self {
            api,
            composer: BetComposer::new(),
            catalog: Vec::new(),
            ids: PlayTypeIds::default(),
            throws: Vec::new(),
            throw_id,
            auto_advance_delay,
        }
    }

    pub fn composer(&self) -> &BetComposer {
        &self.composer
    }

    /// Load the play-type catalog and the open throws
    pub async fn load_catalogs(&mut self) -> Result<(), ServiceError> {
        self.catalog = self.api.play_types().await?;
        self.ids = PlayTypeIds::from_catalog(&self.catalog);
        self.throws = self.api.throws().await?;
        if self.throw_id.is_none() {
            self.throw_id = self.throws.first().map(|t| t.id.clone());
        }
        tracing::info!(
            play_types = self.catalog.len(),
            throws = self.throws.len(),
            "Catalogs loaded"
        );
        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((c, a)) => (c, a.trim()),
            None => (line, ""),
        };

        let result = match command {
            "" => Ok(self.status()),
            "enter" => self.apply_keys(&[Key::Delimiter]).await,
            "del" => self.apply_keys(&[Key::Backspace]).await,
            "tab" => self.tab(arg),
            "toggle" => self.toggle(arg),
            "al" => self
                .composer
                .draft_mut()
                .apply_al()
                .map(|_| "AL: type the last number".to_string())
                .map_err(ServiceError::from),
            "separate" => self
                .composer
                .separate_play()
                .map(|p| format!("Play separated: {}", p.amount()))
                .map_err(ServiceError::from),
            "list" => Ok(self.list()),
            "edit" => self.edit(arg),
            "remove" => self.remove(arg),
            "total" => self
                .composer
                .total_amount()
                .map(|t| format!("Total: {}", t))
                .map_err(ServiceError::from),
            "clock" => Ok(self.clock()),
            "throw" => self.select_throw(arg),
            "clear" => {
                self.composer.draft_mut().clear();
                Ok("Draft cleared".to_string())
            }
            "send" => self.send().await,
            "quit" | "exit" => return Reply::Quit,
            _ => self.type_keys(line).await,
        };

        match result {
            Ok(text) => Reply::Text(text),
            Err(err) => {
                match err.category.log_level() {
                    "error" => tracing::error!(code = %err.code, "{}", err.message),
                    _ => tracing::warn!(code = %err.code, "{}", err.message),
                }
                if err.category.is_recoverable() {
                    Reply::Error(err.to_string())
                } else {
                    Reply::SessionExpired(err.to_string())
                }
            }
        }
    }

    /// Apply keys to the draft, all or nothing
    async fn apply_keys(&mut self, keys: &[Key]) -> Result<String, ServiceError> {
        let before = self.composer.draft().clone();
        for key in keys {
            if let Err(err) = self.press(*key).await {
                *self.composer.draft_mut() = before;
                return Err(err.into());
            }
        }
        Ok(self.status())
    }

    async fn press(&mut self, key: Key) -> Result<(), ComposerError> {
        let outcome = self.composer.draft_mut().press(key)?;
        if outcome == KeyOutcome::AutoAdvance {
            tokio::time::sleep(self.auto_advance_delay).await;
            self.composer.draft_mut().append_delimiter()?;
        }
        Ok(())
    }

    async fn type_keys(&mut self, text: &str) -> Result<String, ServiceError> {
        let keys: Option<Vec<Key>> = text
            .chars()
            .filter(|c| *c != ' ')
            .map(Key::from_char)
            .collect();
        let Some(keys) = keys else {
            return Err(ServiceError::validation(
                ErrorCode::VALIDATION_UNKNOWN_COMMAND,
                format!("Unknown command: {}", text),
            ));
        };
        self.apply_keys(&keys).await
    }

    fn tab(&mut self, arg: &str) -> Result<String, ServiceError> {
        let target = match arg {
            "" | "numbers" => InputTarget::Numbers,
            name => InputTarget::Amounts(parse_type(name)?),
        };
        self.composer.draft_mut().select_tab(target)?;
        Ok(self.status())
    }

    fn toggle(&mut self, arg: &str) -> Result<String, ServiceError> {
        let play_type = parse_type(arg)?;
        let on = self
            .composer
            .draft_mut()
            .toggle_type(play_type, &self.catalog)?;
        Ok(format!("{} {}", play_type, if on { "on" } else { "off" }))
    }

    fn play_id_at(&self, arg: &str) -> Result<uuid::Uuid, ServiceError> {
        arg.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.composer.plays().get(i))
            .map(|p| p.id())
            .ok_or_else(|| {
                ServiceError::validation(
                    ErrorCode::VALIDATION_UNKNOWN_PLAY,
                    format!("No play #{}", arg),
                )
            })
    }

    fn edit(&mut self, arg: &str) -> Result<String, ServiceError> {
        let id = self.play_id_at(arg)?;
        self.composer.edit_play(id)?;
        Ok(self.status())
    }

    fn remove(&mut self, arg: &str) -> Result<String, ServiceError> {
        let id = self.play_id_at(arg)?;
        self.composer.remove_play(id);
        Ok(self.list())
    }

    fn select_throw(&mut self, arg: &str) -> Result<String, ServiceError> {
        if arg.is_empty() {
            return Ok(self
                .throws
                .iter()
                .map(|t| format!("{} {}", t.id, t.name))
                .collect::<Vec<_>>()
                .join("\n"));
        }
        self.throw_id = Some(arg.to_string());
        Ok(format!("Throw: {}", arg))
    }

    async fn send(&mut self) -> Result<String, ServiceError> {
        let throw_id = self.throw_id.clone().ok_or_else(|| {
            ServiceError::validation(
                ErrorCode::VALIDATION_NO_THROW,
                "Select a throw first",
            )
        })?;
        let submission = self.composer.submission(&throw_id, &self.ids, Utc::now())?;
        let total = submission.total()?;

        if let Err(err) = self.api.submit_bet(&submission).await {
            if err.is_fatal() {
                tracing::warn!(throw_id = %throw_id, "Session expired, bet kept for after sign-in");
            }
            return Err(err.into());
        }

        self.composer.reset();
        tracing::info!(throw_id = %throw_id, total = %total, "Bet accepted");
        Ok(format!("Bet accepted: {}", total))
    }

    fn clock(&self) -> String {
        let Some(throw) = self
            .throw_id
            .as_ref()
            .and_then(|id| self.throws.iter().find(|t| &t.id == id))
        else {
            return "No throw schedule".to_string();
        };
        format!(
            "{} closes in {}",
            throw.name,
            format_countdown(time_remaining(throw.closes_at, Utc::now()))
        )
    }

    fn list(&self) -> String {
        if self.composer.plays().is_empty() {
            return "No plays".to_string();
        }
        self.composer
            .plays()
            .iter()
            .enumerate()
            .map(|(i, play)| {
                let details: Vec<&str> =
                    play.valid_plays().iter().map(|vp| vp.details.as_str()).collect();
                format!("#{} {} [{}]", i + 1, play.amount(), details.join("; "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status(&self) -> String {
        let draft = self.composer.draft();
        let target = match draft.target() {
            InputTarget::Numbers => "numbers".to_string(),
            InputTarget::Amounts(t) => t.as_str().to_string(),
        };
        let offered: Vec<&str> = offered_types(draft, &self.catalog)
            .iter()
            .map(PlayType::as_str)
            .collect();
        let selected: Vec<&str> = draft.selected_types().iter().map(PlayType::as_str).collect();
        format!(
            "[{}] numbers: {} | offered: {} | selected: {} | current: {} | total: {}",
            target,
            draft.tokens().join(","),
            offered.join(","),
            selected.join(","),
            show_amount(self.composer.current_amount()),
            show_amount(self.composer.total_amount())
        )
    }
}

fn show_amount(amount: composer::errors::Result<shared::Amount>) -> String {
    match amount {
        Ok(amount) => amount.to_string(),
        Err(_) => "overflow".to_string(),
    }
}

fn parse_type(name: &str) -> Result<PlayType, ServiceError> {
    PlayType::from_name(name).map_err(|e| {
        ServiceError::validation(
            ErrorCode::VALIDATION_PLAY_TYPE_UNAVAILABLE,
            e.to_string(),
        )
    })
}
