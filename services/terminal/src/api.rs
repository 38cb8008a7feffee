//! Betting API client
//!
//! Catalog loads and bet submission. Each call is a single in-flight
//! request with no retry.

use async_trait::async_trait;
use composer::{BetSubmission, PlayTypeCatalogEntry};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::config::ApiConfig;
use crate::domain::{ApiErrorBody, Throw};
use crate::errors::{ApiError, Result};

const THROW_CLOSED_CODES: [&str; 2] = ["THROW_CLOSED", "TIRADA_CERRADA"];

#[async_trait]
pub trait BettingApi: Send + Sync {
    async fn play_types(&self) -> Result<Vec<PlayTypeCatalogEntry>>;

    async fn throws(&self) -> Result<Vec<Throw>>;

    async fn submit_bet(&self, submission: &BetSubmission) -> Result<()>;
}

/// Client for the betting REST API
pub struct HttpBettingApi {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBettingApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "Fetching");

        let resp = self.authorized(self.http.get(url)).send().await?;
        let resp = check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Turn a non-success response into the matching error
pub(crate) fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ApiError::SessionExpired;
    }

    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .text()
        .map(str::to_string)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && !trimmed.starts_with('{')).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    let code_says_closed = parsed
        .code
        .as_deref()
        .map(|c| THROW_CLOSED_CODES.iter().any(|k| c.eq_ignore_ascii_case(k)))
        .unwrap_or(false);
    let lowered = message.to_lowercase();
    let message_says_closed = (lowered.contains("throw") || lowered.contains("tirada"))
        && (lowered.contains("closed") || lowered.contains("cerrad"));

    if code_says_closed || message_says_closed {
        ApiError::ThrowClosed(message)
    } else {
        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let err = classify_failure(status, &body);
    tracing::warn!(status = status.as_u16(), error = %err, "API request failed");
    Err(err)
}

#[async_trait]
impl BettingApi for HttpBettingApi {
    async fn play_types(&self) -> Result<Vec<PlayTypeCatalogEntry>> {
        self.get_json("/play-types").await
    }

    async fn throws(&self) -> Result<Vec<Throw>> {
        self.get_json("/throws").await
    }

    async fn submit_bet(&self, submission: &BetSubmission) -> Result<()> {
        let url = format!("{}/bets", self.base_url);

        tracing::info!(
            throw_id = %submission.throw_id,
            plays = submission.bet_plays.len(),
            moves = submission.move_count(),
            "Submitting bet"
        );

        let resp = self
            .authorized(self.http.post(url))
            .json(submission)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_session_expired() {
        assert!(matches!(
            classify_failure(StatusCode::UNAUTHORIZED, ""),
            ApiError::SessionExpired
        ));
        assert!(classify_failure(StatusCode::FORBIDDEN, "{}").is_fatal());
    }

    #[test]
    fn test_throw_closed_by_code_or_message() {
        let by_code = classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"code":"THROW_CLOSED","message":"Too late"}"#,
        );
        assert!(matches!(by_code, ApiError::ThrowClosed(ref m) if m == "Too late"));

        let by_message = classify_failure(
            StatusCode::CONFLICT,
            r#"{"message":"La tirada está cerrada"}"#,
        );
        assert!(matches!(by_message, ApiError::ThrowClosed(_)));
    }

    #[test]
    fn test_server_message_surfaced_verbatim() {
        match classify_failure(StatusCode::BAD_REQUEST, r#"{"error":"Limit exceeded for 25"}"#) {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Limit exceeded for 25");
            }
            other => panic!("unexpected {other:?}"),
        }

        match classify_failure(StatusCode::BAD_GATEWAY, "upstream down") {
            ApiError::Rejected { message, .. } => assert_eq!(message, "upstream down"),
            other => panic!("unexpected {other:?}"),
        }

        match classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "{}") {
            ApiError::Rejected { message, .. } => assert_eq!(message, "Internal Server Error"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
