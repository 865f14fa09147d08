use serde::{Deserialize, Serialize};
use crate::models::domain::{Candidate, ChatPhase, MatchedCandidate, Message, Notice};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Landing and about pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    pub title: String,
    pub body: String,
    pub links: Vec<String>,
}

/// Current head of the deck, or the empty state when `candidate` is absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub candidate: Option<Candidate>,
    pub remaining: usize,
    pub exhausted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchedCandidate>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub candidate: Candidate,
    pub messages: Vec<Message>,
    pub phase: ChatPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub sent: Option<Message>,
    pub phase: ChatPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub token: uuid::Uuid,
    pub notice: Notice,
    /// Only present when the simulated mailer is configured to reveal codes
    #[serde(rename = "devCode", skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmCodeResponse {
    pub email: String,
    #[serde(rename = "eventCode")]
    pub event_code: String,
    pub notice: Notice,
}

/// Result of storing a profile form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedResponse {
    pub notice: Notice,
    pub next: String,
}
