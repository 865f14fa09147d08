use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Identifier used for messages written by the local user.
pub const LOCAL_USER_ID: &str = "currentUser";

/// The local user's profile, collected once by the setup form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 2, message = "Name must be at least 2 characters."))]
    pub name: String,
    #[validate(length(min = 1, message = "Please select at least one skill."))]
    pub skill1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill3: Option<String>,
    #[validate(length(min = 1, message = "Please select what you're looking for."))]
    #[serde(rename = "lookingFor")]
    pub looking_for: String,
    #[serde(rename = "preferredRole", default, skip_serializing_if = "Option::is_none")]
    pub preferred_role: Option<String>,
}

impl Profile {
    /// Skills in form order, skipping unset or blank optional slots
    pub fn skills(&self) -> Vec<&str> {
        collect_skills(&self.skill1, self.skill2.as_deref(), self.skill3.as_deref())
    }
}

/// Event-specific profile extension filled in after verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct HackProfile {
    #[validate(length(min = 1, message = "Please select at least one skill."))]
    pub skill1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill3: Option<String>,
    #[validate(length(min = 1, message = "Please select what you're looking for."))]
    #[serde(rename = "lookingFor")]
    pub looking_for: String,
    #[validate(length(min = 1, message = "Please select your preferred role."))]
    #[serde(rename = "preferredRole")]
    pub preferred_role: String,
}

impl HackProfile {
    pub fn skills(&self) -> Vec<&str> {
        collect_skills(&self.skill1, self.skill2.as_deref(), self.skill3.as_deref())
    }
}

fn collect_skills<'a>(first: &'a str, second: Option<&'a str>, third: Option<&'a str>) -> Vec<&'a str> {
    std::iter::once(first)
        .chain(second)
        .chain(third)
        .filter(|skill| !skill.trim().is_empty())
        .collect()
}

/// Another attendee that can be swiped on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub skills: Vec<String>,
    #[serde(rename = "lookingFor")]
    pub looking_for: String,
    pub avatar: String,
}

impl Candidate {
    pub fn first_skill(&self) -> Option<&str> {
        self.skills.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

/// A recorded right swipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
}

/// A match joined with its candidate, as shown in the matches list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedCandidate {
    pub candidate: Candidate,
    #[serde(rename = "matchedAt")]
    pub matched_at: DateTime<Utc>,
}

/// Author of a chat message
///
/// Serialized as the bare sender id, with [`LOCAL_USER_ID`] standing for the
/// local user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Sender {
    LocalUser,
    Candidate(String),
}

impl Sender {
    pub fn is_local(&self) -> bool {
        matches!(self, Sender::LocalUser)
    }
}

impl From<String> for Sender {
    fn from(id: String) -> Self {
        if id == LOCAL_USER_ID {
            Sender::LocalUser
        } else {
            Sender::Candidate(id)
        }
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::LocalUser => LOCAL_USER_ID.to_string(),
            Sender::Candidate(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "senderId")]
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Counterpart state of a chat. Typing never reaches the message log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatPhase {
    #[default]
    Idle,
    Typing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Transient user-facing notification (a toast in the web client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn connection_requested(candidate: &Candidate) -> Self {
        Self::new(
            NoticeKind::Success,
            "Connection Request Sent!",
            format!("You've expressed interest in connecting with {}.", candidate.name),
        )
    }

    pub fn no_more_profiles() -> Self {
        Self::new(
            NoticeKind::Info,
            "No more profiles",
            "You've seen all available profiles for now.",
        )
    }
}
