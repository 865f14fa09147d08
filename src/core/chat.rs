use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use crate::core::catalog::Catalog;
use crate::core::clock::Clock;
use crate::core::responder::{PlannedReply, Responder};
use crate::models::{Candidate, ChatPhase, Message, Sender};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Unknown chat partner: {0}")]
    UnknownCandidate(String),
}

/// Timing of the simulated counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSettings {
    /// Pause between a local message and the counterpart starting to type
    pub typing_delay: Duration,
    pub response_min: Duration,
    pub response_max: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(500),
            response_min: Duration::from_millis(1000),
            response_max: Duration::from_millis(3000),
        }
    }
}

/// Point-in-time copy of one chat
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSnapshot {
    pub candidate: Candidate,
    pub messages: Vec<Message>,
    pub phase: ChatPhase,
}

#[derive(Debug, Default)]
struct ChatState {
    log: Vec<Message>,
    phase: ChatPhase,
    pending: Option<JoinHandle<()>>,
}

impl ChatState {
    fn reply_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_pending(&mut self) -> bool {
        self.phase = ChatPhase::Idle;
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

type SharedChat = Arc<Mutex<ChatState>>;

/// All chats of the session, keyed by candidate id
///
/// Each chat has its own lock, so appends to one log are serialized while
/// different chats never wait on each other. The counterpart of a chat runs
/// a small state machine, `Idle -> Typing -> Idle`, on a spawned task that
/// `close_chat` aborts. Abort handles of reply tasks are also kept outside
/// the per-chat locks, so dropping the hub stops every task.
pub struct ChatHub {
    catalog: Arc<Catalog>,
    chats: StdMutex<HashMap<String, SharedChat>>,
    replies: StdMutex<HashMap<String, AbortHandle>>,
    responder: Arc<Responder>,
    clock: Arc<dyn Clock>,
    settings: ChatSettings,
}

impl ChatHub {
    pub fn new(
        catalog: Arc<Catalog>,
        seeded: Vec<(String, Vec<Message>)>,
        responder: Arc<Responder>,
        clock: Arc<dyn Clock>,
        settings: ChatSettings,
    ) -> Self {
        let mut chats = HashMap::new();
        for (candidate_id, log) in seeded {
            if !catalog.contains(&candidate_id) {
                tracing::warn!("Dropping seeded chat with unknown candidate {}", candidate_id);
                continue;
            }
            let state = ChatState {
                log,
                ..Default::default()
            };
            chats.insert(candidate_id, Arc::new(Mutex::new(state)));
        }

        Self {
            catalog,
            chats: StdMutex::new(chats),
            replies: StdMutex::new(HashMap::new()),
            responder,
            clock,
            settings,
        }
    }

    /// Ordered message log with `candidate_id`, created empty on first open
    pub async fn open_chat(&self, candidate_id: &str) -> Result<Vec<Message>, ChatError> {
        let (_, chat) = self.chat(candidate_id)?;
        let log = chat.lock().await.log.clone();
        Ok(log)
    }

    pub async fn snapshot(&self, candidate_id: &str) -> Result<ChatSnapshot, ChatError> {
        let (candidate, chat) = self.chat(candidate_id)?;
        let state = chat.lock().await;

        Ok(ChatSnapshot {
            candidate,
            messages: state.log.clone(),
            phase: state.phase,
        })
    }

    pub async fn phase(&self, candidate_id: &str) -> Result<ChatPhase, ChatError> {
        let (_, chat) = self.chat(candidate_id)?;
        let phase = chat.lock().await.phase;
        Ok(phase)
    }

    /// Append a local message and schedule the counterpart's reply.
    ///
    /// Blank text is ignored and yields `Ok(None)`. While a reply is still
    /// pending, further messages are appended but do not schedule another
    /// one: the counterpart answers a burst once.
    pub async fn send_message(
        &self,
        candidate_id: &str,
        text: &str,
    ) -> Result<Option<Message>, ChatError> {
        let (candidate, chat) = self.chat(candidate_id)?;

        if text.trim().is_empty() {
            return Ok(None);
        }

        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            sender: Sender::LocalUser,
            text: text.to_string(),
            timestamp: self.clock.now(),
        };

        let mut state = chat.lock().await;
        state.log.push(message.clone());

        if state.reply_pending() {
            tracing::debug!("Reply from {} already pending", candidate_id);
        } else {
            let reply = self.responder.plan_reply(&candidate);
            let handle = self.schedule_reply(candidate.id.clone(), chat.clone(), reply);
            self.replies().insert(candidate.id.clone(), handle.abort_handle());
            state.pending = Some(handle);
        }

        tracing::info!("Sent message {} to {}", message.id, candidate_id);
        Ok(Some(message))
    }

    /// Stop observing a chat: pending counterpart activity is cancelled and
    /// the chat returns to idle. The log itself is kept.
    pub async fn close_chat(&self, candidate_id: &str) -> Result<bool, ChatError> {
        if !self.catalog.contains(candidate_id) {
            return Err(ChatError::UnknownCandidate(candidate_id.to_string()));
        }

        self.replies().remove(candidate_id);

        let chat = self.chats().get(candidate_id).cloned();
        let Some(chat) = chat else {
            return Ok(false);
        };

        let cancelled = chat.lock().await.cancel_pending();
        if cancelled {
            tracing::debug!("Cancelled pending reply from {}", candidate_id);
        }
        Ok(cancelled)
    }

    fn schedule_reply(&self, candidate_id: String, chat: SharedChat, reply: PlannedReply) -> JoinHandle<()> {
        let typing_delay = self.settings.typing_delay;
        let clock = self.clock.clone();

        tokio::spawn(async move {
            tokio::time::sleep(typing_delay).await;
            chat.lock().await.phase = ChatPhase::Typing;

            tokio::time::sleep(reply.delay).await;
            let mut state = chat.lock().await;
            state.phase = ChatPhase::Idle;
            state.log.push(Message {
                id: uuid::Uuid::new_v4().to_string(),
                sender: Sender::Candidate(candidate_id.clone()),
                text: reply.text,
                timestamp: clock.now(),
            });
            state.pending = None;

            tracing::debug!("{} replied", candidate_id);
        })
    }

    fn chat(&self, candidate_id: &str) -> Result<(Candidate, SharedChat), ChatError> {
        let candidate = self
            .catalog
            .get(candidate_id)
            .cloned()
            .ok_or_else(|| ChatError::UnknownCandidate(candidate_id.to_string()))?;

        let chat = self
            .chats()
            .entry(candidate_id.to_string())
            .or_default()
            .clone();

        Ok((candidate, chat))
    }

    fn chats(&self) -> std::sync::MutexGuard<'_, HashMap<String, SharedChat>> {
        self.chats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replies(&self) -> std::sync::MutexGuard<'_, HashMap<String, AbortHandle>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ChatHub {
    fn drop(&mut self) {
        let replies = self.replies.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in replies.drain() {
            handle.abort();
        }
    }
}
