use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::core::catalog::{Catalog, SeedData};
use crate::core::chat::{ChatError, ChatHub, ChatSettings, ChatSnapshot};
use crate::core::clock::{Clock, SystemClock};
use crate::core::deck::Deck;
use crate::core::notify::{Notifier, TracingNotifier};
use crate::core::registry::{MatchRegistry, RegistryError};
use crate::core::responder::Responder;
use crate::core::swipe::{SwipeEngine, SwipeOutcome};
use crate::models::{Candidate, ChatPhase, MatchedCandidate, Message, SwipeDirection};

/// Tunables of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Card transition after each swipe
    pub transition: Duration,
    pub chat: ChatSettings,
    /// Seed for the simulated counterparts; entropy when absent
    pub rng_seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            transition: Duration::from_millis(300),
            chat: ChatSettings::default(),
            rng_seed: None,
        }
    }
}

/// One user's discover / match / chat session
///
/// Wires the deck, the swipe engine, the match registry and the chats over
/// a single shared catalog.
pub struct HackSession {
    catalog: Arc<Catalog>,
    swipes: SwipeEngine,
    registry: Arc<RwLock<MatchRegistry>>,
    chats: ChatHub,
}

impl HackSession {
    pub fn new(
        seed: SeedData,
        options: SessionOptions,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let catalog = Arc::new(seed.catalog);
        let registry = Arc::new(RwLock::new(MatchRegistry::with_matches(
            catalog.clone(),
            seed.matches,
        )));

        let swipes = SwipeEngine::new(
            Deck::new(catalog.clone()),
            registry.clone(),
            clock.clone(),
            notifier,
            options.transition,
        );

        let responder = Arc::new(Responder::new(
            options.rng_seed,
            options.chat.response_min,
            options.chat.response_max,
        ));
        let chats = ChatHub::new(catalog.clone(), seed.chats, responder, clock, options.chat);

        tracing::debug!("Session started with {} candidates", catalog.len());

        Self {
            catalog,
            swipes,
            registry,
            chats,
        }
    }

    /// Session over `seed` with the system clock and log-only notices
    pub fn with_defaults(seed: SeedData, options: SessionOptions) -> Self {
        Self::new(seed, options, Arc::new(SystemClock), Arc::new(TracingNotifier))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub async fn current_candidate(&self) -> Option<Candidate> {
        self.swipes.current().await
    }

    pub async fn remaining(&self) -> usize {
        self.swipes.remaining().await
    }

    pub async fn cursor(&self) -> usize {
        self.swipes.cursor().await
    }

    pub async fn swipe(&self, direction: SwipeDirection) -> Result<SwipeOutcome, RegistryError> {
        self.swipes.swipe(direction).await
    }

    pub async fn list_matches(&self) -> Result<Vec<MatchedCandidate>, RegistryError> {
        self.registry.read().await.list_matches()
    }

    pub async fn is_matched(&self, candidate_id: &str) -> bool {
        self.registry.read().await.is_matched(candidate_id)
    }

    pub async fn open_chat(&self, candidate_id: &str) -> Result<Vec<Message>, ChatError> {
        self.chats.open_chat(candidate_id).await
    }

    pub async fn chat_snapshot(&self, candidate_id: &str) -> Result<ChatSnapshot, ChatError> {
        self.chats.snapshot(candidate_id).await
    }

    pub async fn chat_phase(&self, candidate_id: &str) -> Result<ChatPhase, ChatError> {
        self.chats.phase(candidate_id).await
    }

    pub async fn send_message(
        &self,
        candidate_id: &str,
        text: &str,
    ) -> Result<Option<Message>, ChatError> {
        self.chats.send_message(candidate_id, text).await
    }

    pub async fn close_chat(&self, candidate_id: &str) -> Result<bool, ChatError> {
        self.chats.close_chat(candidate_id).await
    }
}
