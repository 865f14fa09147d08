use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::core::clock::Clock;
use crate::core::deck::Deck;
use crate::core::notify::{deliver, Notifier};
use crate::core::registry::{MatchRecord, MatchRegistry, RegistryError};
use crate::models::{Candidate, Match, Notice, SwipeDirection};

/// What a single swipe did to the deck and the registry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwipeResult {
    Passed {
        candidate: Candidate,
    },
    Matched {
        candidate: Candidate,
        #[serde(rename = "match")]
        entry: Match,
    },
    /// Right swipe on a candidate that was matched before; nothing new recorded
    AlreadyMatched {
        candidate: Candidate,
        #[serde(rename = "match")]
        entry: Match,
    },
    /// The deck was already exhausted; nothing changed
    NoMoreProfiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwipeOutcome {
    pub result: SwipeResult,
    pub cursor: usize,
    pub remaining: usize,
    pub exhausted: bool,
    pub notices: Vec<Notice>,
}

/// Applies left/right decisions to the deck head
///
/// Swipes are serialized on the deck lock, which stays held for the whole
/// visual transition. A swipe therefore never observes the deck before the
/// previous swipe has settled, and the cursor moves exactly once per call.
pub struct SwipeEngine {
    deck: Mutex<Deck>,
    registry: Arc<RwLock<MatchRegistry>>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    transition: Duration,
}

impl SwipeEngine {
    pub fn new(
        deck: Deck,
        registry: Arc<RwLock<MatchRegistry>>,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
        transition: Duration,
    ) -> Self {
        Self {
            deck: Mutex::new(deck),
            registry,
            clock,
            notifier,
            transition,
        }
    }

    pub async fn swipe(&self, direction: SwipeDirection) -> Result<SwipeOutcome, RegistryError> {
        let mut deck = self.deck.lock().await;

        let Some(candidate) = deck.current().cloned() else {
            tracing::debug!("Swipe {:?} on exhausted deck", direction);
            return Ok(SwipeOutcome {
                result: SwipeResult::NoMoreProfiles,
                cursor: deck.cursor(),
                remaining: 0,
                exhausted: true,
                notices: vec![deliver(self.notifier.as_ref(), Notice::no_more_profiles())],
            });
        };

        let mut notices = Vec::new();
        let result = match direction {
            SwipeDirection::Left => SwipeResult::Passed { candidate },
            SwipeDirection::Right => {
                let record = self
                    .registry
                    .write()
                    .await
                    .record_match(&candidate.id, self.clock.now())?;

                notices.push(deliver(
                    self.notifier.as_ref(),
                    Notice::connection_requested(&candidate),
                ));

                match record {
                    MatchRecord::Created(entry) => SwipeResult::Matched { candidate, entry },
                    MatchRecord::AlreadyMatched(entry) => {
                        SwipeResult::AlreadyMatched { candidate, entry }
                    }
                }
            }
        };

        // Advance before the transition so a dropped caller cannot leave the
        // deck half-swiped; the held lock hides the new head until it settles.
        let cursor = deck.advance();
        if !self.transition.is_zero() {
            tokio::time::sleep(self.transition).await;
        }

        tracing::info!(
            "Swiped {:?} at position {} ({} remaining)",
            direction,
            cursor - 1,
            deck.remaining()
        );

        Ok(SwipeOutcome {
            result,
            cursor,
            remaining: deck.remaining(),
            exhausted: deck.is_exhausted(),
            notices,
        })
    }

    /// Candidate on top of the deck, `None` once exhausted
    pub async fn current(&self) -> Option<Candidate> {
        self.deck.lock().await.current().cloned()
    }

    pub async fn cursor(&self) -> usize {
        self.deck.lock().await.cursor()
    }

    pub async fn remaining(&self) -> usize {
        self.deck.lock().await.remaining()
    }

    pub fn registry(&self) -> &Arc<RwLock<MatchRegistry>> {
        &self.registry
    }
}
