//! HackConnect - swipe, match and chat engine for hackathon attendees
//!
//! This library holds the session logic behind the HackConnect app: a
//! one-pass candidate deck, the match registry fed by right swipes, and
//! per-match chats with a simulated counterpart. Everything is in-memory
//! and scoped to a single user session.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{HackSession, SeedData, SessionOptions, SwipeOutcome, SwipeResult};
pub use crate::models::{Candidate, Match, MatchedCandidate, Message, Profile, Sender, SwipeDirection};
