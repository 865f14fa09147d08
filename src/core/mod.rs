// Core session exports
pub mod catalog;
pub mod chat;
pub mod clock;
pub mod deck;
pub mod notify;
pub mod registry;
pub mod responder;
pub mod session;
pub mod swipe;

pub use catalog::{Catalog, SeedData};
pub use chat::{ChatError, ChatHub, ChatSettings, ChatSnapshot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use deck::Deck;
pub use notify::{deliver, Notifier, NotifyError, TracingNotifier};
pub use registry::{MatchRecord, MatchRegistry, RegistryError};
pub use responder::{response_pool, PlannedReply, Responder, RESPONSE_POOL_SIZE};
pub use session::{HackSession, SessionOptions};
pub use swipe::{SwipeEngine, SwipeOutcome, SwipeResult};
