// Service exports
pub mod profile_store;
pub mod session_store;
pub mod verification;

pub use profile_store::{ProfileError, ProfileStore, SessionProfileStore};
pub use session_store::{SessionKey, SessionStore, SessionStoreError};
pub use verification::{
    EventVerifier, PendingVerification, SimulatedVerifier, VerificationError, VerifiedAttendance,
    CODE_LENGTH,
};
