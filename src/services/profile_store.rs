use std::sync::Arc;

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{HackProfile, Profile};
use crate::services::session_store::{SessionKey, SessionStore, SessionStoreError};
use crate::services::verification::VerifiedAttendance;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] SessionStoreError),

    #[error("Event attendance has not been verified")]
    NotVerified,
}

/// Owner of the local user's profile
pub trait ProfileStore: Send + Sync {
    fn get_profile(&self) -> Result<Option<Profile>, ProfileError>;

    /// Validate and store, replacing any previous profile
    fn set_profile(&self, profile: Profile) -> Result<(), ProfileError>;

    fn get_hack_profile(&self) -> Result<Option<HackProfile>, ProfileError>;

    /// Validate and store; only allowed once attendance is verified
    fn set_hack_profile(&self, profile: HackProfile) -> Result<(), ProfileError>;

    /// Unlock the hack profile for this session
    fn mark_verified(&self, attendance: &VerifiedAttendance) -> Result<(), ProfileError>;

    fn verified_attendance(&self) -> Result<Option<VerifiedAttendance>, ProfileError>;

    /// Forget both profiles and the verified attendance (logout)
    fn clear(&self) -> Result<(), ProfileError>;
}

/// Profile store over session storage, JSON-encoded under the profile keys
pub struct SessionProfileStore {
    session: Arc<SessionStore>,
}

impl SessionProfileStore {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

impl ProfileStore for SessionProfileStore {
    fn get_profile(&self) -> Result<Option<Profile>, ProfileError> {
        Ok(self.session.get_json(SessionKey::PROFILE)?)
    }

    fn set_profile(&self, profile: Profile) -> Result<(), ProfileError> {
        profile.validate()?;
        self.session.set_json(SessionKey::PROFILE, &profile)?;
        tracing::info!("Profile saved for {}", profile.name);
        Ok(())
    }

    fn get_hack_profile(&self) -> Result<Option<HackProfile>, ProfileError> {
        Ok(self.session.get_json(SessionKey::HACK_PROFILE)?)
    }

    fn set_hack_profile(&self, profile: HackProfile) -> Result<(), ProfileError> {
        if self.verified_attendance()?.is_none() {
            return Err(ProfileError::NotVerified);
        }
        profile.validate()?;
        self.session.set_json(SessionKey::HACK_PROFILE, &profile)?;
        tracing::info!("Hack profile saved ({})", profile.preferred_role);
        Ok(())
    }

    fn mark_verified(&self, attendance: &VerifiedAttendance) -> Result<(), ProfileError> {
        self.session.set_json(SessionKey::VERIFIED_EVENT, attendance)?;
        tracing::info!("Hack profile unlocked for event {}", attendance.event_code);
        Ok(())
    }

    fn verified_attendance(&self) -> Result<Option<VerifiedAttendance>, ProfileError> {
        Ok(self.session.get_json(SessionKey::VERIFIED_EVENT)?)
    }

    fn clear(&self) -> Result<(), ProfileError> {
        self.session.remove(SessionKey::PROFILE);
        self.session.remove(SessionKey::HACK_PROFILE);
        self.session.remove(SessionKey::VERIFIED_EVENT);
        tracing::info!("Profile cleared");
        Ok(())
    }
}
