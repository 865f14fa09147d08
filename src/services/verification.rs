use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::RequestCodeRequest;
use crate::services::session_store::{SessionKey, SessionStore};

pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Verification request not found or expired")]
    UnknownToken,

    #[error("Code must be 6 digits")]
    MalformedCode,

    #[error("Code does not match")]
    CodeMismatch,
}

/// Handle returned by the first verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    pub token: Uuid,
    pub email: String,
    pub event_code: String,
    /// The issued code, exposed only by verifiers configured to reveal it
    pub dev_code: Option<String>,
}

/// Proof that the user is registered for the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedAttendance {
    pub email: String,
    #[serde(rename = "eventCode")]
    pub event_code: String,
    #[serde(rename = "verifiedAt")]
    pub verified_at: DateTime<Utc>,
}

/// Two-step event attendance check: request a one-time code, then confirm it
pub trait EventVerifier: Send + Sync {
    fn request_code(&self, event_code: &str, email: &str) -> Result<PendingVerification, VerificationError>;

    fn confirm_code(&self, token: &Uuid, code: &str) -> Result<VerifiedAttendance, VerificationError>;
}

#[derive(Debug, Clone)]
struct IssuedCode {
    email: String,
    event_code: String,
    code: String,
}

/// Verifier without a mail backend
///
/// Issues random codes and checks them for real; "sending" the code only
/// logs it and stores it in session storage next to the email.
pub struct SimulatedVerifier {
    issued: moka::sync::Cache<Uuid, IssuedCode>,
    session: Arc<SessionStore>,
    rng: Mutex<StdRng>,
    reveal_codes: bool,
}

impl SimulatedVerifier {
    pub fn new(session: Arc<SessionStore>, code_ttl: Duration, seed: Option<u64>, reveal_codes: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            issued: moka::sync::CacheBuilder::new(1024).time_to_live(code_ttl).build(),
            session,
            rng: Mutex::new(rng),
            reveal_codes,
        }
    }

    fn generate_code(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        format!("{:06}", rng.gen_range(0..1_000_000u32))
    }
}

impl EventVerifier for SimulatedVerifier {
    fn request_code(&self, event_code: &str, email: &str) -> Result<PendingVerification, VerificationError> {
        let request = RequestCodeRequest {
            event_code: event_code.trim().to_string(),
            email: email.trim().to_string(),
        };
        request.validate()?;

        let token = Uuid::new_v4();
        let code = self.generate_code();

        self.issued.insert(
            token,
            IssuedCode {
                email: request.email.clone(),
                event_code: request.event_code.clone(),
                code: code.clone(),
            },
        );
        self.session.set(SessionKey::VERIFICATION_EMAIL, request.email.clone());
        self.session.set(SessionKey::VERIFICATION_CODE, code.clone());

        tracing::info!("Sent verification code for event {} to {}", request.event_code, request.email);
        tracing::debug!("Verification code for {}: {}", token, code);

        Ok(PendingVerification {
            token,
            email: request.email,
            event_code: request.event_code,
            dev_code: self.reveal_codes.then_some(code),
        })
    }

    fn confirm_code(&self, token: &Uuid, code: &str) -> Result<VerifiedAttendance, VerificationError> {
        let code = code.trim();
        if code.len() != CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VerificationError::MalformedCode);
        }

        let issued = self.issued.get(token).ok_or(VerificationError::UnknownToken)?;
        if issued.code != code {
            tracing::info!("Wrong verification code for {}", issued.email);
            return Err(VerificationError::CodeMismatch);
        }

        self.issued.invalidate(token);
        self.session.remove(SessionKey::VERIFICATION_CODE);

        tracing::info!("Attendance confirmed for {} at {}", issued.email, issued.event_code);
        Ok(VerifiedAttendance {
            email: issued.email,
            event_code: issued.event_code,
            verified_at: Utc::now(),
        })
    }
}
