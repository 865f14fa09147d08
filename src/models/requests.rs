use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::SwipeDirection;

/// Step one of event verification
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    #[validate(length(min = 1, message = "Event code is required."))]
    #[serde(alias = "event_code", rename = "eventCode")]
    pub event_code: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
}

/// Step two of event verification
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmCodeRequest {
    pub token: uuid::Uuid,
    #[validate(length(equal = 6, message = "The code has 6 digits."))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub direction: SwipeDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}
