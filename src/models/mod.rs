// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Candidate, ChatPhase, HackProfile, Match, MatchedCandidate, Message, Notice, NoticeKind,
    Profile, Sender, SwipeDirection, LOCAL_USER_ID,
};
pub use requests::{ConfirmCodeRequest, RequestCodeRequest, SendMessageRequest, SwipeRequest};
pub use responses::{
    ChatResponse, ConfirmCodeResponse, DiscoverResponse, ErrorResponse, HealthResponse,
    MatchesResponse, PageResponse, RequestCodeResponse, SavedResponse, SendMessageResponse,
};
