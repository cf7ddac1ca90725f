//! Application services for session lifecycle orchestration.

mod sign_in;

pub use sign_in::{SessionError, SessionResult, SessionService};
