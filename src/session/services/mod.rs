//! Application services for session handling.

mod session;

pub use session::{SessionService, SessionServiceError, SessionServiceResult};
