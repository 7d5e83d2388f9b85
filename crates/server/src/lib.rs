//! HTTP server for the meeting parser
//!
//! Two endpoints mirror the mobile client's flow: audio goes to
//! `/api/speech-to-text` for transcription, the transcript comes back to
//! `/api/parse-meeting` for structured extraction. A `/health` probe serves
//! deployment checks.

pub mod http;
pub mod state;
pub mod stt;

pub use http::create_router;
pub use state::AppState;
