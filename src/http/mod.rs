//! HTTP API in front of the room directory and the platform
//!
//! - GET /room/:name - Session id and token for a room
//! - GET /session - Redirect to /room/session
//! - POST /archive/start, POST /archive/:id/stop - Archive control
//! - GET /archive, GET /archive/:id, GET /archive/:id/view - Archive queries
//! - POST /captions/start, POST /captions/stop - Live captions
//! - POST /render/start, POST /render/:id/stop, GET /render, GET /render/:id - Experience Composer
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ArchivePendingResponse, RoomResponse, StopCaptionsResponse};
pub use routes::create_router;
pub use state::{ApiSettings, AppState};
