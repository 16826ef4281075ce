pub mod config;
pub mod directory;
pub mod error;
pub mod http;
pub mod platform;
pub mod session;
pub mod token;

pub use config::Config;
pub use directory::{DirectoryStore, FileStore, MemoryStore, RoomSessionEntry};
pub use error::RoomError;
pub use http::{create_router, AppState};
pub use platform::{MediaMode, PlatformClient, PlatformError, SessionCreator};
pub use session::{ResolvedSession, RoomResolver, SessionProvisioner};
pub use token::{Role, TokenIssuer, TokenOptions};
