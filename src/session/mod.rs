//! Room resolution
//!
//! - `SessionProvisioner` - room name → session id, creating sessions on first use
//! - `RoomResolver` - session id → room name, for labelling recordings

mod provisioner;
mod resolver;

pub use provisioner::{ResolvedSession, SessionProvisioner};
pub use resolver::RoomResolver;
