//! Video platform REST API
//!
//! Sessions, archives, live captions and Experience Composer renders are
//! owned by the platform. This module only forwards requests and decodes
//! responses; every call is authenticated with a project token.

pub mod client;
pub mod error;
pub mod messages;

pub use client::PlatformClient;
pub use error::PlatformError;
pub use messages::{
    Archive, ArchiveList, CaptionsRequest, CaptionsStarted, ListOptions, Render, RenderList,
    RenderProperties, RenderRequest,
};

/// How media flows between participants of a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaMode {
    /// Streams go through the platform's media servers. Required for
    /// archiving and captions.
    #[default]
    Routed,
    /// Clients attempt peer-to-peer connections
    Relayed,
}

impl MediaMode {
    /// Value of the `p2p.preference` form field
    pub fn p2p_preference(&self) -> &'static str {
        match self {
            MediaMode::Routed => "disabled",
            MediaMode::Relayed => "enabled",
        }
    }
}

/// External session creation
#[async_trait::async_trait]
pub trait SessionCreator: Send + Sync {
    /// Create a new platform session and return its id
    async fn create_session(&self, mode: MediaMode) -> Result<String, PlatformError>;
}
