use crate::error::RoomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Participant role embedded in a client token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can only subscribe to streams
    Subscriber,
    /// Can publish and subscribe (platform default)
    #[default]
    #[serde(alias = "default")]
    Publisher,
    /// Publisher that can also force-disconnect and mute others.
    /// Live captions require a moderator token.
    Moderator,
    /// Can publish but not subscribe
    #[serde(rename = "publisheronly")]
    PublisherOnly,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Subscriber => "subscriber",
            Role::Publisher => "publisher",
            Role::Moderator => "moderator",
            Role::PublisherOnly => "publisheronly",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "publisher" => Ok(Role::Publisher),
            "subscriber" => Ok(Role::Subscriber),
            "moderator" => Ok(Role::Moderator),
            "publisheronly" | "publisher_only" => Ok(Role::PublisherOnly),
            other => Err(RoomError::invalid(format!("unknown role '{}'", other))),
        }
    }
}
