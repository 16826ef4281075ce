use serde::{Deserialize, Serialize};

/// One element of the create-session response array
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedSession {
    pub session_id: String,
    #[serde(default)]
    pub create_dt: Option<String>,
    #[serde(default)]
    pub media_server_url: Option<String>,
}

/// Paging for list endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

// ============================================================================
// Archives
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartArchiveRequest<'a> {
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

/// Archive as reported by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archive {
    pub id: String,
    /// started, stopped, uploaded, available, expired, failed, ...
    pub status: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub size: Option<u64>,
    /// Seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub output_mode: Option<String>,
    #[serde(default)]
    pub has_audio: Option<bool>,
    #[serde(default)]
    pub has_video: Option<bool>,
    #[serde(default)]
    pub reason: Option<String>,
    /// Download URL, only set once the archive is available
    #[serde(default)]
    pub url: Option<String>,
}

impl Archive {
    pub fn is_available(&self) -> bool {
        self.status == "available"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveList {
    pub count: u64,
    pub items: Vec<Archive>,
}

// ============================================================================
// Captions
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsRequest {
    pub session_id: String,
    /// Moderator token for the session
    pub token: String,
    pub language_code: String,
    /// Seconds
    pub max_duration: u64,
    pub partial_captions: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionsStarted {
    pub captions_id: String,
}

// ============================================================================
// Experience Composer renders
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub session_id: String,
    pub token: String,
    /// Page the composer loads and publishes into the session
    pub url: String,
    /// Seconds
    pub max_duration: u64,
    /// e.g. "1280x720"
    pub resolution: String,
    pub properties: RenderProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderProperties {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Render {
    pub id: String,
    #[serde(default)]
    pub session_id: Option<String>,
    /// starting, started, stopped, failed
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub stream_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderList {
    pub count: u64,
    pub items: Vec<Render>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_deserialization() {
        let json = r#"{
            "id": "b40ef09b-3811-4726-b508-e41a0f96c68f",
            "status": "available",
            "name": "lobby",
            "sessionId": "sid-001",
            "projectId": 12345,
            "createdAt": 1384221730000,
            "size": 247748791,
            "duration": 328,
            "outputMode": "composed",
            "hasAudio": true,
            "hasVideo": true,
            "reason": "",
            "url": "https://example.com/archive.mp4"
        }"#;

        let archive: Archive = serde_json::from_str(json).unwrap();
        assert!(archive.is_available());
        assert_eq!(archive.name.as_deref(), Some("lobby"));
        assert_eq!(archive.session_id.as_deref(), Some("sid-001"));
        assert_eq!(archive.duration, Some(328));
        assert_eq!(archive.url.as_deref(), Some("https://example.com/archive.mp4"));
    }

    #[test]
    fn test_started_archive_has_no_url() {
        let json = r#"{"id": "a-1", "status": "started", "url": null}"#;

        let archive: Archive = serde_json::from_str(json).unwrap();
        assert!(!archive.is_available());
        assert_eq!(archive.url, None);
    }

    #[test]
    fn test_start_archive_request_omits_missing_name() {
        let with_name = StartArchiveRequest {
            session_id: "sid-001",
            name: Some("lobby"),
        };
        let without_name = StartArchiveRequest {
            session_id: "sid-001",
            name: None,
        };

        assert_eq!(
            serde_json::to_value(&with_name).unwrap(),
            serde_json::json!({"sessionId": "sid-001", "name": "lobby"})
        );
        assert_eq!(
            serde_json::to_value(&without_name).unwrap(),
            serde_json::json!({"sessionId": "sid-001"})
        );
    }

    #[test]
    fn test_captions_request_field_names() {
        let request = CaptionsRequest {
            session_id: "sid-001".to_string(),
            token: "tok".to_string(),
            language_code: "en-US".to_string(),
            max_duration: 36000,
            partial_captions: true,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"languageCode\":\"en-US\""));
        assert!(json.contains("\"maxDuration\":36000"));
        assert!(json.contains("\"partialCaptions\":true"));
    }
}
