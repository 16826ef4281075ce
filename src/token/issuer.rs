use super::Role;
use crate::error::RoomError;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Longest lifetime the platform accepts for a client token
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Longest connection data string the platform accepts
const MAX_CONNECTION_DATA_LEN: usize = 1000;

/// Claims of a client token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Project API key
    pub iss: String,
    /// Issuer type, always "project"
    pub ist: String,
    pub iat: i64,
    pub exp: i64,
    pub nonce: String,
    pub role: Role,
    pub scope: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_data: Option<String>,
    /// Space-separated layout classes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_layout_class_list: Option<String>,
}

/// Claims of a project (REST) token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectClaims {
    pub iss: String,
    pub ist: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Per-token options
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    pub role: Role,
    /// Overrides the issuer's default lifetime
    pub expire_in: Option<Duration>,
    /// Opaque data handed to other participants on connect
    pub data: Option<String>,
    pub initial_layout_class_list: Vec<String>,
}

impl TokenOptions {
    pub fn with_role(role: Role) -> Self {
        Self {
            role,
            ..Default::default()
        }
    }
}

/// Signs tokens with the project's API key and secret
#[derive(Clone)]
pub struct TokenIssuer {
    api_key: String,
    key: EncodingKey,
    token_lifetime: Duration,
    project_token_ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("api_key", &self.api_key)
            .field("token_lifetime", &self.token_lifetime)
            .field("project_token_ttl", &self.project_token_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create an issuer with a 24h client token lifetime and a 5 minute
    /// project token lifetime.
    ///
    /// Both credentials are required; callers treat an error here as fatal.
    pub fn new(api_key: impl Into<String>, secret: &str) -> Result<Self, RoomError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() || secret.trim().is_empty() {
            return Err(RoomError::invalid("API key and secret are required"));
        }

        Ok(Self {
            api_key,
            key: EncodingKey::from_secret(secret.as_bytes()),
            token_lifetime: Duration::from_secs(24 * 60 * 60),
            project_token_ttl: Duration::from_secs(300),
        })
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn with_project_token_ttl(mut self, ttl: Duration) -> Self {
        self.project_token_ttl = ttl;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Issue a client token for `session_id` with default options and `role`
    pub fn issue(&self, session_id: &str, role: Role) -> Result<String, RoomError> {
        self.issue_token(session_id, &TokenOptions::with_role(role))
    }

    /// Issue a client token scoped to `session_id`
    pub fn issue_token(&self, session_id: &str, options: &TokenOptions) -> Result<String, RoomError> {
        if session_id.is_empty() {
            return Err(RoomError::invalid("session id must not be empty"));
        }

        let lifetime = options.expire_in.unwrap_or(self.token_lifetime);
        if lifetime.is_zero() || lifetime > MAX_TOKEN_LIFETIME {
            return Err(RoomError::invalid(format!(
                "token lifetime must be between 1 second and 30 days, got {}s",
                lifetime.as_secs()
            )));
        }

        if let Some(data) = &options.data {
            if data.chars().count() > MAX_CONNECTION_DATA_LEN {
                return Err(RoomError::invalid(format!(
                    "connection data exceeds {} characters",
                    MAX_CONNECTION_DATA_LEN
                )));
            }
        }

        let now = Utc::now().timestamp();
        let layout = options.initial_layout_class_list.join(" ");
        let claims = TokenClaims {
            iss: self.api_key.clone(),
            ist: "project".to_string(),
            iat: now,
            exp: now + lifetime.as_secs() as i64,
            nonce: uuid::Uuid::new_v4().to_string(),
            role: options.role,
            scope: "session.connect".to_string(),
            session_id: session_id.to_string(),
            connection_data: options.data.clone(),
            initial_layout_class_list: (!layout.is_empty()).then_some(layout),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.key)?)
    }

    /// Short-lived token for the `X-OPENTOK-AUTH` header of REST calls
    pub fn project_token(&self) -> Result<String, RoomError> {
        let now = Utc::now().timestamp();
        let claims = ProjectClaims {
            iss: self.api_key.clone(),
            ist: "project".to_string(),
            iat: now,
            exp: now + self.project_token_ttl.as_secs() as i64,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const SECRET: &str = "test-secret";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("12345", SECRET).unwrap()
    }

    fn claims(token: &str) -> TokenClaims {
        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims
    }

    #[test]
    fn test_missing_credentials_rejected() {
        assert!(matches!(
            TokenIssuer::new("", SECRET),
            Err(RoomError::InvalidArgument(_))
        ));
        assert!(matches!(
            TokenIssuer::new("12345", "  "),
            Err(RoomError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_token_is_scoped_to_session_and_role() {
        let token = issuer().issue("sid-001", Role::Moderator).unwrap();
        let claims = claims(&token);

        assert_eq!(claims.session_id, "sid-001");
        assert_eq!(claims.role, Role::Moderator);
        assert_eq!(claims.iss, "12345");
        assert_eq!(claims.ist, "project");
        assert_eq!(claims.scope, "session.connect");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_roles_produce_distinct_tokens() {
        let issuer = issuer();
        let moderator = issuer.issue("sid-001", Role::Moderator).unwrap();
        let publisher = issuer.issue("sid-001", Role::Publisher).unwrap();

        assert_ne!(moderator, publisher);
        assert_eq!(claims(&moderator).session_id, claims(&publisher).session_id);
        assert_ne!(claims(&moderator).role, claims(&publisher).role);
    }

    #[test]
    fn test_empty_session_rejected() {
        assert!(matches!(
            issuer().issue("", Role::Publisher),
            Err(RoomError::InvalidArgument(_))
        ));
        assert_eq!(claims(&issuer().issue(" ", Role::Publisher).unwrap()).session_id, " ");
    }

    #[test]
    fn test_custom_expiry_and_data() {
        let options = TokenOptions {
            role: Role::Subscriber,
            expire_in: Some(Duration::from_secs(3600)),
            data: Some("name=Johnny".to_string()),
            initial_layout_class_list: vec!["focus".to_string(), "full".to_string()],
        };

        let claims = claims(&issuer().issue_token("sid-001", &options).unwrap());

        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.connection_data.as_deref(), Some("name=Johnny"));
        assert_eq!(claims.initial_layout_class_list.as_deref(), Some("focus full"));
    }

    #[test]
    fn test_expiry_bounds() {
        let too_long = TokenOptions {
            expire_in: Some(MAX_TOKEN_LIFETIME + Duration::from_secs(1)),
            ..Default::default()
        };
        let zero = TokenOptions {
            expire_in: Some(Duration::ZERO),
            ..Default::default()
        };

        assert!(issuer().issue_token("sid-001", &too_long).is_err());
        assert!(issuer().issue_token("sid-001", &zero).is_err());
    }

    #[test]
    fn test_connection_data_limit() {
        let options = TokenOptions {
            data: Some("x".repeat(MAX_CONNECTION_DATA_LEN + 1)),
            ..Default::default()
        };

        assert!(matches!(
            issuer().issue_token("sid-001", &options),
            Err(RoomError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_project_token_claims() {
        let issuer = issuer().with_project_token_ttl(Duration::from_secs(60));
        let token = issuer.project_token().unwrap();

        let claims = decode::<ProjectClaims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.iss, "12345");
        assert_eq!(claims.ist, "project");
        assert_eq!(claims.exp - claims.iat, 60);
    }
}
