use crate::config::{CaptionsConfig, Config, RenderConfig};
use crate::directory::DirectoryStore;
use crate::platform::{PlatformClient, SessionCreator};
use crate::session::{RoomResolver, SessionProvisioner};
use crate::token::{Role, TokenIssuer};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Request defaults taken from the config file
#[derive(Debug, Clone, Default)]
pub struct ApiSettings {
    /// Role of tokens returned by `GET /room/:name`
    pub room_role: Role,
    pub captions: CaptionsConfig,
    pub render: RenderConfig,
}

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub provisioner: Arc<SessionProvisioner>,
    pub resolver: RoomResolver,
    pub issuer: Arc<TokenIssuer>,
    pub platform: Arc<PlatformClient>,
    pub settings: Arc<ApiSettings>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        issuer: Arc<TokenIssuer>,
        platform: Arc<PlatformClient>,
        settings: ApiSettings,
    ) -> Self {
        let creator: Arc<dyn SessionCreator> = platform.clone();

        Self {
            provisioner: Arc::new(SessionProvisioner::new(Arc::clone(&store), creator)),
            resolver: RoomResolver::new(store),
            issuer,
            platform,
            settings: Arc::new(settings),
        }
    }

    /// Build the issuer and platform client described by `cfg` around `store`
    pub fn from_config(cfg: &Config, store: Arc<dyn DirectoryStore>) -> Result<Self> {
        let issuer = TokenIssuer::new(&cfg.credentials.api_key, &cfg.credentials.secret)
            .context("Invalid project credentials")?
            .with_token_lifetime(Duration::from_secs(cfg.tokens.expire_secs))
            .with_project_token_ttl(Duration::from_secs(cfg.platform.project_token_ttl_secs));
        let issuer = Arc::new(issuer);

        let platform = PlatformClient::new(
            &cfg.platform.api_url,
            Duration::from_secs(cfg.platform.request_timeout_secs),
            Arc::clone(&issuer),
        )
        .context("Failed to build platform client")?;

        let settings = ApiSettings {
            room_role: cfg.tokens.room_role,
            captions: cfg.captions.clone(),
            render: cfg.render.clone(),
        };

        Ok(Self::new(store, issuer, Arc::new(platform), settings))
    }
}
