use crate::token::{Role, MAX_TOKEN_LIFETIME};
use anyhow::{bail, Result};
use serde::Deserialize;

/// Environment variables holding the project credentials
pub const API_KEY_ENV: &str = "TOKBOX_API_KEY";
pub const SECRET_ENV: &str = "TOKBOX_SECRET";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub tokens: TokensConfig,
    #[serde(default)]
    pub captions: CaptionsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "opentok-rooms".to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub api_key: String,
    pub secret: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub project_token_ttl_secs: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.opentok.com".to_string(),
            request_timeout_secs: 10,
            project_token_ttl_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub backend: DirectoryBackend,
    /// JSON file used by the `file` backend
    pub path: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            backend: DirectoryBackend::Memory,
            path: "data/rooms.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    /// Role of tokens handed out by `GET /room/:name`
    pub room_role: Role,
    pub expire_secs: u64,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            room_role: Role::Publisher,
            expire_secs: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptionsConfig {
    pub language_code: String,
    pub max_duration_secs: u64,
    pub partial_captions: bool,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            max_duration_secs: 36000, // 10 hours
            partial_captions: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page loaded by Experience Composer when the request names none
    pub url: String,
    pub max_duration_secs: u64,
    pub resolution: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            url: "https://www.example.com".to_string(),
            max_duration_secs: 1800,
            resolution: "1280x720".to_string(),
        }
    }
}

impl Config {
    /// Load `path` (any format the config crate understands, optional),
    /// then `OPENTOK_ROOMS_*` variables (`__` separates sections), then the
    /// `TOKBOX_API_KEY` / `TOKBOX_SECRET` credentials.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("OPENTOK_ROOMS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("credentials.api_key", std::env::var(API_KEY_ENV).ok())?
            .set_override_option("credentials.secret", std::env::var(SECRET_ENV).ok())?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Credentials are required to sign anything, so their absence is fatal
    pub fn validate(&self) -> Result<()> {
        if self.credentials.api_key.trim().is_empty() || self.credentials.secret.trim().is_empty()
        {
            bail!(
                "Missing {} or {}. Find them in your video API account dashboard, \
                 then set them as environment variables or under [credentials] in the config file",
                API_KEY_ENV,
                SECRET_ENV
            );
        }

        if self.platform.request_timeout_secs == 0 {
            bail!("platform.request_timeout_secs must be greater than zero");
        }

        if self.platform.project_token_ttl_secs == 0 {
            bail!("platform.project_token_ttl_secs must be greater than zero");
        }

        let max_expire = MAX_TOKEN_LIFETIME.as_secs();
        if self.tokens.expire_secs == 0 || self.tokens.expire_secs > max_expire {
            bail!(
                "tokens.expire_secs must be between 1 and {} (30 days), got {}",
                max_expire,
                self.tokens.expire_secs
            );
        }

        Ok(())
    }
}
