use super::messages::{
    Archive, ArchiveList, CaptionsRequest, CaptionsStarted, CreatedSession, ListOptions, Render,
    RenderList, RenderRequest, StartArchiveRequest,
};
use super::{MediaMode, PlatformError, SessionCreator};
use crate::token::TokenIssuer;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Header carrying the project token on every REST call
const AUTH_HEADER: &str = "X-OPENTOK-AUTH";

pub struct PlatformClient {
    http: reqwest::Client,
    api_url: String,
    issuer: Arc<TokenIssuer>,
}

impl PlatformClient {
    /// Create a client for the REST API at `api_url` (e.g. "https://api.opentok.com")
    pub fn new(
        api_url: &str,
        timeout: Duration,
        issuer: Arc<TokenIssuer>,
    ) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        info!("Platform API at {} (timeout {:?})", api_url, timeout);

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            issuer,
        })
    }

    fn project_url(&self, path: &str) -> String {
        format!(
            "{}/v2/project/{}{}",
            self.api_url,
            self.issuer.api_key(),
            path
        )
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, PlatformError> {
        let token = self
            .issuer
            .project_token()
            .map_err(|e| PlatformError::Signing(e.to_string()))?;

        Ok(request
            .header(AUTH_HEADER, token)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, PlatformError> {
        let response = self.authorized(request)?.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, PlatformError> {
        Ok(self.execute(request).await?.json::<T>().await?)
    }

    /// Start archiving `session_id`. `name` labels the archive.
    pub async fn start_archive(
        &self,
        session_id: &str,
        name: Option<&str>,
    ) -> Result<Archive, PlatformError> {
        info!("Starting archive for session {}", session_id);

        let body = StartArchiveRequest { session_id, name };
        self.execute_json(self.http.post(self.project_url("/archive")).json(&body))
            .await
    }

    pub async fn stop_archive(&self, archive_id: &str) -> Result<Archive, PlatformError> {
        info!("Stopping archive {}", archive_id);

        let url = self.project_url(&format!("/archive/{}/stop", archive_id));
        self.execute_json(self.http.post(url)).await
    }

    pub async fn get_archive(&self, archive_id: &str) -> Result<Archive, PlatformError> {
        debug!("Fetching archive {}", archive_id);

        let url = self.project_url(&format!("/archive/{}", archive_id));
        self.execute_json(self.http.get(url)).await
    }

    pub async fn list_archives(&self, options: ListOptions) -> Result<ArchiveList, PlatformError> {
        debug!("Listing archives {:?}", options);

        let request = self.http.get(self.project_url("/archive")).query(&options);
        self.execute_json(request).await
    }

    /// Start live captions. The request token must carry the moderator role.
    pub async fn start_captions(
        &self,
        request: &CaptionsRequest,
    ) -> Result<CaptionsStarted, PlatformError> {
        info!("Starting captions for session {}", request.session_id);

        self.execute_json(self.http.post(self.project_url("/captions")).json(request))
            .await
    }

    /// Stop live captions, returning the platform's status code
    pub async fn stop_captions(&self, captions_id: &str) -> Result<u16, PlatformError> {
        info!("Stopping captions {}", captions_id);

        let url = self.project_url(&format!("/captions/{}/stop", captions_id));
        let response = self.execute(self.http.post(url)).await?;
        Ok(response.status().as_u16())
    }

    pub async fn start_render(&self, request: &RenderRequest) -> Result<Render, PlatformError> {
        info!(
            "Starting render of {} into session {}",
            request.url, request.session_id
        );

        self.execute_json(self.http.post(self.project_url("/render")).json(request))
            .await
    }

    pub async fn stop_render(&self, render_id: &str) -> Result<u16, PlatformError> {
        info!("Stopping render {}", render_id);

        let url = self.project_url(&format!("/render/{}", render_id));
        let response = self.execute(self.http.delete(url)).await?;
        Ok(response.status().as_u16())
    }

    pub async fn get_render(&self, render_id: &str) -> Result<Render, PlatformError> {
        debug!("Fetching render {}", render_id);

        let url = self.project_url(&format!("/render/{}", render_id));
        self.execute_json(self.http.get(url)).await
    }

    pub async fn list_renders(&self, options: ListOptions) -> Result<RenderList, PlatformError> {
        debug!("Listing renders {:?}", options);

        let request = self.http.get(self.project_url("/render")).query(&options);
        self.execute_json(request).await
    }
}

#[async_trait::async_trait]
impl SessionCreator for PlatformClient {
    async fn create_session(&self, mode: MediaMode) -> Result<String, PlatformError> {
        let request = self
            .http
            .post(format!("{}/session/create", self.api_url))
            .form(&[
                ("archiveMode", "manual"),
                ("p2p.preference", mode.p2p_preference()),
            ]);

        let sessions: Vec<CreatedSession> = self.execute_json(request).await?;
        let session = sessions
            .into_iter()
            .next()
            .ok_or(PlatformError::MissingSession)?;

        debug!(
            "Platform created session {} (media server {:?})",
            session.session_id, session.media_server_url
        );

        Ok(session.session_id)
    }
}
