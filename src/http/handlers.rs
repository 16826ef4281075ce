use super::state::AppState;
use crate::error::RoomError;
use crate::platform::{
    Archive, ArchiveList, CaptionsRequest, CaptionsStarted, ListOptions, Render, RenderList,
    RenderProperties, RenderRequest,
};
use crate::token::Role;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Label used for renders started on a session no room owns
const DEFAULT_RENDER_NAME: &str = "Experience Composer";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub api_key: String,
    pub session_id: String,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartArchiveRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArchivePendingResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCaptionsRequest {
    pub session_id: String,
    /// Moderator token; one is issued when absent
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopCaptionsRequest {
    #[serde(alias = "captionsId")]
    pub caption_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopCaptionsResponse {
    pub captions_id: String,
    pub status: u16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRenderRequest {
    pub session_id: String,
    /// Page to render; the configured default when absent
    pub url: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /room/:name
/// Resolve (or create) the session for a room and issue a token for it
pub async fn get_room(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RoomResponse>, RoomError> {
    info!("Resolving session for room: {}", name);

    let resolved = state.provisioner.resolve_session(&name).await?;
    let token = state
        .issuer
        .issue(&resolved.session_id, state.settings.room_role)?;

    Ok(Json(RoomResponse {
        api_key: state.issuer.api_key().to_string(),
        session_id: resolved.session_id,
        token,
    }))
}

/// GET /session
/// Shortcut for a room named "session"
pub async fn session_redirect() -> Redirect {
    Redirect::to("/room/session")
}

/// POST /archive/start
/// Start archiving a session, labelled with its room name
pub async fn start_archive(
    State(state): State<AppState>,
    payload: Result<Json<StartArchiveRequest>, JsonRejection>,
) -> Result<Json<Archive>, RoomError> {
    let Json(req) = payload?;
    let room = state
        .resolver
        .room_for_session(&req.session_id)
        .await?
        .unwrap_or_default();

    let name = (!room.is_empty()).then_some(room.as_str());
    let archive = state.platform.start_archive(&req.session_id, name).await?;

    info!("Archive {} started for room {:?}", archive.id, room);
    Ok(Json(archive))
}

/// POST /archive/:archive_id/stop
pub async fn stop_archive(
    State(state): State<AppState>,
    Path(archive_id): Path<String>,
) -> Result<Json<Archive>, RoomError> {
    Ok(Json(state.platform.stop_archive(&archive_id).await?))
}

/// GET /archive/:archive_id/view
/// Redirect to the recording once it is available
pub async fn view_archive(
    State(state): State<AppState>,
    Path(archive_id): Path<String>,
) -> Result<Response, RoomError> {
    let archive = state.platform.get_archive(&archive_id).await?;

    match archive.url.as_deref() {
        Some(url) if archive.is_available() => Ok(Redirect::to(url).into_response()),
        _ => Ok((
            StatusCode::ACCEPTED,
            Json(ArchivePendingResponse {
                status: archive.status,
                message: "Archiving Pending".to_string(),
            }),
        )
            .into_response()),
    }
}

/// GET /archive/:archive_id
pub async fn get_archive(
    State(state): State<AppState>,
    Path(archive_id): Path<String>,
) -> Result<Json<Archive>, RoomError> {
    Ok(Json(state.platform.get_archive(&archive_id).await?))
}

/// GET /archive?count=&offset=
pub async fn list_archives(
    State(state): State<AppState>,
    Query(options): Query<ListOptions>,
) -> Result<Json<ArchiveList>, RoomError> {
    Ok(Json(state.platform.list_archives(options).await?))
}

/// POST /captions/start
/// Start live captions; captions need a moderator token
pub async fn start_captions(
    State(state): State<AppState>,
    payload: Result<Json<StartCaptionsRequest>, JsonRejection>,
) -> Result<Json<CaptionsStarted>, RoomError> {
    let Json(req) = payload?;
    if req.session_id.is_empty() {
        return Err(RoomError::invalid("session id must not be empty"));
    }

    let token = match req.token {
        Some(token) if !token.is_empty() => token,
        _ => state.issuer.issue(&req.session_id, Role::Moderator)?,
    };

    let captions = &state.settings.captions;
    let request = CaptionsRequest {
        session_id: req.session_id,
        token,
        language_code: captions.language_code.clone(),
        max_duration: captions.max_duration_secs,
        partial_captions: captions.partial_captions,
    };

    Ok(Json(state.platform.start_captions(&request).await?))
}

/// POST /captions/stop
pub async fn stop_captions(
    State(state): State<AppState>,
    payload: Result<Json<StopCaptionsRequest>, JsonRejection>,
) -> Result<Json<StopCaptionsResponse>, RoomError> {
    let Json(req) = payload?;
    let status = state.platform.stop_captions(&req.caption_id).await?;

    Ok(Json(StopCaptionsResponse {
        captions_id: req.caption_id,
        status,
    }))
}

/// POST /render/start
/// Start an Experience Composer render publishing into the session
pub async fn start_render(
    State(state): State<AppState>,
    payload: Result<Json<StartRenderRequest>, JsonRejection>,
) -> Result<Json<Render>, RoomError> {
    let Json(req) = payload?;
    let name = state
        .resolver
        .room_for_session(&req.session_id)
        .await?
        .unwrap_or_else(|| DEFAULT_RENDER_NAME.to_string());
    let token = state.issuer.issue(&req.session_id, Role::Publisher)?;

    let render = &state.settings.render;
    let request = RenderRequest {
        session_id: req.session_id,
        token,
        url: req.url.unwrap_or_else(|| render.url.clone()),
        max_duration: render.max_duration_secs,
        resolution: render.resolution.clone(),
        properties: RenderProperties { name },
    };

    Ok(Json(state.platform.start_render(&request).await?))
}

/// POST /render/:render_id/stop
pub async fn stop_render(
    State(state): State<AppState>,
    Path(render_id): Path<String>,
) -> Result<StatusCode, RoomError> {
    let status = state.platform.stop_render(&render_id).await?;
    Ok(StatusCode::from_u16(status).unwrap_or(StatusCode::NO_CONTENT))
}

/// GET /render/:render_id
pub async fn get_render(
    State(state): State<AppState>,
    Path(render_id): Path<String>,
) -> Result<Json<Render>, RoomError> {
    Ok(Json(state.platform.get_render(&render_id).await?))
}

/// GET /render?count=&offset=
pub async fn list_renders(
    State(state): State<AppState>,
    Query(options): Query<ListOptions>,
) -> Result<Json<RenderList>, RoomError> {
    Ok(Json(state.platform.list_renders(options).await?))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
