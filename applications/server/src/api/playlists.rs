/// Playlist API routes
use super::{decode_json, is_absolute_url, required_field};
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use sciplayer_storage::Playlist;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AttachPlaylistRequest {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachPlaylistResponse {
    pub device_id: String,
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistResponse {
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Playlist> for PlaylistResponse {
    fn from(playlist: Playlist) -> Self {
        Self {
            name: playlist.name,
            url: playlist.url,
            created_at: playlist.created_at,
        }
    }
}

/// POST /devices/:id/playlists - Attach a playlist to a device
pub async fn attach_playlist(
    Path(device_id): Path<String>,
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AttachPlaylistResponse>)> {
    let request: AttachPlaylistRequest = decode_json(&body)?;

    let name = required_field(request.name.as_deref(), "name")?;
    let url = required_field(request.url.as_deref(), "url")?;

    if !is_absolute_url(url) {
        return Err(ServerError::BadRequest(
            "url must be a valid absolute URL".to_string(),
        ));
    }

    let created_at = app_state
        .store
        .attach_playlist(&device_id, name, url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AttachPlaylistResponse {
            device_id,
            name: name.to_string(),
            url: url.to_string(),
            created_at,
        }),
    ))
}

/// GET /devices/:id/playlists - List a device's playlists, oldest first
pub async fn list_playlists(
    Path(device_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PlaylistResponse>>> {
    let playlists = app_state.store.list_playlists(&device_id).await?;

    Ok(Json(
        playlists.into_iter().map(PlaylistResponse::from).collect(),
    ))
}
