/// Device registration API routes
use super::{decode_json, required_field};
use crate::{error::Result, state::AppState};
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceRequest {
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceResponse {
    pub device_id: String,
    pub created: bool,
}

/// POST /devices - Register a device
///
/// 201 when the device is new, 200 when it was already registered.
pub async fn register_device(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterDeviceResponse>)> {
    let request: RegisterDeviceRequest = decode_json(&body)?;
    let device_id = required_field(request.device_id.as_deref(), "deviceId")?;

    let created = app_state.store.register_device(device_id).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(RegisterDeviceResponse {
            device_id: device_id.to_string(),
            created,
        }),
    ))
}
