use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

use super::{created, Created};
use crate::{
    api::{
        dto::{DeviceDto, DevicePayload},
        errors::AppError,
    },
    bo::DeviceBo,
};

#[utoipa::path(
    post,
    path = "/dispositivos",
    request_body = DevicePayload,
    responses(
        (status = 201, description = "Device created", body = DeviceDto,
            headers(("Location" = String, description = "URL of the new device"))),
        (status = 400, description = "Empty name or type"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn create_device(
    State(pool): State<PgPool>,
    Json(payload): Json<DevicePayload>,
) -> Result<Created<DeviceDto>, AppError> {
    let device = DeviceBo::new(&pool).insert(payload.into()).await?;
    Ok(created(format!("/dispositivos/{}", device.id), device.into()))
}

#[utoipa::path(
    put,
    path = "/dispositivos/{id}",
    params(("id" = i32, Path, description = "Device id")),
    request_body = DevicePayload,
    responses(
        (status = 200, description = "Device updated", body = DeviceDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "No such device"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn update_device(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
    Json(payload): Json<DevicePayload>,
) -> Result<Json<DeviceDto>, AppError> {
    let device = DeviceBo::new(&pool).update(id, payload.into()).await?;
    Ok(Json(device.into()))
}

#[utoipa::path(
    delete,
    path = "/dispositivos/{id}",
    params(("id" = i32, Path, description = "Device id")),
    responses(
        (status = 200, description = "Device deleted"),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such device"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn delete_device(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    DeviceBo::new(&pool).delete(id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/dispositivos",
    responses(
        (status = 200, description = "All devices", body = Vec<DeviceDto>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn list_devices(State(pool): State<PgPool>) -> Result<Json<Vec<DeviceDto>>, AppError> {
    let devices = DeviceBo::new(&pool).list_all().await?;
    Ok(Json(devices.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/dispositivos/{id}",
    params(("id" = i32, Path, description = "Device id")),
    responses(
        (status = 200, description = "The device, or null when absent", body = Option<DeviceDto>),
        (status = 400, description = "Non-positive id"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn get_device(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<Option<DeviceDto>>, AppError> {
    let device = DeviceBo::new(&pool).find_by_id(id).await?;
    Ok(Json(device.map(Into::into)))
}

/// Set the device status to `Ativo`.
#[utoipa::path(
    put,
    path = "/dispositivos/{id}/ativar",
    params(("id" = i32, Path, description = "Device id")),
    responses(
        (status = 200, description = "Device activated", body = DeviceDto),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such device"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn activate_device(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<DeviceDto>, AppError> {
    let device = DeviceBo::new(&pool).activate(id).await?;
    Ok(Json(device.into()))
}

/// Set the device status to `Inativo`.
#[utoipa::path(
    put,
    path = "/dispositivos/{id}/desativar",
    params(("id" = i32, Path, description = "Device id")),
    responses(
        (status = 200, description = "Device deactivated", body = DeviceDto),
        (status = 400, description = "Non-positive id"),
        (status = 404, description = "No such device"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dispositivos"
)]
pub async fn deactivate_device(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Json<DeviceDto>, AppError> {
    let device = DeviceBo::new(&pool).deactivate(id).await?;
    Ok(Json(device.into()))
}
