//! IP address management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::ip_address::{CreateDireccionIp, DireccionIpDetails, UpdateDireccionIp},
    AppState,
};

/// Response after creating an IP row
#[derive(Serialize, ToSchema)]
pub struct IpCreadaResponse {
    /// IP record ID
    pub id: i32,
    /// Status message
    pub message: String,
}

/// Generic message response
#[derive(Serialize, ToSchema)]
pub struct IpMessageResponse {
    pub message: String,
}

/// List all IP addresses with joined names
#[utoipa::path(
    get,
    path = "/direcciones-ip",
    tag = "direcciones-ip",
    responses(
        (status = 200, description = "IP address list", body = Vec<DireccionIpDetails>)
    )
)]
pub async fn list_direcciones_ip(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DireccionIpDetails>>> {
    let direcciones = state.services.direcciones_ip.list().await?;
    Ok(Json(direcciones))
}

/// Get a single IP address
#[utoipa::path(
    get,
    path = "/direcciones-ip/{id}",
    tag = "direcciones-ip",
    params(
        ("id" = i32, Path, description = "IP record ID")
    ),
    responses(
        (status = 200, description = "IP address found", body = DireccionIpDetails),
        (status = 404, description = "IP address not found")
    )
)]
pub async fn get_direccion_ip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DireccionIpDetails>> {
    let direccion = state.services.direcciones_ip.get(id).await?;
    Ok(Json(direccion))
}

/// Register an IP address
#[utoipa::path(
    post,
    path = "/direcciones-ip",
    tag = "direcciones-ip",
    request_body = CreateDireccionIp,
    responses(
        (status = 201, description = "IP address created", body = IpCreadaResponse),
        (status = 409, description = "Duplicate IP address")
    )
)]
pub async fn create_direccion_ip(
    State(state): State<AppState>,
    Json(request): Json<CreateDireccionIp>,
) -> AppResult<(StatusCode, Json<IpCreadaResponse>)> {
    let id = state.services.direcciones_ip.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(IpCreadaResponse {
            id,
            message: "Dirección IP creada exitosamente.".to_string(),
        }),
    ))
}

/// Update an IP address (partial)
#[utoipa::path(
    put,
    path = "/direcciones-ip/{id}",
    tag = "direcciones-ip",
    params(
        ("id" = i32, Path, description = "IP record ID")
    ),
    request_body = UpdateDireccionIp,
    responses(
        (status = 200, description = "IP address updated", body = IpMessageResponse),
        (status = 404, description = "IP address not found"),
        (status = 409, description = "Duplicate IP address")
    )
)]
pub async fn update_direccion_ip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateDireccionIp>,
) -> AppResult<Json<IpMessageResponse>> {
    state.services.direcciones_ip.update(id, request).await?;
    Ok(Json(IpMessageResponse {
        message: "Dirección IP actualizada exitosamente.".to_string(),
    }))
}

/// Delete an IP address
#[utoipa::path(
    delete,
    path = "/direcciones-ip/{id}",
    tag = "direcciones-ip",
    params(
        ("id" = i32, Path, description = "IP record ID")
    ),
    responses(
        (status = 200, description = "IP address deleted", body = IpMessageResponse),
        (status = 404, description = "IP address not found"),
        (status = 409, description = "IP referenced by assignments")
    )
)]
pub async fn delete_direccion_ip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<IpMessageResponse>> {
    state.services.direcciones_ip.delete(id).await?;
    Ok(Json(IpMessageResponse {
        message: "Dirección IP eliminada exitosamente.".to_string(),
    }))
}
