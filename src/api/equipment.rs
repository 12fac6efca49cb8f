//! Equipment management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipo, EquipoDetails, UpdateEquipo},
    AppState,
};

/// Response after creating an equipment row
#[derive(Serialize, ToSchema)]
pub struct EquipoCreadoResponse {
    /// Equipment ID
    pub id: i32,
    /// Status message
    pub message: String,
}

/// Generic message response
#[derive(Serialize, ToSchema)]
pub struct EquipoMessageResponse {
    pub message: String,
}

/// List all equipment with joined names
#[utoipa::path(
    get,
    path = "/equipos",
    tag = "equipos",
    responses(
        (status = 200, description = "Equipment list", body = Vec<EquipoDetails>)
    )
)]
pub async fn list_equipos(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EquipoDetails>>> {
    let equipos = state.services.equipos.list().await?;
    Ok(Json(equipos))
}

/// Equipment eligible to be attached as components
#[utoipa::path(
    get,
    path = "/equipos/disponibles-componentes",
    tag = "equipos",
    responses(
        (status = 200, description = "Available component candidates", body = Vec<EquipoDetails>)
    )
)]
pub async fn list_disponibles_componentes(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EquipoDetails>>> {
    let equipos = state.services.equipos.disponibles_para_componentes().await?;
    Ok(Json(equipos))
}

/// Get a single equipment row with joined names
#[utoipa::path(
    get,
    path = "/equipos/{id}",
    tag = "equipos",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment found", body = EquipoDetails),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipoDetails>> {
    let equipo = state.services.equipos.get(id).await?;
    Ok(Json(equipo))
}

/// Create an equipment row
#[utoipa::path(
    post,
    path = "/equipos",
    tag = "equipos",
    request_body = CreateEquipo,
    responses(
        (status = 201, description = "Equipment created", body = EquipoCreadoResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Duplicate serial number or MAC address")
    )
)]
pub async fn create_equipo(
    State(state): State<AppState>,
    Json(request): Json<CreateEquipo>,
) -> AppResult<(StatusCode, Json<EquipoCreadoResponse>)> {
    let id = state.services.equipos.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(EquipoCreadoResponse {
            id,
            message: "Equipo creado exitosamente.".to_string(),
        }),
    ))
}

/// Update an equipment row (partial)
#[utoipa::path(
    put,
    path = "/equipos/{id}",
    tag = "equipos",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipo,
    responses(
        (status = 200, description = "Equipment updated", body = EquipoMessageResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Status owned by the assignment or maintenance lifecycle")
    )
)]
pub async fn update_equipo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEquipo>,
) -> AppResult<Json<EquipoMessageResponse>> {
    state.services.equipos.update(id, request).await?;
    Ok(Json(EquipoMessageResponse {
        message: "Equipo actualizado exitosamente.".to_string(),
    }))
}

/// Delete an equipment row
#[utoipa::path(
    delete,
    path = "/equipos/{id}",
    tag = "equipos",
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment deleted", body = EquipoMessageResponse),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Equipment has assignment history")
    )
)]
pub async fn delete_equipo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipoMessageResponse>> {
    state.services.equipos.delete(id).await?;
    Ok(Json(EquipoMessageResponse {
        message: "Equipo eliminado exitosamente.".to_string(),
    }))
}
