//! Company structure lookup endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::organization::{Area, Status, Sucursal, TipoEquipo},
    AppState,
};

/// List all branches
#[utoipa::path(
    get,
    path = "/sucursales",
    tag = "organizacion",
    responses(
        (status = 200, description = "Branch list", body = Vec<Sucursal>)
    )
)]
pub async fn list_sucursales(State(state): State<AppState>) -> AppResult<Json<Vec<Sucursal>>> {
    let sucursales = state.services.organizacion.sucursales().await?;
    Ok(Json(sucursales))
}

/// List all areas
#[utoipa::path(
    get,
    path = "/areas",
    tag = "organizacion",
    responses(
        (status = 200, description = "Area list", body = Vec<Area>)
    )
)]
pub async fn list_areas(State(state): State<AppState>) -> AppResult<Json<Vec<Area>>> {
    let areas = state.services.organizacion.areas().await?;
    Ok(Json(areas))
}

/// List equipment types
#[utoipa::path(
    get,
    path = "/tipos-equipo",
    tag = "organizacion",
    responses(
        (status = 200, description = "Equipment type list", body = Vec<TipoEquipo>)
    )
)]
pub async fn list_tipos_equipo(State(state): State<AppState>) -> AppResult<Json<Vec<TipoEquipo>>> {
    let tipos = state.services.organizacion.tipos_equipo().await?;
    Ok(Json(tipos))
}

/// List the status catalog
#[utoipa::path(
    get,
    path = "/status",
    tag = "organizacion",
    responses(
        (status = 200, description = "Status list", body = Vec<Status>)
    )
)]
pub async fn list_status(State(state): State<AppState>) -> AppResult<Json<Vec<Status>>> {
    let statuses = state.services.organizacion.statuses().await?;
    Ok(Json(statuses))
}
