//! Employee management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::employee::{CreateEmpleado, Empleado, EmpleadoDetails, UpdateEmpleado},
    AppState,
};

/// Response after creating an employee
#[derive(Serialize, ToSchema)]
pub struct EmpleadoCreadoResponse {
    /// Employee ID
    pub id: i32,
    /// Status message
    pub message: String,
}

/// Generic message response
#[derive(Serialize, ToSchema)]
pub struct EmpleadoMessageResponse {
    pub message: String,
}

/// List all employees with joined names
#[utoipa::path(
    get,
    path = "/empleados",
    tag = "empleados",
    responses(
        (status = 200, description = "Employee list", body = Vec<EmpleadoDetails>)
    )
)]
pub async fn list_empleados(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EmpleadoDetails>>> {
    let empleados = state.services.empleados.list().await?;
    Ok(Json(empleados))
}

/// Get a single employee
#[utoipa::path(
    get,
    path = "/empleados/{id}",
    tag = "empleados",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Empleado),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_empleado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Empleado>> {
    let empleado = state.services.empleados.get(id).await?;
    Ok(Json(empleado))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/empleados",
    tag = "empleados",
    request_body = CreateEmpleado,
    responses(
        (status = 201, description = "Employee created", body = EmpleadoCreadoResponse),
        (status = 409, description = "Invalid branch or area reference")
    )
)]
pub async fn create_empleado(
    State(state): State<AppState>,
    Json(request): Json<CreateEmpleado>,
) -> AppResult<(StatusCode, Json<EmpleadoCreadoResponse>)> {
    let id = state.services.empleados.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(EmpleadoCreadoResponse {
            id,
            message: "Empleado creado exitosamente.".to_string(),
        }),
    ))
}

/// Update an employee (partial)
#[utoipa::path(
    put,
    path = "/empleados/{id}",
    tag = "empleados",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    request_body = UpdateEmpleado,
    responses(
        (status = 200, description = "Employee updated", body = EmpleadoMessageResponse),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_empleado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEmpleado>,
) -> AppResult<Json<EmpleadoMessageResponse>> {
    state.services.empleados.update(id, request).await?;
    Ok(Json(EmpleadoMessageResponse {
        message: "Empleado actualizado exitosamente.".to_string(),
    }))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/empleados/{id}",
    tag = "empleados",
    params(
        ("id" = i32, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = EmpleadoMessageResponse),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee referenced by assignments")
    )
)]
pub async fn delete_empleado(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EmpleadoMessageResponse>> {
    state.services.empleados.delete(id).await?;
    Ok(Json(EmpleadoMessageResponse {
        message: "Empleado eliminado exitosamente.".to_string(),
    }))
}
