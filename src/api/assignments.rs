//! Assignment lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::assignment::{
        AsignacionDetails, AsignacionQuery, ComponenteDetails, CreateAsignacion,
        CreateAsignacionConComponentes, UpdateAsignacion, UpdateComponentes,
    },
    AppState,
};

/// Response after creating an assignment
#[derive(Serialize, ToSchema)]
pub struct AsignacionCreadaResponse {
    /// Assignment ID
    pub id: i32,
    /// Assigned equipment ID
    pub id_equipo: i32,
    /// Assigned IP record ID, if any
    pub id_ip: Option<i32>,
    /// Whether an IP was re-pointed to a resolved branch
    pub sucursal_ip_actualizada: bool,
    /// Status message
    pub message: String,
}

/// Response after creating an assignment with components
#[derive(Serialize, ToSchema)]
pub struct AsignacionConComponentesResponse {
    /// Assignment ID
    pub id: i32,
    /// Assigned equipment ID
    pub id_equipo: i32,
    /// How many components were attached
    pub componentes_asignados: usize,
    /// Status message
    pub message: String,
}

/// Response after updating an assignment
#[derive(Serialize, ToSchema)]
pub struct AsignacionActualizadaResponse {
    /// Status message
    pub message: String,
    /// IP whose status/branch was touched by the update, if any
    pub id_ip_actualizada: Option<i32>,
    /// Whether an IP's branch was re-resolved
    pub sucursal_ip_actualizada: bool,
}

/// Response after replacing the component set
#[derive(Serialize, ToSchema)]
pub struct ComponentesActualizadosResponse {
    /// Components finalized and freed
    pub componentes_removidos: usize,
    /// Components newly attached
    pub componentes_agregados: usize,
    /// Size of the resulting set
    pub total_componentes: usize,
    /// Status message
    pub message: String,
}

/// Generic message response
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// List assignments with optional filters
#[utoipa::path(
    get,
    path = "/asignaciones",
    tag = "asignaciones",
    params(AsignacionQuery),
    responses(
        (status = 200, description = "Assignment list", body = Vec<AsignacionDetails>)
    )
)]
pub async fn list_asignaciones(
    State(state): State<AppState>,
    Query(filter): Query<AsignacionQuery>,
) -> AppResult<Json<Vec<AsignacionDetails>>> {
    let asignaciones = state.services.asignaciones.list(&filter).await?;
    Ok(Json(asignaciones))
}

/// Get a single assignment with joined names
#[utoipa::path(
    get,
    path = "/asignaciones/{id}",
    tag = "asignaciones",
    params(
        ("id" = i32, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Assignment found", body = AsignacionDetails),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn get_asignacion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AsignacionDetails>> {
    let asignacion = state.services.asignaciones.get(id).await?;
    Ok(Json(asignacion))
}

/// Create an assignment
#[utoipa::path(
    post,
    path = "/asignaciones",
    tag = "asignaciones",
    request_body = CreateAsignacion,
    responses(
        (status = 201, description = "Assignment created", body = AsignacionCreadaResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Equipment or IP already has an active assignment")
    )
)]
pub async fn create_asignacion(
    State(state): State<AppState>,
    Json(request): Json<CreateAsignacion>,
) -> AppResult<(StatusCode, Json<AsignacionCreadaResponse>)> {
    let creada = state.services.asignaciones.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(AsignacionCreadaResponse {
            id: creada.id,
            id_equipo: creada.id_equipo,
            id_ip: creada.id_ip,
            sucursal_ip_actualizada: creada.id_ip.is_some(),
            message: "Asignación creada exitosamente.".to_string(),
        }),
    ))
}

/// Create an assignment and attach component equipment in one call
#[utoipa::path(
    post,
    path = "/asignaciones/con-componentes",
    tag = "asignaciones",
    request_body = CreateAsignacionConComponentes,
    responses(
        (status = 201, description = "Assignment and components created", body = AsignacionConComponentesResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Equipment, IP or a component already assigned")
    )
)]
pub async fn create_asignacion_con_componentes(
    State(state): State<AppState>,
    Json(request): Json<CreateAsignacionConComponentes>,
) -> AppResult<(StatusCode, Json<AsignacionConComponentesResponse>)> {
    let creada = state
        .services
        .asignaciones
        .create_con_componentes(request.asignacion, &request.componentes)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AsignacionConComponentesResponse {
            id: creada.id,
            id_equipo: creada.id_equipo,
            componentes_asignados: creada.componentes_asignados,
            message: "Asignación con componentes creada exitosamente.".to_string(),
        }),
    ))
}

/// Update an assignment (partial)
#[utoipa::path(
    put,
    path = "/asignaciones/{id}",
    tag = "asignaciones",
    params(
        ("id" = i32, Path, description = "Assignment ID")
    ),
    request_body = UpdateAsignacion,
    responses(
        (status = 200, description = "Assignment updated", body = AsignacionActualizadaResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "Finalized assignment cannot be modified or reactivated")
    )
)]
pub async fn update_asignacion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateAsignacion>,
) -> AppResult<Json<AsignacionActualizadaResponse>> {
    let resultado = state.services.asignaciones.update(id, request).await?;
    Ok(Json(AsignacionActualizadaResponse {
        message: "Asignación actualizada exitosamente.".to_string(),
        id_ip_actualizada: resultado.id_ip_actualizada,
        sucursal_ip_actualizada: resultado.sucursal_ip_actualizada,
    }))
}

/// Delete an assignment, reverting statuses if it was active
#[utoipa::path(
    delete,
    path = "/asignaciones/{id}",
    tag = "asignaciones",
    params(
        ("id" = i32, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Assignment deleted", body = MessageResponse),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn delete_asignacion(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.asignaciones.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Asignación eliminada exitosamente.".to_string(),
    }))
}

/// List the active components of an assignment's equipment
#[utoipa::path(
    get,
    path = "/asignaciones/{id}/componentes",
    tag = "asignaciones",
    params(
        ("id" = i32, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Active components", body = Vec<ComponenteDetails>),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn get_componentes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<ComponenteDetails>>> {
    let componentes = state.services.asignaciones.componentes(id).await?;
    Ok(Json(componentes))
}

/// Replace the component set of an assignment
#[utoipa::path(
    put,
    path = "/asignaciones/{id}/componentes",
    tag = "asignaciones",
    params(
        ("id" = i32, Path, description = "Assignment ID")
    ),
    request_body = UpdateComponentes,
    responses(
        (status = 200, description = "Component set updated", body = ComponentesActualizadosResponse),
        (status = 400, description = "A component does not exist"),
        (status = 404, description = "Assignment not found"),
        (status = 409, description = "A component is already assigned elsewhere")
    )
)]
pub async fn update_componentes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateComponentes>,
) -> AppResult<Json<ComponentesActualizadosResponse>> {
    let resultado = state
        .services
        .asignaciones
        .update_componentes(id, &request.componentes)
        .await?;
    Ok(Json(ComponentesActualizadosResponse {
        componentes_removidos: resultado.removidos,
        componentes_agregados: resultado.agregados,
        total_componentes: resultado.total,
        message: "Componentes actualizados exitosamente.".to_string(),
    }))
}
