//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assignments, employees, equipment, health, ip_addresses, organization};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Activar API",
        version = "1.0.0",
        description = "IT Asset Inventory and Assignment Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Activar Team", email = "contact@activar.dev")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Asignaciones
        assignments::list_asignaciones,
        assignments::get_asignacion,
        assignments::create_asignacion,
        assignments::create_asignacion_con_componentes,
        assignments::update_asignacion,
        assignments::delete_asignacion,
        assignments::get_componentes,
        assignments::update_componentes,
        // Equipos
        equipment::list_equipos,
        equipment::list_disponibles_componentes,
        equipment::get_equipo,
        equipment::create_equipo,
        equipment::update_equipo,
        equipment::delete_equipo,
        // Direcciones IP
        ip_addresses::list_direcciones_ip,
        ip_addresses::get_direccion_ip,
        ip_addresses::create_direccion_ip,
        ip_addresses::update_direccion_ip,
        ip_addresses::delete_direccion_ip,
        // Empleados
        employees::list_empleados,
        employees::get_empleado,
        employees::create_empleado,
        employees::update_empleado,
        employees::delete_empleado,
        // Organización
        organization::list_sucursales,
        organization::list_areas,
        organization::list_tipos_equipo,
        organization::list_status,
    ),
    components(
        schemas(
            // Asignaciones
            crate::models::assignment::AsignacionDetails,
            crate::models::assignment::ComponenteDetails,
            crate::models::assignment::CreateAsignacion,
            crate::models::assignment::CreateAsignacionConComponentes,
            crate::models::assignment::UpdateAsignacion,
            crate::models::assignment::UpdateComponentes,
            assignments::AsignacionCreadaResponse,
            assignments::AsignacionConComponentesResponse,
            assignments::AsignacionActualizadaResponse,
            assignments::ComponentesActualizadosResponse,
            assignments::MessageResponse,
            // Equipos
            crate::models::equipment::Equipo,
            crate::models::equipment::EquipoDetails,
            crate::models::equipment::CreateEquipo,
            crate::models::equipment::UpdateEquipo,
            equipment::EquipoCreadoResponse,
            equipment::EquipoMessageResponse,
            // Direcciones IP
            crate::models::ip_address::DireccionIp,
            crate::models::ip_address::DireccionIpDetails,
            crate::models::ip_address::CreateDireccionIp,
            crate::models::ip_address::UpdateDireccionIp,
            ip_addresses::IpCreadaResponse,
            ip_addresses::IpMessageResponse,
            // Empleados
            crate::models::employee::Empleado,
            crate::models::employee::EmpleadoDetails,
            crate::models::employee::CreateEmpleado,
            crate::models::employee::UpdateEmpleado,
            employees::EmpleadoCreadoResponse,
            employees::EmpleadoMessageResponse,
            // Organización
            crate::models::organization::Sucursal,
            crate::models::organization::Area,
            crate::models::organization::TipoEquipo,
            crate::models::organization::Status,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "asignaciones", description = "Assignment lifecycle"),
        (name = "equipos", description = "Equipment inventory"),
        (name = "direcciones-ip", description = "IP address pool"),
        (name = "empleados", description = "Employee registry"),
        (name = "organizacion", description = "Company structure lookups")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
