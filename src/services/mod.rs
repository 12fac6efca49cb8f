//! Business logic services

pub mod assignments;
pub mod employees;
pub mod equipment;
pub mod ip_addresses;
pub mod organization;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipos: equipment::EquiposService,
    pub direcciones_ip: ip_addresses::DireccionesIpService,
    pub empleados: employees::EmpleadosService,
    pub asignaciones: assignments::AsignacionesService,
    pub organizacion: organization::OrganizacionService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            equipos: equipment::EquiposService::new(repository.clone()),
            direcciones_ip: ip_addresses::DireccionesIpService::new(repository.clone()),
            empleados: employees::EmpleadosService::new(repository.clone()),
            asignaciones: assignments::AsignacionesService::new(repository.clone()),
            organizacion: organization::OrganizacionService::new(repository.clone()),
            repository,
        }
    }

    /// Round-trip to the database, for readiness probes
    pub async fn ping_database(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await?;
        Ok(())
    }
}
