//! Repository layer for database operations

pub mod assignments;
pub mod employees;
pub mod equipment;
pub mod ip_addresses;
pub mod organization;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipos: equipment::EquiposRepository,
    pub direcciones_ip: ip_addresses::DireccionesIpRepository,
    pub empleados: employees::EmpleadosRepository,
    pub asignaciones: assignments::AsignacionesRepository,
    pub organizacion: organization::OrganizacionRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipos: equipment::EquiposRepository::new(pool.clone()),
            direcciones_ip: ip_addresses::DireccionesIpRepository::new(pool.clone()),
            empleados: employees::EmpleadosRepository::new(pool.clone()),
            asignaciones: assignments::AsignacionesRepository::new(pool.clone()),
            organizacion: organization::OrganizacionRepository::new(pool.clone()),
            pool,
        }
    }
}
