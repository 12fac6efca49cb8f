//! Company structure lookups service

use crate::{
    error::AppResult,
    models::organization::{Area, Status, Sucursal, TipoEquipo},
    repository::Repository,
};

#[derive(Clone)]
pub struct OrganizacionService {
    repository: Repository,
}

impl OrganizacionService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn sucursales(&self) -> AppResult<Vec<Sucursal>> {
        self.repository.organizacion.sucursales().await
    }

    pub async fn areas(&self) -> AppResult<Vec<Area>> {
        self.repository.organizacion.areas().await
    }

    pub async fn tipos_equipo(&self) -> AppResult<Vec<TipoEquipo>> {
        self.repository.organizacion.tipos_equipo().await
    }

    pub async fn statuses(&self) -> AppResult<Vec<Status>> {
        self.repository.organizacion.statuses().await
    }
}
