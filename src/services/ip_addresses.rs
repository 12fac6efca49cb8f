//! IP address management service

use crate::{
    error::AppResult,
    models::ip_address::{CreateDireccionIp, DireccionIpDetails, UpdateDireccionIp},
    repository::Repository,
    rules::STATUS_DISPONIBLE,
};

#[derive(Clone)]
pub struct DireccionesIpService {
    repository: Repository,
}

impl DireccionesIpService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<DireccionIpDetails>> {
        self.repository.direcciones_ip.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<DireccionIpDetails> {
        self.repository.direcciones_ip.get_details(id).await
    }

    pub async fn create(&self, data: CreateDireccionIp) -> AppResult<i32> {
        let id_status = data.id_status.unwrap_or(STATUS_DISPONIBLE);
        self.repository.direcciones_ip.create(&data, id_status).await
    }

    pub async fn update(&self, id: i32, data: UpdateDireccionIp) -> AppResult<()> {
        self.repository.direcciones_ip.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.direcciones_ip.delete(id).await
    }
}
