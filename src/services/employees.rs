//! Employee management service

use crate::{
    error::AppResult,
    models::employee::{CreateEmpleado, Empleado, EmpleadoDetails, UpdateEmpleado},
    repository::Repository,
};

#[derive(Clone)]
pub struct EmpleadosService {
    repository: Repository,
}

impl EmpleadosService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EmpleadoDetails>> {
        self.repository.empleados.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Empleado> {
        self.repository.empleados.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateEmpleado) -> AppResult<i32> {
        self.repository.empleados.create(&data).await
    }

    pub async fn update(&self, id: i32, data: UpdateEmpleado) -> AppResult<()> {
        self.repository.empleados.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.empleados.delete(id).await
    }
}
