//! Equipment management service

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipo, EquipoDetails, UpdateEquipo},
    repository::Repository,
    rules::{STATUS_ASIGNADO, STATUS_DISPONIBLE, STATUS_EN_MANTENIMIENTO},
};

#[derive(Clone)]
pub struct EquiposService {
    repository: Repository,
}

impl EquiposService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<EquipoDetails>> {
        self.repository.equipos.list().await
    }

    pub async fn get(&self, id: i32) -> AppResult<EquipoDetails> {
        self.repository.equipos.get_details(id).await
    }

    /// Equipment eligible as component candidates: AVAILABLE, not a
    /// computer/laptop, and without an active assignment.
    pub async fn disponibles_para_componentes(&self) -> AppResult<Vec<EquipoDetails>> {
        self.repository.equipos.disponibles_para_componentes().await
    }

    pub async fn create(&self, data: CreateEquipo) -> AppResult<i32> {
        if data.numero_serie.trim().is_empty() {
            return Err(AppError::Validation(
                "numero_serie no puede estar vacío.".to_string(),
            ));
        }
        let fecha_compra = parse_fecha_compra(data.fecha_compra.as_deref())?;
        let id_status = data.id_status.unwrap_or(STATUS_DISPONIBLE);
        self.repository.equipos.create(&data, fecha_compra, id_status).await
    }

    /// Update equipment fields.
    ///
    /// The status of an ASSIGNED or IN_MAINTENANCE equipment is owned by the
    /// assignment/maintenance lifecycle: a direct change to a different
    /// value is rejected, re-sending the current value is allowed.
    pub async fn update(&self, id: i32, data: UpdateEquipo) -> AppResult<()> {
        if let Some(nuevo_status) = data.id_status {
            let actual = self.repository.equipos.get_by_id(id).await?;
            if actual.id_status == STATUS_ASIGNADO && nuevo_status != actual.id_status {
                return Err(AppError::Conflict(
                    "El equipo está actualmente \"Asignado\". Para liberarlo, debe finalizar su asignación activa.".to_string(),
                ));
            }
            if actual.id_status == STATUS_EN_MANTENIMIENTO && nuevo_status != actual.id_status {
                return Err(AppError::Conflict(
                    "El equipo está actualmente \"En Mantenimiento\". Para liberarlo, debe finalizar el registro de mantenimiento.".to_string(),
                ));
            }
        }

        if let Some(ref ns) = data.numero_serie {
            if ns.trim().is_empty() {
                return Err(AppError::Validation(
                    "numero_serie no puede estar vacío.".to_string(),
                ));
            }
        }
        let fecha_compra = parse_fecha_compra(data.fecha_compra.as_deref())?;
        self.repository.equipos.update(id, &data, fecha_compra).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipos.delete(id).await
    }
}

fn parse_fecha_compra(raw: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(s) => crate::rules::parse_fecha_dia(s).map(Some).ok_or_else(|| {
            AppError::Validation("Formato de fecha_compra debe ser YYYY-MM-DD.".to_string())
        }),
    }
}
