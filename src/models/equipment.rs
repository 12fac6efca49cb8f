//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipo {
    pub id: i32,
    /// Serial number, unique
    pub numero_serie: String,
    pub nombre_equipo: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub id_tipo_equipo: i32,
    /// Branch where the equipment currently sits
    pub id_sucursal_actual: i32,
    pub procesador: Option<String>,
    pub ram: Option<String>,
    pub disco_duro: Option<String>,
    pub sistema_operativo: Option<String>,
    /// MAC address, unique when present
    pub mac_address: Option<String>,
    pub otras_caracteristicas: Option<String>,
    pub fecha_compra: Option<NaiveDate>,
    /// Driven by the assignment/maintenance lifecycle while ASSIGNED or
    /// IN_MAINTENANCE
    pub id_status: i32,
    pub fecha_registro: Option<DateTime<Utc>>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
}

/// Equipment row enriched with joined names for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipoDetails {
    pub id: i32,
    pub numero_serie: String,
    pub nombre_equipo: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub id_tipo_equipo: i32,
    pub nombre_tipo_equipo: String,
    pub id_sucursal_actual: i32,
    pub nombre_sucursal_actual: String,
    pub id_empresa: Option<i32>,
    pub nombre_empresa: Option<String>,
    pub procesador: Option<String>,
    pub ram: Option<String>,
    pub disco_duro: Option<String>,
    pub sistema_operativo: Option<String>,
    pub mac_address: Option<String>,
    pub otras_caracteristicas: Option<String>,
    pub fecha_compra: Option<NaiveDate>,
    pub fecha_registro: Option<DateTime<Utc>>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
    pub id_status: i32,
    pub status_nombre: String,
}

/// Create equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipo {
    pub numero_serie: String,
    pub nombre_equipo: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub id_tipo_equipo: i32,
    pub id_sucursal_actual: i32,
    pub procesador: Option<String>,
    pub ram: Option<String>,
    pub disco_duro: Option<String>,
    pub sistema_operativo: Option<String>,
    pub mac_address: Option<String>,
    pub otras_caracteristicas: Option<String>,
    /// `YYYY-MM-DD`
    pub fecha_compra: Option<String>,
    pub id_status: Option<i32>,
}

/// Update equipment request (partial; absent fields untouched)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEquipo {
    pub numero_serie: Option<String>,
    pub nombre_equipo: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub id_tipo_equipo: Option<i32>,
    pub id_sucursal_actual: Option<i32>,
    pub procesador: Option<String>,
    pub ram: Option<String>,
    pub disco_duro: Option<String>,
    pub sistema_operativo: Option<String>,
    pub mac_address: Option<String>,
    pub otras_caracteristicas: Option<String>,
    /// `YYYY-MM-DD`
    pub fecha_compra: Option<String>,
    /// Rejected with 409 while the current status is ASSIGNED or
    /// IN_MAINTENANCE and the new value differs
    pub id_status: Option<i32>,
}
