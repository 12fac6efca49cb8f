//! Employee model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Employee record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Empleado {
    pub id: i32,
    pub nombres: String,
    pub apellidos: String,
    /// Home branch, used to resolve the branch of an assigned IP
    pub id_sucursal: Option<i32>,
    pub id_area: Option<i32>,
    pub cargo: Option<String>,
    pub fecha_registro: Option<DateTime<Utc>>,
}

/// Employee enriched with joined names for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmpleadoDetails {
    pub id: i32,
    pub nombres: String,
    pub apellidos: String,
    pub id_sucursal: Option<i32>,
    pub sucursal_nombre: Option<String>,
    pub id_area: Option<i32>,
    pub area_nombre: Option<String>,
    pub cargo: Option<String>,
    pub fecha_registro: Option<DateTime<Utc>>,
}

/// Create employee request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmpleado {
    pub nombres: String,
    pub apellidos: String,
    pub id_sucursal: Option<i32>,
    pub id_area: Option<i32>,
    pub cargo: Option<String>,
}

/// Update employee request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmpleado {
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_sucursal: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_area: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub cargo: Option<Option<String>>,
}
