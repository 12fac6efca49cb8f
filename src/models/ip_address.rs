//! IP address model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// IP address record.
///
/// `id_sucursal` tracks the branch of the last known assignment; it is kept
/// when an assignment ends and only changes when the IP is assigned
/// somewhere else.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DireccionIp {
    pub id: i32,
    /// Dotted address text, unique
    pub direccion_ip: String,
    pub id_sucursal: Option<i32>,
    pub id_status: i32,
    pub comentario: Option<String>,
}

/// IP address enriched with joined names for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DireccionIpDetails {
    pub id: i32,
    pub direccion_ip: String,
    pub id_sucursal: Option<i32>,
    pub sucursal_nombre: Option<String>,
    pub id_status: i32,
    pub status_nombre: String,
    pub comentario: Option<String>,
}

/// Create IP address request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDireccionIp {
    pub direccion_ip: String,
    pub id_sucursal: Option<i32>,
    pub id_status: Option<i32>,
    pub comentario: Option<String>,
}

/// Update IP address request (partial)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDireccionIp {
    pub direccion_ip: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_sucursal: Option<Option<i32>>,
    pub id_status: Option<i32>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub comentario: Option<Option<String>>,
}
