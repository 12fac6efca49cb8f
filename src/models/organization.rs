//! Company structure lookups: companies, branches, areas, equipment types
//! and the shared status table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Company record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Empresa {
    pub id: i32,
    pub nombre: String,
}

/// Branch office record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Sucursal {
    pub id: i32,
    pub nombre: String,
    pub id_empresa: i32,
}

/// Department/area record, owned by a company
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Area {
    pub id: i32,
    pub nombre: String,
    pub id_empresa: i32,
}

/// Equipment type lookup (1=computer, 2=laptop, the rest are component types)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TipoEquipo {
    pub id: i32,
    pub nombre_tipo: String,
}

/// Status lookup shared by equipment, IP addresses and assignments
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Status {
    pub id: i32,
    pub nombre_status: String,
}
