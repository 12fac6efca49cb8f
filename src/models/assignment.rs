//! Assignment model and related types.
//!
//! An assignment row links one equipment item to an employee, branch or
//! area for a period of time. A null `fecha_fin_asignacion` marks the
//! assignment as active; `id_equipo_padre` marks the row as a component
//! attached to another equipment's assignment.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Assignment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asignacion {
    pub id: i32,
    pub id_equipo: i32,
    pub id_empleado: Option<i32>,
    pub id_sucursal_asignado: Option<i32>,
    pub id_area_asignado: Option<i32>,
    /// Set when this row is a component of another equipment's assignment
    pub id_equipo_padre: Option<i32>,
    pub id_ip: Option<i32>,
    pub fecha_asignacion: NaiveDateTime,
    /// Null while the assignment is active
    pub fecha_fin_asignacion: Option<NaiveDateTime>,
    pub id_status_asignacion: i32,
    pub observacion: Option<String>,
    pub fecha_registro: Option<DateTime<Utc>>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
}

impl Asignacion {
    pub fn es_activa(&self) -> bool {
        self.fecha_fin_asignacion.is_none()
    }
}

/// Assignment enriched with joined names for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AsignacionDetails {
    pub id: i32,
    pub id_equipo: i32,
    pub equipo_numero_serie: Option<String>,
    pub equipo_nombre: Option<String>,
    pub equipo_tipo_id: Option<i32>,
    pub equipo_tipo_nombre: Option<String>,
    pub id_empleado: Option<i32>,
    pub empleado_nombres: Option<String>,
    pub empleado_apellidos: Option<String>,
    pub id_sucursal_asignado: Option<i32>,
    pub sucursal_asignada_nombre: Option<String>,
    pub id_area_asignado: Option<i32>,
    pub area_asignada_nombre: Option<String>,
    pub id_equipo_padre: Option<i32>,
    pub equipo_padre_numero_serie: Option<String>,
    pub equipo_padre_nombre: Option<String>,
    pub id_ip: Option<i32>,
    pub ip_direccion: Option<String>,
    pub fecha_asignacion: NaiveDateTime,
    pub fecha_fin_asignacion: Option<NaiveDateTime>,
    pub observacion: Option<String>,
    pub fecha_registro: Option<DateTime<Utc>>,
    pub fecha_actualizacion: Option<DateTime<Utc>>,
    pub id_status_asignacion: i32,
    pub status_nombre: Option<String>,
}

/// Component row joined with equipment descriptive fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ComponenteDetails {
    pub asignacion_id: i32,
    pub id_equipo: i32,
    pub equipo_numero_serie: String,
    pub equipo_nombre: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub tipo_equipo_nombre: String,
    pub fecha_asignacion: NaiveDateTime,
    pub observacion: Option<String>,
}

/// Create assignment request.
///
/// `id_equipo` and `fecha_asignacion` are required; they stay optional here
/// so the engine can answer a 400 with a domain message instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAsignacion {
    pub id_equipo: Option<i32>,
    /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    pub fecha_asignacion: Option<String>,
    pub id_empleado: Option<i32>,
    pub id_sucursal_asignado: Option<i32>,
    pub id_area_asignado: Option<i32>,
    pub id_equipo_padre: Option<i32>,
    pub id_ip: Option<i32>,
    pub observacion: Option<String>,
    /// Defaults to ACTIVE
    pub id_status_asignacion: Option<i32>,
}

/// Create assignment request with a batch of component equipment ids
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAsignacionConComponentes {
    #[serde(flatten)]
    pub asignacion: CreateAsignacion,
    #[serde(default)]
    pub componentes: Vec<i32>,
}

/// Update assignment request.
///
/// Every field is partial; the nullable ones distinguish "absent" from an
/// explicit null so that clearing a value is an intentional act.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAsignacion {
    pub id_equipo: Option<i32>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_empleado: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_sucursal_asignado: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_area_asignado: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_equipo_padre: Option<Option<i32>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub id_ip: Option<Option<i32>>,
    /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`
    pub fecha_asignacion: Option<String>,
    /// Empty string and null both clear the end date
    #[serde(default, with = "serde_with::rust::double_option")]
    pub fecha_fin_asignacion: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub observacion: Option<Option<String>>,
    pub id_status_asignacion: Option<i32>,
}

impl UpdateAsignacion {
    /// Names of the fields present in the request, for the
    /// finalized-row allow-list check.
    pub fn campos_presentes(&self) -> Vec<&'static str> {
        let mut campos = Vec::new();
        if self.id_equipo.is_some() {
            campos.push("id_equipo");
        }
        if self.id_empleado.is_some() {
            campos.push("id_empleado");
        }
        if self.id_sucursal_asignado.is_some() {
            campos.push("id_sucursal_asignado");
        }
        if self.id_area_asignado.is_some() {
            campos.push("id_area_asignado");
        }
        if self.id_equipo_padre.is_some() {
            campos.push("id_equipo_padre");
        }
        if self.id_ip.is_some() {
            campos.push("id_ip");
        }
        if self.fecha_asignacion.is_some() {
            campos.push("fecha_asignacion");
        }
        if self.fecha_fin_asignacion.is_some() {
            campos.push("fecha_fin_asignacion");
        }
        if self.observacion.is_some() {
            campos.push("observacion");
        }
        if self.id_status_asignacion.is_some() {
            campos.push("id_status_asignacion");
        }
        campos
    }
}

/// Replace the component set of an assignment
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateComponentes {
    #[serde(default)]
    pub componentes: Vec<i32>,
}

/// Query filters for listing assignments
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AsignacionQuery {
    pub equipo_id: Option<i32>,
    pub empleado_id: Option<i32>,
    pub sucursal_id: Option<i32>,
    pub area_id: Option<i32>,
    pub ip_id: Option<i32>,
    /// `true` = only active, `false` = only finalized
    pub activa: Option<bool>,
}
