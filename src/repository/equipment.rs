//! Equipment repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipo, Equipo, EquipoDetails, UpdateEquipo},
    rules::{TIPO_COMPUTADORA, TIPO_LAPTOP},
};

const DETAILS_SELECT: &str = r#"
    SELECT
      e.id, e.numero_serie, e.nombre_equipo, e.marca, e.modelo,
      e.id_tipo_equipo, te.nombre_tipo AS nombre_tipo_equipo,
      e.id_sucursal_actual, s.nombre AS nombre_sucursal_actual,
      s.id_empresa, em.nombre AS nombre_empresa,
      e.procesador, e.ram, e.disco_duro, e.sistema_operativo, e.mac_address,
      e.otras_caracteristicas, e.fecha_compra, e.fecha_registro, e.fecha_actualizacion,
      e.id_status, st.nombre_status AS status_nombre
    FROM equipos AS e
    JOIN tipos_equipo AS te ON e.id_tipo_equipo = te.id
    JOIN sucursales AS s ON e.id_sucursal_actual = s.id
    JOIN empresas AS em ON s.id_empresa = em.id
    JOIN status AS st ON e.id_status = st.id
"#;

#[derive(Clone)]
pub struct EquiposRepository {
    pool: Pool<Postgres>,
}

impl EquiposRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment with joined names
    pub async fn list(&self) -> AppResult<Vec<EquipoDetails>> {
        let sql = format!("{} ORDER BY e.numero_serie", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, EquipoDetails>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get enriched equipment by ID
    pub async fn get_details(&self, id: i32) -> AppResult<EquipoDetails> {
        let sql = format!("{} WHERE e.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, EquipoDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipo {} no encontrado", id)))
    }

    /// Get raw equipment row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipo> {
        sqlx::query_as::<_, Equipo>("SELECT * FROM equipos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipo {} no encontrado", id)))
    }

    /// Equipment available as component candidates: status AVAILABLE, not a
    /// computer/laptop type, and no active assignment referencing it.
    pub async fn disponibles_para_componentes(&self) -> AppResult<Vec<EquipoDetails>> {
        let sql = format!(
            r#"{}
            WHERE e.id_status = $1
              AND e.id_tipo_equipo NOT IN ($2, $3)
              AND NOT EXISTS (
                  SELECT 1 FROM asignaciones a
                  WHERE a.id_equipo = e.id AND a.fecha_fin_asignacion IS NULL
              )
            ORDER BY te.nombre_tipo, e.numero_serie"#,
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, EquipoDetails>(&sql)
            .bind(crate::rules::STATUS_DISPONIBLE)
            .bind(TIPO_COMPUTADORA)
            .bind(TIPO_LAPTOP)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create equipment
    pub async fn create(
        &self,
        data: &CreateEquipo,
        fecha_compra: Option<NaiveDate>,
        id_status: i32,
    ) -> AppResult<i32> {
        let mac = data
            .mac_address
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO equipos (
                numero_serie, nombre_equipo, marca, modelo, id_tipo_equipo,
                id_sucursal_actual, procesador, ram, disco_duro,
                sistema_operativo, mac_address, otras_caracteristicas,
                fecha_compra, id_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id
            "#,
        )
        .bind(&data.numero_serie)
        .bind(&data.nombre_equipo)
        .bind(&data.marca)
        .bind(&data.modelo)
        .bind(data.id_tipo_equipo)
        .bind(data.id_sucursal_actual)
        .bind(&data.procesador)
        .bind(&data.ram)
        .bind(&data.disco_duro)
        .bind(&data.sistema_operativo)
        .bind(mac)
        .bind(&data.otras_caracteristicas)
        .bind(fecha_compra)
        .bind(id_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                "El número de serie o MAC address ya existe.",
                "Referencia inválida a tipo de equipo, sucursal o status.",
            )
        })?;
        Ok(id)
    }

    /// Update equipment with the supplied partial fields
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateEquipo,
        fecha_compra: Option<NaiveDate>,
    ) -> AppResult<()> {
        let mut sets = vec!["fecha_actualizacion = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.numero_serie, "numero_serie");
        add_field!(data.nombre_equipo, "nombre_equipo");
        add_field!(data.marca, "marca");
        add_field!(data.modelo, "modelo");
        add_field!(data.id_tipo_equipo, "id_tipo_equipo");
        add_field!(data.id_sucursal_actual, "id_sucursal_actual");
        add_field!(data.procesador, "procesador");
        add_field!(data.ram, "ram");
        add_field!(data.disco_duro, "disco_duro");
        add_field!(data.sistema_operativo, "sistema_operativo");
        add_field!(data.mac_address, "mac_address");
        add_field!(data.otras_caracteristicas, "otras_caracteristicas");
        add_field!(data.fecha_compra, "fecha_compra");
        add_field!(data.id_status, "id_status");

        let sql = format!(
            "UPDATE equipos SET {} WHERE id = ${}",
            sets.join(", "),
            idx
        );

        let mut query = sqlx::query(&sql);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    query = query.bind(val);
                }
            };
        }

        bind_field!(data.numero_serie);
        bind_field!(data.nombre_equipo);
        bind_field!(data.marca);
        bind_field!(data.modelo);
        bind_field!(data.id_tipo_equipo);
        bind_field!(data.id_sucursal_actual);
        bind_field!(data.procesador);
        bind_field!(data.ram);
        bind_field!(data.disco_duro);
        bind_field!(data.sistema_operativo);
        bind_field!(data.mac_address);
        bind_field!(data.otras_caracteristicas);
        if data.fecha_compra.is_some() {
            query = query.bind(fecha_compra);
        }
        bind_field!(data.id_status);

        let result = query.bind(id).execute(&self.pool).await.map_err(|e| {
            AppError::from_constraint(
                e,
                "El número de serie o MAC address ya existe.",
                "Referencia inválida a tipo de equipo, sucursal o status.",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipo {} no encontrado", id)));
        }
        Ok(())
    }

    /// Delete equipment; rejected while assignments reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    "El número de serie o MAC address ya existe.",
                    "No se puede eliminar el equipo porque tiene asignaciones asociadas.",
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipo {} no encontrado", id)));
        }
        Ok(())
    }
}
