//! Assignment repository: enriched reads plus the transaction-scoped
//! mutations the lifecycle engine composes into one atomic unit of work.

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::assignment::{
        Asignacion, AsignacionDetails, AsignacionQuery, ComponenteDetails,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT
      a.id, a.id_equipo, e.numero_serie AS equipo_numero_serie, e.nombre_equipo AS equipo_nombre,
      e.id_tipo_equipo AS equipo_tipo_id, te.nombre_tipo AS equipo_tipo_nombre,
      a.id_empleado, emp.nombres AS empleado_nombres, emp.apellidos AS empleado_apellidos,
      a.id_sucursal_asignado, s.nombre AS sucursal_asignada_nombre,
      a.id_area_asignado, ar.nombre AS area_asignada_nombre,
      a.id_equipo_padre, ep.numero_serie AS equipo_padre_numero_serie, ep.nombre_equipo AS equipo_padre_nombre,
      a.id_ip, ip.direccion_ip AS ip_direccion,
      a.fecha_asignacion, a.fecha_fin_asignacion, a.observacion,
      a.fecha_registro, a.fecha_actualizacion,
      a.id_status_asignacion, st.nombre_status AS status_nombre
    FROM asignaciones AS a
    LEFT JOIN equipos AS e ON a.id_equipo = e.id
    LEFT JOIN tipos_equipo AS te ON e.id_tipo_equipo = te.id
    LEFT JOIN empleados AS emp ON a.id_empleado = emp.id
    LEFT JOIN sucursales AS s ON a.id_sucursal_asignado = s.id
    LEFT JOIN areas AS ar ON a.id_area_asignado = ar.id
    LEFT JOIN equipos AS ep ON a.id_equipo_padre = ep.id
    LEFT JOIN direcciones_ip AS ip ON a.id_ip = ip.id
    LEFT JOIN status AS st ON a.id_status_asignacion = st.id
"#;

/// Values for a new assignment row, already validated by the engine
#[derive(Debug, Clone)]
pub struct InsertAsignacion {
    pub id_equipo: i32,
    pub id_empleado: Option<i32>,
    pub id_sucursal_asignado: Option<i32>,
    pub id_area_asignado: Option<i32>,
    pub id_equipo_padre: Option<i32>,
    pub id_ip: Option<i32>,
    pub fecha_asignacion: NaiveDateTime,
    pub id_status_asignacion: i32,
    pub observacion: Option<String>,
}

/// Column-level changes to persist on an assignment row. `None` leaves the
/// column untouched; the nested options write an explicit NULL.
#[derive(Debug, Default, Clone)]
pub struct AsignacionChanges {
    pub id_equipo: Option<i32>,
    pub id_empleado: Option<Option<i32>>,
    pub id_sucursal_asignado: Option<Option<i32>>,
    pub id_area_asignado: Option<Option<i32>>,
    pub id_equipo_padre: Option<Option<i32>>,
    pub id_ip: Option<Option<i32>>,
    pub fecha_asignacion: Option<NaiveDateTime>,
    pub fecha_fin_asignacion: Option<Option<NaiveDateTime>>,
    pub id_status_asignacion: Option<i32>,
    pub observacion: Option<Option<String>>,
}

impl AsignacionChanges {
    pub fn is_empty(&self) -> bool {
        self.id_equipo.is_none()
            && self.id_empleado.is_none()
            && self.id_sucursal_asignado.is_none()
            && self.id_area_asignado.is_none()
            && self.id_equipo_padre.is_none()
            && self.id_ip.is_none()
            && self.fecha_asignacion.is_none()
            && self.fecha_fin_asignacion.is_none()
            && self.id_status_asignacion.is_none()
            && self.observacion.is_none()
    }
}

#[derive(Clone)]
pub struct AsignacionesRepository {
    pool: Pool<Postgres>,
}

impl AsignacionesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------
    // Pool-based reads
    // -----------------------------------------------------------------

    /// List assignments with joined names, newest first
    pub async fn list(&self, filter: &AsignacionQuery) -> AppResult<Vec<AsignacionDetails>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_clause {
            ($field:expr, $column:expr) => {
                if $field.is_some() {
                    clauses.push(format!("{} = ${}", $column, idx));
                    idx += 1;
                }
            };
        }

        add_clause!(filter.equipo_id, "a.id_equipo");
        add_clause!(filter.empleado_id, "a.id_empleado");
        add_clause!(filter.sucursal_id, "a.id_sucursal_asignado");
        add_clause!(filter.area_id, "a.id_area_asignado");
        add_clause!(filter.ip_id, "a.id_ip");
        let _ = idx;
        match filter.activa {
            Some(true) => clauses.push("a.fecha_fin_asignacion IS NULL".to_string()),
            Some(false) => clauses.push("a.fecha_fin_asignacion IS NOT NULL".to_string()),
            None => {}
        }

        let mut sql = DETAILS_SELECT.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY a.fecha_asignacion DESC, a.id DESC");

        let mut query = sqlx::query_as::<_, AsignacionDetails>(&sql);
        for value in [
            filter.equipo_id,
            filter.empleado_id,
            filter.sucursal_id,
            filter.area_id,
            filter.ip_id,
        ]
        .into_iter()
        .flatten()
        {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get enriched assignment by ID
    pub async fn get_details(&self, id: i32) -> AppResult<AsignacionDetails> {
        let sql = format!("{} WHERE a.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, AsignacionDetails>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Registro de asignación {} no encontrado", id))
            })
    }

    /// Get raw assignment row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Asignacion> {
        sqlx::query_as::<_, Asignacion>("SELECT * FROM asignaciones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Registro de asignación {} no encontrado", id))
            })
    }

    /// Active component rows attached to the given parent equipment,
    /// joined with equipment descriptive fields
    pub async fn componentes_activos(
        &self,
        id_equipo_padre: i32,
    ) -> AppResult<Vec<ComponenteDetails>> {
        let rows = sqlx::query_as::<_, ComponenteDetails>(
            r#"
            SELECT a.id AS asignacion_id, a.id_equipo,
                   e.numero_serie AS equipo_numero_serie,
                   e.nombre_equipo AS equipo_nombre,
                   e.marca, e.modelo,
                   te.nombre_tipo AS tipo_equipo_nombre,
                   a.fecha_asignacion, a.observacion
            FROM asignaciones a
            JOIN equipos e ON a.id_equipo = e.id
            JOIN tipos_equipo te ON e.id_tipo_equipo = te.id
            WHERE a.id_equipo_padre = $1
              AND a.fecha_fin_asignacion IS NULL
            ORDER BY te.nombre_tipo, e.numero_serie
            "#,
        )
        .bind(id_equipo_padre)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -----------------------------------------------------------------
    // Transaction-scoped helpers for the lifecycle engine
    // -----------------------------------------------------------------

    /// Load an assignment inside the transaction
    pub async fn get_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<Option<Asignacion>> {
        let row = sqlx::query_as::<_, Asignacion>("SELECT * FROM asignaciones WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row)
    }

    /// Whether an equipment row exists
    pub async fn equipo_exists_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_equipo: i32,
    ) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipos WHERE id = $1)")
                .bind(id_equipo)
                .fetch_one(&mut **tx)
                .await?;
        Ok(exists)
    }

    /// Whether an IP row exists
    pub async fn ip_exists_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_ip: i32,
    ) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM direcciones_ip WHERE id = $1)")
                .bind(id_ip)
                .fetch_one(&mut **tx)
                .await?;
        Ok(exists)
    }

    /// Id of the active assignment referencing the equipment, if any
    pub async fn activa_para_equipo_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_equipo: i32,
    ) -> AppResult<Option<i32>> {
        let id: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM asignaciones WHERE id_equipo = $1 AND fecha_fin_asignacion IS NULL",
        )
        .bind(id_equipo)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(id)
    }

    /// Id of the active assignment referencing the IP, if any
    pub async fn activa_para_ip_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_ip: i32,
    ) -> AppResult<Option<i32>> {
        let id: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM asignaciones WHERE id_ip = $1 AND fecha_fin_asignacion IS NULL",
        )
        .bind(id_ip)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(id)
    }

    /// Insert a new assignment row
    pub async fn insert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &InsertAsignacion,
    ) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO asignaciones (
                id_equipo, id_empleado, id_sucursal_asignado, id_area_asignado,
                id_equipo_padre, id_ip, fecha_asignacion, id_status_asignacion,
                observacion
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(data.id_equipo)
        .bind(data.id_empleado)
        .bind(data.id_sucursal_asignado)
        .bind(data.id_area_asignado)
        .bind(data.id_equipo_padre)
        .bind(data.id_ip)
        .bind(data.fecha_asignacion)
        .bind(data.id_status_asignacion)
        .bind(&data.observacion)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                "El equipo o la IP ya tiene una asignación activa.",
                "Referencia inválida a equipo, empleado, sucursal, área o IP.",
            )
        })?;
        Ok(id)
    }

    /// Set an equipment row's status
    pub async fn set_equipo_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_equipo: i32,
        id_status: i32,
    ) -> AppResult<()> {
        sqlx::query("UPDATE equipos SET id_status = $1, fecha_actualizacion = NOW() WHERE id = $2")
            .bind(id_status)
            .bind(id_equipo)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Set an IP row's status, leaving its branch as-is
    pub async fn set_ip_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_ip: i32,
        id_status: i32,
    ) -> AppResult<()> {
        sqlx::query("UPDATE direcciones_ip SET id_status = $1 WHERE id = $2")
            .bind(id_status)
            .bind(id_ip)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Set an IP row's status and branch together
    pub async fn set_ip_status_sucursal_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_ip: i32,
        id_status: i32,
        id_sucursal: Option<i32>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE direcciones_ip SET id_status = $1, id_sucursal = $2 WHERE id = $3")
            .bind(id_status)
            .bind(id_sucursal)
            .bind(id_ip)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Re-point an IP row's branch without touching its status
    pub async fn set_ip_sucursal_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_ip: i32,
        id_sucursal: Option<i32>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE direcciones_ip SET id_sucursal = $1 WHERE id = $2")
            .bind(id_sucursal)
            .bind(id_ip)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Resolve the branch an assigned IP should be placed in: an explicit
    /// branch wins, else the employee's home branch, else any branch of the
    /// area's company (first match), else none.
    pub async fn resolve_sucursal_para_ip_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_sucursal_asignado: Option<i32>,
        id_empleado: Option<i32>,
        id_area_asignado: Option<i32>,
    ) -> AppResult<Option<i32>> {
        if id_sucursal_asignado.is_some() {
            return Ok(id_sucursal_asignado);
        }
        if let Some(id_empleado) = id_empleado {
            let sucursal: Option<Option<i32>> =
                sqlx::query_scalar("SELECT id_sucursal FROM empleados WHERE id = $1")
                    .bind(id_empleado)
                    .fetch_optional(&mut **tx)
                    .await?;
            return Ok(sucursal.flatten());
        }
        if let Some(id_area) = id_area_asignado {
            let sucursal: Option<i32> = sqlx::query_scalar(
                r#"
                SELECT s.id
                FROM areas a
                JOIN sucursales s ON s.id_empresa = a.id_empresa
                WHERE a.id = $1
                ORDER BY s.id
                LIMIT 1
                "#,
            )
            .bind(id_area)
            .fetch_optional(&mut **tx)
            .await?;
            return Ok(sucursal);
        }
        Ok(None)
    }

    /// Finalize every still-active component assignment attached to the
    /// parent equipment; returns the component equipment ids touched.
    pub async fn finalizar_componentes_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_equipo_padre: i32,
        fecha_fin: NaiveDateTime,
    ) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            UPDATE asignaciones
            SET fecha_fin_asignacion = $1,
                id_status_asignacion = $2,
                fecha_actualizacion = NOW()
            WHERE id_equipo_padre = $3 AND fecha_fin_asignacion IS NULL
            RETURNING id_equipo
            "#,
        )
        .bind(fecha_fin)
        .bind(crate::rules::STATUS_ASIGNACION_FINALIZADA)
        .bind(id_equipo_padre)
        .fetch_all(&mut **tx)
        .await?;
        Ok(ids)
    }

    /// Equipment ids of the currently-active components of a parent equipment
    pub async fn componentes_activos_ids_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_equipo_padre: i32,
    ) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            "SELECT id_equipo FROM asignaciones WHERE id_equipo_padre = $1 AND fecha_fin_asignacion IS NULL",
        )
        .bind(id_equipo_padre)
        .fetch_all(&mut **tx)
        .await?;
        Ok(ids)
    }

    /// Finalize the active component assignment of one equipment under a parent
    pub async fn finalizar_componente_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_equipo: i32,
        id_equipo_padre: i32,
        fecha_fin: NaiveDateTime,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE asignaciones
            SET fecha_fin_asignacion = $1,
                id_status_asignacion = $2,
                fecha_actualizacion = NOW()
            WHERE id_equipo = $3 AND id_equipo_padre = $4 AND fecha_fin_asignacion IS NULL
            "#,
        )
        .bind(fecha_fin)
        .bind(crate::rules::STATUS_ASIGNACION_FINALIZADA)
        .bind(id_equipo)
        .bind(id_equipo_padre)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Persist column-level changes on an assignment row
    pub async fn update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        changes: &AsignacionChanges,
    ) -> AppResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

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

        add_field!(changes.id_equipo, "id_equipo");
        add_field!(changes.id_empleado, "id_empleado");
        add_field!(changes.id_sucursal_asignado, "id_sucursal_asignado");
        add_field!(changes.id_area_asignado, "id_area_asignado");
        add_field!(changes.id_equipo_padre, "id_equipo_padre");
        add_field!(changes.id_ip, "id_ip");
        add_field!(changes.fecha_asignacion, "fecha_asignacion");
        add_field!(changes.fecha_fin_asignacion, "fecha_fin_asignacion");
        add_field!(changes.id_status_asignacion, "id_status_asignacion");
        add_field!(changes.observacion, "observacion");

        let sql = format!(
            "UPDATE asignaciones SET {} WHERE id = ${}",
            sets.join(", "),
            idx
        );

        let mut query = sqlx::query(&sql);
        if let Some(val) = changes.id_equipo {
            query = query.bind(val);
        }
        if let Some(val) = changes.id_empleado {
            query = query.bind(val);
        }
        if let Some(val) = changes.id_sucursal_asignado {
            query = query.bind(val);
        }
        if let Some(val) = changes.id_area_asignado {
            query = query.bind(val);
        }
        if let Some(val) = changes.id_equipo_padre {
            query = query.bind(val);
        }
        if let Some(val) = changes.id_ip {
            query = query.bind(val);
        }
        if let Some(val) = changes.fecha_asignacion {
            query = query.bind(val);
        }
        if let Some(val) = changes.fecha_fin_asignacion {
            query = query.bind(val);
        }
        if let Some(val) = changes.id_status_asignacion {
            query = query.bind(val);
        }
        if let Some(ref val) = changes.observacion {
            query = query.bind(val.clone());
        }

        query.bind(id).execute(&mut **tx).await.map_err(|e| {
            AppError::from_constraint(
                e,
                "El equipo o la IP ya tiene una asignación activa.",
                "Referencia inválida a equipo, empleado, sucursal, área o IP.",
            )
        })?;
        Ok(())
    }

    /// Delete an assignment row
    pub async fn delete_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM asignaciones WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
