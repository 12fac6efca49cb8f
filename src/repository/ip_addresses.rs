//! IP address repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::ip_address::{CreateDireccionIp, DireccionIp, DireccionIpDetails, UpdateDireccionIp},
};

#[derive(Clone)]
pub struct DireccionesIpRepository {
    pool: Pool<Postgres>,
}

impl DireccionesIpRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all IP addresses with joined names
    pub async fn list(&self) -> AppResult<Vec<DireccionIpDetails>> {
        let rows = sqlx::query_as::<_, DireccionIpDetails>(
            r#"
            SELECT ip.id, ip.direccion_ip, ip.id_sucursal, s.nombre AS sucursal_nombre,
                   ip.id_status, st.nombre_status AS status_nombre, ip.comentario
            FROM direcciones_ip AS ip
            LEFT JOIN sucursales AS s ON ip.id_sucursal = s.id
            JOIN status AS st ON ip.id_status = st.id
            ORDER BY ip.direccion_ip
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get enriched IP address by ID
    pub async fn get_details(&self, id: i32) -> AppResult<DireccionIpDetails> {
        sqlx::query_as::<_, DireccionIpDetails>(
            r#"
            SELECT ip.id, ip.direccion_ip, ip.id_sucursal, s.nombre AS sucursal_nombre,
                   ip.id_status, st.nombre_status AS status_nombre, ip.comentario
            FROM direcciones_ip AS ip
            LEFT JOIN sucursales AS s ON ip.id_sucursal = s.id
            JOIN status AS st ON ip.id_status = st.id
            WHERE ip.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dirección IP {} no encontrada", id)))
    }

    /// Get raw IP row by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<DireccionIp> {
        sqlx::query_as::<_, DireccionIp>("SELECT * FROM direcciones_ip WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Dirección IP {} no encontrada", id)))
    }

    /// Create an IP address
    pub async fn create(&self, data: &CreateDireccionIp, id_status: i32) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO direcciones_ip (direccion_ip, id_sucursal, id_status, comentario)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&data.direccion_ip)
        .bind(data.id_sucursal)
        .bind(id_status)
        .bind(&data.comentario)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                "La dirección IP ya existe.",
                "Referencia inválida a sucursal o status.",
            )
        })?;
        Ok(id)
    }

    /// Update an IP address with the supplied partial fields
    pub async fn update(&self, id: i32, data: &UpdateDireccionIp) -> AppResult<()> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.direccion_ip, "direccion_ip");
        add_field!(data.id_sucursal, "id_sucursal");
        add_field!(data.id_status, "id_status");
        add_field!(data.comentario, "comentario");

        if sets.is_empty() {
            return Err(AppError::Validation(
                "No se proporcionaron campos válidos para actualizar.".to_string(),
            ));
        }

        let sql = format!(
            "UPDATE direcciones_ip SET {} WHERE id = ${}",
            sets.join(", "),
            idx
        );

        let mut query = sqlx::query(&sql);
        if let Some(ref val) = data.direccion_ip {
            query = query.bind(val);
        }
        if let Some(val) = data.id_sucursal {
            query = query.bind(val);
        }
        if let Some(val) = data.id_status {
            query = query.bind(val);
        }
        if let Some(ref val) = data.comentario {
            query = query.bind(val.clone());
        }

        let result = query.bind(id).execute(&self.pool).await.map_err(|e| {
            AppError::from_constraint(
                e,
                "La dirección IP ya existe.",
                "Referencia inválida a sucursal o status.",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Dirección IP {} no encontrada",
                id
            )));
        }
        Ok(())
    }

    /// Delete an IP address; rejected while assignments reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM direcciones_ip WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    "La dirección IP ya existe.",
                    "No se puede eliminar la IP porque tiene asignaciones asociadas.",
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Dirección IP {} no encontrada",
                id
            )));
        }
        Ok(())
    }
}
