//! Lookups for companies, branches, areas, equipment types and statuses

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::organization::{Area, Status, Sucursal, TipoEquipo},
};

#[derive(Clone)]
pub struct OrganizacionRepository {
    pool: Pool<Postgres>,
}

impl OrganizacionRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all branches
    pub async fn sucursales(&self) -> AppResult<Vec<Sucursal>> {
        let rows = sqlx::query_as::<_, Sucursal>("SELECT * FROM sucursales ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List all areas
    pub async fn areas(&self) -> AppResult<Vec<Area>> {
        let rows = sqlx::query_as::<_, Area>("SELECT * FROM areas ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List all equipment types
    pub async fn tipos_equipo(&self) -> AppResult<Vec<TipoEquipo>> {
        let rows =
            sqlx::query_as::<_, TipoEquipo>("SELECT * FROM tipos_equipo ORDER BY nombre_tipo")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// List all status values
    pub async fn statuses(&self) -> AppResult<Vec<Status>> {
        let rows = sqlx::query_as::<_, Status>("SELECT * FROM status ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
