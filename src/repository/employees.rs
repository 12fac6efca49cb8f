//! Employee repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::employee::{CreateEmpleado, Empleado, EmpleadoDetails, UpdateEmpleado},
};

#[derive(Clone)]
pub struct EmpleadosRepository {
    pool: Pool<Postgres>,
}

impl EmpleadosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all employees with joined names
    pub async fn list(&self) -> AppResult<Vec<EmpleadoDetails>> {
        let rows = sqlx::query_as::<_, EmpleadoDetails>(
            r#"
            SELECT emp.id, emp.nombres, emp.apellidos,
                   emp.id_sucursal, s.nombre AS sucursal_nombre,
                   emp.id_area, a.nombre AS area_nombre,
                   emp.cargo, emp.fecha_registro
            FROM empleados AS emp
            LEFT JOIN sucursales AS s ON emp.id_sucursal = s.id
            LEFT JOIN areas AS a ON emp.id_area = a.id
            ORDER BY emp.apellidos, emp.nombres
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Empleado> {
        sqlx::query_as::<_, Empleado>("SELECT * FROM empleados WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Empleado {} no encontrado", id)))
    }

    /// Create an employee
    pub async fn create(&self, data: &CreateEmpleado) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO empleados (nombres, apellidos, id_sucursal, id_area, cargo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.nombres)
        .bind(&data.apellidos)
        .bind(data.id_sucursal)
        .bind(data.id_area)
        .bind(&data.cargo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_constraint(
                e,
                "El empleado ya existe.",
                "Referencia inválida a sucursal o área.",
            )
        })?;
        Ok(id)
    }

    /// Update an employee with the supplied partial fields
    pub async fn update(&self, id: i32, data: &UpdateEmpleado) -> AppResult<()> {
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

        add_field!(data.nombres, "nombres");
        add_field!(data.apellidos, "apellidos");
        add_field!(data.id_sucursal, "id_sucursal");
        add_field!(data.id_area, "id_area");
        add_field!(data.cargo, "cargo");

        if sets.is_empty() {
            return Err(AppError::Validation(
                "No se proporcionaron campos válidos para actualizar.".to_string(),
            ));
        }

        let sql = format!(
            "UPDATE empleados SET {} WHERE id = ${}",
            sets.join(", "),
            idx
        );

        let mut query = sqlx::query(&sql);
        if let Some(ref val) = data.nombres {
            query = query.bind(val);
        }
        if let Some(ref val) = data.apellidos {
            query = query.bind(val);
        }
        if let Some(val) = data.id_sucursal {
            query = query.bind(val);
        }
        if let Some(val) = data.id_area {
            query = query.bind(val);
        }
        if let Some(ref val) = data.cargo {
            query = query.bind(val.clone());
        }

        let result = query.bind(id).execute(&self.pool).await.map_err(|e| {
            AppError::from_constraint(
                e,
                "El empleado ya existe.",
                "Referencia inválida a sucursal o área.",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Empleado {} no encontrado", id)));
        }
        Ok(())
    }

    /// Delete an employee; rejected while assignments reference them
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM empleados WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    "El empleado ya existe.",
                    "No se puede eliminar el empleado porque tiene asignaciones asociadas.",
                )
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Empleado {} no encontrado", id)));
        }
        Ok(())
    }
}
