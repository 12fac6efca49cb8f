//! Assignment lifecycle engine.
//!
//! Orchestrates create/update/delete of assignments and the component
//! sub-assignments attached to a parent equipment, keeping equipment and IP
//! statuses synchronized. Every operation runs inside a single database
//! transaction; dropping the transaction on an early error rolls everything
//! back, so no partial cascade is ever persisted.

use chrono::{NaiveDateTime, Utc};
use sqlx::{Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::assignment::{
        Asignacion, AsignacionDetails, AsignacionQuery, ComponenteDetails, CreateAsignacion,
        UpdateAsignacion,
    },
    repository::{
        assignments::{AsignacionChanges, InsertAsignacion},
        Repository,
    },
    rules::{self, STATUS_ASIGNACION_ACTIVA, STATUS_ASIGNADO, STATUS_DISPONIBLE},
};

/// Result of creating an assignment
#[derive(Debug)]
pub struct CreacionAsignacion {
    pub id: i32,
    pub id_equipo: i32,
    pub id_ip: Option<i32>,
}

/// Result of creating an assignment together with components
#[derive(Debug)]
pub struct CreacionConComponentes {
    pub id: i32,
    pub id_equipo: i32,
    pub componentes_asignados: usize,
}

/// Result of updating an assignment
#[derive(Debug)]
pub struct ActualizacionAsignacion {
    pub id_ip_actualizada: Option<i32>,
    pub sucursal_ip_actualizada: bool,
}

/// Result of replacing the component set of an assignment
#[derive(Debug)]
pub struct ActualizacionComponentes {
    pub removidos: usize,
    pub agregados: usize,
    pub total: usize,
}

#[derive(Clone)]
pub struct AsignacionesService {
    repository: Repository,
}

impl AsignacionesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List assignments with the given filters
    pub async fn list(&self, filter: &AsignacionQuery) -> AppResult<Vec<AsignacionDetails>> {
        self.repository.asignaciones.list(filter).await
    }

    /// Get an enriched assignment by ID
    pub async fn get(&self, id: i32) -> AppResult<AsignacionDetails> {
        self.repository.asignaciones.get_details(id).await
    }

    /// Create an assignment, flipping the equipment (and IP, when present)
    /// to ASSIGNED and placing the IP in its resolved branch.
    pub async fn create(&self, data: CreateAsignacion) -> AppResult<CreacionAsignacion> {
        let mut tx = self.repository.pool.begin().await?;
        let creado = self.create_in_tx(&mut tx, &data).await?;
        tx.commit().await?;

        tracing::info!(
            id = creado.id,
            id_equipo = creado.id_equipo,
            id_ip = ?creado.id_ip,
            "asignación creada"
        );
        Ok(creado)
    }

    /// Create an assignment plus one child assignment per component
    /// equipment id, all sharing the parent's employee/branch/area/date.
    pub async fn create_con_componentes(
        &self,
        data: CreateAsignacion,
        componentes: &[i32],
    ) -> AppResult<CreacionConComponentes> {
        let mut tx = self.repository.pool.begin().await?;
        let creado = self.create_in_tx(&mut tx, &data).await?;

        let mut asignados = 0;
        for &id_componente in componentes {
            self.asignar_componente_tx(
                &mut tx,
                id_componente,
                creado.id_equipo,
                &InsertAsignacion {
                    id_equipo: id_componente,
                    id_empleado: data.id_empleado,
                    id_sucursal_asignado: data.id_sucursal_asignado,
                    id_area_asignado: data.id_area_asignado,
                    id_equipo_padre: Some(creado.id_equipo),
                    id_ip: None,
                    fecha_asignacion: creado_fecha(&data)?,
                    id_status_asignacion: data
                        .id_status_asignacion
                        .unwrap_or(STATUS_ASIGNACION_ACTIVA),
                    observacion: Some(format!("Componente de {}", creado.id_equipo)),
                },
            )
            .await?;
            asignados += 1;
        }

        tx.commit().await?;

        tracing::info!(
            id = creado.id,
            id_equipo = creado.id_equipo,
            componentes = asignados,
            "asignación con componentes creada"
        );
        Ok(CreacionConComponentes {
            id: creado.id,
            id_equipo: creado.id_equipo,
            componentes_asignados: asignados,
        })
    }

    /// Update an assignment, reconciling the end-date/status pair and
    /// cascading the resulting transition to equipment, IP and components.
    pub async fn update(
        &self,
        id: i32,
        data: UpdateAsignacion,
    ) -> AppResult<ActualizacionAsignacion> {
        let repo = &self.repository.asignaciones;
        let mut tx = self.repository.pool.begin().await?;

        let actual = repo.get_tx(&mut tx, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Asignación {} no encontrada", id))
        })?;
        let era_activa = actual.es_activa();

        // Finalized rows are historical: no reactivation, and only the
        // comment stays editable.
        if !era_activa {
            let reactivando = data.fecha_fin_asignacion == Some(None)
                || data.id_status_asignacion == Some(STATUS_ASIGNACION_ACTIVA);
            if reactivando {
                return Err(AppError::Conflict(
                    "Una asignación finalizada no puede ser reactivada. Debe crear una nueva asignación.".to_string(),
                ));
            }
            let permitidos = ["observacion"];
            if data
                .campos_presentes()
                .iter()
                .any(|campo| !permitidos.contains(campo))
            {
                return Err(AppError::Conflict(
                    "Solo se pueden modificar las observaciones en una asignación histórica.".to_string(),
                ));
            }

            repo.update_tx(
                &mut tx,
                id,
                &AsignacionChanges {
                    observacion: data.observacion.clone(),
                    ..Default::default()
                },
            )
            .await?;
            tx.commit().await?;
            return Ok(ActualizacionAsignacion {
                id_ip_actualizada: None,
                sucursal_ip_actualizada: false,
            });
        }

        // Parse the date fields up front so a malformed value rejects the
        // whole call before any state is touched.
        let fecha_fin_input = parse_fecha_fin(&data)?;
        let fecha_asignacion = match &data.fecha_asignacion {
            Some(s) => Some(rules::parse_fecha(s).ok_or_else(|| {
                AppError::Validation("Formato de fecha_asignacion inválido.".to_string())
            })?),
            None => None,
        };

        let ahora = ahora_segundos();
        let reconciliado = rules::reconcile_fin(
            fecha_fin_input,
            data.id_status_asignacion,
            actual.fecha_fin_asignacion,
            actual.id_status_asignacion,
            ahora,
        )
        .map_err(|e| AppError::Validation(e.message().to_string()))?;

        let es_ahora_activa = reconciliado.fecha_fin.is_none();

        // Effective values after merging the request over the current row
        let final_id_equipo = data.id_equipo.unwrap_or(actual.id_equipo);
        let final_id_ip = merged(&data.id_ip, actual.id_ip);
        let final_id_empleado = merged(&data.id_empleado, actual.id_empleado);
        let final_id_sucursal = merged(&data.id_sucursal_asignado, actual.id_sucursal_asignado);
        let final_id_area = merged(&data.id_area_asignado, actual.id_area_asignado);

        if es_ahora_activa
            && final_id_empleado.is_none()
            && final_id_sucursal.is_none()
            && final_id_area.is_none()
        {
            return Err(AppError::Validation(
                "Asignación activa debe tener empleado, sucursal o área.".to_string(),
            ));
        }

        if era_activa && !es_ahora_activa {
            if let Some(fecha_fin) = reconciliado.fecha_fin {
                self.finalizar_tx(&mut tx, &actual, fecha_fin).await?;
            }
        } else if !era_activa && es_ahora_activa {
            // Unreachable behind the finalized-row guard above; handled so a
            // bad path cannot leave statuses stale.
            repo.set_equipo_status_tx(&mut tx, final_id_equipo, STATUS_ASIGNADO)
                .await?;
            if let Some(id_ip) = final_id_ip {
                let sucursal = repo
                    .resolve_sucursal_para_ip_tx(
                        &mut tx,
                        final_id_sucursal,
                        final_id_empleado,
                        final_id_area,
                    )
                    .await?;
                repo.set_ip_status_sucursal_tx(&mut tx, id_ip, STATUS_ASIGNADO, sucursal)
                    .await?;
            }
        } else if era_activa && es_ahora_activa {
            // Stays active; swapped equipment/IP flip statuses, and a
            // changed association re-points the IP's branch.
            if data.id_equipo.is_some() && final_id_equipo != actual.id_equipo {
                if !repo.equipo_exists_tx(&mut tx, final_id_equipo).await? {
                    return Err(AppError::Validation(format!(
                        "Equipo {} no existe.",
                        final_id_equipo
                    )));
                }
                if let Some(otra) = repo.activa_para_equipo_tx(&mut tx, final_id_equipo).await? {
                    if otra != id {
                        return Err(AppError::Conflict(format!(
                            "El equipo {} ya tiene una asignación activa.",
                            final_id_equipo
                        )));
                    }
                }
                repo.set_equipo_status_tx(&mut tx, actual.id_equipo, STATUS_DISPONIBLE)
                    .await?;
                repo.set_equipo_status_tx(&mut tx, final_id_equipo, STATUS_ASIGNADO)
                    .await?;
            }

            if data.id_ip.is_some() && final_id_ip != actual.id_ip {
                if let Some(id_ip) = actual.id_ip {
                    repo.set_ip_status_tx(&mut tx, id_ip, STATUS_DISPONIBLE).await?;
                }
                if let Some(id_ip) = final_id_ip {
                    if !repo.ip_exists_tx(&mut tx, id_ip).await? {
                        return Err(AppError::Validation(format!(
                            "Dirección IP {} no existe.",
                            id_ip
                        )));
                    }
                    if let Some(otra) = repo.activa_para_ip_tx(&mut tx, id_ip).await? {
                        if otra != id {
                            return Err(AppError::Conflict(format!(
                                "La IP {} ya tiene una asignación activa.",
                                id_ip
                            )));
                        }
                    }
                    let sucursal = repo
                        .resolve_sucursal_para_ip_tx(
                            &mut tx,
                            final_id_sucursal,
                            final_id_empleado,
                            final_id_area,
                        )
                        .await?;
                    repo.set_ip_status_sucursal_tx(&mut tx, id_ip, STATUS_ASIGNADO, sucursal)
                        .await?;
                }
            } else if let Some(id_ip) = final_id_ip {
                if data.id_empleado.is_some()
                    || data.id_sucursal_asignado.is_some()
                    || data.id_area_asignado.is_some()
                {
                    let sucursal = repo
                        .resolve_sucursal_para_ip_tx(
                            &mut tx,
                            final_id_sucursal,
                            final_id_empleado,
                            final_id_area,
                        )
                        .await?;
                    repo.set_ip_sucursal_tx(&mut tx, id_ip, sucursal).await?;
                }
            }
        }

        // Persist the assignment row itself: the supplied fields plus
        // whatever the reconciliation derived.
        let mut changes = AsignacionChanges {
            id_equipo: data.id_equipo,
            id_empleado: data.id_empleado,
            id_sucursal_asignado: data.id_sucursal_asignado,
            id_area_asignado: data.id_area_asignado,
            id_equipo_padre: data.id_equipo_padre,
            id_ip: data.id_ip,
            fecha_asignacion,
            observacion: data.observacion.clone(),
            ..Default::default()
        };
        if data.fecha_fin_asignacion.is_some() || reconciliado.fecha_fin_derivada {
            changes.fecha_fin_asignacion = Some(reconciliado.fecha_fin);
        }
        if data.id_status_asignacion.is_some() || reconciliado.status_derivado {
            changes.id_status_asignacion = Some(reconciliado.status);
        }
        repo.update_tx(&mut tx, id, &changes).await?;

        tx.commit().await?;

        tracing::info!(
            id,
            era_activa,
            es_ahora_activa,
            "asignación actualizada"
        );
        Ok(ActualizacionAsignacion {
            id_ip_actualizada: final_id_ip,
            sucursal_ip_actualizada: final_id_ip.is_some(),
        })
    }

    /// Delete an assignment, reverting equipment/IP statuses if it was
    /// still active.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let repo = &self.repository.asignaciones;
        let mut tx = self.repository.pool.begin().await?;

        let actual = repo.get_tx(&mut tx, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Asignación {} no encontrada", id))
        })?;

        repo.delete_tx(&mut tx, id).await?;

        if actual.es_activa() {
            repo.set_equipo_status_tx(&mut tx, actual.id_equipo, STATUS_DISPONIBLE)
                .await?;
            if let Some(id_ip) = actual.id_ip {
                // The IP keeps its last known branch
                repo.set_ip_status_tx(&mut tx, id_ip, STATUS_DISPONIBLE).await?;
            }
        }

        tx.commit().await?;
        tracing::info!(id, "asignación eliminada");
        Ok(())
    }

    /// Active component rows of the given assignment's equipment
    pub async fn componentes(&self, id: i32) -> AppResult<Vec<ComponenteDetails>> {
        let asignacion = self.repository.asignaciones.get_by_id(id).await?;
        self.repository
            .asignaciones
            .componentes_activos(asignacion.id_equipo)
            .await
    }

    /// Replace the component set of an assignment: components no longer
    /// listed are finalized and freed, new ones are created from the
    /// parent's data and flipped to ASSIGNED.
    pub async fn update_componentes(
        &self,
        id: i32,
        nuevos: &[i32],
    ) -> AppResult<ActualizacionComponentes> {
        let repo = &self.repository.asignaciones;
        let mut tx = self.repository.pool.begin().await?;

        let padre = repo.get_tx(&mut tx, id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Asignación {} no encontrada", id))
        })?;

        let actuales = repo
            .componentes_activos_ids_tx(&mut tx, padre.id_equipo)
            .await?;

        let a_remover: Vec<i32> = actuales
            .iter()
            .copied()
            .filter(|id_eq| !nuevos.contains(id_eq))
            .collect();
        let a_agregar: Vec<i32> = nuevos
            .iter()
            .copied()
            .filter(|id_eq| !actuales.contains(id_eq))
            .collect();

        let ahora = ahora_segundos();
        for id_componente in &a_remover {
            repo.finalizar_componente_tx(&mut tx, *id_componente, padre.id_equipo, ahora)
                .await?;
            repo.set_equipo_status_tx(&mut tx, *id_componente, STATUS_DISPONIBLE)
                .await?;
        }

        for id_componente in &a_agregar {
            self.asignar_componente_tx(
                &mut tx,
                *id_componente,
                padre.id_equipo,
                &InsertAsignacion {
                    id_equipo: *id_componente,
                    id_empleado: padre.id_empleado,
                    id_sucursal_asignado: padre.id_sucursal_asignado,
                    id_area_asignado: padre.id_area_asignado,
                    id_equipo_padre: Some(padre.id_equipo),
                    id_ip: None,
                    fecha_asignacion: padre.fecha_asignacion,
                    id_status_asignacion: padre.id_status_asignacion,
                    observacion: Some(format!("Componente de {}", padre.id_equipo)),
                },
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            id,
            removidos = a_remover.len(),
            agregados = a_agregar.len(),
            "componentes de asignación actualizados"
        );
        Ok(ActualizacionComponentes {
            removidos: a_remover.len(),
            agregados: a_agregar.len(),
            total: nuevos.len(),
        })
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Validations plus the insert and status cascade for a single
    /// assignment, inside the caller's transaction.
    async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateAsignacion,
    ) -> AppResult<CreacionAsignacion> {
        let repo = &self.repository.asignaciones;

        let id_equipo = data.id_equipo.ok_or_else(|| {
            AppError::Validation("id_equipo y fecha_asignacion son obligatorios.".to_string())
        })?;
        let fecha_asignacion = creado_fecha(data)?;

        // A newly-created assignment is implicitly active, so it must hang
        // off an employee, a branch or an area.
        if data.id_empleado.is_none()
            && data.id_sucursal_asignado.is_none()
            && data.id_area_asignado.is_none()
        {
            return Err(AppError::Validation(
                "Asignación activa debe tener empleado, sucursal o área.".to_string(),
            ));
        }

        if !repo.equipo_exists_tx(tx, id_equipo).await? {
            return Err(AppError::Validation(format!(
                "Equipo {} no existe.",
                id_equipo
            )));
        }
        if let Some(id_ip) = data.id_ip {
            if !repo.ip_exists_tx(tx, id_ip).await? {
                return Err(AppError::Validation(format!(
                    "Dirección IP {} no existe.",
                    id_ip
                )));
            }
        }

        if repo.activa_para_equipo_tx(tx, id_equipo).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "El equipo {} ya tiene una asignación activa.",
                id_equipo
            )));
        }
        if let Some(id_ip) = data.id_ip {
            if repo.activa_para_ip_tx(tx, id_ip).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "La IP {} ya tiene una asignación activa.",
                    id_ip
                )));
            }
        }

        let id = repo
            .insert_tx(
                tx,
                &InsertAsignacion {
                    id_equipo,
                    id_empleado: data.id_empleado,
                    id_sucursal_asignado: data.id_sucursal_asignado,
                    id_area_asignado: data.id_area_asignado,
                    id_equipo_padre: data.id_equipo_padre,
                    id_ip: data.id_ip,
                    fecha_asignacion,
                    id_status_asignacion: data
                        .id_status_asignacion
                        .unwrap_or(STATUS_ASIGNACION_ACTIVA),
                    observacion: data.observacion.clone(),
                },
            )
            .await?;

        repo.set_equipo_status_tx(tx, id_equipo, STATUS_ASIGNADO).await?;

        if let Some(id_ip) = data.id_ip {
            let sucursal = repo
                .resolve_sucursal_para_ip_tx(
                    tx,
                    data.id_sucursal_asignado,
                    data.id_empleado,
                    data.id_area_asignado,
                )
                .await?;
            repo.set_ip_status_sucursal_tx(tx, id_ip, STATUS_ASIGNADO, sucursal)
                .await?;
        }

        Ok(CreacionAsignacion {
            id,
            id_equipo,
            id_ip: data.id_ip,
        })
    }

    /// Create one component assignment and flip its equipment to ASSIGNED
    async fn asignar_componente_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id_componente: i32,
        id_equipo_padre: i32,
        row: &InsertAsignacion,
    ) -> AppResult<()> {
        let repo = &self.repository.asignaciones;

        if !repo.equipo_exists_tx(tx, id_componente).await? {
            return Err(AppError::Validation(format!(
                "Equipo componente {} no existe.",
                id_componente
            )));
        }
        if repo.activa_para_equipo_tx(tx, id_componente).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "El componente {} ya tiene una asignación activa.",
                id_componente
            )));
        }

        repo.insert_tx(tx, row).await?;
        repo.set_equipo_status_tx(tx, id_componente, STATUS_ASIGNADO)
            .await?;
        tracing::debug!(
            id_componente,
            id_equipo_padre,
            "componente asignado"
        );
        Ok(())
    }

    /// Cascade of a finalization: free the equipment and IP, finalize the
    /// still-active children and free their equipment too.
    async fn finalizar_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        actual: &Asignacion,
        fecha_fin: NaiveDateTime,
    ) -> AppResult<()> {
        let repo = &self.repository.asignaciones;

        repo.set_equipo_status_tx(tx, actual.id_equipo, STATUS_DISPONIBLE)
            .await?;
        if let Some(id_ip) = actual.id_ip {
            // The IP becomes available but keeps its last known branch
            repo.set_ip_status_tx(tx, id_ip, STATUS_DISPONIBLE).await?;
        }

        let componentes = repo
            .finalizar_componentes_tx(tx, actual.id_equipo, fecha_fin)
            .await?;
        for id_componente in &componentes {
            repo.set_equipo_status_tx(tx, *id_componente, STATUS_DISPONIBLE)
                .await?;
        }
        if !componentes.is_empty() {
            tracing::info!(
                id = actual.id,
                liberados = componentes.len(),
                "componentes liberados al finalizar"
            );
        }
        Ok(())
    }
}

fn creado_fecha(data: &CreateAsignacion) -> AppResult<NaiveDateTime> {
    let raw = data.fecha_asignacion.as_deref().ok_or_else(|| {
        AppError::Validation("id_equipo y fecha_asignacion son obligatorios.".to_string())
    })?;
    rules::parse_fecha(raw).ok_or_else(|| {
        AppError::Validation("Formato de fecha_asignacion inválido.".to_string())
    })
}

/// Effective end-date input: absent, explicit null (empty string counts as
/// null), or a parsed timestamp.
fn parse_fecha_fin(data: &UpdateAsignacion) -> AppResult<Option<Option<NaiveDateTime>>> {
    match &data.fecha_fin_asignacion {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(s)) if s.trim().is_empty() => Ok(Some(None)),
        Some(Some(s)) => {
            let parsed = rules::parse_fecha(s).ok_or_else(|| {
                AppError::Validation("Formato de fecha_fin_asignacion inválido.".to_string())
            })?;
            Ok(Some(Some(parsed)))
        }
    }
}

fn merged<T: Copy>(input: &Option<Option<T>>, current: Option<T>) -> Option<T> {
    match input {
        Some(v) => *v,
        None => current,
    }
}

/// Server clock truncated to second precision
fn ahora_segundos() -> NaiveDateTime {
    use chrono::Timelike;
    let ahora = Utc::now().naive_utc();
    ahora.with_nanosecond(0).unwrap_or(ahora)
}
