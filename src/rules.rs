//! Status resolution rules for the assignment lifecycle.
//!
//! The `status` lookup table backs three different state machines with
//! different legal value subsets: assignments (ACTIVE/FINALIZED), equipment
//! (ASSIGNED/AVAILABLE/IN_MAINTENANCE) and IP addresses (ASSIGNED/AVAILABLE).
//! This module holds the shared constants, the date-string validation used
//! by the lifecycle endpoints and the pure reconciliation of the
//! end-date/status pair on assignment updates.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Assignment status: active (no end date yet)
pub const STATUS_ASIGNACION_ACTIVA: i32 = 1;
/// Equipment status: under maintenance (protected, freed by the maintenance workflow)
pub const STATUS_EN_MANTENIMIENTO: i32 = 3;
/// Equipment/IP status: currently assigned
pub const STATUS_ASIGNADO: i32 = 4;
/// Equipment/IP status: available for assignment
pub const STATUS_DISPONIBLE: i32 = 5;
/// Assignment status: finalized (end date set)
pub const STATUS_ASIGNACION_FINALIZADA: i32 = 6;

/// Equipment type: desktop computer (never a component)
pub const TIPO_COMPUTADORA: i32 = 1;
/// Equipment type: laptop (never a component)
pub const TIPO_LAPTOP: i32 = 2;

static FECHA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static FECHA_HORA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap());

/// Normalize an incoming date-time string: `T` separator becomes a space
/// and anything past second precision is dropped. Truncation counts chars,
/// never bytes, so multibyte input cannot split a character.
pub fn normalize_fecha(raw: &str) -> String {
    let s = raw.replace('T', " ");
    if s.chars().count() > 19 {
        s.chars().take(19).collect()
    } else {
        s
    }
}

/// Parse a `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` string into a timestamp,
/// rejecting non-existent calendar dates. A bare date gets midnight.
pub fn parse_fecha(raw: &str) -> Option<NaiveDateTime> {
    let s = normalize_fecha(raw);
    if FECHA_RE.is_match(&s) {
        let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()?;
        return date.and_hms_opt(0, 0, 0);
    }
    if FECHA_HORA_RE.is_match(&s) {
        return NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok();
    }
    None
}

/// Parse a strict `YYYY-MM-DD` string, rejecting non-existent dates.
pub fn parse_fecha_dia(raw: &str) -> Option<NaiveDate> {
    if !FECHA_RE.is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Outcome of reconciling the effective end-date/status pair on an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub fecha_fin: Option<NaiveDateTime>,
    pub status: i32,
    /// End date was derived (status set to FINALIZED without a date supplied)
    pub fecha_fin_derivada: bool,
    /// Status was derived (end date supplied without a status change)
    pub status_derivado: bool,
}

/// Rejections produced by the reconciliation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileError {
    /// Explicit null end date together with status FINALIZED
    FinalizedWithoutEndDate,
    /// Explicit status ACTIVE together with a non-null end date
    ActiveWithEndDate,
}

impl ReconcileError {
    pub fn message(&self) -> &'static str {
        match self {
            ReconcileError::FinalizedWithoutEndDate => {
                "Una asignación con status \"Finalizada\" debe tener fecha de fin."
            }
            ReconcileError::ActiveWithEndDate => {
                "Una asignación con fecha de fin no puede tener status \"Activo\"."
            }
        }
    }
}

/// Reconcile the effective end-date/status pair of an assignment update.
///
/// `fecha_fin_input` distinguishes an absent field (`None`) from an explicit
/// null (`Some(None)`); the effective values are the inputs merged over the
/// current row. The table:
///
/// | effective end date | effective status | result                        |
/// |--------------------|------------------|-------------------------------|
/// | none (inherited)   | FINALIZED        | end date derived = `now`      |
/// | none (explicit)    | FINALIZED        | reject                        |
/// | set                | not FINALIZED, inherited ACTIVE | status derived = FINALIZED |
/// | set                | ACTIVE supplied  | reject                        |
/// | set                | FINALIZED        | as-is                         |
/// | none               | not FINALIZED    | as-is (stays active)          |
pub fn reconcile_fin(
    fecha_fin_input: Option<Option<NaiveDateTime>>,
    status_input: Option<i32>,
    current_fecha_fin: Option<NaiveDateTime>,
    current_status: i32,
    now: NaiveDateTime,
) -> Result<Reconciled, ReconcileError> {
    let fecha_fin = match fecha_fin_input {
        Some(v) => v,
        None => current_fecha_fin,
    };
    let status = status_input.unwrap_or(current_status);

    let finalizando_por_status = status == STATUS_ASIGNACION_FINALIZADA;
    let finalizando_por_fecha = fecha_fin.is_some();

    if finalizando_por_status && !finalizando_por_fecha {
        // An explicit null end date cannot derive anything; reject instead
        // of silently inventing one the caller asked to clear.
        if fecha_fin_input == Some(None) {
            return Err(ReconcileError::FinalizedWithoutEndDate);
        }
        return Ok(Reconciled {
            fecha_fin: Some(now),
            status,
            fecha_fin_derivada: true,
            status_derivado: false,
        });
    }

    if finalizando_por_fecha && !finalizando_por_status {
        if status == STATUS_ASIGNACION_ACTIVA && status_input.is_some() {
            return Err(ReconcileError::ActiveWithEndDate);
        }
        return Ok(Reconciled {
            fecha_fin,
            status: STATUS_ASIGNACION_FINALIZADA,
            fecha_fin_derivada: false,
            status_derivado: true,
        });
    }

    Ok(Reconciled {
        fecha_fin,
        status,
        fecha_fin_derivada: false,
        status_derivado: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_fecha_date_only() {
        assert_eq!(parse_fecha("2024-01-01"), Some(dt("2024-01-01 00:00:00")));
    }

    #[test]
    fn test_parse_fecha_datetime() {
        assert_eq!(
            parse_fecha("2024-06-15 13:45:00"),
            Some(dt("2024-06-15 13:45:00"))
        );
    }

    #[test]
    fn test_parse_fecha_normalizes_t_separator() {
        assert_eq!(
            parse_fecha("2024-06-15T13:45:00.123Z"),
            Some(dt("2024-06-15 13:45:00"))
        );
    }

    #[test]
    fn test_parse_fecha_rejects_garbage() {
        assert_eq!(parse_fecha("15/06/2024"), None);
        assert_eq!(parse_fecha("2024-6-1"), None);
        assert_eq!(parse_fecha(""), None);
    }

    #[test]
    fn test_parse_fecha_multibyte_near_truncation_boundary() {
        // Multibyte chars around the 19-char cut must not split; the
        // malformed value is rejected, not a crash.
        assert_eq!(parse_fecha("2024-06-15 13:45:0é"), None);
        assert_eq!(parse_fecha("2024-06-15 13:45:00église"), Some(dt("2024-06-15 13:45:00")));
        assert_eq!(parse_fecha("fécha no válida aquí"), None);
    }

    #[test]
    fn test_parse_fecha_rejects_impossible_dates() {
        assert_eq!(parse_fecha("2024-02-30"), None);
        assert_eq!(parse_fecha("2023-02-29"), None);
        assert_eq!(parse_fecha("2024-13-01"), None);
        // leap day on a leap year is fine
        assert!(parse_fecha("2024-02-29").is_some());
    }

    #[test]
    fn test_finalize_by_status_derives_end_date() {
        let now = dt("2024-03-01 10:00:00");
        let r = reconcile_fin(
            None,
            Some(STATUS_ASIGNACION_FINALIZADA),
            None,
            STATUS_ASIGNACION_ACTIVA,
            now,
        )
        .unwrap();
        assert_eq!(r.fecha_fin, Some(now));
        assert_eq!(r.status, STATUS_ASIGNACION_FINALIZADA);
        assert!(r.fecha_fin_derivada);
    }

    #[test]
    fn test_finalize_by_date_derives_status() {
        let now = dt("2024-03-01 10:00:00");
        let fin = dt("2024-02-28 18:00:00");
        let r = reconcile_fin(
            Some(Some(fin)),
            None,
            None,
            STATUS_ASIGNACION_ACTIVA,
            now,
        )
        .unwrap();
        assert_eq!(r.fecha_fin, Some(fin));
        assert_eq!(r.status, STATUS_ASIGNACION_FINALIZADA);
        assert!(r.status_derivado);
    }

    #[test]
    fn test_explicit_null_end_date_with_finalized_rejected() {
        let now = dt("2024-03-01 10:00:00");
        let err = reconcile_fin(
            Some(None),
            Some(STATUS_ASIGNACION_FINALIZADA),
            None,
            STATUS_ASIGNACION_ACTIVA,
            now,
        )
        .unwrap_err();
        assert_eq!(err, ReconcileError::FinalizedWithoutEndDate);
    }

    #[test]
    fn test_explicit_active_with_end_date_rejected() {
        let now = dt("2024-03-01 10:00:00");
        let fin = dt("2024-02-28 18:00:00");
        let err = reconcile_fin(
            Some(Some(fin)),
            Some(STATUS_ASIGNACION_ACTIVA),
            None,
            STATUS_ASIGNACION_ACTIVA,
            now,
        )
        .unwrap_err();
        assert_eq!(err, ReconcileError::ActiveWithEndDate);
    }

    #[test]
    fn test_stays_active_untouched() {
        let now = dt("2024-03-01 10:00:00");
        let r = reconcile_fin(None, None, None, STATUS_ASIGNACION_ACTIVA, now).unwrap();
        assert_eq!(r.fecha_fin, None);
        assert_eq!(r.status, STATUS_ASIGNACION_ACTIVA);
        assert!(!r.fecha_fin_derivada && !r.status_derivado);
    }

    #[test]
    fn test_both_supplied_consistently() {
        let now = dt("2024-03-01 10:00:00");
        let fin = dt("2024-02-28 18:00:00");
        let r = reconcile_fin(
            Some(Some(fin)),
            Some(STATUS_ASIGNACION_FINALIZADA),
            None,
            STATUS_ASIGNACION_ACTIVA,
            now,
        )
        .unwrap();
        assert_eq!(r.fecha_fin, Some(fin));
        assert_eq!(r.status, STATUS_ASIGNACION_FINALIZADA);
        assert!(!r.fecha_fin_derivada && !r.status_derivado);
    }

    #[test]
    fn test_non_active_non_finalized_status_with_date_forced_finalized() {
        // A stray status value alongside an end date still lands on FINALIZED
        let now = dt("2024-03-01 10:00:00");
        let fin = dt("2024-02-28 18:00:00");
        let r = reconcile_fin(Some(Some(fin)), None, None, 9, now).unwrap();
        assert_eq!(r.status, STATUS_ASIGNACION_FINALIZADA);
    }
}
