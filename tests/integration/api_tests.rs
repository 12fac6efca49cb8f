//! API integration tests
//!
//! These run against a live server with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

/// Unique serial suffix so repeated runs do not collide
fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos()
}

/// Create an equipment row and return its id
async fn create_equipo(client: &Client, tipo: i32) -> i64 {
    let response = client
        .post(format!("{}/equipos", BASE_URL))
        .json(&json!({
            "numero_serie": format!("SN-{}", unique_suffix()),
            "nombre_equipo": "Equipo de prueba",
            "id_tipo_equipo": tipo,
            "id_sucursal_actual": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment ID")
}

/// Create an employee and return its id
async fn create_empleado(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/empleados", BASE_URL))
        .json(&json!({
            "nombres": "Prueba",
            "apellidos": "Integración",
            "id_sucursal": 1
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No employee ID")
}

/// Current status of an equipment row
async fn equipo_status(client: &Client, id: i64) -> i64 {
    let response = client
        .get(format!("{}/equipos/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id_status"].as_i64().expect("No status")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_list_lookups() {
    let client = Client::new();

    for path in ["sucursales", "areas", "tipos-equipo", "status"] {
        let response = client
            .get(format!("{}/{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success(), "GET /{} failed", path);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body.is_array());
    }
}

#[tokio::test]
#[ignore]
async fn test_create_equipo_duplicate_serial() {
    let client = Client::new();
    let serial = format!("SN-DUP-{}", unique_suffix());

    let payload = json!({
        "numero_serie": serial,
        "id_tipo_equipo": 3,
        "id_sucursal_actual": 1
    });

    let response = client
        .post(format!("{}/equipos", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/equipos", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_asignacion_marks_equipo_asignado() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_number());

    // The equipment is now ASSIGNED (4)
    assert_eq!(equipo_status(&client, id_equipo).await, 4);
}

#[tokio::test]
#[ignore]
async fn test_asignacion_requires_association() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_asignacion_duplicate_active_conflict() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let payload = json!({
        "id_equipo": id_equipo,
        "id_empleado": id_empleado,
        "fecha_asignacion": "2025-03-10"
    });

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Second active assignment for the same equipment must be rejected
    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_finalize_by_status_derives_end_date() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10 09:00:00"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    // Finalize by sending only the FINALIZED status (6); the end date is
    // derived from the server clock
    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "id_status_asignacion": 6 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/asignaciones/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["fecha_fin_asignacion"].is_string());
    assert_eq!(body["id_status_asignacion"], 6);

    // The equipment is AVAILABLE (5) again
    assert_eq!(equipo_status(&client, id_equipo).await, 5);
}

#[tokio::test]
#[ignore]
async fn test_finalize_by_end_date_forces_status() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "fecha_fin_asignacion": "2025-03-20 17:00:00" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/asignaciones/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id_status_asignacion"], 6);
}

#[tokio::test]
#[ignore]
async fn test_finalized_asignacion_cannot_be_reactivated() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "id_status_asignacion": 6 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Clearing the end date on a finalized row is a reactivation attempt
    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "fecha_fin_asignacion": null }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Only the comment stays editable
    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "id_empleado": null }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "observacion": "Nota histórica" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_ip_keeps_sucursal_after_finalize() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/direcciones-ip", BASE_URL))
        .json(&json!({
            "direccion_ip": format!("10.9.{}.{}", unique_suffix() % 250, unique_suffix() % 250)
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id_ip = body["id"].as_i64().expect("No IP ID");

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "id_ip": id_ip,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    // The IP landed in the employee's branch while assigned
    let response = client
        .get(format!("{}/direcciones-ip/{}", BASE_URL, id_ip))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id_status"], 4);
    assert_eq!(body["id_sucursal"], 1);

    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "id_status_asignacion": 6 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // After finalizing the IP is AVAILABLE but stays in its branch
    let response = client
        .get(format!("{}/direcciones-ip/{}", BASE_URL, id_ip))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id_status"], 5);
    assert_eq!(body["id_sucursal"], 1);
}

#[tokio::test]
#[ignore]
async fn test_asignacion_con_componentes() {
    let client = Client::new();
    let id_laptop = create_equipo(&client, 2).await;
    let id_monitor = create_equipo(&client, 3).await;
    let id_teclado = create_equipo(&client, 4).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones/con-componentes", BASE_URL))
        .json(&json!({
            "id_equipo": id_laptop,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10",
            "componentes": [id_monitor, id_teclado]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");
    assert_eq!(body["componentes_asignados"], 2);

    // Components appear in the component listing and are ASSIGNED
    let response = client
        .get(format!("{}/asignaciones/{}/componentes", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().expect("Not an array").len(), 2);
    assert_eq!(equipo_status(&client, id_monitor).await, 4);

    // Finalizing the parent releases the components too
    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "id_status_asignacion": 6 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    assert_eq!(equipo_status(&client, id_laptop).await, 5);
    assert_eq!(equipo_status(&client, id_monitor).await, 5);
    assert_eq!(equipo_status(&client, id_teclado).await, 5);
}

#[tokio::test]
#[ignore]
async fn test_update_componentes_set_difference() {
    let client = Client::new();
    let id_laptop = create_equipo(&client, 2).await;
    let id_monitor = create_equipo(&client, 3).await;
    let id_teclado = create_equipo(&client, 4).await;
    let id_mouse = create_equipo(&client, 5).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones/con-componentes", BASE_URL))
        .json(&json!({
            "id_equipo": id_laptop,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10",
            "componentes": [id_monitor, id_teclado]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    // Swap the keyboard for a mouse, keep the monitor
    let response = client
        .put(format!("{}/asignaciones/{}/componentes", BASE_URL, id))
        .json(&json!({ "componentes": [id_monitor, id_mouse] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["componentes_removidos"], 1);
    assert_eq!(body["componentes_agregados"], 1);
    assert_eq!(body["total_componentes"], 2);

    assert_eq!(equipo_status(&client, id_teclado).await, 5);
    assert_eq!(equipo_status(&client, id_mouse).await, 4);
    assert_eq!(equipo_status(&client, id_monitor).await, 4);
}

#[tokio::test]
#[ignore]
async fn test_equipo_status_protected_while_assigned() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // A direct status change on an ASSIGNED equipment is rejected
    let response = client
        .put(format!("{}/equipos/{}", BASE_URL, id_equipo))
        .json(&json!({ "id_status": 5 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Re-sending the current value is allowed
    let response = client
        .put(format!("{}/equipos/{}", BASE_URL, id_equipo))
        .json(&json!({ "id_status": 4, "marca": "Lenovo" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_delete_active_asignacion_frees_equipo() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    let response = client
        .delete(format!("{}/asignaciones/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    assert_eq!(equipo_status(&client, id_equipo).await, 5);
}

#[tokio::test]
#[ignore]
async fn test_disponibles_componentes_excludes_assigned() {
    let client = Client::new();
    let id_monitor = create_equipo(&client, 3).await;
    let id_empleado = create_empleado(&client).await;

    // Fresh component equipment shows up as a candidate
    let response = client
        .get(format!("{}/equipos/disponibles-componentes", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = body
        .as_array()
        .expect("Not an array")
        .iter()
        .filter_map(|e| e["id"].as_i64())
        .collect();
    assert!(ids.contains(&id_monitor));

    // Once assigned it disappears from the candidate list
    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_monitor,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/equipos/disponibles-componentes", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = body
        .as_array()
        .expect("Not an array")
        .iter()
        .filter_map(|e| e["id"].as_i64())
        .collect();
    assert!(!ids.contains(&id_monitor));
}

#[tokio::test]
#[ignore]
async fn test_list_asignaciones_filters() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!(
            "{}/asignaciones?equipoId={}&activa=true",
            BASE_URL, id_equipo
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let rows = body.as_array().expect("Not an array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id_equipo"].as_i64(), Some(id_equipo));
    assert!(rows[0]["fecha_fin_asignacion"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_update_swap_to_missing_equipo_rejected() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    let response = client
        .post(format!("{}/asignaciones", BASE_URL))
        .json(&json!({
            "id_equipo": id_equipo,
            "id_empleado": id_empleado,
            "fecha_asignacion": "2025-03-10"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No assignment ID");

    // Swapping to an equipment id that does not exist is a validation
    // error, same as on create
    let response = client
        .put(format!("{}/asignaciones/{}", BASE_URL, id))
        .json(&json!({ "id_equipo": 99999999 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // The original equipment is still assigned
    assert_eq!(equipo_status(&client, id_equipo).await, 4);
}

#[tokio::test]
#[ignore]
async fn test_invalid_date_rejected() {
    let client = Client::new();
    let id_equipo = create_equipo(&client, 2).await;
    let id_empleado = create_empleado(&client).await;

    for fecha in ["10/03/2025", "2024-06-15 13:45:0é"] {
        let response = client
            .post(format!("{}/asignaciones", BASE_URL))
            .json(&json!({
                "id_equipo": id_equipo,
                "id_empleado": id_empleado,
                "fecha_asignacion": fecha
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), 400, "fecha {:?} not rejected", fecha);
    }
}
