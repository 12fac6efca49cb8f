//! Activar Server - IT Asset Inventory and Assignment Tracking
//!
//! REST API server for equipment, employees, IP addresses and assignments.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use activar_server::{
    api, config::AppConfig, repository::Repository, services::Services, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("activar_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Activar Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Asignaciones
        .route("/asignaciones", get(api::assignments::list_asignaciones))
        .route("/asignaciones", post(api::assignments::create_asignacion))
        .route(
            "/asignaciones/con-componentes",
            post(api::assignments::create_asignacion_con_componentes),
        )
        .route("/asignaciones/:id", get(api::assignments::get_asignacion))
        .route("/asignaciones/:id", put(api::assignments::update_asignacion))
        .route("/asignaciones/:id", delete(api::assignments::delete_asignacion))
        .route(
            "/asignaciones/:id/componentes",
            get(api::assignments::get_componentes),
        )
        .route(
            "/asignaciones/:id/componentes",
            put(api::assignments::update_componentes),
        )
        // Equipos
        .route("/equipos", get(api::equipment::list_equipos))
        .route("/equipos", post(api::equipment::create_equipo))
        .route(
            "/equipos/disponibles-componentes",
            get(api::equipment::list_disponibles_componentes),
        )
        .route("/equipos/:id", get(api::equipment::get_equipo))
        .route("/equipos/:id", put(api::equipment::update_equipo))
        .route("/equipos/:id", delete(api::equipment::delete_equipo))
        // Direcciones IP
        .route("/direcciones-ip", get(api::ip_addresses::list_direcciones_ip))
        .route("/direcciones-ip", post(api::ip_addresses::create_direccion_ip))
        .route("/direcciones-ip/:id", get(api::ip_addresses::get_direccion_ip))
        .route("/direcciones-ip/:id", put(api::ip_addresses::update_direccion_ip))
        .route(
            "/direcciones-ip/:id",
            delete(api::ip_addresses::delete_direccion_ip),
        )
        // Empleados
        .route("/empleados", get(api::employees::list_empleados))
        .route("/empleados", post(api::employees::create_empleado))
        .route("/empleados/:id", get(api::employees::get_empleado))
        .route("/empleados/:id", put(api::employees::update_empleado))
        .route("/empleados/:id", delete(api::employees::delete_empleado))
        // Organización
        .route("/sucursales", get(api::organization::list_sucursales))
        .route("/areas", get(api::organization::list_areas))
        .route("/tipos-equipo", get(api::organization::list_tipos_equipo))
        .route("/status", get(api::organization::list_status))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
