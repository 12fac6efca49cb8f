//! Activar - IT Asset Inventory and Assignment Tracking
//!
//! A Rust REST API server that tracks company equipment, employees, IP
//! addresses and the assignments that tie them together, keeping every
//! status in sync through the assignment lifecycle.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod rules;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
