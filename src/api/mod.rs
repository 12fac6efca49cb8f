//! API handlers for the Activar REST endpoints

pub mod assignments;
pub mod employees;
pub mod equipment;
pub mod health;
pub mod ip_addresses;
pub mod openapi;
pub mod organization;
