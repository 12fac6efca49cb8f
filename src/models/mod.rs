//! Data models for Activar

pub mod assignment;
pub mod employee;
pub mod equipment;
pub mod ip_address;
pub mod organization;

// Re-export commonly used types
pub use assignment::{Asignacion, AsignacionDetails, CreateAsignacion, UpdateAsignacion};
pub use employee::Empleado;
pub use equipment::{CreateEquipo, Equipo, EquipoDetails, UpdateEquipo};
pub use ip_address::DireccionIp;
pub use organization::{Area, Empresa, Status, Sucursal, TipoEquipo};
