//! Domain models
//!
//! Monitor types, handlers, and alert payloads.

pub mod alert;
pub mod monitor;

pub use alert::{AlertPayload, AlertRef, DeployAction};
pub use monitor::{MonitorHandler, MonitorKind, MonitorRegistry, MonitorType};
