//! Service layer for monitor deployment
//!
//! Services encapsulate config resolution and the deployment loop.

pub mod deployer;
pub mod report;
pub mod resolver;

pub use deployer::{DeployRequest, MonitorDeployer};
pub use report::{ApplicationReport, DeploymentReport, MonitorOutcome};
pub use resolver::{ConfigResolver, ResolvedDefaults, ResolvedMonitorType};
