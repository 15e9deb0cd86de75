//! Infrastructure tree
//!
//! Loads the region/stage/application YAML hierarchy and persists
//! application deployment state.

pub mod application;
pub mod layer;
pub mod tree;

pub use application::{ApplicationConfig, DeployedState};
pub use layer::{Layer, LayerLocation};
pub use tree::{InfraTree, LayerContext};
