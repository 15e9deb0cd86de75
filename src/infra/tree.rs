//! Infrastructure tree layout
//!
//! `<infra>/<region>/region.yaml`, `<infra>/<region>/<stage>/stage.yaml`,
//! `<infra>/<region>/<stage>/<application>/application.yaml`.

use crate::error::ConfigError;
use crate::infra::{ApplicationConfig, Layer, LayerLocation};

use std::path::{Path, PathBuf};

pub const REGION_FILE: &str = "region.yaml";
pub const STAGE_FILE: &str = "stage.yaml";
pub const APPLICATION_FILE: &str = "application.yaml";

/// Region and stage layers for one run; never mutated after loading
#[derive(Debug, Clone)]
pub struct LayerContext {
    pub region: Layer,
    pub stage: Layer,
}

impl LayerContext {
    /// Region name
    pub fn region_name(&self) -> &str {
        self.region.name()
    }

    /// Stage name
    pub fn stage_name(&self) -> &str {
        self.stage.name()
    }
}

/// Read access to the infrastructure tree
#[derive(Debug, Clone)]
pub struct InfraTree {
    root: PathBuf,
}

impl InfraTree {
    /// Create a tree rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn stage_dir(&self, region: &str, stage: &str) -> PathBuf {
        self.root.join(region).join(stage)
    }

    pub fn application_file(&self, region: &str, stage: &str, application: &str) -> PathBuf {
        self.stage_dir(region, stage)
            .join(application)
            .join(APPLICATION_FILE)
    }

    /// Load the region and stage layers
    pub fn load_context(&self, region: &str, stage: &str) -> Result<LayerContext, ConfigError> {
        let region_layer = Layer::load(
            self.root.join(region).join(REGION_FILE),
            LayerLocation::Region,
            region,
        )?;
        let stage_layer = Layer::load(
            self.stage_dir(region, stage).join(STAGE_FILE),
            LayerLocation::Stage,
            stage,
        )?;

        Ok(LayerContext {
            region: region_layer,
            stage: stage_layer,
        })
    }

    /// Load one application config
    pub fn load_application(
        &self,
        region: &str,
        stage: &str,
        application: &str,
    ) -> Result<ApplicationConfig, ConfigError> {
        ApplicationConfig::load(
            self.application_file(region, stage, application),
            application,
        )
    }

    /// Names of every application directory holding an `application.yaml`, sorted
    pub fn list_applications(&self, region: &str, stage: &str) -> Result<Vec<String>, ConfigError> {
        let dir = self.stage_dir(region, stage);
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| ConfigError::from_read(&dir, e))?;

        let mut apps: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(APPLICATION_FILE).is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();

        apps.sort();
        Ok(apps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let stage = dir.path().join("eu-west-1").join("prod");
        for app in ["payments", "checkout"] {
            std::fs::create_dir_all(stage.join(app)).unwrap();
            std::fs::write(stage.join(app).join(APPLICATION_FILE), "a: 1\n").unwrap();
        }
        std::fs::create_dir_all(stage.join("scratch")).unwrap();
        std::fs::write(dir.path().join("eu-west-1").join(REGION_FILE), "r: 1\n").unwrap();
        std::fs::write(stage.join(STAGE_FILE), "s: 1\n").unwrap();
        dir
    }

    #[test]
    fn test_list_applications_sorted_and_filtered() {
        let dir = scaffold();
        let tree = InfraTree::new(dir.path());
        let apps = tree.list_applications("eu-west-1", "prod").unwrap();
        assert_eq!(apps, vec!["checkout", "payments"]);
    }

    #[test]
    fn test_list_applications_missing_stage() {
        let dir = scaffold();
        let tree = InfraTree::new(dir.path());
        assert!(tree.list_applications("eu-west-1", "dev").is_err());
    }

    #[test]
    fn test_load_context() {
        let dir = scaffold();
        let ctx = InfraTree::new(dir.path())
            .load_context("eu-west-1", "prod")
            .unwrap();
        assert_eq!(ctx.region_name(), "eu-west-1");
        assert_eq!(ctx.stage_name(), "prod");
        assert!(ctx.stage.get("s").is_some());
    }

    #[test]
    fn test_load_context_missing_region_file() {
        let dir = scaffold();
        std::fs::remove_file(dir.path().join("eu-west-1").join(REGION_FILE)).unwrap();
        let result = InfraTree::new(dir.path()).load_context("eu-west-1", "prod");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
