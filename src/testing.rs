//! Test helpers
//!
//! A recording API double and an on-disk infrastructure fixture.

use crate::api::MonitorApi;
use crate::config::Config;
use crate::domain::{AlertPayload, AlertRef};
use crate::error::ApiError;
use crate::infra::{ApplicationConfig, Layer, LayerContext, LayerLocation};
use crate::services::MonitorDeployer;

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

/// Monitor API double that records every call
#[derive(Debug, Default)]
pub struct RecordingApi {
    creates: RefCell<Vec<AlertPayload>>,
    updates: RefCell<Vec<(AlertPayload, i64)>>,
    next_id: Cell<i64>,
    last_created: Cell<Option<i64>>,
    fail: bool,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1000),
            ..Self::default()
        }
    }

    /// An API whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Names of created alerts, in call order
    pub fn creates(&self) -> Vec<String> {
        self.creates.borrow().iter().map(|p| p.name.clone()).collect()
    }

    /// (name, id) of updated alerts, in call order
    pub fn updates(&self) -> Vec<(String, i64)> {
        self.updates
            .borrow()
            .iter()
            .map(|(p, id)| (p.name.clone(), *id))
            .collect()
    }

    /// Payloads of every call, creates first
    pub fn payloads(&self) -> Vec<AlertPayload> {
        let mut all = self.creates.borrow().clone();
        all.extend(self.updates.borrow().iter().map(|(p, _)| p.clone()));
        all
    }

    pub fn last_created_id(&self) -> Option<i64> {
        self.last_created.get()
    }
}

impl MonitorApi for RecordingApi {
    fn create(&self, payload: &AlertPayload) -> Result<AlertRef, ApiError> {
        self.creates.borrow_mut().push(payload.clone());
        if self.fail {
            return Err(ApiError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.last_created.set(Some(id));

        Ok(AlertRef {
            id,
            org_id: Some(1),
            creator: Some("tests@datacat".to_string()),
            created_at: Some("2024-01-01T00:00:00+00:00".to_string()),
            updated_at: Some("2024-01-01T00:00:00+00:00".to_string()),
        })
    }

    fn update(&self, payload: &AlertPayload, alert_id: i64) -> Result<AlertRef, ApiError> {
        self.updates.borrow_mut().push((payload.clone(), alert_id));
        if self.fail {
            return Err(ApiError::Request("connection reset".to_string()));
        }
        Ok(AlertRef {
            updated_at: Some("2024-01-02T00:00:00+00:00".to_string()),
            ..AlertRef::new(alert_id)
        })
    }
}

/// Minimal payload named `name`
pub fn payload(name: &str) -> AlertPayload {
    AlertPayload {
        name: name.to_string(),
        message: "message".to_string(),
        options: serde_json::json!({}),
        query: "avg(last_5m):avg:system.cpu.user{*} > 90".to_string(),
        tags: Vec::new(),
        alert_type: "metric alert".to_string(),
    }
}

/// Region/stage context from YAML text
pub fn context(region: &str, stage: &str) -> LayerContext {
    LayerContext {
        region: Layer::new(
            LayerLocation::Region,
            "eu-west-1",
            serde_yaml::from_str(region).unwrap(),
        ),
        stage: Layer::new(
            LayerLocation::Stage,
            "prod",
            serde_yaml::from_str(stage).unwrap(),
        ),
    }
}

/// In-memory application config from YAML text
pub fn application(yaml: &str) -> ApplicationConfig {
    ApplicationConfig::new(
        PathBuf::from("application.yaml"),
        Layer::new(
            LayerLocation::Application,
            "checkout",
            serde_yaml::from_str(yaml).unwrap(),
        ),
    )
}

pub const REGION_YAML: &str = r#"
default_configs:
  notification_channel: "@region-ops"
system_configs:
  cpu:
    warning_threshold: 80
    critical_threshold: 95
"#;

pub const STAGE_YAML: &str = r#"
default_configs:
  notification_channel: "@stage-ops"
system_configs:
  cpu:
    warning_threshold: 70
    critical_threshold: 90
aws-elb_configs:
  latency:
    warning_threshold: 1
    critical_threshold: 2
"#;

pub const CHECKOUT_YAML: &str = "\
default_configs_location: region
system_configs_location: stage
aws-elb_configs_location: stage
";

pub const PAYMENTS_YAML: &str = "\
default_configs_location: stage
system_configs_location: region
aws-elb_configs_location: stage
";

pub const CPU_TEMPLATE: &str = r#"name: "[{stage}] {application_name} cpu usage"
type: metric alert
query: "avg(last_5m):avg:system.cpu.user{{app:{application_name}}} > {critical_threshold}"
message: "CPU high on {application_name} {notification_channel}"
tags:
  - "app:{application_name}"
monitor_options:
  thresholds:
    warning: {warning_threshold}
    critical: {critical_threshold}
"#;

pub const LATENCY_TEMPLATE: &str = r#"name: "[{stage}] {application_name} elb latency"
type: query alert
query: "avg(last_10m):avg:aws.elb.latency{{app:{application_name}}} > {critical_threshold}"
message: "ELB latency high {notification_channel}"
tags: ["app:{application_name}"]
"#;

/// Infrastructure tree under a temp dir: region `eu-west-1`, stage `prod`,
/// applications `checkout` and `payments`
pub struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    pub fn standard() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };

        let region_dir = fixture.infra_dir().join("eu-west-1");
        std::fs::create_dir_all(region_dir.join("prod")).unwrap();
        std::fs::write(region_dir.join("region.yaml"), REGION_YAML).unwrap();
        std::fs::write(region_dir.join("prod").join("stage.yaml"), STAGE_YAML).unwrap();
        fixture.write_application("checkout", CHECKOUT_YAML);
        fixture.write_application("payments", PAYMENTS_YAML);

        fixture.write_template("system", "cpu", CPU_TEMPLATE);
        fixture.write_template("aws-elb", "latency", LATENCY_TEMPLATE);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn infra_dir(&self) -> PathBuf {
        self.root().join("infra")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root().join("templates")
    }

    fn application_file(&self, name: &str) -> PathBuf {
        self.infra_dir()
            .join("eu-west-1")
            .join("prod")
            .join(name)
            .join("application.yaml")
    }

    pub fn write_application(&self, name: &str, content: &str) {
        let path = self.application_file(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn write_template(&self, monitor_type: &str, subtype: &str, content: &str) {
        let dir = self.templates_dir().join(monitor_type);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{}.yaml", subtype)), content).unwrap();
    }

    pub fn read_application(&self, name: &str) -> String {
        std::fs::read_to_string(self.application_file(name)).unwrap()
    }

    pub fn load_application(&self, name: &str) -> ApplicationConfig {
        ApplicationConfig::load(self.application_file(name), name).unwrap()
    }

    /// Tool config rooted at the fixture
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.runtime.root = self.root().to_path_buf();
        config
    }

    pub fn deployer<'a>(&self, api: Option<&'a dyn MonitorApi>) -> MonitorDeployer<'a> {
        MonitorDeployer::from_config(&self.config(), api).unwrap()
    }
}
