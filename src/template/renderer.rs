//! Template renderer
//!
//! Loads `<templates_dir>/<type>/<subtype>.yaml`, substitutes variables, and
//! parses the result into an [`AlertPayload`].

use crate::domain::AlertPayload;
use crate::error::RenderError;
use crate::template::Variables;

use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Everything needed to render one (type, subtype) unit
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub region: &'a str,
    pub stage: &'a str,
    pub application: &'a str,
    pub monitor_type: &'a str,
    pub monitor_subtype: &'a str,
    /// Resolved `default_configs`
    pub defaults: &'a Value,
    /// Resolved `<type>_configs.<subtype>`
    pub settings: &'a Value,
    /// Identifier of the alert being updated, if any
    pub monitor_id: Option<i64>,
}

impl RenderRequest<'_> {
    /// Build the variable set: defaults, then subtype settings, then the
    /// fixed variables, each layer overriding the previous one
    pub fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.extend_from_yaml(self.defaults);
        vars.extend_from_yaml(self.settings);

        vars.set("region", self.region);
        vars.set("stage", self.stage);
        vars.set("application_name", self.application);
        vars.set("monitor_type", self.monitor_type);
        vars.set("monitor_subtype", self.monitor_subtype);
        vars.set(
            "monitor_id",
            self.monitor_id.map(|id| id.to_string()).unwrap_or_default(),
        );
        vars
    }
}

/// Fields of a template document after substitution
#[derive(Debug, Deserialize)]
struct TemplateDocument {
    name: Option<String>,
    message: Option<String>,
    monitor_options: Option<serde_json::Value>,
    query: Option<String>,
    tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    alert_type: Option<String>,
}

/// Renders monitor templates from a template tree
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    templates_dir: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer rooted at `templates_dir`
    pub fn new<P: AsRef<Path>>(templates_dir: P) -> Self {
        Self {
            templates_dir: templates_dir.as_ref().to_path_buf(),
        }
    }

    /// Location of the template for a (type, subtype) pair
    pub fn template_path(&self, monitor_type: &str, monitor_subtype: &str) -> PathBuf {
        self.templates_dir
            .join(monitor_type)
            .join(format!("{}.yaml", monitor_subtype))
    }

    /// Load, substitute, and parse the template for `request`
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<AlertPayload, RenderError> {
        let path = self.template_path(request.monitor_type, request.monitor_subtype);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound(path));
        }

        let text = std::fs::read_to_string(&path).map_err(|source| RenderError::Read {
            path: path.clone(),
            source,
        })?;

        render_text(&path, &text, &request.variables())
    }
}

/// Substitute `vars` into `text` and extract the payload fields
///
/// `path` is only used for error context.
pub fn render_text(path: &Path, text: &str, vars: &Variables) -> Result<AlertPayload, RenderError> {
    let rendered = vars.substitute(text);
    log::debug!("Rendered {}:\n{}", path.display(), rendered);

    let doc: TemplateDocument =
        serde_yaml::from_str(&rendered).map_err(|e| RenderError::Unparsable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let missing = |field: &'static str| RenderError::MissingField {
        path: path.to_path_buf(),
        field,
    };

    Ok(AlertPayload {
        name: doc.name.ok_or_else(|| missing("name"))?,
        message: doc.message.ok_or_else(|| missing("message"))?,
        options: doc
            .monitor_options
            .filter(|o| !o.is_null())
            .unwrap_or_else(|| serde_json::json!({})),
        query: doc.query.ok_or_else(|| missing("query"))?,
        tags: doc.tags.unwrap_or_default(),
        alert_type: doc.alert_type.ok_or_else(|| missing("type"))?,
    })
}
