//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::DeployAction;
use crate::services::{ApplicationReport, DeploymentReport, MonitorOutcome};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

impl TableDisplay for MonitorOutcome {
    fn to_table(&self) -> String {
        let unit = format!(
            "{}/{}",
            self.monitor_type,
            self.subtype.as_deref().unwrap_or("*")
        );
        let id = self
            .monitor_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut line = format!("  {:<28} {:<13} {}", unit, self.action.to_string(), id);
        if let Some(err) = &self.error {
            line.push_str(&format!("  ({})", err));
        }
        line
    }
}

impl TableDisplay for ApplicationReport {
    fn to_table(&self) -> String {
        let status = match (&self.error, self.persisted) {
            (Some(err), _) => format!("error: {}", err),
            (None, true) => "saved".to_string(),
            (None, false) => "unchanged".to_string(),
        };

        let mut output = format!("{} [{}]\n", self.application, status);
        for monitor in &self.monitors {
            output.push_str(&monitor.to_table());
            output.push('\n');
        }
        output
    }
}

impl TableDisplay for DeploymentReport {
    fn to_table(&self) -> String {
        let mut output = format!("Region: {}  Stage: {}", self.region, self.stage);
        if self.dry_run {
            output.push_str("  [DRY RUN]");
        }
        output.push_str("\n\n");

        for app in &self.applications {
            output.push_str(&app.to_table());
            output.push('\n');
        }

        output.push_str(&self.to_compact());
        output
    }

    fn to_compact(&self) -> String {
        let counts = [
            DeployAction::Created,
            DeployAction::Updated,
            DeployAction::WouldCreate,
            DeployAction::WouldUpdate,
            DeployAction::Failed,
            DeployAction::Skipped,
        ]
        .iter()
        .map(|action| (self.count(*action), action))
        .filter(|(n, _)| *n > 0)
        .map(|(n, action)| format!("{} {}", n, action))
        .collect::<Vec<_>>();

        let summary = if counts.is_empty() {
            "nothing to do".to_string()
        } else {
            counts.join(", ")
        };

        format!(
            "{}/{}: {} application(s), {}",
            self.region,
            self.stage,
            self.applications.len(),
            summary
        )
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> DeploymentReport {
        let mut app = ApplicationReport::new("checkout");
        app.persisted = true;
        app.monitors.push(MonitorOutcome {
            monitor_type: "system".to_string(),
            subtype: Some("cpu".to_string()),
            action: DeployAction::Created,
            monitor_id: Some(123456789),
            payload: None,
            error: None,
        });
        app.monitors
            .push(MonitorOutcome::type_skipped("aws-elb", "no location"));

        DeploymentReport {
            region: "eu-west-1".to_string(),
            stage: "prod".to_string(),
            dry_run: false,
            applications: vec![app],
        }
    }

    #[test]
    fn test_report_table() {
        let output = report().to_table();
        assert!(output.contains("checkout [saved]"));
        assert!(output.contains("system/cpu"));
        assert!(output.contains("123456789"));
        assert!(output.contains("aws-elb/*"));
        assert!(output.contains("(no location)"));
    }

    #[test]
    fn test_report_compact() {
        assert_eq!(
            report().to_compact(),
            "eu-west-1/prod: 1 application(s), 1 created, 1 skipped"
        );
    }

    #[test]
    fn test_report_json_omits_empty_fields() {
        let json = serde_json::to_value(report()).unwrap();
        let first = &json["applications"][0]["monitors"][0];
        assert_eq!(first["action"], "created");
        assert!(first.get("error").is_none());
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            message: "Operation completed".to_string(),
            success: true,
        };

        assert!(msg.to_table().starts_with('✓'));
    }
}
