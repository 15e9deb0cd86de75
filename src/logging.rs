//! Logging setup
//!
//! env_logger backend writing every record to the console and to
//! `<log_folder>/<date>.<pid>.log`, formatted with the configured pattern.
//! The console is stdout, except with `--format json`, where stdout carries
//! only the report and records go to stderr.

use crate::cli::args::OutputFormat;
use crate::config::{Config, MainConfig};
use crate::template::substitute_with;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use env_logger::{Env, Target, WriteStyle};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Log line layout
#[derive(Debug, Clone)]
pub struct LogFormat {
    pattern: String,
    date_fmt: String,
}

impl LogFormat {
    /// Build from the `[main]` config, falling back to the default date
    /// format when the configured one is not valid strftime
    pub fn from_config(main: &MainConfig) -> Self {
        let date_fmt = if is_valid_strftime(&main.log_date_fmt) {
            main.log_date_fmt.clone()
        } else {
            MainConfig::DEFAULT_DATE_FMT.to_string()
        };

        Self {
            pattern: main.log_pattern.clone(),
            date_fmt,
        }
    }

    /// Render one record
    pub fn format_line(
        &self,
        now: DateTime<Local>,
        level: log::Level,
        target: &str,
        message: &str,
    ) -> String {
        substitute_with(&self.pattern, |name| match name {
            "timestamp" => Some(now.format(&self.date_fmt).to_string()),
            "level" => Some(format!("{:<5}", level)),
            "target" => Some(target.to_string()),
            "message" => Some(message.to_string()),
            _ => None,
        })
    }
}

fn is_valid_strftime(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

/// Console stream log records are echoed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Stdout,
    Stderr,
}

impl Console {
    /// Keep stdout machine-readable for JSON output
    pub fn for_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Console::Stderr,
            OutputFormat::Table | OutputFormat::Compact => Console::Stdout,
        }
    }

    fn target(self) -> Target {
        match self {
            Console::Stdout => Target::Stdout,
            Console::Stderr => Target::Stderr,
        }
    }
}

/// Writes every record to the console and the log file
struct Tee {
    console: Console,
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.console {
            Console::Stdout => io::stdout().write_all(buf)?,
            Console::Stderr => io::stderr().write_all(buf)?,
        }
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.console {
            Console::Stdout => io::stdout().flush()?,
            Console::Stderr => io::stderr().flush()?,
        }
        self.file.flush()
    }
}

/// Log file path for this process
pub fn log_file_path(folder: &Path) -> PathBuf {
    let today = Local::now().format("%Y-%m-%d");
    folder.join(format!("{}.{}.log", today, std::process::id()))
}

fn create_log_folder(folder: &Path) -> io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o750);
    }
    builder.create(folder)
}

fn open_log_file(folder: &Path) -> io::Result<(File, PathBuf)> {
    create_log_folder(folder)?;
    let path = log_file_path(folder);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Initialize the global logger
///
/// Returns the log file in use, or `None` when only the console could be
/// used. `RUST_LOG` overrides the default level.
pub fn init(config: &Config, console: Console) -> Option<PathBuf> {
    let default_level = if config.runtime.verbose { "debug" } else { "info" };
    let format = LogFormat::from_config(&config.main);

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_level));
    builder.write_style(WriteStyle::Never);
    builder.format(move |buf, record| {
        let line = format.format_line(
            Local::now(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        writeln!(buf, "{}", line)
    });

    let folder = config.log_folder();
    let (log_file, open_error) = match open_log_file(&folder) {
        Ok((file, path)) => {
            builder.target(Target::Pipe(Box::new(Tee { console, file })));
            (Some(path), None)
        }
        Err(e) => {
            builder.target(console.target());
            (None, Some(e))
        }
    };

    if builder.try_init().is_err() {
        return None;
    }

    if let Some(e) = open_error {
        log::warn!(
            "Cannot open log file in {}: {}; logging to the console only",
            folder.display(),
            e
        );
    }

    log_file
}
