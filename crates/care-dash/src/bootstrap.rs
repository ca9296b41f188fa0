use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dash_core::settings::Settings;
use dash_runtime::controls::{ControlOptions, Controls};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure `~/.care-dash/` and `~/.care-dash/logs/` exist; returns the
/// application directory.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ensure_directories_in(&home)
}

/// Same as [`ensure_directories`] rooted at `home` (used for testing).
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<PathBuf> {
    let app_dir = home.join(".care-dash");
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

/// Default log file inside the application directory.
pub fn default_log_file(app_dir: &Path) -> PathBuf {
    app_dir.join("logs").join("care-dash.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Where log output goes.  The TUI owns the terminal, so interactive runs log
/// to a file; export runs log to stderr.
#[derive(Debug, Clone, PartialEq)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
}

/// Map a `--log-level` value to an [`EnvFilter`] directive.
pub fn level_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber.
pub fn setup_logging(log_level: &str, sink: LogSink) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match sink {
        LogSink::Stderr => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogSink::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

// ── Initial controls ───────────────────────────────────────────────────────────

/// Controls at startup: dataset defaults overridden by any `--gender`,
/// `--condition`, `--billing-ceiling` and `--chart-style` given.
pub fn initial_controls(settings: &Settings, options: &ControlOptions) -> Controls {
    let mut controls = options.initial_controls();

    if let Some(gender) = &settings.gender {
        if !options.genders.contains(gender) {
            tracing::warn!(%gender, "gender not present in dataset; charts will be empty");
        }
        controls.gender = Some(gender.clone());
    }
    if let Some(condition) = &settings.condition {
        if !options.conditions.contains(condition) {
            tracing::warn!(%condition, "condition not present in dataset");
        }
        controls.condition = Some(condition.clone());
    }
    if let Some(ceiling) = settings.billing_ceiling {
        controls.billing_ceiling = options.slider.clamp(ceiling);
    }
    controls.chart_style = settings.chart_style();

    controls
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dash_core::chart::ChartStyle;
    use dash_core::models::Record;
    use dash_data::dataset::Dataset;
    use tempfile::TempDir;

    fn options() -> ControlOptions {
        let rows = [("Male", "Flu", 100.0), ("Female", "Asthma", 300.0)]
            .into_iter()
            .map(|(gender, condition, billing)| Record {
                gender: gender.to_string(),
                age: Some(50),
                medical_condition: condition.to_string(),
                insurance_provider: "Aetna".to_string(),
                billing_amount: Some(billing),
                admission_date: None,
                year_month: None,
            })
            .collect();
        ControlOptions::from_dataset(&Dataset::new(rows))
    }

    #[test]
    fn test_ensure_directories_in() {
        let tmp = TempDir::new().expect("tempdir");
        let app_dir = ensure_directories_in(tmp.path()).expect("create dirs");

        assert_eq!(app_dir, tmp.path().join(".care-dash"));
        assert!(app_dir.is_dir(), ".care-dash dir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");

        // Idempotent.
        ensure_directories_in(tmp.path()).expect("second call");
    }

    #[test]
    fn test_default_log_file() {
        let path = default_log_file(Path::new("/home/u/.care-dash"));
        assert_eq!(path, PathBuf::from("/home/u/.care-dash/logs/care-dash.log"));
    }

    #[test]
    fn test_level_directive_mapping() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("verbose"), "info");
    }

    #[test]
    fn test_initial_controls_defaults() {
        let settings = Settings::parse_from(["care-dash"]);
        let controls = initial_controls(&settings, &options());
        assert!(controls.gender.is_none());
        assert!(controls.condition.is_none());
        assert_eq!(controls.billing_ceiling, 200.0);
        assert_eq!(controls.chart_style, ChartStyle::Line);
    }

    #[test]
    fn test_initial_controls_from_cli() {
        let settings = Settings::parse_from([
            "care-dash",
            "--gender",
            "Female",
            "--condition",
            "Flu",
            "--billing-ceiling",
            "250",
            "--chart-style",
            "bar",
        ]);
        let controls = initial_controls(&settings, &options());
        assert_eq!(controls.gender.as_deref(), Some("Female"));
        assert_eq!(controls.condition.as_deref(), Some("Flu"));
        assert_eq!(controls.billing_ceiling, 250.0);
        assert_eq!(controls.chart_style, ChartStyle::Bar);
    }

    #[test]
    fn test_initial_controls_clamps_ceiling() {
        let settings = Settings::parse_from(["care-dash", "--billing-ceiling", "9000"]);
        let controls = initial_controls(&settings, &options());
        assert_eq!(controls.billing_ceiling, 300.0);
    }

    #[test]
    fn test_initial_controls_keeps_unknown_gender() {
        let settings = Settings::parse_from(["care-dash", "--gender", "Other"]);
        let controls = initial_controls(&settings, &options());
        assert_eq!(controls.gender.as_deref(), Some("Other"));
    }
}
