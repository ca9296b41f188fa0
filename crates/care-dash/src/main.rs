mod bootstrap;
mod export;

use std::sync::Arc;

use anyhow::{Context, Result};
use bootstrap::LogSink;
use dash_core::settings::Settings;
use dash_data::reader::load_dataset;
use dash_runtime::controls::ControlOptions;
use dash_runtime::orchestrator::DashboardOrchestrator;
use dash_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let app_dir = bootstrap::ensure_directories()?;
    let sink = if settings.export.is_some() {
        LogSink::Stderr
    } else {
        LogSink::File(
            settings
                .log_file
                .clone()
                .unwrap_or_else(|| bootstrap::default_log_file(&app_dir)),
        )
    };
    bootstrap::setup_logging(&settings.log_level, sink)?;

    tracing::info!("Healthcare dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, Theme: {}, Chart style: {}",
        settings.data_file.display(),
        settings.theme,
        settings.chart_style
    );

    // Startup phase: the dataset is loaded once and shared read-only.
    let dataset = load_dataset(&settings.data_file)
        .with_context(|| format!("failed to load {}", settings.data_file.display()))?;
    let dataset = Arc::new(dataset);

    let options = ControlOptions::from_dataset(&dataset);
    let controls = bootstrap::initial_controls(&settings, &options);

    if let Some(path) = &settings.export {
        let doc = export::build_export(Arc::clone(&dataset), controls, options.slider.clone());
        export::write_export(&doc, path)?;
        return Ok(());
    }

    let orchestrator = DashboardOrchestrator::new(Arc::clone(&dataset), controls.clone());
    let (channels, handle) = orchestrator.start();

    let app = App::new(&settings.theme, dataset.summary(), options, controls);

    // The TUI exits on 'q' / Ctrl+C itself; the OS-level signal covers the
    // window before raw mode is enabled.
    tokio::select! {
        result = app.run(channels) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down dashboard");
            handle.abort();
        }
    }

    tracing::info!("Dashboard closed");
    Ok(())
}
