//! `--export` mode: render every figure once and write them as pretty JSON.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use dash_core::chart::Figure;
use dash_data::dataset::{Dataset, SummaryStats};
use dash_runtime::controls::{BillingSlider, Controls};
use dash_runtime::dispatcher::{Dispatcher, FigureId};
use serde::Serialize;

/// The exported document.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub summary: SummaryStats,
    pub controls: Controls,
    pub slider: BillingSlider,
    pub figures: BTreeMap<FigureId, Figure>,
}

pub fn build_export(dataset: Arc<Dataset>, controls: Controls, slider: BillingSlider) -> ExportDocument {
    let summary = dataset.summary();
    let dispatcher = Dispatcher::new(dataset, controls);
    let figures = dispatcher.render_all().into_iter().collect();
    ExportDocument {
        summary,
        controls: dispatcher.controls().clone(),
        slider,
        figures,
    }
}

/// Write `doc` to `path`, or to stdout when `path` is `-`.
pub fn write_export(doc: &ExportDocument, path: &Path) -> anyhow::Result<()> {
    if path == Path::new("-") {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        serde_json::to_writer_pretty(&mut lock, doc)?;
        writeln!(lock)?;
    } else {
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, doc)?;
        writeln!(file)?;
        tracing::info!(path = %path.display(), figures = doc.figures.len(), "export written");
    }
    Ok(())
}
