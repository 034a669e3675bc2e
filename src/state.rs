use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::chart::{Chart, ChartKind, ChartOptions, build_chart};
use crate::config::DashboardConfig;
use crate::data::cache::{FileSource, TableCache, TableSource};
use crate::data::columns::{
    AxisDefaults, AxisOverrides, AxisSelection, pick_column, resolve_axes,
};
use crate::data::model::ListingTable;
use crate::export::SampleFile;

// ---------------------------------------------------------------------------
// Events and notices
// ---------------------------------------------------------------------------

/// One discrete user action.  The UI turns clicks into these.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Plain page render (startup, or any interaction without a trigger).
    Render,
    BuildChart(ChartKind),
    ChooseX(String),
    ChooseY(String),
    OpenFile(PathBuf),
    /// Drop the cached table for the current path and read it again.
    Reload,
    ExportSample(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Error(String),
    Warning(String),
    Info(String),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Everything that survives between interactions lives here; the table cache
/// is the only part that outlives a path change.
pub struct Session<S = FileSource> {
    cache: TableCache<S>,
    data_path: PathBuf,
    sample_path: PathBuf,
    defaults: AxisDefaults,
    overrides: AxisOverrides,
    chart_options: ChartOptions,

    /// Loaded table (None if the last load failed).
    pub table: Option<Arc<ListingTable>>,
    /// Axes resolved during the last event.
    pub axes: Option<AxisSelection>,
    /// Chart built by the last event, if that event was a trigger.
    pub chart: Option<Chart>,
    /// Messages produced by the last event.
    pub notices: Vec<Notice>,
    /// Downloadable cleaned sample, if present on disk.
    pub sample: Option<SampleFile>,
}

impl Session<FileSource> {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::with_cache(TableCache::default(), config)
    }
}

impl<S: TableSource> Session<S> {
    pub fn with_cache(cache: TableCache<S>, config: &DashboardConfig) -> Self {
        Self {
            cache,
            data_path: config.data_path.clone(),
            sample_path: config.sample_path.clone(),
            defaults: config.axis_defaults(),
            overrides: AxisOverrides::default(),
            chart_options: config.chart_options(),
            table: None,
            axes: None,
            chart: None,
            notices: Vec::new(),
            sample: None,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn cache(&self) -> &TableCache<S> {
        &self.cache
    }

    /// Handle one user action.
    ///
    /// Each call starts from a clean slate: previous notices and chart are
    /// dropped, the table is fetched (from cache when possible), axes are
    /// re-resolved, then the action itself runs.  A load failure stops the
    /// event after posting a single error.
    pub fn handle(&mut self, event: Event) {
        log::debug!("handling {event:?}");
        self.notices.clear();
        self.chart = None;
        self.sample = SampleFile::locate(&self.sample_path);

        match &event {
            Event::OpenFile(path) => {
                self.data_path = path.clone();
                self.overrides = AxisOverrides::default();
            }
            Event::Reload => {
                self.cache.invalidate(&self.data_path);
            }
            _ => {}
        }

        let table = match self.cache.get_or_load(&self.data_path) {
            Ok(table) => table,
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.data_path.display());
                self.table = None;
                self.axes = None;
                self.notices.push(Notice::Error(e.to_string()));
                return;
            }
        };

        match &event {
            Event::ChooseX(col) => match pick_column(table.columns(), col) {
                Ok(col) => self.overrides.x = Some(col),
                Err(e) => self.warn(e.to_string()),
            },
            Event::ChooseY(col) => match pick_column(table.columns(), col) {
                Ok(col) => self.overrides.y = Some(col),
                Err(e) => self.warn(e.to_string()),
            },
            _ => {}
        }

        let axes = resolve_axes(table.columns(), &self.defaults, &self.overrides);

        match event {
            Event::BuildChart(kind) => {
                match build_chart(kind, &table, &axes, &self.chart_options) {
                    Ok(chart) => {
                        log::info!("Built {kind} from {:?}", chart.columns());
                        self.notices.push(Notice::Info(chart.caption()));
                        self.chart = Some(chart);
                    }
                    Err(e) => self.warn(e.to_string()),
                }
            }
            Event::ExportSample(dest) => self.export_sample(&dest),
            _ => {}
        }

        self.table = Some(table);
        self.axes = Some(axes);
    }

    fn export_sample(&mut self, dest: &Path) {
        let Some(sample) = &self.sample else {
            self.warn(format!("{} is not available", self.sample_path.display()));
            return;
        };
        match sample.export_to(dest) {
            Ok(n) => self
                .notices
                .push(Notice::Info(format!("Saved {n} bytes to {}", dest.display()))),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.notices.push(Notice::Error(format!("Export failed: {e:#}")));
            }
        }
    }

    fn warn(&mut self, msg: String) {
        log::warn!("{msg}");
        self.notices.push(Notice::Warning(msg));
    }
}
