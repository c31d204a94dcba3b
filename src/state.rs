use crate::config::AppConfig;
use crate::data::cache::{LoadCache, Records};
use crate::data::loader::{self, LoadError, Source};
use crate::data::model::{DerivedStateView, TableRow};
use crate::data::stats::{build_view, states};
use crate::map::MapArtifact;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Load results per source, owned here rather than globally.
    pub cache: LoadCache,

    /// Where the current records came from.
    pub source: Option<Source>,

    /// Loaded records (None until a source loads successfully).
    pub records: Option<Records>,

    /// Distinct states of `records`, sorted.
    pub states: Vec<String>,

    /// State chosen in the picker.
    pub selected_state: Option<String>,

    /// View for `selected_state` (cached until selection or data changes).
    pub view: Option<DerivedStateView>,

    /// Sorted rows of `view`.
    pub table: Vec<TableRow>,

    pub map: MapArtifact,

    /// Text of the URL field in the top bar.
    pub url_input: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let map = MapArtifact::load(&config.map_path);
        Self {
            url_input: config.counties_url.clone().unwrap_or_default(),
            cache: LoadCache::new(),
            source: None,
            records: None,
            states: Vec::new(),
            selected_state: None,
            view: None,
            table: Vec::new(),
            map,
            status_message: None,
            config,
        }
    }

    /// Initial load: configured URL, else the default CSV if it exists.
    pub fn load_startup_source(&mut self) {
        if let Some(url) = self.config.counties_url.clone() {
            self.open_source(Source::Url(url), false);
        } else if self.config.counties_csv.exists() {
            self.open_source(Source::Path(self.config.counties_csv.clone()), false);
        } else {
            log::info!(
                "No startup source: {} not found and no URL configured",
                self.config.counties_csv.display()
            );
        }
    }

    /// Load `source` (through the cache unless `refresh`) and make it current.
    ///
    /// On failure the previous data stays in place and the error is shown.
    pub fn open_source(&mut self, source: Source, refresh: bool) {
        let opts = self.config.fetch_options();
        let load = |s: &Source| loader::load(s, opts);
        let result = if refresh {
            self.cache.refresh(&source, load)
        } else {
            self.cache.get_or_load(&source, load)
        };

        match result {
            Ok(records) => {
                log::info!("{} records from {source}", records.len());
                self.status_message = None;
                self.set_records(records);
                self.source = Some(source);
            }
            Err(e) => self.report_load_error(&source, e),
        }
    }

    /// Reload the current source, bypassing the cache.
    pub fn reload(&mut self) {
        if let Some(source) = self.source.clone() {
            self.open_source(source, true);
        }
    }

    fn report_load_error(&mut self, source: &Source, e: LoadError) {
        log::error!("Failed to load {source}: {e:#}");
        self.status_message = Some(format!("Error: {e}"));
    }

    /// Ingest newly loaded records; keep the selected state if it still exists.
    pub fn set_records(&mut self, records: Records) {
        self.states = states(&records);

        let keep = self.selected_state.as_ref().and_then(|sel| {
            self.states
                .iter()
                .find(|s| s.eq_ignore_ascii_case(sel))
                .cloned()
        });
        self.selected_state = keep.or_else(|| self.states.first().cloned());
        self.records = Some(records);
        self.rebuild_view();

        if self.states.is_empty() {
            self.status_message = Some("No states found in the data.".to_string());
        }
    }

    pub fn select_state(&mut self, state: String) {
        if self.selected_state.as_deref() != Some(state.as_str()) {
            self.selected_state = Some(state);
            self.rebuild_view();
        }
    }

    /// Recompute `view` and `table` after selection or data change.
    pub fn rebuild_view(&mut self) {
        self.view = match (&self.records, &self.selected_state) {
            (Some(records), Some(state)) => Some(build_view(records, state)),
            _ => None,
        };
        self.table = self.view.as_ref().map(|v| v.table()).unwrap_or_default();
    }
}
