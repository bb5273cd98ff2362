use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::color::CategoryColors;
use crate::data::aggregate::{Exploration, explore};
use crate::data::export::{write_exploration_json, write_view_csv};
use crate::data::filter::{FilterSelection, apply};
use crate::data::loader::load;
use crate::data::model::Dataset;
use crate::error::ExplorerError;

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    About,
    Projects,
    Explorer,
    Playground,
    Contact,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::About,
        Tab::Projects,
        Tab::Explorer,
        Tab::Playground,
        Tab::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::About => "👤 About Me",
            Tab::Projects => "📁 Projects",
            Tab::Explorer => "📊 Data Explorer",
            Tab::Playground => "🧪 Data Science Playground",
            Tab::Contact => "✉ Contact Me",
        }
    }
}

/// The two multi-select filter columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Geography,
    Gender,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub tab: Tab,

    /// Loaded dataset (None when loading failed).
    pub dataset: Option<Dataset>,

    /// Where the current dataset came from.
    pub data_path: Option<PathBuf>,

    /// Selection edited by the filter widgets.
    pub selection: FilterSelection,

    /// Result for the last selection passed to [`AppState::refresh`].
    pub exploration: Option<Exploration>,

    pub bin_count: usize,

    pub geography_colors: CategoryColors,
    pub gender_colors: CategoryColors,

    /// Input of the playground tab.
    pub playground_number: i64,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(bin_count: usize) -> Self {
        Self {
            tab: Tab::default(),
            dataset: None,
            data_path: None,
            selection: FilterSelection {
                geographies: BTreeSet::new(),
                genders: BTreeSet::new(),
                age_min: 0,
                age_max: 0,
            },
            exploration: None,
            bin_count,
            geography_colors: CategoryColors::default(),
            gender_colors: CategoryColors::default(),
            playground_number: 0,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, select everything and recompute.
    pub fn set_dataset(&mut self, path: PathBuf, dataset: Dataset) {
        self.selection = FilterSelection::all(&dataset);
        self.geography_colors = CategoryColors::new(&dataset.geographies);
        self.gender_colors = CategoryColors::new(&dataset.genders);
        self.exploration = Some(explore(&dataset, &self.selection, self.bin_count));

        self.dataset = Some(dataset);
        self.data_path = Some(path);
        self.status_message = None;
    }

    /// A failed load leaves no dataset behind.
    pub fn set_load_error(&mut self, err: &ExplorerError) {
        log::error!("{err}");
        self.dataset = None;
        self.data_path = None;
        self.exploration = None;
        self.status_message = Some(format!("Error: {err}"));
    }

    pub fn open(&mut self, path: &Path) {
        match load(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} customers with columns {:?}",
                    dataset.len(),
                    dataset.columns
                );
                self.set_dataset(path.to_path_buf(), dataset);
            }
            Err(e) => self.set_load_error(&e),
        }
    }

    /// Recompute the exploration if the selection changed since last time.
    pub fn refresh(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let stale = self
            .exploration
            .as_ref()
            .map_or(true, |ex| ex.selection != self.selection);
        if stale {
            self.exploration = Some(explore(ds, &self.selection, self.bin_count));
        }
    }

    pub fn selected_mut(&mut self, category: Category) -> &mut BTreeSet<String> {
        match category {
            Category::Geography => &mut self.selection.geographies,
            Category::Gender => &mut self.selection.genders,
        }
    }

    /// Select every value of a category.
    pub fn select_all(&mut self, category: Category) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let all = match category {
            Category::Geography => ds.geographies.clone(),
            Category::Gender => ds.genders.clone(),
        };
        *self.selected_mut(category) = all;
        self.refresh();
    }

    /// Deselect every value of a category.
    pub fn select_none(&mut self, category: Category) {
        self.selected_mut(category).clear();
        self.refresh();
    }

    /// Toggle a single value in a category's filter.
    pub fn toggle(&mut self, category: Category, value: &str) {
        let selected = self.selected_mut(category);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refresh();
    }

    /// Move the lower age bound, pushing the upper one along if needed.
    pub fn set_age_min(&mut self, age: i64) {
        self.selection.age_min = age;
        self.selection.age_max = self.selection.age_max.max(age);
        self.refresh();
    }

    /// Move the upper age bound, pushing the lower one along if needed.
    pub fn set_age_max(&mut self, age: i64) {
        self.selection.age_max = age;
        self.selection.age_min = self.selection.age_min.min(age);
        self.refresh();
    }

    pub fn export_csv(&mut self, path: &Path) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let view = apply(ds, &self.selection);
        let result = write_view_csv(&view, path);
        self.report_export(result);
    }

    pub fn export_summary(&mut self, path: &Path) {
        self.refresh();
        let Some(exploration) = &self.exploration else {
            return;
        };
        let result = write_exploration_json(exploration, path);
        self.report_export(result);
    }

    fn report_export(&mut self, result: Result<(), ExplorerError>) {
        self.status_message = match result {
            Ok(()) => None,
            Err(e) => {
                log::error!("{e}");
                Some(format!("Error: {e}"))
            }
        };
    }
}
