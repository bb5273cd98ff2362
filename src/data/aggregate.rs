use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::filter::{FilterSelection, FilteredView, apply};
use super::model::{Customer, Dataset};

// ---------------------------------------------------------------------------
// Category aggregates
// ---------------------------------------------------------------------------

/// Number of rows per geography. Only geographies present in the view appear.
pub fn counts_by_geography(view: &FilteredView<'_>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for c in view.customers() {
        *counts.entry(c.geography.clone()).or_insert(0) += 1;
    }
    counts
}

/// Mean of the `Exited` flag per gender. A gender with no rows in the view
/// has no entry rather than a rate of zero.
pub fn exit_rate_by_gender(view: &FilteredView<'_>) -> BTreeMap<String, f64> {
    let mut tallies: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for c in view.customers() {
        let (exited, total) = tallies.entry(c.gender.clone()).or_insert((0, 0));
        *exited += c.exited as usize;
        *total += 1;
    }
    tallies
        .into_iter()
        .map(|(gender, (exited, total))| (gender, exited as f64 / total as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Numeric columns that can be binned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Age,
    EstimatedSalary,
}

impl NumericColumn {
    pub fn value(self, customer: &Customer) -> f64 {
        match self {
            NumericColumn::Age => customer.age as f64,
            NumericColumn::EstimatedSalary => customer.estimated_salary,
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericColumn::Age => write!(f, "Age"),
            NumericColumn::EstimatedSalary => write!(f, "Estimated Salary"),
        }
    }
}

/// One histogram bar covering `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        self.start + self.width() / 2.0
    }
}

/// Fixed-width bins over the view's own `[min, max]`, so the edges move as
/// the filters change. An empty view (or `bin_count == 0`) yields no bins.
/// A single distinct value is binned over `[v - 0.5, v + 0.5]`.
pub fn histogram(view: &FilteredView<'_>, column: NumericColumn, bin_count: usize) -> Vec<Bin> {
    if view.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let values: Vec<f64> = view.customers().map(|c| column.value(c)).collect();
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            start: min + i as f64 * width,
            end: if i + 1 == bin_count { max } else { min + (i + 1) as f64 * width },
            count: 0,
        })
        .collect();

    for v in values {
        // The division can land one slot off at an interior edge; the edges
        // themselves decide.
        let mut slot = (((v - min) / width) as usize).min(bin_count - 1);
        while slot > 0 && v < bins[slot].start {
            slot -= 1;
        }
        while slot + 1 < bin_count && v >= bins[slot + 1].start {
            slot += 1;
        }
        bins[slot].count += 1;
    }
    bins
}

// ---------------------------------------------------------------------------
// Exploration – one request/response round
// ---------------------------------------------------------------------------

/// Everything the explorer shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exploration {
    pub selection: FilterSelection,
    pub row_count: usize,
    /// Dataset indices of the matching rows.
    #[serde(skip)]
    pub rows: Vec<usize>,
    pub counts_by_geography: BTreeMap<String, usize>,
    pub exit_rate_by_gender: BTreeMap<String, f64>,
    pub age_histogram: Vec<Bin>,
    pub salary_histogram: Vec<Bin>,
}

/// Filter the dataset and compute every aggregate for the result.
pub fn explore(dataset: &Dataset, selection: &FilterSelection, bin_count: usize) -> Exploration {
    let view = apply(dataset, selection);
    log::debug!(
        "selection matched {} of {} rows",
        view.len(),
        dataset.len()
    );

    Exploration {
        selection: selection.clone(),
        row_count: view.len(),
        counts_by_geography: counts_by_geography(&view),
        exit_rate_by_gender: exit_rate_by_gender(&view),
        age_histogram: histogram(&view, NumericColumn::Age, bin_count),
        salary_histogram: histogram(&view, NumericColumn::EstimatedSalary, bin_count),
        rows: view.into_indices(),
    }
}
