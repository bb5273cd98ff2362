use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Customer, Dataset};

// ---------------------------------------------------------------------------
// FilterSelection – the user's active constraints
// ---------------------------------------------------------------------------

/// The constraints chosen in the filter widgets.
///
/// Gender is a multi-select set, like geography. A row passes when:
/// * its geography is in `geographies` (empty set → nothing passes)
/// * its gender is in `genders` (empty set → nothing passes)
/// * `age_min <= age <= age_max` (inverted range → nothing passes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub geographies: BTreeSet<String>,
    pub genders: BTreeSet<String>,
    pub age_min: i64,
    pub age_max: i64,
}

impl FilterSelection {
    /// Everything selected, age range spanning the observed ages.
    pub fn all(dataset: &Dataset) -> Self {
        let (age_min, age_max) = dataset.age_bounds.unwrap_or((0, 0));
        FilterSelection {
            geographies: dataset.geographies.clone(),
            genders: dataset.genders.clone(),
            age_min,
            age_max,
        }
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        self.geographies.contains(&customer.geography)
            && self.genders.contains(&customer.gender)
            && self.age_min <= customer.age
            && customer.age <= self.age_max
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows of a dataset passing a selection
// ---------------------------------------------------------------------------

/// Indices of the rows passing a selection, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn customers(&self) -> impl Iterator<Item = &'a Customer> + '_ {
        let customers = &self.dataset.customers;
        self.indices.iter().map(move |&i| &customers[i])
    }
}

/// Single linear scan; the view is rebuilt from scratch for every selection.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let indices = dataset
        .customers
        .iter()
        .enumerate()
        .filter(|(_, c)| selection.matches(c))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::model::CellValue;

    pub(crate) fn customer(geography: &str, gender: &str, age: i64, salary: f64, exited: bool) -> Customer {
        Customer {
            geography: geography.to_string(),
            gender: gender.to_string(),
            age,
            estimated_salary: salary,
            exited,
            cells: vec![
                CellValue::String(geography.to_string()),
                CellValue::String(gender.to_string()),
                CellValue::Integer(age),
                CellValue::Float(salary),
                CellValue::Integer(exited as i64),
            ],
        }
    }

    /// The three-row dataset used by the worked scenarios.
    pub(crate) fn scenario_dataset() -> Dataset {
        Dataset::from_customers(
            ["Geography", "Gender", "Age", "EstimatedSalary", "Exited"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![
                customer("France", "Male", 30, 50_000.0, false),
                customer("France", "Female", 45, 80_000.0, true),
                customer("Germany", "Male", 30, 65_000.0, true),
            ],
        )
    }

    pub(crate) fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn france_only_keeps_two_rows() {
        let ds = scenario_dataset();
        let selection = FilterSelection {
            geographies: set(&["France"]),
            genders: set(&["Male", "Female"]),
            age_min: 0,
            age_max: 100,
        };
        let view = apply(&ds, &selection);
        assert_eq!(view.indices(), &[0, 1]);
        assert!(view.customers().all(|c| c.geography == "France"));
    }

    #[test]
    fn all_selection_keeps_everything() {
        let ds = scenario_dataset();
        let selection = FilterSelection::all(&ds);
        assert_eq!(selection.age_min, 30);
        assert_eq!(selection.age_max, 45);
        assert_eq!(apply(&ds, &selection).len(), 3);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let ds = scenario_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.age_min = 45;
        selection.age_max = 45;
        assert_eq!(apply(&ds, &selection).indices(), &[1]);

        selection.age_min = 46;
        selection.age_max = 100;
        assert!(apply(&ds, &selection).is_empty());
    }

    #[test]
    fn empty_or_unknown_sets_match_nothing() {
        let ds = scenario_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.geographies.clear();
        assert!(apply(&ds, &selection).is_empty());

        let mut selection = FilterSelection::all(&ds);
        selection.genders = set(&["Other"]);
        assert!(apply(&ds, &selection).is_empty());

        let mut selection = FilterSelection::all(&ds);
        selection.geographies = set(&["Atlantis"]);
        assert!(apply(&ds, &selection).is_empty());
    }

    #[test]
    fn inverted_age_range_is_empty() {
        let ds = scenario_dataset();
        let mut selection = FilterSelection::all(&ds);
        selection.age_min = 50;
        selection.age_max = 20;
        assert!(apply(&ds, &selection).is_empty());
    }

    #[test]
    fn view_is_subset_satisfying_predicate() {
        let ds = scenario_dataset();
        for geographies in [set(&["France"]), set(&["Germany"]), set(&["France", "Germany"])] {
            for genders in [set(&["Male"]), set(&["Female"]), set(&["Male", "Female"])] {
                for (age_min, age_max) in [(0, 100), (30, 30), (31, 45)] {
                    let selection = FilterSelection { geographies: geographies.clone(), genders: genders.clone(), age_min, age_max };
                    let view = apply(&ds, &selection);

                    assert!(view.indices().windows(2).all(|w| w[0] < w[1]));
                    assert!(view.customers().all(|c| selection.matches(c)));
                    let expected = ds.customers.iter().filter(|c| selection.matches(c)).count();
                    assert_eq!(view.len(), expected);
                    assert_eq!(apply(&ds, &selection), view);
                }
            }
        }
    }
}
