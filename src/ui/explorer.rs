use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{AGE_FILL, SALARY_FILL};
use crate::data::aggregate::{Exploration, NumericColumn};
use crate::data::model::{Dataset, REQUIRED_COLUMNS};
use crate::state::{AppState, Category};
use crate::ui::plot;

const TABLE_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Data Explorer tab
// ---------------------------------------------------------------------------

pub fn explorer_tab(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Explorer");
    ui.label("Explore and filter the customer churn data interactively.");
    ui.add_space(8.0);

    if state.dataset.is_none() {
        ui.label(format!(
            "No dataset loaded. Open a CSV with the columns {} (File → Open…).",
            REQUIRED_COLUMNS.join(", ")
        ));
        return;
    }

    egui::CollapsingHeader::new(RichText::new("🔎 Filter Data").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.columns(3, |cols| {
                category_filter(&mut cols[0], state, Category::Geography);
                category_filter(&mut cols[1], state, Category::Gender);
                age_filter(&mut cols[2], state);
            });
        });

    // Widgets above may have changed the selection.
    state.refresh();

    let (Some(ds), Some(exploration)) = (&state.dataset, &state.exploration) else {
        return;
    };

    ui.separator();
    customer_table(ui, ds, exploration);

    ui.separator();
    ui.heading("Number of Customers by Geography");
    plot::category_bars(
        ui,
        "customers_by_geography",
        "Customers",
        exploration
            .counts_by_geography
            .iter()
            .map(|(geo, &count)| (geo, count as f64)),
        &state.geography_colors,
    );

    ui.heading("Churn Rate by Gender");
    plot::category_bars(
        ui,
        "churn_rate_by_gender",
        "Exit rate",
        exploration
            .exit_rate_by_gender
            .iter()
            .map(|(gender, &rate)| (gender, rate)),
        &state.gender_colors,
    );

    ui.heading("Age Distribution");
    plot::histogram(
        ui,
        "age_distribution",
        NumericColumn::Age,
        &exploration.age_histogram,
        AGE_FILL,
    );

    ui.heading("Salary Distribution");
    plot::histogram(
        ui,
        "salary_distribution",
        NumericColumn::EstimatedSalary,
        &exploration.salary_histogram,
        SALARY_FILL,
    );
}

// ---------------------------------------------------------------------------
// Filter widgets
// ---------------------------------------------------------------------------

fn category_filter(ui: &mut Ui, state: &mut AppState, category: Category) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let (title, domain) = match category {
        Category::Geography => ("Geography", ds.geographies.clone()),
        Category::Gender => ("Gender", ds.genders.clone()),
    };

    let n_selected = state.selected_mut(category).len();
    ui.strong(format!("{title}  ({n_selected}/{})", domain.len()));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all(category);
        }
        if ui.small_button("None").clicked() {
            state.select_none(category);
        }
    });

    for value in &domain {
        let color = match category {
            Category::Geography => state.geography_colors.color_for(value),
            Category::Gender => state.gender_colors.color_for(value),
        };
        let mut checked = state.selected_mut(category).contains(value);
        if ui
            .checkbox(&mut checked, RichText::new(value).color(color))
            .changed()
        {
            state.toggle(category, value);
        }
    }
}

fn age_filter(ui: &mut Ui, state: &mut AppState) {
    let Some((lo, hi)) = state.dataset.as_ref().and_then(|ds| ds.age_bounds) else {
        return;
    };

    ui.strong("Age Range");
    let mut min = state.selection.age_min;
    if ui
        .add(egui::Slider::new(&mut min, lo..=hi).text("from"))
        .changed()
    {
        state.set_age_min(min);
    }
    let mut max = state.selection.age_max;
    if ui
        .add(egui::Slider::new(&mut max, lo..=hi).text("to"))
        .changed()
    {
        state.set_age_max(max);
    }
}

// ---------------------------------------------------------------------------
// Filtered table
// ---------------------------------------------------------------------------

fn customer_table(ui: &mut Ui, ds: &Dataset, exploration: &Exploration) {
    ui.label(format!(
        "{} of {} customers",
        exploration.row_count,
        ds.len()
    ));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(TABLE_HEIGHT)
        .columns(Column::auto().at_least(60.0), ds.columns.len())
        .header(20.0, |mut header| {
            for name in &ds.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, exploration.rows.len(), |mut row| {
                let customer = &ds.customers[exploration.rows[row.index()]];
                for cell in &customer.cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
