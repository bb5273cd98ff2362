use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the menu bar and the tab strip.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.add_enabled_ui(state.dataset.is_some(), |ui: &mut Ui| {
                if ui.button("Export filtered CSV…").clicked() {
                    export_csv_dialog(state);
                    ui.close_menu();
                }
                if ui.button("Export summary JSON…").clicked() {
                    export_summary_dialog(state);
                    ui.close_menu();
                }
            });
        });

        ui.separator();

        if let (Some(ds), Some(path)) = (&state.dataset, &state.data_path) {
            let visible = state.exploration.as_ref().map_or(0, |ex| ex.row_count);
            ui.label(format!(
                "{}: {} customers loaded, {} visible",
                path.display(),
                ds.len(),
                visible
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, RichText::new(tab.title()).size(18.0).strong());
        }
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open customer data")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

fn export_csv_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered customers")
        .add_filter("CSV", &["csv"])
        .set_file_name("filtered_customers.csv")
        .save_file();

    if let Some(path) = file {
        state.export_csv(&path);
    }
}

fn export_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .add_filter("JSON", &["json"])
        .set_file_name("churn_summary.json")
        .save_file();

    if let Some(path) = file {
        state.export_summary(&path);
    }
}
