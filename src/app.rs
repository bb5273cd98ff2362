use eframe::egui::{self, ScrollArea};

use crate::state::{AppState, Tab};
use crate::ui::{explorer, pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PortfolioApp {
    pub state: AppState,
}

impl PortfolioApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.state.tab {
                    Tab::About => pages::about_tab(ui),
                    Tab::Projects => pages::projects_tab(ui),
                    Tab::Explorer => explorer::explorer_tab(ui, &mut self.state),
                    Tab::Playground => pages::playground_tab(ui, &mut self.state.playground_number),
                    Tab::Contact => pages::contact_tab(ui),
                });
        });
    }
}
