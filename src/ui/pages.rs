use eframe::egui::{self, Color32, RichText, Ui};

use crate::content;
use crate::playground::Parity;

// ---------------------------------------------------------------------------
// Static portfolio tabs
// ---------------------------------------------------------------------------

fn page_header(ui: &mut Ui, header: &str) {
    ui.heading(RichText::new(content::TITLE).size(28.0));
    ui.heading(header);
    ui.add_space(8.0);
}

pub fn about_tab(ui: &mut Ui) {
    page_header(ui, content::HEADLINE);
    ui.label(content::ABOUT);
    for point in content::ABOUT_POINTS {
        ui.label(format!("• {point}"));
    }
}

pub fn projects_tab(ui: &mut Ui) {
    page_header(ui, "Projects");
    for (i, project) in content::PROJECTS.iter().enumerate() {
        ui.strong(format!("{}. {}", i + 1, project.title));
        ui.label(project.summary);
        ui.add_space(6.0);
    }
}

pub fn contact_tab(ui: &mut Ui) {
    page_header(ui, "Contact Me");
    for contact in &content::CONTACTS {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(format!("{}:", contact.label));
            match contact.url {
                Some(url) => {
                    ui.hyperlink_to(contact.value, url);
                }
                None => {
                    ui.label(contact.value);
                }
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Playground
// ---------------------------------------------------------------------------

pub fn playground_tab(ui: &mut Ui, number: &mut i64) {
    page_header(ui, "Data Science Playground");
    ui.label("Try out my latest data science experiments and prediction tools here!");
    ui.add_space(8.0);

    ui.strong("Demo: Predict if a number is even or odd");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Enter a number:");
        ui.add(egui::DragValue::new(number));
    });

    let (text, color) = match Parity::of(*number) {
        Parity::Even => ("This number is Even 🎉", Color32::from_rgb(0x2e, 0x7d, 0x32)),
        Parity::Odd => ("This number is Odd 🤖", Color32::from_rgb(0xef, 0x8f, 0x00)),
    };
    ui.label(RichText::new(text).strong().color(color));
}
