use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fill of the age histogram.
pub const AGE_FILL: Color32 = Color32::from_rgb(0x00, 0x72, 0xff);
/// Fill of the salary histogram.
pub const SALARY_FILL: Color32 = Color32::from_rgb(0x00, 0xb8, 0x94);

// ---------------------------------------------------------------------------
// Palette generator
// ---------------------------------------------------------------------------

/// `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, 0.50).into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category → colour
// ---------------------------------------------------------------------------

/// Stable colours for one categorical column (geographies or genders), so a
/// category keeps its colour when others are filtered out.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();
        CategoryColors { mapping }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}
