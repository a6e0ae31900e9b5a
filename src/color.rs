use std::collections::BTreeMap;
use std::fmt;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Rgb – renderer-agnostic colour carried inside chart specs
// ---------------------------------------------------------------------------

/// An sRGB colour. Serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// CSS `red`.
    pub const RED: Rgb = Rgb(255, 0, 0);
    /// CSS `green`.
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const GRAY: Rgb = Rgb(160, 160, 160);

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category → Rgb
// ---------------------------------------------------------------------------

/// Maps the categories of one column (e.g. booster versions) to distinct
/// colours. Built once per dataset so a category keeps its colour no matter
/// which subset is on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    mapping: BTreeMap<String, Rgb>,
    default_color: Rgb,
}

impl ColorMap {
    pub fn new<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let categories: Vec<&String> = categories.into_iter().collect();
        let palette = generate_palette(categories.len());
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Rgb::GRAY,
        }
    }

    /// Look up the colour for a category; unknown categories are gray.
    pub fn color_for(&self, category: &str) -> Rgb {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}
