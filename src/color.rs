use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Offset so the first hue doesn't collide with the fixed red.
            let hue = 30.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: grade → Color32
// ---------------------------------------------------------------------------

/// Marker colours per grade: configured colours first, generated ones for
/// any other grade found in the data.
#[derive(Debug, Clone, Default)]
pub struct GradeColors {
    mapping: BTreeMap<String, Color32>,
}

impl GradeColors {
    /// Build the map for the grades present in a dataset.
    pub fn new(configured: &BTreeMap<String, String>, grades: &[String]) -> Self {
        let mut mapping: BTreeMap<String, Color32> = BTreeMap::new();
        for (grade, hex) in configured {
            match Color32::from_hex(hex) {
                Ok(c) => {
                    mapping.insert(grade.clone(), c);
                }
                Err(e) => log::warn!("Ignoring colour {hex:?} for grade {grade}: {e:?}"),
            }
        }

        let unmapped: BTreeSet<&String> = grades
            .iter()
            .filter(|g| !mapping.contains_key(*g))
            .collect();
        let palette = generate_palette(unmapped.len());
        for (grade, c) in unmapped.into_iter().zip(palette) {
            mapping.insert(grade.clone(), c);
        }

        GradeColors { mapping }
    }

    /// Look up the colour for a grade.
    pub fn color_for(&self, grade: &str) -> Color32 {
        self.mapping.get(grade).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;

    #[test]
    fn test_configured_grades_use_fixed_colours() {
        let config = DashboardConfig::default();
        let grades = vec!["9".to_string(), "10".to_string()];
        let colors = GradeColors::new(&config.grade_colors, &grades);
        assert_eq!(colors.color_for("9"), Color32::from_rgb(0x1f, 0x77, 0xb4));
        assert_eq!(colors.color_for("12"), Color32::from_rgb(0xd6, 0x27, 0x28));
    }

    #[test]
    fn test_unknown_grades_get_distinct_colours() {
        let config = DashboardConfig::default();
        let grades = vec!["8".to_string(), "9".to_string(), "Transfer".to_string()];
        let colors = GradeColors::new(&config.grade_colors, &grades);
        assert_ne!(colors.color_for("8"), colors.color_for("Transfer"));
        assert_ne!(colors.color_for("8"), Color32::GRAY);
        assert_eq!(colors.color_for("never seen"), Color32::GRAY);
    }

    #[test]
    fn test_bad_hex_falls_back_to_generated() {
        let configured: BTreeMap<String, String> =
            [("9".to_string(), "blue-ish".to_string())].into();
        let colors = GradeColors::new(&configured, &["9".to_string()]);
        assert_ne!(colors.color_for("9"), Color32::GRAY);
    }

    #[test]
    fn test_generate_palette_len() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }
}
