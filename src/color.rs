use eframe::egui::{self, Color32};
use palette::{Hsl, IntoColor, Srgb};

use crate::config::Theme;

// ---------------------------------------------------------------------------
// Chart colours derived from an accent hue
// ---------------------------------------------------------------------------

/// Convert an HSL triple to an egui colour.
pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0).round() as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

/// Colours used by the chart area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    /// Histogram bars.
    pub bars: Color32,
    /// Scatter points; complementary to the bars.
    pub points: Color32,
}

impl ChartColors {
    pub fn new(theme: Theme, accent_hue: f32) -> Self {
        // Dark backgrounds need lighter fills to stay readable.
        let lightness = match theme {
            Theme::Light => 0.45,
            Theme::Dark => 0.62,
        };
        ChartColors {
            bars: hsl_color(accent_hue, 0.70, lightness),
            points: hsl_color((accent_hue + 180.0) % 360.0, 0.75, lightness),
        }
    }
}

pub fn visuals(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues_map_to_channels() {
        assert_eq!(hsl_color(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_color(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
        assert_eq!(hsl_color(240.0, 1.0, 0.5), Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn dark_theme_is_lighter() {
        let light = ChartColors::new(Theme::Light, 210.0);
        let dark = ChartColors::new(Theme::Dark, 210.0);
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(dark.bars) > sum(light.bars));
        assert_ne!(light.bars, light.points);
    }
}
