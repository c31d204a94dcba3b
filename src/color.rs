use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0 + 210.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Percentage change → Color32
// ---------------------------------------------------------------------------

/// Change at which the colour saturates.
const FULL_SCALE_PCT: f64 = 200.0;

/// Red for decline, green for growth; stronger with magnitude.
/// Undefined change is grey.
pub fn change_color(pct: Option<f64>) -> Color32 {
    let Some(pct) = pct.filter(|p| p.is_finite()) else {
        return Color32::GRAY;
    };
    let hue = if pct < 0.0 { 0.0 } else { 120.0 };
    let strength = (pct.abs() / FULL_SCALE_PCT).min(1.0) as f32;
    hsl_to_color32(hue, 0.25 + 0.55 * strength, 0.55)
}
