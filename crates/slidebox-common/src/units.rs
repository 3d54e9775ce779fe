//! Unit conversions between CSS pixels, typographic points, and EMU.
//!
//! Presentation formats measure geometry in English Metric Units (EMU).
//! All conversions assume a 96 DPI canvas, the CSS reference pixel.

/// Reference pixels per inch.
pub const DPI: f32 = 96.0;
/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;
/// Points per inch.
pub const PT_PER_INCH: f32 = 72.0;

/// Pixels to EMU, truncating toward zero.
#[must_use]
pub fn px_to_emu(px: f32) -> i64 {
    (f64::from(px) * EMU_PER_INCH as f64 / f64::from(DPI)) as i64
}

/// Pixels to points.
#[must_use]
pub fn px_to_pt(px: f32) -> f32 {
    px * PT_PER_INCH / DPI
}

/// Font size in pixels to a whole point size for text runs.
///
/// Rounds to the nearest point and never returns less than 1.
#[must_use]
pub fn font_size_px_to_pt(px: f32) -> u32 {
    if !px.is_finite() || px <= 0.0 {
        return 1;
    }
    (px_to_pt(px).round() as u32).max(1)
}
