//! Shrink-to-fit font sizing for text that overflows its box.

use crate::error::LayoutError;
use crate::text_metrics::TextMeasurer;

/// Outcome of [`fit_font_size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontFit {
    /// Chosen font size in pixels.
    pub font_size_px: f32,
    /// Wrapped line count at that size.
    pub line_count: usize,
    /// Text height at that size.
    pub height: f32,
    /// Whether `height` is within the requested maximum. When `false` the
    /// size is the minimum allowed and the text still overflows.
    pub fits: bool,
}

/// Find the largest font size, stepping down 1px from `start_font_px`, at
/// which `text` wrapped to `width` is no taller than `max_height`.
///
/// Sizes never go below `min_font_px`. The steps are searched by bisection,
/// which relies on the measurer never giving fewer lines for a larger font.
///
/// # Errors
///
/// [`LayoutError::InvalidConstraint`] if any size argument is not positive
/// and finite.
pub fn fit_font_size(
    measurer: &dyn TextMeasurer,
    text: &str,
    start_font_px: f32,
    min_font_px: f32,
    width: f32,
    line_height: f32,
    max_height: f32,
) -> Result<FontFit, LayoutError> {
    let start = LayoutError::require_positive("start font size", start_font_px)?;
    let min = LayoutError::require_positive("minimum font size", min_font_px)?.min(start);
    let line_height = LayoutError::require_positive("line height", line_height)?;
    let max_height = LayoutError::require_positive("max height", max_height)?;

    let try_size = |size: f32| -> Result<FontFit, LayoutError> {
        let line_count = measurer.measure_lines(text, size, width)?;
        let height = line_count as f32 * line_height * size;
        Ok(FontFit {
            font_size_px: size,
            line_count,
            height,
            fits: height <= max_height,
        })
    };
    let size_at = |step: usize| (f64::from(start) - step as f64).max(f64::from(min)) as f32;

    let first = try_size(start)?;
    let steps = (f64::from(start) - f64::from(min)).ceil() as usize;
    if first.fits || steps == 0 {
        return Ok(first);
    }
    let mut best = try_size(size_at(steps))?;
    if !best.fits {
        return Ok(best);
    }

    // Step `low` overflows and step `high` fits.
    let (mut low, mut high) = (0, steps);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let fit = try_size(size_at(mid))?;
        if fit.fits {
            high = mid;
            best = fit;
        } else {
            low = mid;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_metrics::RatioTextMeasurer;

    #[test]
    fn test_shrinks_until_single_line() {
        let measurer = RatioTextMeasurer::default();
        let fit = fit_font_size(&measurer, "数据安全风险评估", 20.0, 10.0, 100.0, 1.5, 30.0).unwrap();
        assert_eq!(
            fit,
            FontFit {
                font_size_px: 12.0,
                line_count: 1,
                height: 18.0,
                fits: true,
            }
        );
    }

    #[test]
    fn test_already_fitting_text_keeps_start_size() {
        let measurer = RatioTextMeasurer::default();
        let fit = fit_font_size(&measurer, "风险", 20.0, 10.0, 100.0, 1.5, 30.0).unwrap();
        assert_eq!(fit.font_size_px, 20.0);
        assert!(fit.fits);
    }

    #[test]
    fn test_stops_at_minimum() {
        let measurer = RatioTextMeasurer::default();
        let fit = fit_font_size(&measurer, "数据安全风险评估", 20.0, 16.0, 100.0, 1.5, 30.0).unwrap();
        assert_eq!(fit.font_size_px, 16.0);
        assert_eq!(fit.line_count, 2);
        assert!(!fit.fits);
    }

    #[test]
    fn test_huge_start_size_finishes_at_whole_pixel_step() {
        let measurer = RatioTextMeasurer::default();
        let fit = fit_font_size(&measurer, "数据安全风险评估", 1.0e9, 8.0, 100.0, 1.5, 30.0).unwrap();
        assert_eq!(fit.font_size_px, 12.0);
        assert_eq!(fit.line_count, 1);
        assert!(fit.fits);
    }

    #[test]
    fn test_matches_one_pixel_walk() {
        let measurer = RatioTextMeasurer::default();
        let text = "Quarterly revenue 营收同比增长";
        for start in [18.0, 24.0, 31.0, 48.0] {
            let fit = fit_font_size(&measurer, text, start, 6.0, 160.0, 1.2, 60.0).unwrap();
            let walked = (6..=start as u32)
                .rev()
                .map(|size| size as f32)
                .find(|&size| {
                    let lines = measurer.measure_lines(text, size, 160.0).unwrap();
                    lines as f32 * 1.2 * size <= 60.0
                })
                .unwrap_or(6.0);
            assert_eq!(fit.font_size_px, walked, "start {start}");
        }
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        let measurer = RatioTextMeasurer::default();
        assert!(fit_font_size(&measurer, "x", 0.0, 10.0, 100.0, 1.5, 30.0).is_err());
        assert!(fit_font_size(&measurer, "x", 20.0, 10.0, 0.0, 1.5, 30.0).is_err());
    }
}
