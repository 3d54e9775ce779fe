//! Independent layout of many slides.
//!
//! Slides share nothing but the configuration and the (pure) text measurer,
//! so with the `parallel` feature they are laid out on the rayon pool.

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::node::ContentNode;
use crate::sequencer::{SlideLayout, layout_slide};
use crate::text_metrics::TextMeasurer;

/// Lay out each slide's sections. Results are in input order.
///
/// Every slide gets its own `Result`; one slide failing does not affect the
/// others.
#[must_use]
pub fn layout_slides(
    slides: &[Vec<ContentNode>],
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<Result<SlideLayout, LayoutError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        slides
            .par_iter()
            .map(|sections| layout_slide(sections, config, measurer))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        slides
            .iter()
            .map(|sections| layout_slide(sections, config, measurer))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleSpec;
    use crate::text_metrics::{CachedTextMeasurer, RatioTextMeasurer};

    #[test]
    fn test_results_keep_input_order() {
        let config = LayoutConfig::default();
        let measurer = CachedTextMeasurer::new(RatioTextMeasurer::default());
        let slides: Vec<Vec<ContentNode>> = (1..=8)
            .map(|i| {
                vec![ContentNode::spacer(
                    format!("slide-{i}"),
                    StyleSpec::default().min_height(i as f32 * 10.0),
                )]
            })
            .collect();
        let results = layout_slides(&slides, &config, &measurer);
        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            let slide = result.as_ref().unwrap();
            assert_eq!(slide.sections[0].node_id.as_str(), format!("slide-{}", i + 1));
            assert_eq!(slide.sections[0].height, (i + 1) as f32 * 10.0);
        }
    }
}
