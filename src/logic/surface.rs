use crate::models::{Crop, MarketAppendix, RenderInstruction};

/// Where a recommendation cycle sends its output.
///
/// `render` replaces whatever the output region showed before, `append` adds
/// below it, and `draw_trend` replaces the price chart.
pub trait DisplaySurface {
    fn render(&mut self, instruction: &RenderInstruction);

    fn draw_trend(&mut self, crop: &Crop);

    fn append(&mut self, appendix: &MarketAppendix);
}
