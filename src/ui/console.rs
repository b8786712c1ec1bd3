use crate::logic::{DisplaySurface, TrendSummary};
use crate::models::{Crop, MarketAppendix, RenderInstruction, TREND_LABELS};
use std::io::Write;

/// Plain-text surface for the `recommend` command.
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl ConsoleSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            if let Err(e) = writeln!(self.out, "{}", line) {
                tracing::warn!("Failed to write output: {}", e);
                return;
            }
        }
    }
}

pub fn trend_lines(crop: &Crop) -> Vec<String> {
    let Some(series) = crop.trend() else {
        return vec![String::new(), format!("No trend data for {}.", crop)];
    };

    let points = TREND_LABELS
        .iter()
        .zip(series.iter())
        .map(|(month, price)| format!("{} {:.0}", month, price))
        .collect::<Vec<_>>()
        .join("  ");

    let mut lines = vec![
        String::new(),
        format!("{} Market Price (₹/kg)", crop),
        format!("  {}", points),
    ];
    if let Some(summary) = TrendSummary::for_crop(crop) {
        lines.push(format!("  {}", summary.label()));
        lines.push(summary.explain(crop));
    }
    lines
}

impl<W: Write + Send> DisplaySurface for ConsoleSurface<W> {
    fn render(&mut self, instruction: &RenderInstruction) {
        self.write_lines(&instruction.lines());
    }

    fn draw_trend(&mut self, crop: &Crop) {
        self.write_lines(&trend_lines(crop));
    }

    fn append(&mut self, appendix: &MarketAppendix) {
        self.write_lines(&appendix.lines());
    }
}
