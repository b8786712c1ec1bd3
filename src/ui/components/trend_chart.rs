use crate::logic::TrendSummary;
use crate::models::{Crop, TREND_LABELS};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// One drawn price chart. Created and disposed only through [`TrendChart`].
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    crop: Crop,
    points: Vec<(f64, f64)>,
    summary: Option<TrendSummary>,
}

impl ChartInstance {
    pub fn crop(&self) -> &Crop {
        &self.crop
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn summary(&self) -> Option<&TrendSummary> {
        self.summary.as_ref()
    }

    pub fn label(&self) -> String {
        format!("{} Market Price (₹/kg)", self.crop)
    }
}

/// Owner of the single chart instance on screen.
#[derive(Debug, Default)]
pub struct TrendChart {
    current: Option<ChartInstance>,
    created: u64,
    disposed: u64,
}

impl TrendChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispose the current instance, if any, and draw `crop` in its place.
    pub fn replace(&mut self, crop: &Crop) -> &ChartInstance {
        if let Some(previous) = self.current.take() {
            self.dispose(previous);
        }

        self.created += 1;
        let points = crop
            .trend()
            .map(|series| {
                series
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect()
            })
            .unwrap_or_default();

        tracing::trace!(crop = %crop, id = self.created, "Chart instance created");

        self.current.insert(ChartInstance {
            id: self.created,
            crop: crop.clone(),
            points,
            summary: TrendSummary::for_crop(crop),
        })
    }

    fn dispose(&mut self, instance: ChartInstance) {
        self.disposed += 1;
        tracing::trace!(
            crop = %instance.crop,
            id = instance.id,
            live = self.live_instances(),
            "Chart instance disposed"
        );
    }

    pub fn current(&self) -> Option<&ChartInstance> {
        self.current.as_ref()
    }

    pub fn live_instances(&self) -> u64 {
        self.created - self.disposed
    }
}

pub struct TrendChartWidget<'a> {
    chart: Option<&'a ChartInstance>,
}

impl<'a> TrendChartWidget<'a> {
    pub fn new(chart: Option<&'a ChartInstance>) -> Self {
        Self { chart }
    }
}

impl Widget for TrendChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(chart) = self.chart else {
            let block = Block::default()
                .title("Market Trend")
                .borders(Borders::ALL)
                .border_style(Theme::border());
            Paragraph::new(Span::styled("Submit the form to see a price trend", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        };

        let mut title = vec![Span::styled(chart.label(), Theme::title())];
        if let Some(summary) = chart.summary() {
            title.push(Span::styled(
                format!("  {}", summary.label()),
                Style::default().fg(Theme::trend_color(summary.trend)),
            ));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if chart.points().is_empty() {
            Paragraph::new(Span::styled(
                format!("No trend data for {}", chart.crop()),
                Theme::dim(),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        let (low, high) = chart
            .points()
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)));
        let y_min = (low * 0.9).floor();
        let y_max = (high * 1.1).ceil();

        let dataset = Dataset::default()
            .name(chart.label())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Theme::series())
            .data(chart.points());

        let x_axis = Axis::default()
            .style(Theme::dim())
            .bounds([0.0, (TREND_LABELS.len() - 1) as f64])
            .labels(TREND_LABELS.to_vec());

        let y_axis = Axis::default()
            .title("₹/kg")
            .style(Theme::dim())
            .bounds([y_min, y_max])
            .labels(vec![format!("{:.0}", y_min), format!("{:.0}", y_max)]);

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_keeps_one_instance() {
        let mut chart = TrendChart::new();
        chart.replace(&Crop::Tomato);
        chart.replace(&Crop::Rice);

        assert_eq!(chart.live_instances(), 1);
        assert_eq!(chart.current().map(|c| c.crop()), Some(&Crop::Rice));
    }

    #[test]
    fn replace_same_crop_still_one_instance() {
        let mut chart = TrendChart::new();
        chart.replace(&Crop::Maize);
        chart.replace(&Crop::Maize);

        assert_eq!(chart.live_instances(), 1);
        assert_eq!(chart.current().map(|c| c.id), Some(2));
    }

    #[test]
    fn points_follow_trend_series() {
        let mut chart = TrendChart::new();
        let instance = chart.replace(&Crop::Tomato);

        assert_eq!(instance.points().len(), 4);
        assert_eq!(instance.points()[0].0, 0.0);
        assert_eq!(instance.points()[3].0, 3.0);
        assert_eq!(instance.label(), "Tomato Market Price (₹/kg)");
        assert!(instance.summary().is_some());
    }

    #[test]
    fn unlisted_crop_has_no_points() {
        let mut chart = TrendChart::new();
        let instance = chart.replace(&Crop::Unlisted("Jute".into()));

        assert!(instance.points().is_empty());
        assert!(instance.summary().is_none());
    }

    #[test]
    fn widget_renders_title() {
        let mut chart = TrendChart::new();
        chart.replace(&Crop::Rice);

        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        TrendChartWidget::new(chart.current()).render(area, &mut buf);

        let top: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(top.contains("Rice Market Price"));
    }
}
