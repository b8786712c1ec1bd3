use crate::app::{FormField, FormState, OutputRegion};
use crate::config::Variant;
use crate::ui::components::{ChartInstance, InputWidget, SelectWidget, TrendChartWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AdvisorScreen<'a> {
    pub form: &'a FormState,
    pub output: &'a OutputRegion,
    pub chart: Option<&'a ChartInstance>,
    pub status_message: Option<&'a str>,
    pub pending: bool,
}

impl<'a> AdvisorScreen<'a> {
    pub fn new(
        form: &'a FormState,
        output: &'a OutputRegion,
        chart: Option<&'a ChartInstance>,
    ) -> Self {
        Self {
            form,
            output,
            chart,
            status_message: None,
            pending: false,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }

    pub fn pending(mut self, pending: bool) -> Self {
        self.pending = pending;
        self
    }
}

impl Widget for AdvisorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Form
                Constraint::Min(8),    // Output and chart
                Constraint::Length(1), // Status
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Crop Advisor", Theme::title()),
            Span::styled(format!(" ({} form)", self.form.variant), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        self.render_form(chunks[1], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_output(content[0], buf);
        TrendChartWidget::new(self.chart).render(content[1], buf);

        self.render_status_message(chunks[3], buf);
        self.render_nav(chunks[4], buf);
    }
}

impl AdvisorScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let form = self.form;
        let columns: &[Constraint] = match form.variant {
            Variant::Simple => &[Constraint::Percentage(50), Constraint::Percentage(50)],
            Variant::Extended => &[
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ],
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(columns.to_vec())
            .split(area);

        let soil_options = FormState::soil_options();
        SelectWidget::new("Soil Type", &soil_options, form.soil)
            .placeholder("Select soil")
            .focused(form.focused == FormField::Soil)
            .render(cells[0], buf);

        let season_options = FormState::season_options();
        SelectWidget::new("Season", &season_options, form.season)
            .placeholder("Select season")
            .focused(form.focused == FormField::Season)
            .render(cells[1], buf);

        if form.variant == Variant::Extended {
            InputWidget::new("Temperature", &form.temperature)
                .unit("°C")
                .focused(form.focused == FormField::Temperature)
                .render(cells[2], buf);
            InputWidget::new("Rainfall", &form.rainfall)
                .unit("mm")
                .focused(form.focused == FormField::Rainfall)
                .render(cells[3], buf);
        }
    }

    fn render_output(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Recommendation", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.output.is_empty() {
            let hint = if self.pending {
                "Working..."
            } else {
                "Fill in the form and press Enter"
            };
            Paragraph::new(Span::styled(hint, Theme::dim())).render(inner, buf);
            return;
        }

        let mut lines: Vec<Line> = self
            .output
            .lines()
            .iter()
            .map(|l| {
                let style = if self.output.is_invalid() {
                    Theme::error()
                } else if l.starts_with('⚠') {
                    Theme::warning()
                } else if l.starts_with("Suggested Crop:") {
                    Theme::highlight()
                } else if l.starts_with("Latest Real Market Prices:") {
                    Theme::header()
                } else {
                    Theme::normal()
                };
                Line::from(Span::styled(l.as_str(), style))
            })
            .collect();

        if let Some(source) = self.output.source() {
            lines.push(Line::from(vec![]));
            lines.push(Line::from(Span::styled(
                format!("Source: {}", source),
                Theme::dim(),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("default") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Field ", Theme::nav_label()),
            Span::styled("[←→]", Theme::nav_key()),
            Span::styled("Choose ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Recommend ", Theme::nav_label()),
            Span::styled("[h]", Theme::nav_key()),
            Span::styled("Home ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(area, buf);
    }
}
