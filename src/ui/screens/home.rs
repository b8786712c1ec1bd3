use crate::config::Variant;
use crate::models::Crop;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct HomeScreen {
    variant: Variant,
}

impl HomeScreen {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    fn description(&self) -> &'static str {
        match self.variant {
            Variant::Simple => {
                "Pick your soil type and the growing season to get a crop suggestion \
                 with the reasoning behind it, a four-month price trend and the latest \
                 mandi prices for that crop."
            }
            Variant::Extended => {
                "Pick your soil type and season, then check the temperature and rainfall \
                 pre-filled from current weather. The prediction service is asked first; \
                 when it cannot answer, the built-in rule table decides."
            }
        }
    }
}

impl Widget for HomeScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(6),    // Body
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let block = Block::default()
            .title(Span::styled("Cropwise", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        Paragraph::new(Span::styled(
            format!("Crop recommendation advisor ({} form)", self.variant),
            Theme::dim(),
        ))
        .block(block)
        .render(chunks[0], buf);

        let crops = Crop::all()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let body = vec![
            Line::from(Span::styled("What it does", Theme::header())),
            Line::from(Span::styled(self.description(), Theme::normal())),
            Line::from(vec![]),
            Line::from(vec![
                Span::styled("Crops with price trends: ", Theme::dim()),
                Span::styled(crops, Theme::normal()),
            ]),
            Line::from(vec![]),
            Line::from(Span::styled("Keys on the advisor screen", Theme::header())),
            Line::from(vec![
                Span::styled("  Tab / ↑↓ ", Theme::nav_key()),
                Span::styled("move between fields", Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("  ←→       ", Theme::nav_key()),
                Span::styled("change soil or season", Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("  Enter    ", Theme::nav_key()),
                Span::styled("get a recommendation", Theme::normal()),
            ]),
        ];

        Paragraph::new(body)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        let nav = Line::from(vec![
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Start ", Theme::nav_label()),
            Span::styled("[h]", Theme::nav_key()),
            Span::styled("Close ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}
