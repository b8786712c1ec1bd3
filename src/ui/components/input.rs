use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line numeric field with a unit suffix.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    unit: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            unit: "",
            focused: false,
        }
    }

    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = unit;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![Span::styled(self.value, Theme::normal())];
        if self.focused {
            // Cursor sits at the end; the form only appends and deletes
            spans.push(Span::styled(" ", Theme::selected()));
        }
        if !self.unit.is_empty() {
            spans.push(Span::styled(format!(" {}", self.unit), Theme::dim()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// Dropdown-style selector. Index 0 is the unselected placeholder.
pub struct SelectWidget<'a> {
    label: &'a str,
    placeholder: &'a str,
    options: &'a [&'a str],
    selected: usize,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, options: &'a [&'a str], selected: usize) -> Self {
        Self {
            label,
            placeholder: "--",
            options,
            selected,
            focused: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn value(&self) -> Option<&'a str> {
        self.selected
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .copied()
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let (text, style) = match self.value() {
            Some(v) if self.focused => (format!("< {} >", v), Theme::highlight()),
            Some(v) => (v.to_string(), Theme::normal()),
            None if self.focused => (format!("< {} >", self.placeholder), Theme::dim()),
            None => (self.placeholder.to_string(), Theme::dim()),
        };

        Paragraph::new(Span::styled(text, style)).render(inner, buf);
    }
}
