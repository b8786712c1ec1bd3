use crate::config::Variant;
use crate::logic::DisplaySurface;
use crate::models::{
    Crop, FormInput, MarketAppendix, RecommendationSource, RenderInstruction, Season, Soil,
    WeatherOrigin, WeatherReading,
};
use crate::ui::components::TrendChart;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Advisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Soil,
    Season,
    Temperature,
    Rainfall,
}

impl FormField {
    fn fields(variant: Variant) -> &'static [FormField] {
        match variant {
            Variant::Simple => &[FormField::Soil, FormField::Season],
            Variant::Extended => &[
                FormField::Soil,
                FormField::Season,
                FormField::Temperature,
                FormField::Rainfall,
            ],
        }
    }

    pub fn next(self, variant: Variant) -> Self {
        let fields = Self::fields(variant);
        let pos = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(pos + 1) % fields.len()]
    }

    pub fn prev(self, variant: Variant) -> Self {
        let fields = Self::fields(variant);
        let pos = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(pos + fields.len() - 1) % fields.len()]
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FormField::Temperature | FormField::Rainfall)
    }
}

/// Editable form. Select indices count the placeholder as 0.
pub struct FormState {
    pub variant: Variant,
    pub focused: FormField,
    pub soil: usize,
    pub season: usize,
    pub temperature: String,
    pub rainfall: String,
}

impl FormState {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            focused: FormField::Soil,
            soil: 0,
            season: 0,
            temperature: String::new(),
            rainfall: String::new(),
        }
    }

    pub fn soil_options() -> Vec<&'static str> {
        Soil::all().iter().map(|s| s.as_str()).collect()
    }

    pub fn season_options() -> Vec<&'static str> {
        Season::all().iter().map(|s| s.as_str()).collect()
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next(self.variant);
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev(self.variant);
    }

    pub fn next_option(&mut self) {
        match self.focused {
            FormField::Soil => self.soil = (self.soil + 1) % (Soil::all().len() + 1),
            FormField::Season => self.season = (self.season + 1) % (Season::all().len() + 1),
            _ => {}
        }
    }

    pub fn prev_option(&mut self) {
        match self.focused {
            FormField::Soil => {
                let n = Soil::all().len() + 1;
                self.soil = (self.soil + n - 1) % n;
            }
            FormField::Season => {
                let n = Season::all().len() + 1;
                self.season = (self.season + n - 1) % n;
            }
            _ => {}
        }
    }

    pub fn push_char(&mut self, c: char) {
        if !self.focused.is_numeric() || !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        if let Some(buffer) = self.focused_buffer() {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Temperature => Some(&mut self.temperature),
            FormField::Rainfall => Some(&mut self.rainfall),
            _ => None,
        }
    }

    /// Fill the numeric fields from a weather reading, leaving anything the
    /// user already typed alone.
    pub fn prefill(&mut self, reading: &WeatherReading) {
        if self.temperature.is_empty() {
            self.temperature = reading.temperature_field();
        }
        if self.rainfall.is_empty() {
            self.rainfall = reading.rainfall_field();
        }
    }

    pub fn selected_soil(&self) -> Option<Soil> {
        self.soil.checked_sub(1).and_then(|i| Soil::all().get(i)).copied()
    }

    pub fn selected_season(&self) -> Option<Season> {
        self.season
            .checked_sub(1)
            .and_then(|i| Season::all().get(i))
            .copied()
    }

    pub fn to_input(&self) -> FormInput {
        let soil = self.selected_soil().map(|s| s.as_str()).unwrap_or_default();
        let season = self
            .selected_season()
            .map(|s| s.as_str())
            .unwrap_or_default();

        let input = FormInput::new(soil, season);
        match self.variant {
            Variant::Simple => input,
            Variant::Extended => input.with_weather(&self.temperature, &self.rainfall),
        }
    }
}

/// The single output region under the form.
#[derive(Debug, Default)]
pub struct OutputRegion {
    lines: Vec<String>,
    invalid: bool,
    source: Option<RecommendationSource>,
}

impl OutputRegion {
    pub fn replace(&mut self, instruction: &RenderInstruction) {
        self.lines = instruction.lines();
        self.invalid = matches!(instruction, RenderInstruction::Invalid { .. });
        self.source = match instruction {
            RenderInstruction::Result { recommendation, .. } => Some(recommendation.source),
            RenderInstruction::Invalid { .. } => None,
        };
    }

    pub fn source(&self) -> Option<RecommendationSource> {
        self.source
    }

    pub fn append(&mut self, appendix: &MarketAppendix) {
        self.lines.extend(appendix.lines());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Render {
        request: u64,
        instruction: RenderInstruction,
    },
    DrawTrend {
        request: u64,
        crop: Crop,
    },
    Append {
        request: u64,
        appendix: MarketAppendix,
    },
    Finished {
        request: u64,
    },
    WeatherLoaded(WeatherReading),
}

impl AppEvent {
    fn request(&self) -> Option<u64> {
        match self {
            AppEvent::Render { request, .. }
            | AppEvent::DrawTrend { request, .. }
            | AppEvent::Append { request, .. }
            | AppEvent::Finished { request } => Some(*request),
            AppEvent::WeatherLoaded(_) => None,
        }
    }
}

/// Display surface for a background cycle. Every event is tagged with the
/// request that produced it.
pub struct ChannelSurface {
    request: u64,
    tx: UnboundedSender<AppEvent>,
}

impl ChannelSurface {
    pub fn new(request: u64, tx: UnboundedSender<AppEvent>) -> Self {
        Self { request, tx }
    }

    pub fn finish(self) {
        let _ = self.tx.send(AppEvent::Finished {
            request: self.request,
        });
    }
}

impl DisplaySurface for ChannelSurface {
    fn render(&mut self, instruction: &RenderInstruction) {
        let _ = self.tx.send(AppEvent::Render {
            request: self.request,
            instruction: instruction.clone(),
        });
    }

    fn draw_trend(&mut self, crop: &Crop) {
        let _ = self.tx.send(AppEvent::DrawTrend {
            request: self.request,
            crop: crop.clone(),
        });
    }

    fn append(&mut self, appendix: &MarketAppendix) {
        let _ = self.tx.send(AppEvent::Append {
            request: self.request,
            appendix: appendix.clone(),
        });
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub variant: Variant,

    pub form: FormState,
    pub output: OutputRegion,
    pub chart: TrendChart,

    // Request sequencing
    pub latest_request: u64,
    pub pending: bool,
    pub submit_requested: bool,

    pub status_message: Option<String>,
}

impl App {
    pub fn new(variant: Variant) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            variant,
            form: FormState::new(variant),
            output: OutputRegion::default(),
            chart: TrendChart::new(),
            latest_request: 0,
            pending: false,
            submit_requested: false,
            status_message: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn toggle_home(&mut self) {
        self.screen = match self.screen {
            Screen::Home => Screen::Advisor,
            Screen::Advisor => Screen::Home,
        };
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn request_submit(&mut self) {
        self.submit_requested = true;
    }

    /// Number the next cycle. Anything still in flight from earlier numbers
    /// will be ignored when it arrives.
    pub fn begin_request(&mut self) -> u64 {
        self.submit_requested = false;
        self.latest_request += 1;
        self.pending = true;
        self.set_status("Working...");
        self.latest_request
    }

    pub fn apply(&mut self, event: AppEvent) {
        if let Some(request) = event.request() {
            if request != self.latest_request {
                tracing::debug!(
                    request,
                    latest = self.latest_request,
                    "Dropping result of superseded request"
                );
                return;
            }
        }

        match event {
            AppEvent::Render { instruction, .. } => self.output.replace(&instruction),
            AppEvent::DrawTrend { crop, .. } => {
                self.chart.replace(&crop);
            }
            AppEvent::Append { appendix, .. } => self.output.append(&appendix),
            AppEvent::Finished { .. } => {
                self.pending = false;
                self.clear_status();
            }
            AppEvent::WeatherLoaded(reading) => {
                self.form.prefill(&reading);
                let status = match (reading.source, reading.location.as_deref()) {
                    (WeatherOrigin::OpenWeatherMap, Some(place)) => {
                        format!("Current weather loaded for {}", place)
                    }
                    (WeatherOrigin::OpenWeatherMap, None) => "Current weather loaded".to_string(),
                    (WeatherOrigin::Defaults, _) => "Using default weather values".to_string(),
                };
                self.set_status(&status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarketPrice, Recommendation};
    use tokio::sync::mpsc;

    fn result(crop: Crop) -> RenderInstruction {
        RenderInstruction::result(Recommendation::new(crop, RecommendationSource::RuleTable))
    }

    #[test]
    fn simple_form_cycles_two_fields() {
        let mut form = FormState::new(Variant::Simple);
        form.next_field();
        assert_eq!(form.focused, FormField::Season);
        form.next_field();
        assert_eq!(form.focused, FormField::Soil);
        form.prev_field();
        assert_eq!(form.focused, FormField::Season);
    }

    #[test]
    fn extended_form_cycles_four_fields() {
        let mut form = FormState::new(Variant::Extended);
        for expected in [
            FormField::Season,
            FormField::Temperature,
            FormField::Rainfall,
            FormField::Soil,
        ] {
            form.next_field();
            assert_eq!(form.focused, expected);
        }
    }

    #[test]
    fn options_wrap_through_placeholder() {
        let mut form = FormState::new(Variant::Simple);
        assert_eq!(form.selected_soil(), None);
        form.next_option();
        assert_eq!(form.selected_soil(), Some(Soil::Loamy));
        form.prev_option();
        form.prev_option();
        assert_eq!(form.selected_soil(), Some(Soil::Alluvial));
    }

    #[test]
    fn numeric_fields_accept_numbers_only() {
        let mut form = FormState::new(Variant::Extended);
        form.focused = FormField::Temperature;
        for c in "2x7.5q".chars() {
            form.push_char(c);
        }
        assert_eq!(form.temperature, "27.5");
        form.backspace();
        assert_eq!(form.temperature, "27.");

        form.focused = FormField::Soil;
        form.push_char('1');
        assert!(form.rainfall.is_empty());
    }

    #[test]
    fn unselected_form_produces_empty_names() {
        let form = FormState::new(Variant::Simple);
        let input = form.to_input();
        assert!(input.soil.is_empty());
        assert!(input.season.is_empty());
    }

    #[test]
    fn simple_form_ignores_numeric_buffers() {
        let mut form = FormState::new(Variant::Simple);
        form.soil = 2;
        form.season = 2;
        form.temperature = "31".into();
        let input = form.to_input();
        assert_eq!(input.soil, "Clay");
        assert_eq!(input.season, "Monsoon");
        assert!(input.temperature.is_empty());
    }

    #[test]
    fn prefill_keeps_user_values() {
        let mut form = FormState::new(Variant::Extended);
        form.rainfall = "12".into();
        let mut reading = WeatherReading::defaults();
        reading.temperature_c = 24.0;
        reading.rainfall_mm = 3.0;

        form.prefill(&reading);
        assert_eq!(form.temperature, "24");
        assert_eq!(form.rainfall, "12");
    }

    #[test]
    fn render_replaces_and_append_adds() {
        let mut app = App::new(Variant::Simple);
        let request = app.begin_request();

        app.apply(AppEvent::Render {
            request,
            instruction: RenderInstruction::invalid("Please select both soil and season."),
        });
        assert!(app.output.is_invalid());
        assert!(app.output.source().is_none());

        app.apply(AppEvent::Render {
            request,
            instruction: result(Crop::Tomato),
        });
        assert!(!app.output.is_invalid());
        assert_eq!(app.output.source(), Some(RecommendationSource::RuleTable));
        assert_eq!(app.output.lines()[0], "Suggested Crop: Tomato");
        let before = app.output.lines().len();

        app.apply(AppEvent::Append {
            request,
            appendix: MarketAppendix::Prices(vec![MarketPrice {
                arrival_date: "01/04/2024".into(),
                market: "Pune".into(),
                modal_price: "2100".into(),
            }]),
        });
        assert!(app.output.lines().len() > before);
        assert!(app
            .output
            .lines()
            .iter()
            .any(|l| l == "01/04/2024 - Pune: ₹2100/quintal"));
    }

    #[test]
    fn stale_request_events_are_dropped() {
        let mut app = App::new(Variant::Extended);
        let first = app.begin_request();
        let second = app.begin_request();

        app.apply(AppEvent::Render {
            request: second,
            instruction: result(Crop::Rice),
        });
        app.apply(AppEvent::DrawTrend {
            request: second,
            crop: Crop::Rice,
        });

        // The slower first cycle lands afterwards
        app.apply(AppEvent::Render {
            request: first,
            instruction: result(Crop::Maize),
        });
        app.apply(AppEvent::DrawTrend {
            request: first,
            crop: Crop::Maize,
        });
        app.apply(AppEvent::Finished { request: first });

        assert_eq!(app.output.lines()[0], "Suggested Crop: Rice");
        assert_eq!(app.chart.current().map(|c| c.crop()), Some(&Crop::Rice));
        assert!(app.pending);

        app.apply(AppEvent::Finished { request: second });
        assert!(!app.pending);
    }

    #[test]
    fn repeated_cycles_leave_one_chart() {
        let mut app = App::new(Variant::Simple);
        for crop in [Crop::Tomato, Crop::Carrot, Crop::Cotton] {
            let request = app.begin_request();
            app.apply(AppEvent::DrawTrend { request, crop });
        }
        assert_eq!(app.chart.live_instances(), 1);
    }

    #[test]
    fn weather_event_prefills_form() {
        let mut app = App::new(Variant::Extended);
        app.apply(AppEvent::WeatherLoaded(WeatherReading::defaults()));
        assert_eq!(app.form.temperature, "30");
        assert_eq!(app.form.rainfall, "0");
        assert_eq!(
            app.status_message.as_deref(),
            Some("Using default weather values")
        );
    }

    #[test]
    fn home_toggles() {
        let mut app = App::new(Variant::Simple);
        assert_eq!(app.screen, Screen::Home);
        app.toggle_home();
        assert_eq!(app.screen, Screen::Advisor);
        app.toggle_home();
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn channel_surface_tags_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut surface = ChannelSurface::new(7, tx);
        surface.draw_trend(&Crop::Carrot);
        surface.finish();

        match rx.try_recv() {
            Ok(AppEvent::DrawTrend { request, crop }) => {
                assert_eq!(request, 7);
                assert_eq!(crop, Crop::Carrot);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Finished { request: 7 })));
    }
}
