mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, AppEvent, ChannelSurface, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, Variant};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::{MarketPriceClient, OpenWeatherMapClient, PredictionClient};
use logic::{weather, Advisor};
use models::FormInput;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing_subscriber::EnvFilter;
use ui::console::ConsoleSurface;
use ui::screens::{AdvisorScreen, HomeScreen};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_logging(cli.verbose, None)?;
            Config::setup_interactive()?;
            Ok(())
        }
        Some(Commands::Check) => {
            init_logging(cli.verbose, None)?;
            run_check(cli.config).await
        }
        Some(Commands::Recommend {
            soil,
            season,
            temperature,
            rainfall,
        }) => {
            init_logging(cli.verbose, None)?;
            run_recommend(cli.config, soil, season, temperature, rainfall).await
        }
        None => {
            // The terminal belongs to the TUI, so logs go to a file
            let log_path = Config::log_path(cli.data_dir.as_ref())?;
            init_logging(cli.verbose, Some(log_path))?;
            run_tui(cli.config).await
        }
    }
}

fn init_logging(verbose: u8, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("cropwise=debug"),
        _ => EnvFilter::new("cropwise=trace"),
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }

    Ok(())
}

async fn run_check(config_override: Option<PathBuf>) -> anyhow::Result<()> {
    let config = Config::load(config_override)?;
    println!("Configuration OK (mode: {})", config.mode);

    match config.prediction.as_ref().filter(|p| p.enabled) {
        Some(c) => {
            let client = PredictionClient::new(c.clone());
            print_connection("Prediction service", client.test_connection().await);
        }
        None => println!("  Prediction service: not configured"),
    }

    match config.market_prices.as_ref().filter(|m| m.enabled) {
        Some(c) => {
            let client = MarketPriceClient::new(c.clone());
            print_connection("Market prices", client.test_connection().await);
        }
        None => println!("  Market prices: not configured"),
    }

    match config.openweathermap.as_ref().filter(|w| w.enabled) {
        Some(c) => {
            let client = OpenWeatherMapClient::new(c.clone());
            print_connection("OpenWeatherMap", client.test_connection().await);
        }
        None => println!("  OpenWeatherMap: not configured"),
    }

    println!();
    println!("Rule table (first match wins, Maize otherwise):");
    for rule in logic::Resolver::new().list_rules() {
        println!(
            "  {:<22} {} / {} -> {} [{}]",
            rule.id,
            rule.soil,
            rule.season,
            rule.crop,
            rule.guard.describe()
        );
    }

    Ok(())
}

fn print_connection(name: &str, result: error::Result<bool>) {
    match result {
        Ok(true) => println!("  {}: OK", name),
        Ok(false) => println!("  {}: OFFLINE (unexpected response)", name),
        Err(e) => println!("  {}: OFFLINE ({})", name, e),
    }
}

async fn run_recommend(
    config_override: Option<PathBuf>,
    soil: String,
    season: String,
    temperature: Option<String>,
    rainfall: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(config_override)?;

    // Passing either weather value asks for the extended form
    if temperature.is_some() || rainfall.is_some() {
        config.mode = Variant::Extended;
    }

    let mut form = FormInput::new(soil, season);
    if config.mode == Variant::Extended {
        let (temperature, rainfall) = match (temperature, rainfall) {
            (Some(t), Some(r)) => (t, r),
            (t, r) => {
                let provider = weather::weather_provider(&config);
                let reading = weather::bootstrap(provider.as_deref()).await;
                (
                    t.unwrap_or_else(|| reading.temperature_field()),
                    r.unwrap_or_else(|| reading.rainfall_field()),
                )
            }
        };
        form = form.with_weather(temperature, rainfall);
    }

    let advisor = Advisor::new(&config);
    let mut surface = ConsoleSurface::stdout();
    advisor.run_cycle(&form, &mut surface).await;

    Ok(())
}

async fn run_tui(config_override: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match Config::load_or_default(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Run `cropwise init` or copy config/config.yaml.example to config/config.yaml");
            std::process::exit(1);
        }
    };

    tracing::info!(mode = %config.mode, "Starting cropwise");

    let advisor = Arc::new(Advisor::new(&config));
    let mut app = App::new(advisor.variant());
    let (tx, mut rx) = mpsc::unbounded_channel();

    if config.mode == Variant::Extended {
        let provider = weather::weather_provider(&config);
        let tx = tx.clone();
        tokio::spawn(async move {
            let reading = weather::bootstrap(provider.as_deref()).await;
            let _ = tx.send(AppEvent::WeatherLoaded(reading));
        });
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &advisor, &tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    advisor: &Arc<Advisor>,
    tx: &UnboundedSender<AppEvent>,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();

            match app.screen {
                Screen::Home => {
                    f.render_widget(HomeScreen::new(app.variant), area);
                }
                Screen::Advisor => {
                    let screen = AdvisorScreen::new(&app.form, &app.output, app.chart.current())
                        .with_status(app.status_message.as_deref())
                        .pending(app.pending);
                    f.render_widget(screen, area);
                }
            }
        })?;

        // Handle input with timeout so cycle results keep flowing in
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code, key.modifiers);
                }
            }
        }

        if app.submit_requested {
            spawn_cycle(app, advisor, tx);
        }

        // Apply whatever the background tasks produced since the last frame
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_cycle(app: &mut App, advisor: &Arc<Advisor>, tx: &UnboundedSender<AppEvent>) {
    let request = app.begin_request();
    let form = app.form.to_input();
    let advisor = Arc::clone(advisor);
    let tx = tx.clone();

    tracing::debug!(request, soil = %form.soil, season = %form.season, "Starting recommendation");

    tokio::spawn(async move {
        let mut surface = ChannelSurface::new(request, tx);
        advisor.run_cycle(&form, &mut surface).await;
        surface.finish();
    });
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('h') => app.toggle_home(),
        _ => match app.screen {
            Screen::Home => handle_home_input(app, code),
            Screen::Advisor => handle_advisor_input(app, code),
        },
    }
}

fn handle_home_input(app: &mut App, code: KeyCode) {
    if let KeyCode::Enter | KeyCode::Esc = code {
        app.switch_screen(Screen::Advisor);
    }
}

fn handle_advisor_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.switch_screen(Screen::Home),
        KeyCode::Tab | KeyCode::Down => app.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
        KeyCode::Left => app.form.prev_option(),
        KeyCode::Right => app.form.next_option(),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Enter => app.request_submit(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
}
