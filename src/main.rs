mod api;
mod app;
mod config;
mod error;
mod event;
mod logging;
mod product;
mod subscription;
mod ui;

#[cfg(test)]
mod testing;

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;
use tracing::info;

use api::ProductClient;
use app::{App, AppMode};
use config::Config;
use event::{Event, EventHandler};
use subscription::Subscription;

const STATUS_TTL: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    color_eyre::install()?;

    let config = Config::from_env();
    let _log_guard = logging::init(&config.log_dir)?;

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &config).await;
    ratatui::restore();

    info!("exiting");
    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: &Config) -> Result<()> {
    let mut app = App::default();
    let mut events = EventHandler::new(config.tick_rate);
    let client = ProductClient::new(config.product_url.clone());

    info!(url = client.url(), "starting product list");

    // Dropped with `run`, which abandons any fetch still in flight.
    let mut subscription = Some(start_load(&mut app, &client, events.sender()));

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let Some(event) = events.next().await else {
            break;
        };

        match event {
            Event::Key(key) => {
                handle_key_event(&mut app, key, &client, events.sender(), &mut subscription);
            }
            Event::Tick => {
                app.expire_status(STATUS_TTL);
                if subscription.as_ref().is_some_and(Subscription::is_finished) {
                    subscription = None;
                }
            }
            Event::Resize(_, _) => {}
            Event::Loaded(loaded) => {
                if subscription.as_ref().map(Subscription::ticket) == Some(loaded.ticket) {
                    subscription = None;
                }
                app.apply_loaded(loaded);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn start_load(
    app: &mut App,
    client: &ProductClient,
    tx: mpsc::UnboundedSender<Event>,
) -> Subscription {
    let ticket = app.begin_load();
    subscription::subscribe(client.clone(), ticket, tx)
}

fn handle_key_event(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    client: &ProductClient,
    tx: mpsc::UnboundedSender<Event>,
    subscription: &mut Option<Subscription>,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.mode {
        AppMode::Filter => match key.code {
            KeyCode::Enter => app.mode = AppMode::Viewing,
            KeyCode::Esc => {
                app.clear_filter();
                app.mode = AppMode::Viewing;
            }
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Up => app.select_previous(),
            KeyCode::Down => app.select_next(),
            KeyCode::Char(c) => app.input_char(c),
            _ => {}
        },
        AppMode::Viewing => match key.code {
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('/') => app.mode = AppMode::Filter,
            KeyCode::Esc => app.clear_filter(),
            KeyCode::Char('i') => app.toggle_image(),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char('r') => {
                if let Some(previous) = subscription.take() {
                    previous.cancel();
                }
                *subscription = Some(start_load(app, client, tx));
            }
            _ => {}
        },
    }
}
