//! Optimizm Chat terminal widget
//!
//! Renders the chat widget in the terminal and talks to `OPTIMIZM_API_URL`.
//! Logs go to the file named by `OPTIMIZM_CHAT_LOG`, if set.

use crossterm::event::{Event as TermEvent, EventStream};
use futures::StreamExt;
use optimizm_chat::config::WidgetConfig;
use optimizm_chat::runtime::{ConversationHandle, ConversationRuntime};
use optimizm_chat::state_machine::Conversation;
use optimizm_chat::transport::{HttpTransport, LoggingTransport};
use optimizm_chat::ui::{self, WidgetTheme};
use ratatui::DefaultTerminal;
use std::error::Error;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;

    let config = WidgetConfig::from_env()?;
    let theme = WidgetTheme::from_config(&config)?;

    let transport = LoggingTransport::new(HttpTransport::new(config.api_url.clone()));
    let handle = ConversationRuntime::spawn(
        Conversation::new(config.welcome_message.clone()),
        transport,
    );

    let mut terminal = ratatui::try_init()?;
    let result = run(&mut terminal, &handle, &theme).await;
    ratatui::restore();

    result
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    // stdout and stderr belong to the UI
    let Ok(path) = std::env::var("OPTIMIZM_CHAT_LOG") else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "optimizm_chat=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

async fn run(
    terminal: &mut DefaultTerminal,
    handle: &ConversationHandle,
    theme: &WidgetTheme,
) -> Result<(), Box<dyn Error>> {
    let mut views = handle.subscribe();
    let mut events = EventStream::new();

    loop {
        let view = views.borrow_and_update().clone();
        terminal.draw(|frame| ui::render(&view, theme, frame))?;

        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            event = events.next() => match event {
                Some(Ok(TermEvent::Key(key))) => {
                    if !ui::handle_key(handle, &view, key).await? {
                        break;
                    }
                }
                // Resize and friends just redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    Ok(())
}
