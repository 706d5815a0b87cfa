//! Main TUI runner - entry point and event loop
//!
//! The loop drains completion messages from background tasks, runs the
//! TEA update, dispatches any resulting network action as a spawned
//! task, renders, and polls the terminal.

use tokio::sync::mpsc;

use casegen_api::{ApiClient, SessionStore};
use casegen_app::message::Message;
use casegen_app::state::AppState;
use casegen_app::{update, Settings, UpdateAction};
use casegen_core::prelude::*;

use super::{actions, event, render, terminal};

/// Run the TUI application.
pub async fn run(settings: Settings) -> Result<()> {
    // Build the client before taking over the terminal so a bad base
    // URL fails with a readable error.
    let mut client = ApiClient::new(&settings.api_base)?;

    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut state = AppState::new(settings, SessionStore::new());
    client.set_credential(state.credential().map(String::from));

    let mut term = ratatui::init();
    let result = run_loop(&mut term, &mut state, &mut client);
    ratatui::restore();
    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    client: &mut ApiClient,
) -> Result<()> {
    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(256);

    // A restored session starts with the workspace load the original
    // ran on sign-in.
    if state.auth.is_signed_in() {
        actions::dispatch(UpdateAction::LoadWorkspace, client, &msg_tx);
    }

    while !state.should_quit() {
        // Process completion messages from background tasks
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, client, &msg_tx);
        }

        // Render
        terminal.draw(|frame| render::view(frame, state))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            process_message(state, message, client, &msg_tx);
        }
    }

    Ok(())
}

/// Run one message (and any follow-ups) through update(), dispatching
/// resulting actions.
fn process_message(
    state: &mut AppState,
    message: Message,
    client: &mut ApiClient,
    msg_tx: &mpsc::Sender<Message>,
) {
    let mut current = Some(message);
    while let Some(message) = current.take() {
        let result = update(state, message);

        // Keep the bearer credential in sync with the auth state
        // (sign-in attaches it, sign-out and 401 drop it).
        client.set_credential(state.credential().map(String::from));

        if let Some(action) = result.action {
            debug!("dispatching {action:?}");
            actions::dispatch(action, client, msg_tx);
        }
        current = result.message;
    }
}
