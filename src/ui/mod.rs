//! Terminal front-end
//!
//! Draws every published [`ViewState`](crate::state::ViewState) and turns key
//! presses and clicks into intents on the shared [`AppState`].

pub mod input;
pub mod render;

use std::{io, sync::Arc};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use tracing::{info, warn};

use crate::state::AppState;
use input::{map_key, Command};

pub use render::format_time;

/// Puts the terminal into full-screen raw mode and restores it on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Forward a command to the application state
pub fn apply(state: &AppState, command: Command) {
    let result = match command {
        Command::SelectDuration(minutes) => state.select_duration(minutes),
        Command::TogglePause => state.toggle_pause(),
        Command::Reset => state.reset(),
        Command::Interact => state.register_interaction(),
        Command::Quit => return,
    };

    if let Err(e) = result {
        warn!("Failed to apply {:?}: {}", command, e);
    }
}

/// Run the front-end until the user quits or input ends
pub async fn run_terminal(state: Arc<AppState>) -> anyhow::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    let mut events = EventStream::new();
    let mut view_rx = state.subscribe_view();

    let initial = view_rx.borrow_and_update().clone();
    render::draw(&mut stdout, &initial)?;

    loop {
        tokio::select! {
            changed = view_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = view_rx.borrow_and_update().clone();
                render::draw(&mut stdout, &view)?;
            }

            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match map_key(key, &state.view()) {
                    Some(Command::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    Some(command) => apply(&state, command),
                    None => {}
                },
                Some(Ok(Event::Mouse(mouse))) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    apply(&state, Command::Interact);
                }
                Some(Ok(Event::Resize(_, _))) => render::draw(&mut stdout, &state.view())?,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            }
        }
    }

    Ok(())
}
