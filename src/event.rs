use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::warn;

pub enum AppEvent {
    Key(KeyEvent),
    /// Emitted when no input arrived within the tick rate; drives the
    /// live timer in the sidebar.
    Tick,
    Resize,
}

/// Reads terminal events on a background thread.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Release and repeat events would double-count keystrokes.
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    }
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let app_event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(ev) => translate(ev),
                        Err(err) => {
                            warn!(%err, "failed to read terminal event");
                            None
                        }
                    },
                    Ok(false) => Some(AppEvent::Tick),
                    Err(err) => {
                        warn!(%err, "terminal poll failed; stopping event thread");
                        return;
                    }
                };

                if let Some(app_event) = app_event {
                    if tx.send(app_event).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
