//! Terminal event abstraction.
//!
//! A background task polls crossterm and forwards events over a channel.
//! When nothing arrives within one frame interval it sends a `Frame` so the
//! spring keeps animating while the user is hands-off.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
    /// The terminal lost focus; any mouse release will never arrive.
    FocusLost,
    /// Animation frame.
    Frame,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let has_event = event::poll(frame_interval).unwrap_or(false);
            let app_event = if has_event {
                match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                    Ok(CtEvent::Resize(width, height)) => AppEvent::Resize { width, height },
                    Ok(CtEvent::FocusLost) => AppEvent::FocusLost,
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::warn!(%err, "terminal read failed");
                        continue;
                    }
                }
            } else {
                AppEvent::Frame
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
