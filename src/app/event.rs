//! Terminal input for the preview.
//!
//! A background task polls crossterm and forwards what the page cares about
//! over a channel.  Frame ticks are emitted on a fixed cadence whether or not
//! input arrives, so the typing animation keeps moving while the mouse does.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Time to advance the page and redraw.
    Tick,
}

/// Spawn the reader.  The task stops once the receiver is dropped.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_frame = Instant::now() + frame;
        loop {
            let wait = next_frame.saturating_duration_since(Instant::now());
            if event::poll(wait).unwrap_or(false) {
                let forwarded = match event::read() {
                    // Key release/repeat reports would double every press on
                    // terminals that send them.
                    Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => AppEvent::Key(k),
                    Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                    Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if tx.send(forwarded).is_err() {
                    break;
                }
            }
            if Instant::now() >= next_frame {
                next_frame = Instant::now() + frame;
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
