use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::warn;

/// What the main loop reacts to
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Nothing arrived within one tick
    Tick,
    /// The input source is gone and no further keys will come
    Closed,
}

/// Somewhere key presses and resizes come from
pub trait EventSource: Send + 'static {
    /// Waits up to `timeout`; `None` when nothing arrived in time
    fn poll_event(&self, timeout: Duration) -> Option<AppEvent>;
}

/// Events delivered over a channel, either by the terminal reader thread or by a test
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }

    /// Spawns a thread that forwards terminal key presses and resizes
    pub fn terminal() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let event = match event::read() {
                // release/repeat events are reported on some platforms; only presses matter
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "terminal input failed");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        });

        Self::new(rx)
    }
}

impl EventSource for ChannelEventSource {
    fn poll_event(&self, timeout: Duration) -> Option<AppEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(AppEvent::Closed),
        }
    }
}

/// Hands the app one event per call, falling back to a tick when idle
pub struct Runner<E: EventSource> {
    source: E,
    tick: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(source: E, tick: Duration) -> Self {
        Self { source, tick }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Blocks for at most one tick
    pub fn step(&self) -> AppEvent {
        self.source.poll_event(self.tick).unwrap_or(AppEvent::Tick)
    }
}
