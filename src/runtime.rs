use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::session::{TestSession, TypingEvent};

/// Unified event type consumed by the session loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// The event source went away; no more input will arrive
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Test event source fed from a channel
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => AppEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => AppEvent::Closed,
        }
    }

    /// Feed events into `session` until it finishes.
    ///
    /// `render` is called once up front and after every event that changes
    /// what is on screen (keystrokes, resizes, and ticks while the timer is
    /// running).
    pub fn drive<F>(&self, session: &mut TestSession, mut render: F) -> io::Result<()>
    where
        F: FnMut(&TestSession, Instant) -> io::Result<()>,
    {
        render(session, Instant::now())?;

        while !session.is_finished() {
            let redraw = match self.step() {
                AppEvent::Key(key) => match typing_event(&key) {
                    Some(ev) => session.handle(ev, Instant::now()),
                    None => false,
                },
                AppEvent::Resize => true,
                AppEvent::Tick => session.has_started(),
                AppEvent::Closed => {
                    debug!("event source closed, interrupting session");
                    session.handle(TypingEvent::Interrupt, Instant::now())
                }
            };

            if redraw {
                render(session, Instant::now())?;
            }
        }

        Ok(())
    }
}

/// Map a terminal key press to a session event.
///
/// Ctrl+C and Esc interrupt, Enter finishes early, Backspace deletes the
/// last character. Key releases and other control chords are ignored.
pub fn typing_event(key: &KeyEvent) -> Option<TypingEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(TypingEvent::Interrupt),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(c) => Some(TypingEvent::Char(c)),
        KeyCode::Backspace => Some(TypingEvent::Backspace),
        KeyCode::Enter => Some(TypingEvent::Finish),
        KeyCode::Esc => Some(TypingEvent::Interrupt),
        _ => None,
    }
}
