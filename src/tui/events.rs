use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, warn};

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick; pending page fetches are applied here
    Tick,
}

/// Merges terminal input with a periodic tick
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    sender: mpsc::UnboundedSender<Event>,
    ticker: Interval,
    stop: Arc<AtomicBool>,
    reader: Option<tokio::task::JoinHandle<()>>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut ticker = interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            receiver,
            sender,
            ticker,
            stop: Arc::new(AtomicBool::new(false)),
            reader: None,
        }
    }

    /// Start reading terminal input on a blocking thread
    pub fn start(&mut self) {
        if self.reader.is_some() {
            return;
        }

        let sender = self.sender.clone();
        let stop = Arc::clone(&self.stop);

        self.reader = Some(tokio::task::spawn_blocking(move || {
            while !stop.load(Ordering::Relaxed) {
                match crossterm::event::poll(Duration::from_millis(50)) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(event) => {
                            if let Some(event) = convert_crossterm_event(event) {
                                if sender.send(event).is_err() {
                                    break;
                                }
                            }
                        }
                        Err(e) => warn!("Failed to read terminal event: {}", e),
                    },
                    Ok(false) => {}
                    Err(e) => {
                        warn!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
            }
            debug!("Terminal input reader stopped");
        }));
    }

    /// Signal the reader thread to exit
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.reader.take();
    }

    /// Get the next event, or a tick when the tick interval elapses first
    pub async fn next(&mut self) -> Option<Event> {
        tokio::select! {
            event = self.receiver.recv() => event,
            _ = self.ticker.tick() => Some(Event::Tick),
        }
    }

    /// Get a clone of the sender
    #[cfg(test)]
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Convert crossterm events to application events
fn convert_crossterm_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        // Windows reports releases too
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Release => None,
        CrosstermEvent::Key(key) => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Paste(_) => None,
    }
}
