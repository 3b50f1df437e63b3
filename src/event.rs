use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc;
use tokio::time::{self, Interval, MissedTickBehavior};

use ftree::error::{AppError, Result};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// A key press.
    Key(KeyEvent),
    /// A periodic tick; drives the search debouncer and status expiry.
    Tick,
    /// Terminal resize.
    Resize(u16, u16),
}

/// Bridges crossterm's blocking input source into the async loop.
///
/// Terminal events are read on the blocking thread pool and forwarded over
/// an unbounded channel; ticks come from a tokio interval, multiplexed with
/// the channel in [`next`](Self::next).
pub struct EventHandler {
    input_rx: mpsc::UnboundedReceiver<Event>,
    ticker: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                let read = tokio::task::spawn_blocking(|| {
                    // Poll with a timeout so the task can notice a dropped
                    // receiver instead of parking in read() forever.
                    if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                        event::read().ok()
                    } else {
                        None
                    }
                })
                .await;
                let forwarded = match read {
                    Ok(Some(CrosstermEvent::Key(key))) => input_tx.send(Event::Key(key)),
                    Ok(Some(CrosstermEvent::Resize(w, h))) => input_tx.send(Event::Resize(w, h)),
                    Ok(_) => {
                        if input_tx.is_closed() {
                            break;
                        }
                        continue;
                    }
                    Err(_) => break,
                };
                if forwarded.is_err() {
                    break;
                }
            }
        });

        let mut ticker = time::interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { input_rx, ticker }
    }

    /// The next input event or tick, whichever arrives first.
    pub async fn next(&mut self) -> Result<Event> {
        tokio::select! {
            input = self.input_rx.recv() => {
                input.ok_or_else(|| AppError::Terminal("input channel closed".into()))
            }
            _ = self.ticker.tick() => Ok(Event::Tick),
        }
    }
}
