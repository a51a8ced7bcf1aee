use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tracing::{debug, warn};

/// How often the terminal reader wakes up to check for shutdown
const TERMINAL_POLL: Duration = Duration::from_millis(50);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    /// An accepted letter press from the global hook
    Keystroke(Instant),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
    /// The global hook died after start-up
    ObserverFailed(String),
}

/// Source of app events (global keystrokes, terminal input, failures)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source: every producer thread holds a clone of the sender
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new() -> (Sender<AppEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::from_receiver(rx))
    }

    /// Wrap a receiver whose senders are already handed out (tests feed events this way)
    pub fn from_receiver(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Forwards crossterm events until `stop` is called or the channel closes
pub struct TerminalReader {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TerminalReader {
    pub fn spawn(tx: Sender<AppEvent>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = shutdown.clone();

        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match event::poll(TERMINAL_POLL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        warn!(error = %e, "terminal poll failed");
                        break;
                    }
                }

                let evt = match event::read() {
                    Ok(CtEvent::Key(key)) => AppEvent::Key(key),
                    Ok(CtEvent::Mouse(mouse)) => AppEvent::Mouse(mouse),
                    Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "terminal read failed");
                        break;
                    }
                };

                if tx.send(evt).is_err() {
                    break;
                }
            }
            debug!("terminal reader exited");
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TerminalReader {
    fn drop(&mut self) {
        self.stop();
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

/// Runner that advances the application one event/tick at a time.
///
/// Ticks fire on fixed deadlines: events only wait until the next deadline,
/// so a steady stream of keystrokes cannot delay sampling. Deadlines missed
/// while the loop was busy collapse into a single tick.
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks until the next event or the next tick deadline, whichever is first
    pub fn step(&mut self) -> AppEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.tick(now);
        }

        match self.event_source.recv_timeout(self.next_tick - now) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.tick(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                // nothing left to wait on; keep the tick cadence
                thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.tick(Instant::now())
            }
        }
    }

    fn tick(&mut self, now: Instant) -> AppEvent {
        let interval = self.ticker.interval();
        self.next_tick += interval;
        if self.next_tick <= now {
            self.next_tick = now + interval;
        }
        AppEvent::Tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = ChannelEventSource::from_receiver(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        assert_matches!(runner.step(), AppEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = ChannelEventSource::from_receiver(rx);
        let ticker = FixedTicker::new(Duration::from_millis(500));
        let mut runner = Runner::new(es, ticker);

        assert_matches!(runner.step(), AppEvent::Resize);
    }

    #[test]
    fn ticks_are_not_starved_by_event_flood() {
        let (tx, rx) = mpsc::channel();
        let es = ChannelEventSource::from_receiver(rx);
        let ticker = FixedTicker::new(Duration::from_millis(20));
        let mut runner = Runner::new(es, ticker);

        let producer = thread::spawn(move || {
            let until = Instant::now() + Duration::from_millis(200);
            while Instant::now() < until {
                if tx.send(AppEvent::Keystroke(Instant::now())).is_err() {
                    break;
                }
                thread::sleep(Duration::from_micros(200));
            }
        });

        let started = Instant::now();
        let mut ticks = 0;
        while started.elapsed() < Duration::from_millis(150) {
            if let AppEvent::Tick = runner.step() {
                ticks += 1;
            }
        }
        drop(runner);
        producer.join().unwrap();

        assert!(ticks >= 3, "expected regular ticks, got {ticks}");
    }

    #[test]
    fn disconnected_source_keeps_ticking() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let es = ChannelEventSource::from_receiver(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));

        assert_matches!(runner.step(), AppEvent::Tick);
        assert_matches!(runner.step(), AppEvent::Tick);
    }
}
