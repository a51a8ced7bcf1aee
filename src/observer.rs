//! Global keyboard observation.
//!
//! The hook runs on its own thread and only ever talks to the UI loop through
//! the app event channel. `rdev::listen` never returns on success, so the
//! thread cannot be joined; stopping flips a flag that makes the callback drop
//! every event from then on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rdev::{Event, EventType};
use tracing::{debug, error, info};

use crate::error::{KeytallyError, Result};
use crate::input::is_countable;
use crate::runtime::AppEvent;

/// How long start-up waits for the hook to report an immediate failure
pub const STARTUP_GRACE: Duration = Duration::from_millis(250);

/// Turns raw hook events into keystroke messages
#[derive(Clone)]
pub struct Forwarder {
    tx: Sender<AppEvent>,
    shutdown: Arc<AtomicBool>,
}

impl Forwarder {
    pub fn on_event(&self, event: &Event) {
        if self.shutdown.load(Ordering::Relaxed) {
            return;
        }
        if !matches!(event.event_type, EventType::KeyPress(_)) {
            return;
        }
        if !is_countable(event.name.as_deref()) {
            return;
        }

        if self.tx.send(AppEvent::Keystroke(Instant::now())).is_err() {
            // receiver is gone, nothing will ever read again
            self.shutdown.store(true, Ordering::Relaxed);
        }
    }
}

/// Keeps the observer alive; stop it before tearing down the UI
#[derive(Debug)]
pub struct ObserverHandle {
    shutdown: Arc<AtomicBool>,
}

impl ObserverHandle {
    pub fn stop(&self) {
        if !self.shutdown.swap(true, Ordering::Relaxed) {
            info!("global key observer stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Start the rdev global hook.
pub fn spawn(tx: Sender<AppEvent>) -> Result<ObserverHandle> {
    spawn_with(tx, STARTUP_GRACE, |forwarder| {
        rdev::listen(move |event| forwarder.on_event(&event)).map_err(|e| format!("{e:?}"))
    })
}

/// Start an observer around an arbitrary blocking `hook`.
///
/// A hook error within `grace` is returned from here. A later error is sent
/// down the channel as [`AppEvent::ObserverFailed`].
pub fn spawn_with<H>(tx: Sender<AppEvent>, grace: Duration, hook: H) -> Result<ObserverHandle>
where
    H: FnOnce(Forwarder) -> std::result::Result<(), String> + Send + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let forwarder = Forwarder {
        tx: tx.clone(),
        shutdown: shutdown.clone(),
    };
    let (err_tx, err_rx) = mpsc::channel::<String>();

    thread::Builder::new()
        .name("keytally-observer".into())
        .spawn(move || {
            debug!("installing global key hook");
            let outcome = hook(forwarder);
            match outcome {
                Ok(()) => debug!("global key hook returned"),
                Err(msg) => {
                    error!(error = %msg, "global key hook failed");
                    // report on both paths: start-up may already have given up
                    // waiting on err_rx without dropping it yet
                    let _ = tx.send(AppEvent::ObserverFailed(msg.clone()));
                    let _ = err_tx.send(msg);
                }
            }
        })?;

    match err_rx.recv_timeout(grace) {
        Ok(msg) => {
            shutdown.store(true, Ordering::Relaxed);
            Err(KeytallyError::Listener(msg))
        }
        Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
            info!("global key observer running");
            Ok(ObserverHandle { shutdown })
        }
    }
}
