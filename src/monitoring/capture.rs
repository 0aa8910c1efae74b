use crate::error::{Result, SimError};
use crate::events::PacketEvent;
use crate::simulation::{Session, TrafficStats};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => f.write_str("idle"),
            CaptureState::Capturing => f.write_str("capturing"),
        }
    }
}

/// Sent to listeners after each tick has been fully applied.
#[derive(Debug, Clone)]
pub struct CaptureUpdate {
    pub event: PacketEvent,
    pub stats: TrafficStats,
}

/// Running periodic task. Cancelling joins the thread, so once
/// [`cancel`](Self::cancel) returns no further tick can touch the session.
pub struct CaptureHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl CaptureHandle {
    pub fn cancel(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        // Disconnecting the stop channel wakes the task out of select!.
        drop(self.stop_tx.take());
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| SimError::ThreadPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("Capture task ended abnormally: {}", e);
        }
    }
}

pub fn start_capture(
    session: Arc<Mutex<Session>>,
    interval: Duration,
    updates: Sender<CaptureUpdate>,
) -> CaptureHandle {
    let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
    let thread = std::thread::spawn(move || {
        log::info!("Capture task starting ({} ms interval)...", interval.as_millis());
        run_capture(session, interval, updates, stop_rx);
        log::info!("Capture task stopped");
    });

    CaptureHandle {
        stop_tx: Some(stop_tx),
        thread: Some(thread),
    }
}

pub fn run_capture(
    session: Arc<Mutex<Session>>,
    interval: Duration,
    updates: Sender<CaptureUpdate>,
    stop_rx: Receiver<()>,
) {
    let ticker = crossbeam_channel::tick(interval);

    loop {
        crossbeam_channel::select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                // Both arms may be ready at once; a pending stop always wins.
                if !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }

                let update = {
                    let mut session = session.lock();
                    let event = session.tick();
                    CaptureUpdate { event, stats: session.stats() }
                };
                log::debug!("Tick: {}", update.event);

                if updates.send(update).is_err() {
                    log::trace!("No capture listeners attached");
                }
            }
        }
    }
}

/// Idle/Capturing state machine around the periodic task.
pub struct CaptureScheduler {
    session: Arc<Mutex<Session>>,
    interval: Duration,
    updates: Sender<CaptureUpdate>,
    task: Option<CaptureHandle>,
}

impl CaptureScheduler {
    pub fn new(
        session: Arc<Mutex<Session>>,
        interval: Duration,
        updates: Sender<CaptureUpdate>,
    ) -> Self {
        Self {
            session,
            interval,
            updates,
            task: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.task.is_some() {
            CaptureState::Capturing
        } else {
            CaptureState::Idle
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `false` when capture was already running.
    pub fn start(&mut self) -> bool {
        if self.task.is_some() {
            return false;
        }
        self.task = Some(start_capture(
            Arc::clone(&self.session),
            self.interval,
            self.updates.clone(),
        ));
        true
    }

    /// Returns `Ok(false)` when capture was not running.
    pub fn stop(&mut self) -> Result<bool> {
        match self.task.take() {
            Some(task) => {
                task.cancel()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
