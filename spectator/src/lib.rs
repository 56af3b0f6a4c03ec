//! Core engine for watching Slippi games live. Takes decoded replay events
//! from a transport, assembles them into renderable frames, and runs a
//! playback cursor a couple frames behind the stream so viewers can pause,
//! scrub, and change speed without ever rendering a half-written frame.
//!
//! The transport itself (WebSocket, broadcast relay, whatever) lives a layer
//! up; this crate only cares about ordered batches of [`GameEvent`]s.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use shell_integrations::Log;

mod clock;

pub mod config;
pub use config::PlaybackTuning;

pub mod errors;
pub use errors::{EventIngestError, SessionError};

pub mod events;
pub use events::{FrameNumber, GameEvent};

pub mod history;
pub mod navigator;

pub mod session;
pub use session::SessionCore;

pub mod timeline;
pub use timeline::{Frame, PlayerUpdate, Timeline};

/// Events that we dispatch into the driver thread.
#[derive(Copy, Clone, Debug)]
enum DriverMessage {
    Dropped,
}

/// How long the driver sleeps between wake-ups while playback is paused or
/// no game has started yet.
const IDLE_WAIT: Duration = Duration::from_millis(50);

/// The public handle for one spectate session. Owns the assembled session
/// state and a driver thread that fires playback ticks in real time.
///
/// Transport batches and viewer commands apply synchronously under the
/// session lock, so the caller that ingests a batch sees its effects
/// immediately; the driver thread's only job is advancing the cursor on the
/// clock's cadence. Dropping the handle winds the driver down and joins it.
#[derive(Debug)]
pub struct SpectateSession {
    core: Arc<Mutex<SessionCore>>,
    driver_notifier: Sender<DriverMessage>,
    driver_thread: Option<thread::JoinHandle<()>>,
}

impl SpectateSession {
    /// Initializes session state and spawns the driver thread.
    pub fn new(tuning: PlaybackTuning) -> Result<Self, SessionError> {
        let core = Arc::new(Mutex::new(SessionCore::new(tuning)));
        let (driver_notifier, receiver) = mpsc::channel();

        let driver_core = core.clone();

        let driver_thread = thread::Builder::new()
            .name("SlippiSpectatorDriver".to_string())
            .spawn(move || run_driver(driver_core, receiver))
            .map_err(SessionError::ThreadSpawn)?;

        Ok(Self {
            core,
            driver_notifier,
            driver_thread: Some(driver_thread),
        })
    }

    /// Applies one transport batch, in order, under the session lock. A
    /// reader never observes a partially applied batch.
    pub fn ingest(&self, events: Vec<GameEvent>) {
        self.lock().ingest_batch(events);
    }

    pub fn toggle_pause(&self) {
        self.lock().toggle_pause();
    }

    pub fn speed_normal(&self) {
        self.lock().speed_normal();
    }

    pub fn speed_fast(&self) {
        self.lock().speed_fast();
    }

    pub fn speed_slow(&self) {
        self.lock().speed_slow();
    }

    pub fn jump(&self, frame: FrameNumber) {
        self.lock().jump(frame);
    }

    pub fn jump_percent(&self, fraction: f64) {
        self.lock().jump_percent(fraction);
    }

    pub fn jump_to_live(&self) {
        self.lock().jump_to_live();
    }

    pub fn adjust(&self, delta: FrameNumber) {
        self.lock().adjust(delta);
    }

    /// Runs a closure with read access to the session state.
    pub fn read<F, R>(&self, handler: F) -> R
    where
        F: FnOnce(&SessionCore) -> R,
    {
        let core = self.core.lock().expect("Unable to acquire session core lock");

        handler(&core)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionCore> {
        self.core.lock().expect("Unable to acquire session core lock")
    }
}

impl Drop for SpectateSession {
    /// Notifies the driver thread that we're winding down and joins it,
    /// logging if any errors are encountered.
    fn drop(&mut self) {
        if let Some(driver_thread) = self.driver_thread.take() {
            if let Err(e) = self.driver_notifier.send(DriverMessage::Dropped) {
                tracing::error!(
                    target: Log::Spectator,
                    error = ?e,
                    "Failed to send shutdown notification to driver thread, may hang"
                );
            }

            if let Err(e) = driver_thread.join() {
                tracing::error!(
                    target: Log::Spectator,
                    error = ?e,
                    "Driver thread failure"
                );
            }
        }
    }
}

/// The driver thread body. Fires clock ticks at whatever cadence the session
/// clock currently wants, re-reading that cadence on every pass so pause and
/// speed changes take effect within one wait.
fn run_driver(core: Arc<Mutex<SessionCore>>, receiver: Receiver<DriverMessage>) {
    let mut next_tick: Option<Instant> = None;

    loop {
        let period = {
            let core = core.lock().expect("Unable to acquire session core lock");
            core.is_running().then(|| core.tick_period())
        };

        let wait = match period {
            Some(period) => {
                let now = Instant::now();
                let deadline = *next_tick.get_or_insert(now + period);

                if now >= deadline {
                    core.lock().expect("Unable to acquire session core lock").tick();

                    // Schedule off the old deadline so cadence doesn't drift,
                    // unless we've fallen more than a full period behind.
                    let scheduled = deadline + period;
                    next_tick = Some(if scheduled > now { scheduled } else { now + period });
                    continue;
                }

                deadline - now
            },

            None => {
                next_tick = None;
                IDLE_WAIT
            },
        };

        match receiver.recv_timeout(wait) {
            Ok(DriverMessage::Dropped) => return,
            Err(RecvTimeoutError::Timeout) => {},
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
