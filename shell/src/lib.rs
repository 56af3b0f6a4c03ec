//! This crate is the bridge between the spectator crates and whatever shell is
//! embedding them (a desktop app, a browser runtime, a headless relay, and so on).
//! Everything the core crates need from the outside world funnels through here:
//! log routing and on-screen status notices.
//!
//! Keeping this in one crate means the rest of the workspace never needs to know
//! what it's actually running inside of.

pub mod logger;

use std::sync::OnceLock;

/// Log targets for the various crates in this workspace.
///
/// Pass these as the `target:` when logging via `tracing` so that shells can
/// route and filter per-subsystem:
///
/// ```no_run
/// use shell_integrations::Log;
///
/// tracing::info!(target: Log::Spectator, "Hello!");
/// ```
#[allow(non_upper_case_globals)]
pub struct Log;

#[allow(non_upper_case_globals)]
impl Log {
    pub const General: &'static str = "SLIPPI";
    pub const Spectator: &'static str = "SLIPPI_SPECTATOR";
    pub const Animations: &'static str = "SLIPPI_ANIMATIONS";
    pub const Viewer: &'static str = "SLIPPI_VIEWER";
}

/// Colors that a status notice can request from the shell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Color {
    Cyan = 0xFF00FFFF,
    Green = 0xFF00FF00,
    Red = 0xFFFF0000,
    Yellow = 0xFFFFFF30,
}

/// How long a status notice should stay on screen, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Duration {
    Short = 2000,
    Normal = 5000,
    VeryLong = 10000,
}

/// The type of handler that shells register to receive status notices.
pub type StatusNoticeHandler = Box<dyn Fn(Color, Duration, &str) + Send + Sync>;

static STATUS_NOTICE_HANDLER: OnceLock<StatusNoticeHandler> = OnceLock::new();

/// A marker type for scoping calls that hop back over to the embedding shell.
#[derive(Copy, Clone, Debug)]
pub struct Shell;

impl Shell {
    /// Registers the handler that status notices get forwarded to.
    ///
    /// Only the first registration in a process takes effect; anything after
    /// that is logged and ignored.
    pub fn register_status_notice_handler<F>(handler: F)
    where
        F: Fn(Color, Duration, &str) + Send + Sync + 'static,
    {
        if STATUS_NOTICE_HANDLER.set(Box::new(handler)).is_err() {
            tracing::warn!(
                target: Log::General,
                "Ignoring status notice handler registration, one is already installed"
            );
        }
    }

    /// Queues a message for the shell to render on top of the viewer.
    ///
    /// If the shell never registered a handler, the message still lands in the
    /// logs so headless runs don't lose it.
    pub fn add_status_notice(color: Color, duration: Duration, message: impl AsRef<str>) {
        let message = message.as_ref();

        match STATUS_NOTICE_HANDLER.get() {
            Some(handler) => handler(color, duration, message),
            None => tracing::info!(target: Log::General, "{message}"),
        }
    }
}
