//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) mutates state and returns a list
//! of actions; the plugin shim executes them in order against the Zellij host.
//! Keeping effects as data lets the handler stay free of host calls.

use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Used for fire-and-forget preference writes.
    PostToWorker(WorkerMessage),

    /// Requests a `FrameTick` event after the next frame is drawn.
    ///
    /// The runtime arms a short host timer; pending
    /// [`FrameTask`](crate::app::FrameTask)s run when it fires.
    ScheduleFrame,
}
