//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Navrail library
//! and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits and is the only place that talks to the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  Worker          │   │  ← Preference writes
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search and theme events (see below)
//! - `Mouse(LeftClick)` → `Event::Click` at the same 0-based coordinates
//! - `Mouse(ScrollUp/ScrollDown)` → cursor movement
//! - `Timer` → `Event::FrameTick` (deferred focus after a layout change)
//! - `CustomMessage` → `Event::WorkerResponse`
//! - `PermissionRequestResult(Granted)` → `Event::StoredThemeLoaded`
//!
//! # Keybindings
//!
//! Rail and rows:
//! - `j`/`Down`, `k`/`Up`: Move cursor
//! - `Enter`/`Space`: Open section, toggle parent or select row
//! - `Tab`: Switch between rail and rows
//! - `h`/`Left`, `l`/`Right`: Focus rail, focus rows
//! - `1`-`9`: Open section by rail position
//! - `/`: Search (expands a collapsed rail)
//! - `[`: Collapse or expand the context rail
//! - `t`: Toggle light/dark theme
//! - `q`/`Esc`: Hide plugin
//!
//! In search:
//! - Characters: Type into the filter
//! - `Backspace`: Delete, `Ctrl+u`: Clear
//! - `Enter`/`Down`: Leave search to the first result
//! - `Esc`: Leave search, keeping the filter

#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, post_message_to_plugin};

use navrail::worker::{NavrailWorker, WorkerMessage, WorkerResponse};
use navrail::{handle_event, Action, Config, Event, Focus};

/// Name shared by the worker registration and IPC messages.
const WORKER_NAME: &str = "navrail";

/// Delay standing in for "after the next frame" when scheduling frame tasks.
const FRAME_DELAY_SECS: f64 = 0.016;

register_plugin!(State);
register_worker!(Worker, navrail_worker, NAVRAIL_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns.
struct State {
    app: navrail::AppState,

    /// A host timer is armed for pending frame tasks.
    frame_scheduled: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: navrail::AppState::new(
                navrail::Catalog::builtin(),
                navrail::ThemeSet::default(),
                navrail::ThemeMode::default(),
            ),
            frame_scheduled: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, and subscribes to
    /// events.
    ///
    /// # Permissions
    ///
    /// Requests `FullHdAccess` so preferences, custom palettes and the trace
    /// file can live under the host data directory.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        navrail::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(default_section = ?config.default_section, theme = %config.theme, "parsed configuration");
        self.app = navrail::initialize(&config);

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes resulting actions.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match Self::map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => {
                self.frame_scheduled = false;
                Event::FrameTick
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match Self::map_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        print!("{}", navrail::ui::render(&mut self.app, rows, cols));
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events, depending on focus.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.focus() == Focus::Search {
            if key.bare_key == BareKey::Char('u') && key.has_modifiers(&[KeyModifier::Ctrl]) {
                return Some(Event::ClearSearch);
            }
            return Some(match key.bare_key {
                BareKey::Esc => Event::ExitSearch,
                BareKey::Enter | BareKey::Down => Event::FocusContext,
                BareKey::Backspace => Event::SearchBackspace,
                BareKey::Char(c) if key.key_modifiers.is_empty() || c.is_uppercase() => Event::SearchChar(c),
                _ => return None,
            });
        }

        if !key.key_modifiers.is_empty() {
            return None;
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::CursorDown,
            BareKey::Up | BareKey::Char('k') => Event::CursorUp,
            BareKey::Enter | BareKey::Char(' ') => Event::ActivateCursor,
            BareKey::Tab => Event::CycleFocus,
            BareKey::Left | BareKey::Char('h') => Event::FocusRail,
            BareKey::Right | BareKey::Char('l') => Event::FocusContext,
            BareKey::Char('/') => Event::FocusSearch,
            BareKey::Char('[') => Event::ToggleCollapsed,
            BareKey::Char('t') => Event::ToggleTheme,
            BareKey::Char(c @ '1'..='9') => Event::SelectSectionIndex(c.to_digit(10)? as usize),
            BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let line = usize::try_from(line).ok()?;
                Some(Event::Click { line, col })
            }
            Mouse::ScrollUp(_) => Some(Event::CursorUp),
            Mouse::ScrollDown(_) => Some(Event::CursorDown),
            _ => None,
        }
    }

    /// Re-reads the stored theme once filesystem access is granted.
    fn map_permission_result(permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted");
                navrail::read_stored_theme().map(Event::StoredThemeLoaded)
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - theme will not persist");
                None
            }
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes the message as JSON and sends it to the worker thread.
    ///
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::ScheduleFrame => {
                if !self.frame_scheduled {
                    self.frame_scheduled = true;
                    set_timeout(FRAME_DELAY_SECS);
                }
            }
        }
    }
}

/// Tracks whether tracing has been initialized in the worker instance.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Worker thread entry point wrapping the library's [`NavrailWorker`].
#[derive(Default, Serialize, Deserialize)]
struct Worker {
    #[serde(skip)]
    inner: NavrailWorker,
}

impl ZellijWorker<'_> for Worker {
    /// Handles a JSON `WorkerMessage` and posts the JSON `WorkerResponse` back
    /// to the plugin under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
            navrail::observability::init_tracing(&Config::default());
        }

        if let Some(payload) = self.inner.handle_payload(&payload) {
            post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            });
        }
    }
}
