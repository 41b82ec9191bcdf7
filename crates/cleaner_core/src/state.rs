use serde::Deserialize;

use crate::view_model::{AppViewModel, ControlLabel};

/// Lifecycle of the new-message watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatcherPhase {
    /// Not armed: cleaning is inactive or there is nothing to watch.
    #[default]
    Detached,
    Idle,
    /// Disconnected, waiting for the settle delay before a pass.
    Running,
    /// A pass completed; waiting before reconnecting.
    CoolingDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WatcherTimings {
    /// Minimum spacing between the starts of two watcher-triggered passes.
    pub debounce_ms: u64,
    pub settle_ms: u64,
    pub cooldown_ms: u64,
}

impl Default for WatcherTimings {
    fn default() -> Self {
        Self {
            debounce_ms: 2_000,
            settle_ms: 500,
            cooldown_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    timings: WatcherTimings,
    loaded: bool,
    initialized: bool,
    on_ticket_page: bool,
    control_mounted: bool,
    cleaning_active: bool,
    watcher: WatcherPhase,
    cycle: u64,
    last_run_started_ms: Option<u64>,
    last_notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: WatcherTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            on_ticket_page: self.on_ticket_page,
            control_mounted: self.control_mounted,
            label: self.label(),
            cleaning_active: self.cleaning_active,
            watcher: self.watcher,
            last_notice: self.last_notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn timings(&self) -> WatcherTimings {
        self.timings
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn cleaning_active(&self) -> bool {
        self.cleaning_active
    }

    pub fn watcher(&self) -> WatcherPhase {
        self.watcher
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn last_run_started_ms(&self) -> Option<u64> {
        self.last_run_started_ms
    }

    pub fn label(&self) -> ControlLabel {
        if self.cleaning_active {
            ControlLabel::Restore
        } else {
            ControlLabel::Clean
        }
    }

    /// Records the page load; false when one was already seen.
    pub(crate) fn mark_loaded(&mut self) -> bool {
        !std::mem::replace(&mut self.loaded, true)
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub(crate) fn set_page(&mut self, on_ticket_page: bool, control_mounted: bool) {
        if self.on_ticket_page != on_ticket_page || self.control_mounted != control_mounted {
            self.dirty = true;
        }
        self.on_ticket_page = on_ticket_page;
        self.control_mounted = control_mounted;
    }

    pub(crate) fn activate(&mut self) {
        self.cleaning_active = true;
        self.watcher = WatcherPhase::Idle;
        self.cycle += 1;
        self.dirty = true;
    }

    /// Clears the flag and retires whatever watcher cycle was in flight.
    pub(crate) fn deactivate(&mut self) {
        self.cleaning_active = false;
        self.watcher = WatcherPhase::Detached;
        self.cycle += 1;
        self.last_run_started_ms = None;
        self.dirty = true;
    }

    pub(crate) fn watcher_unavailable(&mut self) {
        self.watcher = WatcherPhase::Detached;
    }

    pub(crate) fn begin_run(&mut self, now_ms: u64) {
        self.watcher = WatcherPhase::Running;
        self.last_run_started_ms = Some(now_ms);
    }

    pub(crate) fn set_watcher(&mut self, phase: WatcherPhase) {
        self.watcher = phase;
    }

    pub(crate) fn set_notice(&mut self, text: String) {
        self.last_notice = Some(text);
        self.dirty = true;
    }
}
