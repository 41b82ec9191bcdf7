use std::collections::VecDeque;

use cleaner_core::{
    classify_script_error, update, AppState, AppViewModel, ErrorDisposition, Msg, PageSnapshot,
    ScriptErrorEvent,
};
use cleaner_engine::{BackupStore, Cleaner, Document};
use cleaner_logging::{cleaner_debug, cleaner_info, cleaner_warn};

use super::config::{SessionConfig, UiConfig};
use super::effects::{EffectRunner, Watchers};
use super::timers::{TimerEvent, TimerQueue};
use super::ui;

/// One content-script instance bound to one page load.
///
/// Everything the cleaner touches is owned here: the page, the backups, the
/// toggle state and the clock. Host activity goes through [`mutate`],
/// [`click_toggle`] and [`advance`]; each call runs until no work is left.
///
/// [`mutate`]: PageSession::mutate
/// [`click_toggle`]: PageSession::click_toggle
/// [`advance`]: PageSession::advance
pub struct PageSession {
    document: Document,
    location: String,
    cleaner: Cleaner,
    state: AppState,
    ui: UiConfig,
    timers: TimerQueue,
    watchers: Watchers,
    inbox: VecDeque<Msg>,
}

impl PageSession {
    /// Parses `html` as the page at `location` and runs initialization.
    pub fn load(html: &str, location: &str, config: SessionConfig) -> Self {
        cleaner_info!("Script loaded.");
        let mut document = Document::parse(html);
        let watchers = Watchers::new(&mut document);
        let mut session = Self {
            document,
            location: location.to_string(),
            cleaner: Cleaner::new(config.cleaner),
            state: AppState::with_timings(config.timings),
            ui: config.ui,
            timers: TimerQueue::default(),
            watchers,
            inbox: VecDeque::new(),
        };
        let snapshot = session.snapshot();
        session.inbox.push_back(Msg::PageLoaded(snapshot));
        session.pump();
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn backups(&self) -> &BackupStore {
        self.cleaner.backups()
    }

    /// Lets the host page change its own markup, then delivers what the
    /// observers saw.
    pub fn mutate<R>(&mut self, change: impl FnOnce(&mut Document) -> R) -> R {
        let result = change(&mut self.document);
        self.pump();
        result
    }

    /// Client-side navigation. Like the page observer, the session only
    /// notices it with the next structural change.
    pub fn navigate(&mut self, location: &str) {
        self.location = location.to_string();
    }

    /// Clicks the toggle control; false when no control is on the page.
    pub fn click_toggle(&mut self) -> bool {
        if self.document.element_by_id(ui::constants::BUTTON_ID).is_none() {
            return false;
        }
        self.inbox.push_back(Msg::ToggleClicked);
        self.pump();
        true
    }

    /// Moves the clock forward, firing every timer that falls due on the way.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now_ms().saturating_add(ms);
        while let Some(event) = self.timers.pop_due(until) {
            self.fire(event);
            self.pump();
        }
        self.timers.advance_to(until);
    }

    /// Decides whether a page script error keeps its default handling.
    pub fn report_script_error(&self, event: &ScriptErrorEvent) -> ErrorDisposition {
        let disposition = classify_script_error(event, &self.ui.suppressed_sources);
        if disposition == ErrorDisposition::Suppressed {
            cleaner_debug!("Suppressed script error: {}", event.message);
        }
        disposition
    }

    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            location: self.location.clone(),
            anchor_present: self.cleaner.nav_anchor(&self.document).is_some(),
            control_present: self
                .document
                .element_by_id(ui::constants::CONTAINER_ID)
                .is_some(),
        }
    }

    fn fire(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Watcher(timer) => self.inbox.push_back(Msg::TimerFired(timer)),
            TimerEvent::FadeNotification(notification) => {
                match ui::notify::fade(&mut self.document, notification) {
                    Ok(true) => self.timers.schedule(
                        self.ui.fade_ms,
                        TimerEvent::RemoveNotification(notification),
                    ),
                    Ok(false) => {}
                    Err(err) => cleaner_warn!("Could not fade notification: {}", err),
                }
            }
            TimerEvent::RemoveNotification(notification) => {
                if let Err(err) = ui::notify::dismiss(&mut self.document, notification) {
                    cleaner_warn!("Could not remove notification: {}", err);
                }
            }
        }
    }

    /// Drains the inbox and observer queues until both are empty.
    fn pump(&mut self) {
        loop {
            while let Some(msg) = self.inbox.pop_front() {
                self.dispatch_msg(msg);
            }
            self.deliver_records();
            if self.inbox.is_empty() {
                break;
            }
        }
    }

    fn deliver_records(&mut self) {
        let page_records = self.document.take_records(self.watchers.page);
        let conversation_records = self.document.take_records(self.watchers.conversation);

        let has_new_messages = conversation_records.iter().any(|record| {
            record
                .added
                .iter()
                .any(|&node| self.cleaner.is_message(&self.document, node))
        });
        if has_new_messages {
            self.inbox.push_back(Msg::MessagesInserted {
                now_ms: self.timers.now_ms(),
            });
        }
        if !page_records.is_empty() {
            let snapshot = self.snapshot();
            self.inbox.push_back(Msg::PageMutated(snapshot));
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;

        EffectRunner {
            document: &mut self.document,
            cleaner: &mut self.cleaner,
            timers: &mut self.timers,
            watchers: &mut self.watchers,
            ui: &self.ui,
            inbox: &mut self.inbox,
        }
        .run(effects, view.label);

        if was_dirty {
            self.render(&view);
        }
    }

    fn render(&mut self, view: &AppViewModel) {
        if let Err(err) = ui::render::render(&mut self.document, view) {
            cleaner_warn!("Could not update the control: {}", err);
        }
    }
}
