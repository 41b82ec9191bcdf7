use std::collections::VecDeque;

use cleaner_core::{ControlLabel, Effect, Msg};
use cleaner_engine::{Cleaner, Document, NodeId, ObserverId};
use cleaner_logging::{cleaner_info, cleaner_warn};

use super::config::UiConfig;
use super::timers::{TimerEvent, TimerQueue};
use super::ui;

/// The two child-list observers a session keeps on its page.
#[derive(Debug)]
pub(crate) struct Watchers {
    /// Body-wide, drives control presence.
    pub(crate) page: ObserverId,
    /// Conversation container, drives the new-message watcher.
    pub(crate) conversation: ObserverId,
    pub(crate) conversation_root: Option<NodeId>,
}

impl Watchers {
    pub(crate) fn new(document: &mut Document) -> Self {
        Self {
            page: document.create_observer(),
            conversation: document.create_observer(),
            conversation_root: None,
        }
    }
}

/// Applies core effects to the page; follow-up messages land in `inbox`.
pub(crate) struct EffectRunner<'a> {
    pub(crate) document: &'a mut Document,
    pub(crate) cleaner: &'a mut Cleaner,
    pub(crate) timers: &'a mut TimerQueue,
    pub(crate) watchers: &'a mut Watchers,
    pub(crate) ui: &'a UiConfig,
    pub(crate) inbox: &'a mut VecDeque<Msg>,
}

impl EffectRunner<'_> {
    pub(crate) fn run(&mut self, effects: Vec<Effect>, label: ControlLabel) {
        for effect in effects {
            match effect {
                Effect::ObservePage => self.observe_page(),
                Effect::MountControl => self.mount_control(label),
                Effect::UnmountControl => {
                    if let Err(err) = ui::mount::unmount_control(self.document) {
                        cleaner_warn!("Could not remove the control: {}", err);
                    }
                }
                Effect::RunCleaning => {
                    let report = self.cleaner.clean_all(self.document, self.timers.now_ms());
                    self.inbox.push_back(Msg::CleaningFinished {
                        cleaned: report.cleaned,
                    });
                }
                Effect::RunRestore => {
                    let report = self.cleaner.restore_all(self.document);
                    self.inbox.push_back(Msg::RestoreFinished {
                        restored: report.restored,
                    });
                }
                Effect::ArmWatcher => self.arm_watcher(),
                Effect::DisarmWatcher => {
                    self.document.disconnect(self.watchers.conversation);
                    self.watchers.conversation_root = None;
                }
                Effect::SuspendWatcher => self.document.disconnect(self.watchers.conversation),
                Effect::ResumeWatcher => self.resume_watcher(),
                Effect::Schedule { timer, delay_ms } => {
                    self.timers.schedule(delay_ms, TimerEvent::Watcher(timer));
                }
                Effect::Notify(text) => self.notify(&text),
            }
        }
    }

    fn observe_page(&mut self) {
        let Some(body) = self.document.body() else {
            cleaner_info!("Page has no body to observe.");
            return;
        };
        if let Err(err) = self.document.observe(self.watchers.page, body) {
            cleaner_warn!("Could not observe the page: {}", err);
        }
    }

    fn mount_control(&mut self, label: ControlLabel) {
        let Some(anchor) = self.cleaner.nav_anchor(self.document) else {
            return;
        };
        match ui::mount::mount_control(self.document, anchor, label, self.ui) {
            Ok(_) => cleaner_info!("Button integrated into navbar."),
            Err(err) => cleaner_warn!("Could not mount the control: {}", err),
        }
    }

    fn arm_watcher(&mut self) {
        let Some(area) = self.cleaner.conversation_area(self.document) else {
            self.inbox.push_back(Msg::WatcherUnavailable);
            return;
        };
        match self.document.observe(self.watchers.conversation, area) {
            Ok(()) => {
                self.watchers.conversation_root = Some(area);
                cleaner_info!("New messages observer activated.");
            }
            Err(err) => {
                cleaner_warn!("Could not observe the conversation: {}", err);
                self.inbox.push_back(Msg::WatcherUnavailable);
            }
        }
    }

    fn resume_watcher(&mut self) {
        let Some(area) = self.watchers.conversation_root else {
            return;
        };
        if let Err(err) = self.document.observe(self.watchers.conversation, area) {
            cleaner_warn!("Could not resume the conversation observer: {}", err);
            self.watchers.conversation_root = None;
            self.inbox.push_back(Msg::WatcherUnavailable);
        }
    }

    fn notify(&mut self, text: &str) {
        match ui::notify::show(self.document, self.ui, self.timers.now_ms(), text) {
            Ok(notification) => self.timers.schedule(
                self.ui.notification_ms,
                TimerEvent::FadeNotification(notification),
            ),
            Err(err) => cleaner_warn!("Could not show notification: {}", err),
        }
    }
}
