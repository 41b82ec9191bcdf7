#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The content script started on a freshly loaded page.
    PageLoaded(PageSnapshot),
    /// The body observer reported structural changes.
    PageMutated(PageSnapshot),
    /// User clicked the toggle control.
    ToggleClicked,
    /// The conversation observer saw a message-shaped node inserted.
    MessagesInserted { now_ms: u64 },
    /// Arming found nothing to watch on this page.
    WatcherUnavailable,
    /// A timer scheduled through `Effect::Schedule` elapsed.
    TimerFired(crate::Timer),
    /// A cleaning pass completed.
    CleaningFinished { cleaned: usize },
    /// A restoration completed.
    RestoreFinished { restored: usize },
}

/// What the host sees of the page when it reports a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub location: String,
    pub anchor_present: bool,
    pub control_present: bool,
}
