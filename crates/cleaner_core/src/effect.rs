#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the body-wide observer that keeps the control in place.
    ObservePage,
    MountControl,
    UnmountControl,
    /// Run one cleaning pass; the host answers with `Msg::CleaningFinished`.
    RunCleaning,
    /// Restore every backup; the host answers with `Msg::RestoreFinished`.
    RunRestore,
    /// Locate the conversation container and start watching it.
    ArmWatcher,
    /// Stop watching and forget the container.
    DisarmWatcher,
    /// Disconnect while a pass is pending, dropping queued records.
    SuspendWatcher,
    ResumeWatcher,
    Schedule { timer: Timer, delay_ms: u64 },
    Notify(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Settle,
    Cooldown,
}

/// A watcher timer, tagged with the cycle that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    pub kind: TimerKind,
    pub cycle: u64,
}
