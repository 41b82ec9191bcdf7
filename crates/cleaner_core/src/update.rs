use cleaner_logging::{cleaner_debug, cleaner_info};

use crate::{
    is_ticket_page, AppState, Effect, Msg, PageSnapshot, Timer, TimerKind, WatcherPhase,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded(snapshot) => {
            if !state.mark_loaded() {
                return (state, Vec::new());
            }
            if !is_ticket_page(&snapshot.location) {
                cleaner_info!("Not a ticket page, skipping initialization.");
                state.set_page(false, false);
                return (state, Vec::new());
            }
            cleaner_info!("Ticket page detected, initializing...");
            state.mark_initialized();
            let mut effects = vec![Effect::ObservePage];
            effects.extend(reconcile_presence(&mut state, &snapshot));
            effects
        }
        Msg::PageMutated(snapshot) => {
            if !state.is_initialized() {
                return (state, Vec::new());
            }
            reconcile_presence(&mut state, &snapshot)
        }
        Msg::ToggleClicked => {
            if !state.is_initialized() {
                Vec::new()
            } else if state.cleaning_active() {
                state.deactivate();
                vec![Effect::RunRestore, Effect::DisarmWatcher]
            } else {
                state.activate();
                vec![Effect::RunCleaning, Effect::ArmWatcher]
            }
        }
        Msg::MessagesInserted { now_ms } => on_messages_inserted(&mut state, now_ms),
        Msg::WatcherUnavailable => {
            state.watcher_unavailable();
            Vec::new()
        }
        Msg::TimerFired(timer) => on_timer(&mut state, timer),
        Msg::CleaningFinished { cleaned } => {
            notify(&mut state, format!("{cleaned} message(s) cleaned."))
        }
        Msg::RestoreFinished { restored } => {
            notify(&mut state, format!("{restored} message(s) restored."))
        }
    };

    (state, effects)
}

/// Keeps exactly one control on a ticket page that shows the anchor.
fn reconcile_presence(state: &mut AppState, snapshot: &PageSnapshot) -> Vec<Effect> {
    if !is_ticket_page(&snapshot.location) {
        state.set_page(false, false);
        return if snapshot.control_present {
            vec![Effect::UnmountControl]
        } else {
            Vec::new()
        };
    }
    if snapshot.anchor_present && !snapshot.control_present {
        state.set_page(true, true);
        return vec![Effect::MountControl];
    }
    state.set_page(true, snapshot.control_present);
    Vec::new()
}

fn on_messages_inserted(state: &mut AppState, now_ms: u64) -> Vec<Effect> {
    if !state.cleaning_active() || state.watcher() != WatcherPhase::Idle {
        cleaner_debug!("Insertion ignored in phase {:?}", state.watcher());
        return Vec::new();
    }
    let timings = state.timings();
    if let Some(last) = state.last_run_started_ms() {
        if now_ms.saturating_sub(last) < timings.debounce_ms {
            cleaner_debug!("Insertion ignored, last run started at {last} ms");
            return Vec::new();
        }
    }
    state.begin_run(now_ms);
    cleaner_info!("New messages detected, cleaning...");
    vec![
        Effect::SuspendWatcher,
        Effect::Schedule {
            timer: Timer {
                kind: TimerKind::Settle,
                cycle: state.cycle(),
            },
            delay_ms: timings.settle_ms,
        },
    ]
}

fn on_timer(state: &mut AppState, timer: Timer) -> Vec<Effect> {
    if timer.cycle != state.cycle() {
        cleaner_debug!(
            "Dropping {:?} timer from cycle {} (current {})",
            timer.kind,
            timer.cycle,
            state.cycle()
        );
        return Vec::new();
    }
    match (timer.kind, state.watcher()) {
        (TimerKind::Settle, WatcherPhase::Running) => {
            state.set_watcher(WatcherPhase::CoolingDown);
            vec![
                Effect::RunCleaning,
                Effect::Schedule {
                    timer: Timer {
                        kind: TimerKind::Cooldown,
                        cycle: timer.cycle,
                    },
                    delay_ms: state.timings().cooldown_ms,
                },
            ]
        }
        (TimerKind::Cooldown, WatcherPhase::CoolingDown) => {
            state.set_watcher(WatcherPhase::Idle);
            vec![Effect::ResumeWatcher]
        }
        _ => Vec::new(),
    }
}

fn notify(state: &mut AppState, text: String) -> Vec<Effect> {
    state.set_notice(text.clone());
    vec![Effect::Notify(text)]
}
