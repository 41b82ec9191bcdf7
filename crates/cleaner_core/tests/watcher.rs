use std::sync::Once;

use cleaner_core::{
    update, AppState, ControlLabel, Effect, Msg, PageSnapshot, Timer, TimerKind, WatcherPhase,
};

const TICKET_URL: &str = "https://acme.freshdesk.com/a/tickets/4821";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(cleaner_logging::initialize_for_tests);
}

fn loaded_ticket_page() -> AppState {
    let snapshot = PageSnapshot {
        location: TICKET_URL.to_string(),
        anchor_present: true,
        control_present: false,
    };
    let (state, _) = update(AppState::new(), Msg::PageLoaded(snapshot));
    state
}

fn active_state() -> AppState {
    let (state, _) = update(loaded_ticket_page(), Msg::ToggleClicked);
    state
}

fn settle(cycle: u64) -> Msg {
    Msg::TimerFired(Timer {
        kind: TimerKind::Settle,
        cycle,
    })
}

fn cooldown(cycle: u64) -> Msg {
    Msg::TimerFired(Timer {
        kind: TimerKind::Cooldown,
        cycle,
    })
}

fn count_passes(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| **effect == Effect::RunCleaning)
        .count()
}

#[test]
fn activation_cleans_and_arms_the_watcher() {
    init_logging();
    let (mut state, effects) = update(loaded_ticket_page(), Msg::ToggleClicked);

    assert_eq!(effects, vec![Effect::RunCleaning, Effect::ArmWatcher]);
    assert!(state.cleaning_active());
    assert_eq!(state.watcher(), WatcherPhase::Idle);
    assert_eq!(state.view().label, ControlLabel::Restore);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn insertion_while_idle_suspends_and_schedules_settle() {
    init_logging();
    let state = active_state();
    let cycle = state.cycle();

    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 5_000 });

    assert_eq!(state.watcher(), WatcherPhase::Running);
    assert_eq!(state.last_run_started_ms(), Some(5_000));
    assert_eq!(
        effects,
        vec![
            Effect::SuspendWatcher,
            Effect::Schedule {
                timer: Timer {
                    kind: TimerKind::Settle,
                    cycle,
                },
                delay_ms: 500,
            },
        ]
    );
}

#[test]
fn full_cycle_returns_to_idle() {
    init_logging();
    let state = active_state();
    let cycle = state.cycle();
    let (state, _) = update(state, Msg::MessagesInserted { now_ms: 5_000 });

    let (state, effects) = update(state, settle(cycle));
    assert_eq!(state.watcher(), WatcherPhase::CoolingDown);
    assert_eq!(
        effects,
        vec![
            Effect::RunCleaning,
            Effect::Schedule {
                timer: Timer {
                    kind: TimerKind::Cooldown,
                    cycle,
                },
                delay_ms: 1_000,
            },
        ]
    );

    let (state, effects) = update(state, cooldown(cycle));
    assert_eq!(state.watcher(), WatcherPhase::Idle);
    assert_eq!(effects, vec![Effect::ResumeWatcher]);
}

#[test]
fn bursts_closer_than_debounce_yield_one_pass() {
    init_logging();
    let state = active_state();
    let cycle = state.cycle();
    let mut passes = 0;

    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 10_000 });
    passes += count_passes(&effects);
    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 10_100 });
    assert!(effects.is_empty());
    let (state, effects) = update(state, settle(cycle));
    passes += count_passes(&effects);
    let (state, effects) = update(state, cooldown(cycle));
    passes += count_passes(&effects);
    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 11_600 });
    passes += count_passes(&effects);

    assert!(effects.is_empty());
    assert_eq!(passes, 1);
    assert_eq!(state.watcher(), WatcherPhase::Idle);

    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 12_000 });
    assert_eq!(state.watcher(), WatcherPhase::Running);
    assert_eq!(effects.first(), Some(&Effect::SuspendWatcher));
}

#[test]
fn restore_disarms_and_retires_pending_timers() {
    init_logging();
    let state = active_state();
    let old_cycle = state.cycle();
    let (state, _) = update(state, Msg::MessagesInserted { now_ms: 3_000 });

    let (state, effects) = update(state, Msg::ToggleClicked);
    assert_eq!(effects, vec![Effect::RunRestore, Effect::DisarmWatcher]);
    assert!(!state.cleaning_active());
    assert_eq!(state.watcher(), WatcherPhase::Detached);
    assert_eq!(state.view().label, ControlLabel::Clean);

    let (state, effects) = update(state, settle(old_cycle));
    assert!(effects.is_empty());
    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 9_000 });
    assert!(effects.is_empty());
    assert_eq!(state.watcher(), WatcherPhase::Detached);
}

#[test]
fn reactivation_starts_a_fresh_debounce_window() {
    init_logging();
    let state = active_state();
    let (state, _) = update(state, Msg::MessagesInserted { now_ms: 3_000 });
    let (state, _) = update(state, Msg::ToggleClicked);
    let (state, _) = update(state, Msg::ToggleClicked);

    assert_eq!(state.last_run_started_ms(), None);
    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 3_100 });
    assert_eq!(state.watcher(), WatcherPhase::Running);
    assert_eq!(count_passes(&effects), 0);
    assert_eq!(effects.len(), 2);
}

#[test]
fn stale_cooldown_does_not_resume_a_new_cycle() {
    init_logging();
    let state = active_state();
    let first = state.cycle();
    let (state, _) = update(state, Msg::MessagesInserted { now_ms: 1_000 });
    let (state, _) = update(state, settle(first));
    let (state, _) = update(state, Msg::ToggleClicked);
    let (state, _) = update(state, Msg::ToggleClicked);
    let (state, _) = update(state, Msg::MessagesInserted { now_ms: 1_200 });

    let (state, effects) = update(state, cooldown(first));

    assert!(effects.is_empty());
    assert_eq!(state.watcher(), WatcherPhase::Running);
}

#[test]
fn missing_conversation_leaves_watcher_detached() {
    init_logging();
    let (state, effects) = update(active_state(), Msg::WatcherUnavailable);
    assert!(effects.is_empty());
    assert_eq!(state.watcher(), WatcherPhase::Detached);

    let (state, effects) = update(state, Msg::MessagesInserted { now_ms: 50_000 });
    assert!(effects.is_empty());
    assert!(state.cleaning_active());
}

#[test]
fn pass_results_become_notifications() {
    init_logging();
    let (state, effects) = update(active_state(), Msg::CleaningFinished { cleaned: 3 });
    assert_eq!(
        effects,
        vec![Effect::Notify("3 message(s) cleaned.".to_string())]
    );
    assert_eq!(
        state.view().last_notice.as_deref(),
        Some("3 message(s) cleaned.")
    );

    let (_, effects) = update(state, Msg::RestoreFinished { restored: 0 });
    assert_eq!(
        effects,
        vec![Effect::Notify("0 message(s) restored.".to_string())]
    );
}
