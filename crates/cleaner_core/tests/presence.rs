use std::sync::Once;

use cleaner_core::{update, AppState, Effect, Msg, PageSnapshot};

const TICKET_URL: &str = "https://acme.freshdesk.com/a/tickets/4821";
const LIST_URL: &str = "https://acme.freshdesk.com/a/tickets/filters/all";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(cleaner_logging::initialize_for_tests);
}

fn snapshot(location: &str, anchor_present: bool, control_present: bool) -> PageSnapshot {
    PageSnapshot {
        location: location.to_string(),
        anchor_present,
        control_present,
    }
}

#[test]
fn non_ticket_page_skips_initialization() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PageLoaded(snapshot(LIST_URL, true, false)),
    );
    assert!(effects.is_empty());
    assert!(!state.is_initialized());

    let (state, effects) = update(
        state,
        Msg::PageMutated(snapshot(TICKET_URL, true, false)),
    );
    assert!(effects.is_empty());
    assert!(!state.view().control_mounted);
}

#[test]
fn ticket_page_with_anchor_mounts_immediately() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PageLoaded(snapshot(TICKET_URL, true, false)),
    );

    assert_eq!(effects, vec![Effect::ObservePage, Effect::MountControl]);
    assert!(state.is_initialized());
    assert!(state.view().on_ticket_page);
    assert!(state.view().control_mounted);
}

#[test]
fn late_anchor_mounts_once() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::PageLoaded(snapshot(TICKET_URL, false, false)),
    );
    assert_eq!(effects, vec![Effect::ObservePage]);

    let (state, effects) = update(state, Msg::PageMutated(snapshot(TICKET_URL, true, false)));
    assert_eq!(effects, vec![Effect::MountControl]);

    let (state, effects) = update(state, Msg::PageMutated(snapshot(TICKET_URL, true, true)));
    assert!(effects.is_empty());
    assert!(state.view().control_mounted);
}

#[test]
fn leaving_ticket_page_unmounts_control() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::PageLoaded(snapshot(TICKET_URL, true, false)),
    );

    let (state, effects) = update(state, Msg::PageMutated(snapshot(LIST_URL, true, true)));
    assert_eq!(effects, vec![Effect::UnmountControl]);
    assert!(!state.view().on_ticket_page);
    assert!(!state.view().control_mounted);

    let (state, effects) = update(state, Msg::PageMutated(snapshot(LIST_URL, true, false)));
    assert!(effects.is_empty());

    let (_, effects) = update(state, Msg::PageMutated(snapshot(TICKET_URL, true, false)));
    assert_eq!(effects, vec![Effect::MountControl]);
}

#[test]
fn page_load_is_handled_once() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::PageLoaded(snapshot(TICKET_URL, true, false)),
    );
    let (next, effects) = update(
        state.clone(),
        Msg::PageLoaded(snapshot(TICKET_URL, true, true)),
    );

    assert!(effects.is_empty());
    assert_eq!(next, state);
}
