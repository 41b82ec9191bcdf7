//! History cleaner core: pure watcher and toggle state machine plus view-model helpers.
mod effect;
mod msg;
mod page;
mod script_errors;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Timer, TimerKind};
pub use msg::{Msg, PageSnapshot};
pub use page::is_ticket_page;
pub use script_errors::{classify_script_error, ErrorDisposition, ScriptErrorEvent};
pub use state::{AppState, WatcherPhase, WatcherTimings};
pub use update::update;
pub use view_model::{AppViewModel, ControlLabel};
