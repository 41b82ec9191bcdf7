pub(crate) mod config;
mod effects;
pub(crate) mod logging;
pub(crate) mod session;
mod timers;
pub(crate) mod ui;
