//! History cleaner host: binds the core state machine and the engine to one page.
mod platform;

pub use platform::config::{ConfigError, SessionConfig, UiConfig};
pub use platform::logging::{initialize as initialize_logging, ConsoleBuffer, LogDestination};
pub use platform::session::PageSession;
pub use platform::ui::constants::{BUTTON_ID, CONTAINER_ID, NOTIFICATION_ID_PREFIX};
