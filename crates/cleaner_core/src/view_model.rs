use crate::WatcherPhase;

/// Glyph shown on the toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlLabel {
    #[default]
    Clean,
    Restore,
}

impl ControlLabel {
    pub fn glyph(self) -> &'static str {
        match self {
            ControlLabel::Clean => "🧻",
            ControlLabel::Restore => "♻️",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub on_ticket_page: bool,
    pub control_mounted: bool,
    pub label: ControlLabel,
    pub cleaning_active: bool,
    pub watcher: WatcherPhase,
    pub last_notice: Option<String>,
    pub dirty: bool,
}
