pub const CONTAINER_ID: &str = "fdc-clean-container";
pub const BUTTON_ID: &str = "fdc-clean-btn";
/// Notifications are `div#fdc-notif-<ms>`.
pub const NOTIFICATION_ID_PREFIX: &str = "fdc-notif";

pub(crate) const CONTAINER_CLASS: &str = "navbar-item";
pub(crate) const BUTTON_CLASS: &str = "navbar-link ember-view";
