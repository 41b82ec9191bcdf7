//! Ephemeral notification shown after each pass.

use cleaner_engine::{Document, DomError, NodeId};

use super::constants::NOTIFICATION_ID_PREFIX;
use crate::platform::config::UiConfig;

/// Replaces any visible notification with a new one carrying `text`.
pub(crate) fn show(
    document: &mut Document,
    ui: &UiConfig,
    now_ms: u64,
    text: &str,
) -> Result<NodeId, DomError> {
    let body = document
        .body()
        .ok_or_else(|| DomError::Detached(document.root()))?;

    let previous = format!(r#"[id^="{NOTIFICATION_ID_PREFIX}"]"#);
    for stale in document.select_css(document.root(), &previous)? {
        document.remove(stale)?;
    }

    let id = format!("{NOTIFICATION_ID_PREFIX}-{now_ms}");
    let notification = document.create_element(
        "div",
        &[("id", id.as_str()), ("style", ui.notification_style.as_str())],
    );
    let label = document.create_text(text);
    document.append_child(notification, label)?;
    document.append_child(body, notification)?;
    document.set_style_property(notification, "opacity", "1")?;
    Ok(notification)
}

/// Starts the fade-out; a notification already replaced is left alone.
pub(crate) fn fade(document: &mut Document, notification: NodeId) -> Result<bool, DomError> {
    if !document.is_connected(notification) {
        return Ok(false);
    }
    document.set_style_property(notification, "opacity", "0")?;
    Ok(true)
}

pub(crate) fn dismiss(document: &mut Document, notification: NodeId) -> Result<(), DomError> {
    if document.is_connected(notification) {
        document.remove(notification)?;
    }
    Ok(())
}
