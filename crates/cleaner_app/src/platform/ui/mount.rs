use cleaner_core::ControlLabel;
use cleaner_engine::{Document, DomError, NodeId};

use super::constants::*;
use crate::platform::config::UiConfig;

/// Inserts the toggle control right after `anchor`, unless one already exists.
pub(crate) fn mount_control(
    document: &mut Document,
    anchor: NodeId,
    label: ControlLabel,
    ui: &UiConfig,
) -> Result<NodeId, DomError> {
    if let Some(existing) = document.element_by_id(CONTAINER_ID) {
        return Ok(existing);
    }

    let button = document.create_element(
        "button",
        &[
            ("id", BUTTON_ID),
            ("class", BUTTON_CLASS),
            ("type", "button"),
            ("style", ui.button_style.as_str()),
        ],
    );
    let glyph = document.create_text(label.glyph());
    document.append_child(button, glyph)?;

    let container =
        document.create_element("li", &[("id", CONTAINER_ID), ("class", CONTAINER_CLASS)]);
    document.append_child(container, button)?;
    document.insert_after(anchor, container)?;
    Ok(container)
}

/// Removes the control; returns whether there was one.
pub(crate) fn unmount_control(document: &mut Document) -> Result<bool, DomError> {
    match document.element_by_id(CONTAINER_ID) {
        Some(container) => {
            document.remove(container)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
