use cleaner_core::AppViewModel;
use cleaner_engine::{Document, DomError};

use super::constants::BUTTON_ID;

/// Brings the control's glyph in line with the view.
pub(crate) fn render(document: &mut Document, view: &AppViewModel) -> Result<(), DomError> {
    let Some(button) = document.element_by_id(BUTTON_ID) else {
        return Ok(());
    };
    let glyph = view.label.glyph();
    if document.text_content(button) != glyph {
        document.set_text_content(button, glyph)?;
    }
    Ok(())
}
