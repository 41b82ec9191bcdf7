use serde::{Deserialize, Serialize};

use crate::dom::parse_selector;
use crate::types::DomError;

/// CSS selectors used to find things on the ticket page.
///
/// The defaults follow the ticketing app's current class naming; override
/// them when the host page changes its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub message: String,
    pub history_marker: String,
    pub load_more: String,
    /// Searched from the "load more" control outwards.
    pub conversation_area: String,
    pub nav_anchor: String,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            message: ".ticket-details__item.ticket-details__requestor, \
                      .ticket-details__item:not(.ticket-details__requestor)"
                .to_string(),
            history_marker: r#"div[style*="border:none;border-top:solid #E1E1E1 1.0pt;padding:3.0pt 0cm 0cm 0cm"], hr[style*="display:inline-block"][style*="width:98%"], hr"#
                .to_string(),
            load_more: ".more-block.text--xsmall.async-button.default.ember-view".to_string(),
            conversation_area: ".ticket-thread, .ticket-conversation, body".to_string(),
            nav_anchor: r#"li.navbar-item[data-test-id="Admin-7"]"#.to_string(),
        }
    }
}

impl CleanerConfig {
    /// Fails on the first selector that does not parse.
    pub fn validate(&self) -> Result<(), DomError> {
        for css in [
            &self.message,
            &self.history_marker,
            &self.load_more,
            &self.conversation_area,
            &self.nav_anchor,
        ] {
            parse_selector(css)?;
        }
        Ok(())
    }
}
