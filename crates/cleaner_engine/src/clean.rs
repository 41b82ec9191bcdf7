use cleaner_logging::{cleaner_info, cleaner_warn};
use ego_tree::NodeId;
use scraper::Selector;

use crate::backup::{BackupEntry, BackupStore};
use crate::config::CleanerConfig;
use crate::dom::{parse_selector, Document};
use crate::redact::hide_history;
use crate::types::{CleanReport, SkippedNode};

/// Compiled form of [`CleanerConfig`]. A selector that fails to parse is
/// logged once and then matches nothing.
#[derive(Debug)]
struct Selectors {
    message: Option<Selector>,
    history_marker: Option<Selector>,
    load_more: Option<Selector>,
    conversation_area: Option<Selector>,
    nav_anchor: Option<Selector>,
}

impl Selectors {
    fn compile(config: &CleanerConfig) -> Self {
        Self {
            message: compile_selector(&config.message),
            history_marker: compile_selector(&config.history_marker),
            load_more: compile_selector(&config.load_more),
            conversation_area: compile_selector(&config.conversation_area),
            nav_anchor: compile_selector(&config.nav_anchor),
        }
    }
}

fn compile_selector(css: &str) -> Option<Selector> {
    parse_selector(css)
        .map_err(|err| cleaner_warn!("{}", err))
        .ok()
}

/// Per-page cleaning context: the selectors and the backup store.
#[derive(Debug)]
pub struct Cleaner {
    config: CleanerConfig,
    selectors: Selectors,
    pub(crate) backups: BackupStore,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(CleanerConfig::default())
    }
}

impl Cleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self {
            selectors: Selectors::compile(&config),
            config,
            backups: BackupStore::new(),
        }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    /// Hides history in every message that has markers and no backup yet.
    ///
    /// Each message is snapshotted in full before it is touched, so a later
    /// restore is a plain content replacement.
    pub fn clean_all(&mut self, document: &mut Document, now_ms: u64) -> CleanReport {
        cleaner_info!("Starting cleaning...");
        let mut report = CleanReport::default();
        let (Some(message_selector), Some(marker_selector)) =
            (&self.selectors.message, &self.selectors.history_marker)
        else {
            return report;
        };

        for message in document.select(document.root(), message_selector) {
            if self.backups.contains(message) {
                continue;
            }
            let markers = document.select(message, marker_selector);
            if markers.is_empty() {
                continue;
            }
            let html = match document.inner_html(message) {
                Ok(html) => html,
                Err(reason) => {
                    cleaner_warn!("Could not snapshot message {:?}: {}", message, reason);
                    report.skipped.push(SkippedNode {
                        node: message,
                        reason,
                    });
                    continue;
                }
            };
            self.backups.insert(BackupEntry {
                element: message,
                html,
                captured_at_ms: now_ms,
            });

            let redacted = hide_history(document, message, &markers);
            report.skipped.extend(redacted.skipped);
            report.cleaned += 1;
        }

        cleaner_info!("{} message(s) cleaned.", report.cleaned);
        report
    }

    pub fn is_message(&self, document: &Document, node: NodeId) -> bool {
        self.selectors
            .message
            .as_ref()
            .is_some_and(|selector| document.matches(node, selector))
    }

    pub fn nav_anchor(&self, document: &Document) -> Option<NodeId> {
        let selector = self.selectors.nav_anchor.as_ref()?;
        document.select_first(document.root(), selector)
    }

    /// Container to watch for new messages: the closest conversation area
    /// around the "load more" control.
    pub fn conversation_area(&self, document: &Document) -> Option<NodeId> {
        let load_more = self
            .selectors
            .load_more
            .as_ref()
            .and_then(|selector| document.select_first(document.root(), selector));
        let Some(load_more) = load_more else {
            cleaner_info!("No \"load more messages\" button detected.");
            return None;
        };
        let area = self
            .selectors
            .conversation_area
            .as_ref()
            .and_then(|selector| document.closest(load_more, selector));
        if area.is_none() {
            cleaner_info!("No conversation container around the \"load more\" button.");
        }
        area
    }
}
