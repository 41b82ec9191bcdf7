use cleaner_logging::{cleaner_info, cleaner_warn};

use crate::backup::BackupEntry;
use crate::clean::Cleaner;
use crate::dom::Document;
use crate::types::{DomError, FailedRestore, RestoreReport};

impl Cleaner {
    /// Writes every backup back into its element, then empties the store.
    ///
    /// A failing entry is logged and reported; it never stops the others.
    /// Entries whose element left the document are dropped with the rest.
    pub fn restore_all(&mut self, document: &mut Document) -> RestoreReport {
        let mut report = RestoreReport::default();

        for entry in self.backups.iter() {
            match restore_entry(document, entry) {
                Ok(()) => report.restored += 1,
                Err(error) => {
                    cleaner_warn!("Restoration error for {:?}: {}", entry.element, error);
                    report.failed.push(FailedRestore {
                        element: entry.element,
                        error,
                    });
                }
            }
        }
        self.backups.clear();

        cleaner_info!("{} message(s) restored.", report.restored);
        report
    }
}

fn restore_entry(document: &mut Document, entry: &BackupEntry) -> Result<(), DomError> {
    if !document.is_connected(entry.element) {
        return Err(DomError::Detached(entry.element));
    }
    let fragment = document.parse_fragment(&entry.html)?;
    document.replace_children(entry.element, fragment)
}
