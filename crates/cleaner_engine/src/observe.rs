//! Child-list change journal with observer semantics.
//!
//! A record is queued for an observer only if the observer was connected when
//! the change happened and its root is an inclusive ancestor of the changed
//! parent. Disconnecting drops whatever was queued.

use ego_tree::NodeId;

use crate::dom::Document;
use crate::types::DomError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Parent whose child list changed.
    pub target: NodeId,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

#[derive(Debug)]
struct ObserverSlot {
    id: ObserverId,
    root: Option<NodeId>,
    queue: Vec<MutationRecord>,
}

#[derive(Debug, Default)]
pub(crate) struct MutationJournal {
    next_id: u64,
    slots: Vec<ObserverSlot>,
}

impl MutationJournal {
    /// `scope` lists the changed parent followed by its ancestors.
    pub(crate) fn record(&mut self, scope: &[NodeId], record: MutationRecord) {
        for slot in &mut self.slots {
            if slot.root.is_some_and(|root| scope.contains(&root)) {
                slot.queue.push(record.clone());
            }
        }
    }

    fn slot_mut(&mut self, id: ObserverId) -> Option<&mut ObserverSlot> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }
}

impl Document {
    pub fn create_observer(&mut self) -> ObserverId {
        self.journal.next_id += 1;
        let id = ObserverId(self.journal.next_id);
        self.journal.slots.push(ObserverSlot {
            id,
            root: None,
            queue: Vec::new(),
        });
        id
    }

    /// Starts watching the subtree under `root`, replacing any previous root.
    pub fn observe(&mut self, observer: ObserverId, root: NodeId) -> Result<(), DomError> {
        self.node(root)?;
        if let Some(slot) = self.journal.slot_mut(observer) {
            slot.root = Some(root);
        }
        Ok(())
    }

    pub fn disconnect(&mut self, observer: ObserverId) {
        if let Some(slot) = self.journal.slot_mut(observer) {
            slot.root = None;
            slot.queue.clear();
        }
    }

    pub fn is_observing(&self, observer: ObserverId) -> bool {
        self.journal
            .slots
            .iter()
            .any(|slot| slot.id == observer && slot.root.is_some())
    }

    pub fn take_records(&mut self, observer: ObserverId) -> Vec<MutationRecord> {
        self.journal
            .slot_mut(observer)
            .map(|slot| std::mem::take(&mut slot.queue))
            .unwrap_or_default()
    }
}
