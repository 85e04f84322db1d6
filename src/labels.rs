//! Per-run class id allocation for group labels.

use std::collections::HashMap;

use crate::ir::ClassId;

/// Hands out YOLO class ids to group labels in first-seen order.
///
/// One allocator lives for a whole conversion run and is shared by every
/// file in it, so the same label always maps to the same id within a run.
/// Nothing is persisted; a new run starts again from id 0.
#[derive(Clone, Debug, Default)]
pub struct LabelAllocator {
    labels: Vec<String>,
    index: HashMap<String, ClassId>,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the class id for `label`, allocating the next free id the
    /// first time the label is seen.
    pub fn assign(&mut self, label: &str) -> ClassId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }

        let id = ClassId(self.labels.len());
        self.labels.push(label.to_owned());
        self.index.insert(label.to_owned(), id);
        id
    }

    /// Looks up a label without allocating.
    pub fn get(&self, label: &str) -> Option<ClassId> {
        self.index.get(label).copied()
    }

    /// All labels seen so far; a label's position is its class id.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}
