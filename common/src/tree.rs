use crate::entry::{Entry, EntryId};

/// The table of contents as an arena of entries.
///
/// Entries refer to each other by index, the way the markup nests list
/// items: every entry knows its parent and its ordered children, and
/// `roots` holds the top-level entries in reading order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationTree {
    pub entries: Vec<Entry>,
    pub roots: Vec<EntryId>,
}

impl NavigationTree {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub fn add_entry(&mut self, entry: Entry) -> EntryId {
        let entry_id = self.entries.len();
        match entry.parent_id {
            Some(parent_id) => {
                if let Some(parent) = self.entries.get_mut(parent_id) {
                    parent.add_child(entry_id);
                }
            }
            None => self.roots.push(entry_id),
        }
        self.entries.push(entry);
        entry_id
    }

    pub fn get(&self, entry_id: EntryId) -> Option<&Entry> {
        self.entries.get(entry_id)
    }

    pub fn get_mut(&mut self, entry_id: EntryId) -> Option<&mut Entry> {
        self.entries.get_mut(entry_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Strict ancestors of an entry, nearest first.
    pub fn ancestors(&self, entry_id: EntryId) -> Vec<EntryId> {
        let mut ancestors = Vec::new();
        let mut current = self.get(entry_id).and_then(|e| e.parent_id);
        while let Some(parent_id) = current {
            ancestors.push(parent_id);
            current = self.entries[parent_id].parent_id;
        }
        ancestors
    }

    /// Entry ids in the order they appear in the rendered list.
    pub fn document_order(&self) -> Vec<EntryId> {
        let mut order = Vec::with_capacity(self.entries.len());
        let mut stack: Vec<EntryId> = self.roots.iter().rev().copied().collect();
        while let Some(entry_id) = stack.pop() {
            order.push(entry_id);
            stack.extend(self.entries[entry_id].children.iter().rev().copied());
        }
        order
    }

    /// Looks an entry up by section number (`2.1` or `2.1.`), href, or label.
    pub fn find(&self, query: &str) -> Option<EntryId> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let dotted = format!("{}.", query.trim_end_matches('.'));

        let order = self.document_order();
        self.first_in(&order, |e| e.number() == Some(dotted.as_str()))
            .or_else(|| self.first_in(&order, |e| e.href() == Some(query)))
            .or_else(|| self.first_in(&order, |e| e.label() == query))
    }

    fn first_in<F>(&self, order: &[EntryId], matches: F) -> Option<EntryId>
    where
        F: Fn(&Entry) -> bool,
    {
        order
            .iter()
            .copied()
            .find(|&entry_id| matches(&self.entries[entry_id]))
    }
}
