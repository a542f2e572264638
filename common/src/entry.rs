use crate::SectionState;
use serde::{Deserialize, Serialize};

pub type EntryId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// A chapter row. Draft chapters have no target page.
    Chapter {
        label: String,
        number: Option<String>,
        href: Option<String>,
    },
    PartTitle(String),
    Spacer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub kind: EntryKind,
    pub parent_id: Option<EntryId>,
    pub children: Vec<EntryId>,
    pub level: usize,
    /// Presentation classes carried over from the source markup, minus state markers.
    pub classes: Vec<String>,
    pub initial_state: SectionState,
    pub has_toggle: bool,
}

impl Entry {
    pub fn new(kind: EntryKind, parent_id: Option<EntryId>, level: usize) -> Self {
        Self {
            kind,
            parent_id,
            children: Vec::new(),
            level,
            classes: Vec::new(),
            initial_state: SectionState::Collapsed,
            has_toggle: false,
        }
    }

    pub fn chapter<L, H>(label: L, number: Option<&str>, href: Option<H>) -> Self
    where
        L: Into<String>,
        H: Into<String>,
    {
        Self::new(
            EntryKind::Chapter {
                label: label.into(),
                number: number.map(str::to_string),
                href: href.map(Into::into),
            },
            None,
            0,
        )
    }

    pub fn add_child(&mut self, child_id: EntryId) {
        self.children.push(child_id);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// A section is any entry with nested children.
    pub fn is_section(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_chapter(&self) -> bool {
        matches!(self.kind, EntryKind::Chapter { .. })
    }

    pub fn href(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Chapter { href, .. } => href.as_deref(),
            _ => None,
        }
    }

    pub fn number(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Chapter { number, .. } => number.as_deref(),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match &self.kind {
            EntryKind::Chapter { label, .. } => label,
            EntryKind::PartTitle(title) => title,
            EntryKind::Spacer => "",
        }
    }

    /// Number and label as a reader sees them, e.g. `2.1. Strings`.
    pub fn title(&self) -> String {
        match self.number() {
            Some(number) => format!("{} {}", number, self.label()),
            None => self.label().to_string(),
        }
    }
}
