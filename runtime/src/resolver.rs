//! Works out which entry is the current page.
//!
//! Resolution is a pure function of the tree and the page the sidebar sits
//! on. The controller applies its result to section state, and renderers
//! project it onto the `active` and `expanded` markers.

use scrollbox_common::url;
use scrollbox_common::*;
use serde::Serialize;
use tracing::trace;

/// Where the sidebar is being shown.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// Document URL as the browser reports it, fragment and query included.
    pub current_url: String,
    /// Relative path from the page's directory to the site root, e.g. `../`.
    pub root_prefix: String,
}

impl PageContext {
    pub fn new<U, P>(current_url: U, root_prefix: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            current_url: current_url.into(),
            root_prefix: root_prefix.into(),
        }
    }

    pub fn normalized_url(&self) -> String {
        url::normalize_page_url(&self.current_url)
    }

    /// The index page stands in for the first chapter only at the site root.
    fn is_root_index(&self, normalized_url: &str) -> bool {
        self.root_prefix.is_empty() && normalized_url.ends_with("/index.html")
    }
}

/// A chapter link as it appears on a given page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    /// Attribute value written into the markup.
    pub href: String,
    /// `href` resolved against the document URL.
    pub absolute: String,
}

pub fn link_target(entry: &Entry, page: &PageContext) -> Option<LinkTarget> {
    let href = url::prefixed_href(entry.href()?, &page.root_prefix);
    let absolute = url::resolve(&page.current_url, &href).unwrap_or_else(|| href.clone());
    Some(LinkTarget { href, absolute })
}

/// Result of resolving the current page against the tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePage {
    pub active: Option<EntryId>,
    /// Sections that must be open, outermost first.
    pub expanded: Vec<EntryId>,
}

impl ActivePage {
    pub fn active_state(&self, entry_id: EntryId) -> ActiveState {
        if self.active == Some(entry_id) {
            ActiveState::Active
        } else {
            ActiveState::Inactive
        }
    }
}

pub fn resolve_active(tree: &NavigationTree, page: &PageContext) -> ActivePage {
    let current = page.normalized_url();
    let root_index = page.is_root_index(&current);

    let mut first_link = true;
    for entry_id in tree.document_order() {
        let entry = &tree.entries[entry_id];
        let Some(target) = link_target(entry, page) else {
            continue;
        };
        let aliased = first_link && root_index;
        first_link = false;

        trace!(entry_id, href = %target.absolute, "comparing link");
        if target.absolute == current || aliased {
            let mut expanded = tree.ancestors(entry_id);
            expanded.reverse();
            if entry.is_section() {
                expanded.push(entry_id);
            }
            return ActivePage {
                active: Some(entry_id),
                expanded,
            };
        }
    }

    ActivePage::default()
}
