use scrollbox_common::*;
use scrollbox_parser::ParseError;
use tracing::debug;

mod error;
pub use error::RuntimeError;

mod resolver;
pub use resolver::*;

mod render;

mod scroll;
pub use scroll::*;

mod storage;
pub use storage::*;

#[cfg(test)]
mod tests;

/// The sidebar of one page: a fixed navigation tree plus the state a page
/// load and the reader's clicks give it.
#[derive(Debug, Clone)]
pub struct Sidebar {
    pub tree: NavigationTree,
    pub config: Config,
    page: Option<PageContext>,
    states: Vec<SectionState>,
    active: Option<EntryId>,
    scroll_top: f64,
}

impl Sidebar {
    pub fn new(tree: NavigationTree, config: Config) -> Self {
        let states = tree.entries.iter().map(|e| e.initial_state).collect();
        Self {
            tree,
            config,
            page: None,
            states,
            active: None,
            scroll_top: 0.0,
        }
    }

    pub fn from_markup<A>(markup: A, config: Config) -> Result<Self, ParseError>
    where
        A: AsRef<str>,
    {
        let tree = scrollbox_parser::parse(markup)?;
        Ok(Self::new(tree, config))
    }

    /// Loads the sidebar on a page.
    ///
    /// Section state starts over from the markup, the entry for `page`
    /// becomes active with its ancestors opened, and the offset persisted
    /// by the previous page (if any) is consumed.
    pub fn initialize<S>(&mut self, page: PageContext, mut store: S) -> ScrollPlan
    where
        S: ScrollStore,
    {
        self.states = self.tree.entries.iter().map(|e| e.initial_state).collect();
        self.scroll_top = 0.0;

        let resolved = resolve_active(&self.tree, &page);
        for &entry_id in &resolved.expanded {
            self.states[entry_id] = SectionState::Expanded;
        }
        self.active = resolved.active;
        self.page = Some(page);
        debug!(active = ?self.active, expanded = ?resolved.expanded, "resolved current page");

        let stored = store.take(&self.config.storage_key);
        let plan = match stored.as_deref().and_then(parse_offset) {
            Some(offset) => ScrollPlan::Restore(offset),
            None => match self.active {
                Some(entry_id) => ScrollPlan::Center(entry_id),
                None => ScrollPlan::Stay,
            },
        };

        let rows = self.visible_entries();
        match plan {
            ScrollPlan::Restore(offset) => {
                self.scroll_top = clamp_offset(offset, rows.len(), &self.config);
            }
            ScrollPlan::Center(entry_id) => {
                if let Some(row) = rows.iter().position(|&id| id == entry_id) {
                    self.scroll_top = centered_offset(row, rows.len(), &self.config);
                }
            }
            ScrollPlan::Stay => {}
        }
        debug!(?plan, scroll_top = self.scroll_top, "applied scroll plan");

        plan
    }

    pub fn page(&self) -> Option<&PageContext> {
        self.page.as_ref()
    }

    pub fn active(&self) -> Option<EntryId> {
        self.active
    }

    pub fn active_state(&self, entry_id: EntryId) -> ActiveState {
        if self.active == Some(entry_id) {
            ActiveState::Active
        } else {
            ActiveState::Inactive
        }
    }

    pub fn section_state(&self, entry_id: EntryId) -> SectionState {
        self.states.get(entry_id).copied().unwrap_or_default()
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Reader scrolling. Returns the offset actually applied.
    pub fn scroll_to(&mut self, offset: f64) -> f64 {
        let rows = self.visible_entries().len();
        self.scroll_top = clamp_offset(offset, rows, &self.config);
        self.scroll_top
    }

    pub fn find(&self, query: &str) -> Result<EntryId, RuntimeError> {
        self.tree
            .find(query)
            .ok_or_else(|| RuntimeError::EntryNotFound {
                query: query.to_string(),
            })
    }

    /// Flips a section open or closed.
    pub fn toggle(&mut self, entry_id: EntryId) -> Result<SectionState, RuntimeError> {
        let entry = self.entry(entry_id)?;
        if !(entry.has_toggle || entry.is_section()) {
            return Err(RuntimeError::NotASection {
                entry: entry.title(),
            });
        }

        let state = self.states[entry_id].toggled();
        self.states[entry_id] = state;
        // collapsing can shorten the list below the current offset
        let rows = self.visible_entries().len();
        self.scroll_top = clamp_offset(self.scroll_top, rows, &self.config);
        debug!(entry_id, %state, "toggled section");

        Ok(state)
    }

    /// Follows a link: persists the current offset for the next page load
    /// and returns where the browser goes.
    pub fn click<S>(&self, entry_id: EntryId, store: S) -> Result<LinkTarget, RuntimeError>
    where
        S: ScrollStore,
    {
        self.click_at(entry_id, self.scroll_top, store)
    }

    /// Like [`Sidebar::click`], but persists `offset` as measured by the
    /// caller. The value is stored as given, without clamping to this
    /// model's row geometry.
    pub fn click_at<S>(
        &self,
        entry_id: EntryId,
        offset: f64,
        mut store: S,
    ) -> Result<LinkTarget, RuntimeError>
    where
        S: ScrollStore,
    {
        let entry = self.entry(entry_id)?;
        let target = self
            .link_target(entry_id)
            .ok_or_else(|| RuntimeError::NoTarget {
                entry: entry.title(),
            })?;

        store.save(&self.config.storage_key, offset.to_string());
        debug!(entry_id, offset, href = %target.href, "persisted scroll offset");

        Ok(target)
    }

    pub fn link_target(&self, entry_id: EntryId) -> Option<LinkTarget> {
        let entry = self.tree.get(entry_id)?;
        match &self.page {
            Some(page) => link_target(entry, page),
            None => link_target(entry, &PageContext::default()),
        }
    }

    /// Rows currently shown, in document order: entries whose ancestors are all expanded.
    pub fn visible_entries(&self) -> Vec<EntryId> {
        let mut visible = Vec::new();
        let mut stack: Vec<EntryId> = self.tree.roots.iter().rev().copied().collect();
        while let Some(entry_id) = stack.pop() {
            visible.push(entry_id);
            if self.section_state(entry_id).is_expanded() {
                stack.extend(self.tree.entries[entry_id].children.iter().rev().copied());
            }
        }
        visible
    }

    pub fn render(&self) -> String {
        render::render(self)
    }

    fn entry(&self, entry_id: EntryId) -> Result<&Entry, RuntimeError> {
        self.tree
            .get(entry_id)
            .ok_or_else(|| RuntimeError::EntryNotFound {
                query: entry_id.to_string(),
            })
    }
}
