//! What a click inside the sidebar does to the model, kept apart from the
//! DOM so it can run anywhere.

use scrollbox_common::{EntryId, SectionState};
use scrollbox_runtime::{ScrollStore, Sidebar};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// `a.toggle` next to a section label.
    Toggle,
    /// Any other anchor; the browser navigates on its own.
    Link,
}

/// Rendered rows appear in document order, so a row's position among them
/// names its entry.
pub fn entry_at_row(sidebar: &Sidebar, row: usize) -> Option<EntryId> {
    sidebar.tree.document_order().get(row).copied()
}

/// Applies a click on the anchor of row `row`.
///
/// A link click persists `offset`, the container's real scroll position,
/// unchanged. A toggle flips its section and returns the new state, or
/// `None` when the row has no section in the model and the caller should
/// just flip the class.
pub fn handle_click<S>(
    sidebar: &mut Sidebar,
    kind: ClickKind,
    row: Option<usize>,
    offset: f64,
    mut store: S,
) -> Option<SectionState>
where
    S: ScrollStore,
{
    let entry_id = row.and_then(|row| entry_at_row(sidebar, row));

    match kind {
        ClickKind::Link => {
            let followed = entry_id.and_then(|entry_id| {
                sidebar.click_at(entry_id, offset, &mut store).ok()
            });
            if followed.is_none() {
                debug!(?row, "link outside the model");
                store.save(&sidebar.config.storage_key, offset.to_string());
            }
            None
        }
        ClickKind::Toggle => entry_id.and_then(|entry_id| sidebar.toggle(entry_id).ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollbox_common::test_case::TestCase;
    use scrollbox_common::{Config, NavigationTree};
    use scrollbox_runtime::{MemoryStore, PageContext, ScrollPlan};

    fn guide() -> Sidebar {
        let test_case = TestCase::from_string(
            include_str!("../../compatibility-tests/00000000005-toggle-sections.md"),
            "00000000005-toggle-sections.md",
        );
        Sidebar::from_markup(&test_case.toc, Config::default()).unwrap()
    }

    #[test]
    fn rows_map_to_entries_in_document_order() {
        let sidebar = guide();
        // Preface, spacer, part title, Setup, Install, Configuration, TOML, Roadmap
        assert_eq!(entry_at_row(&sidebar, 0), sidebar.find("Preface").ok());
        assert_eq!(entry_at_row(&sidebar, 3), sidebar.find("1").ok());
        assert_eq!(entry_at_row(&sidebar, 6), sidebar.find("1.2.1").ok());
        assert_eq!(entry_at_row(&sidebar, 7), sidebar.find("2").ok());
        assert_eq!(entry_at_row(&sidebar, 8), None);
    }

    #[test]
    fn link_click_persists_the_real_offset() {
        let mut sidebar = guide();
        let mut store = MemoryStore::new();
        sidebar.initialize(
            PageContext::new("https://docs.example/guide/install.html", "../"),
            &mut store,
        );

        // eight short rows: the model alone would clamp this to zero
        let state = handle_click(&mut sidebar, ClickKind::Link, Some(6), 150.0, &mut store);

        assert_eq!(state, None);
        assert_eq!(store.get("sidebar-scroll"), Some("150"));
        let plan = sidebar.initialize(
            PageContext::new("https://docs.example/guide/config/toml.html", "../../"),
            &mut store,
        );
        assert_eq!(plan, ScrollPlan::Restore(150.0));
    }

    #[test]
    fn unmapped_link_still_persists_offset() {
        let mut sidebar = Sidebar::new(NavigationTree::new(), Config::default());
        let mut store = MemoryStore::new();

        handle_click(&mut sidebar, ClickKind::Link, None, 42.0, &mut store);

        assert_eq!(store.get("sidebar-scroll"), Some("42"));
    }

    #[test]
    fn toggle_click_flips_the_section() {
        let mut sidebar = guide();
        let mut store = MemoryStore::new();
        let setup = sidebar.find("1").unwrap();

        let state = handle_click(&mut sidebar, ClickKind::Toggle, Some(3), 64.0, &mut store);

        assert_eq!(state, Some(SectionState::Expanded));
        assert_eq!(sidebar.section_state(setup), SectionState::Expanded);
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_on_unknown_row_leaves_the_class_to_the_caller() {
        let mut sidebar = guide();
        let mut store = MemoryStore::new();

        assert_eq!(
            handle_click(&mut sidebar, ClickKind::Toggle, None, 0.0, &mut store),
            None
        );
        // Install has no toggle in the model
        assert_eq!(
            handle_click(&mut sidebar, ClickKind::Toggle, Some(4), 0.0, &mut store),
            None
        );
    }
}
