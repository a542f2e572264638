use super::*;
use proptest::prelude::*;

fn linked_entries(sidebar: &Sidebar) -> Vec<EntryId> {
    sidebar
        .tree
        .document_order()
        .into_iter()
        .filter(|&id| sidebar.tree.entries[id].href().is_some())
        .collect()
}

proptest! {
    #[test]
    fn opening_a_chapter_page_activates_it_and_opens_only_its_ancestors(
        index in 0usize..48,
        fragment in "(#[a-z]{1,6})?",
    ) {
        let mut sidebar = full_book();
        let mut store = MemoryStore::new();
        let entry_id = linked_entries(&sidebar)[index];
        let href = sidebar.tree.entries[entry_id].href().unwrap_or_default().to_string();
        let depth_prefix = scrollbox_common::url::path_to_root(&href);

        let page = PageContext::new(
            format!("https://book.example/{}{}", href, fragment),
            depth_prefix,
        );
        let plan = sidebar.initialize(page, &mut store);

        prop_assert_eq!(sidebar.active(), Some(entry_id));
        prop_assert_eq!(plan, ScrollPlan::Center(entry_id));
        let active_count = (0..sidebar.tree.len())
            .filter(|&id| sidebar.active_state(id).is_active())
            .count();
        prop_assert_eq!(active_count, 1);
    }

    #[test]
    fn only_ancestor_sections_are_forced_open(index in 0usize..6) {
        let mut sidebar = guide();
        let mut store = MemoryStore::new();
        let entry_id = linked_entries(&sidebar)[index % linked_entries(&sidebar).len()];
        let href = sidebar.tree.entries[entry_id].href().unwrap_or_default().to_string();
        let ancestors = sidebar.tree.ancestors(entry_id);

        let page = PageContext::new(
            format!("https://docs.example/{}", href),
            scrollbox_common::url::path_to_root(&href),
        );
        sidebar.initialize(page, &mut store);

        for id in 0..sidebar.tree.len() {
            let entry = &sidebar.tree.entries[id];
            let forced = ancestors.contains(&id) || (id == entry_id && entry.is_section());
            if forced {
                prop_assert!(sidebar.section_state(id).is_expanded());
            } else {
                prop_assert_eq!(sidebar.section_state(id), entry.initial_state);
            }
        }
    }

    #[test]
    fn persisted_offset_is_restored_once(offset in 0.0f64..672.0, index in 0usize..48) {
        let mut sidebar = full_book();
        let mut store = MemoryStore::new();
        let page = PageContext::new("https://book.example/advanced.html", "");
        sidebar.initialize(page.clone(), &mut store);
        sidebar.scroll_to(offset);

        let entry_id = linked_entries(&sidebar)[index];
        sidebar.click(entry_id, &mut store).unwrap();
        let plan = sidebar.initialize(page.clone(), &mut store);

        prop_assert_eq!(plan, ScrollPlan::Restore(offset));
        prop_assert_eq!(sidebar.scroll_top(), offset);
        prop_assert!(store.is_empty());

        // nothing left for the load after that
        let plan = sidebar.initialize(page, &mut store);
        prop_assert_eq!(plan, ScrollPlan::Center(sidebar.find("3").unwrap()));
    }

    #[test]
    fn toggling_twice_restores_visible_rows(index in 0usize..8) {
        let mut sidebar = guide();
        let sections: Vec<EntryId> = (0..sidebar.tree.len())
            .filter(|&id| sidebar.tree.entries[id].has_toggle || sidebar.tree.entries[id].is_section())
            .collect();
        let entry_id = sections[index % sections.len()];
        let before = sidebar.visible_entries();
        let state = sidebar.section_state(entry_id);

        sidebar.toggle(entry_id).unwrap();
        sidebar.toggle(entry_id).unwrap();

        prop_assert_eq!(sidebar.section_state(entry_id), state);
        prop_assert_eq!(sidebar.visible_entries(), before);
    }
}
