use crate::Sidebar;
use quick_xml::escape::escape;
use scrollbox_common::markers;
use scrollbox_common::*;

const TOGGLE_CONTROL: &str = "<div>❱</div>";

/// Writes the sidebar as nested list markup with the current section and
/// active state projected onto class names.
pub fn render(sidebar: &Sidebar) -> String {
    let mut out = String::new();
    write_list(sidebar, &sidebar.tree.roots, markers::CHAPTER_LIST, &mut out);
    out
}

fn write_list(sidebar: &Sidebar, entry_ids: &[EntryId], class: &str, out: &mut String) {
    out.push_str(&format!("<ol class=\"{}\">", class));
    for &entry_id in entry_ids {
        let entry = &sidebar.tree.entries[entry_id];
        write_item(sidebar, entry_id, entry, out);
        if entry.is_section() {
            out.push_str("<li>");
            write_list(sidebar, &entry.children, markers::SECTION_LIST, out);
            out.push_str("</li>");
        }
    }
    out.push_str("</ol>");
}

fn write_item(sidebar: &Sidebar, entry_id: EntryId, entry: &Entry, out: &mut String) {
    out.push_str(&format!(
        "<li class=\"{}\">",
        escape(&item_classes(sidebar, entry_id, entry))
    ));

    match &entry.kind {
        EntryKind::Chapter { label, number, .. } => {
            let mut content = String::new();
            if let Some(number) = number {
                content.push_str(&format!(
                    "<strong aria-hidden=\"true\">{}</strong> ",
                    escape(number)
                ));
            }
            content.push_str(&escape(label));

            match sidebar.link_target(entry_id) {
                Some(target) => {
                    let active = if sidebar.active_state(entry_id).is_active() {
                        format!(" class=\"{}\"", markers::ACTIVE)
                    } else {
                        String::new()
                    };
                    out.push_str(&format!(
                        "<a href=\"{}\"{}>{}</a>",
                        escape(&target.href),
                        active,
                        content
                    ));
                }
                None => out.push_str(&format!("<div>{}</div>", content)),
            }

            if entry.has_toggle {
                out.push_str(&format!(
                    "<a class=\"{}\">{}</a>",
                    markers::TOGGLE,
                    TOGGLE_CONTROL
                ));
            }
        }
        EntryKind::PartTitle(title) => out.push_str(&escape(title)),
        EntryKind::Spacer => {}
    }

    out.push_str("</li>");
}

fn item_classes(sidebar: &Sidebar, entry_id: EntryId, entry: &Entry) -> String {
    let mut classes = vec![match entry.kind {
        EntryKind::Chapter { .. } => markers::CHAPTER_ITEM,
        EntryKind::PartTitle(_) => markers::PART_TITLE,
        EntryKind::Spacer => markers::SPACER,
    }];
    if entry.is_chapter() && sidebar.section_state(entry_id).is_expanded() {
        classes.push(markers::EXPANDED);
    }
    classes.extend(entry.classes.iter().map(String::as_str));
    classes.join(" ")
}
