use scrollbox_common::{Config, NavigationTree};
use scrollbox_runtime::{PageContext, ScrollPlan, ScrollStore, Sidebar};
use tracing::warn;

/// A sidebar ready to go into the page.
#[derive(Debug)]
pub struct Mount {
    pub sidebar: Sidebar,
    pub markup: String,
    pub plan: ScrollPlan,
}

/// Builds the sidebar for `page` out of `toc_markup`.
///
/// Markup that does not parse is kept as it came, over an empty model, so
/// the reader still gets working links.
pub fn mount<S>(toc_markup: &str, page: PageContext, store: S) -> Mount
where
    S: ScrollStore,
{
    let (mut sidebar, fallback) = match Sidebar::from_markup(toc_markup, Config::default()) {
        Ok(sidebar) => (sidebar, None),
        Err(err) => {
            warn!(%err, "table of contents did not parse, showing it as is");
            let sidebar = Sidebar::new(NavigationTree::new(), Config::default());
            (sidebar, Some(toc_markup.to_string()))
        }
    };
    let plan = sidebar.initialize(page, store);
    let markup = fallback.unwrap_or_else(|| sidebar.render());

    Mount {
        sidebar,
        markup,
        plan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollbox_common::markers;
    use scrollbox_runtime::MemoryStore;

    const BROKEN: &str = r#"<ol class="chapter"><li class="chapter-item"><a href="a.html">A</li></ol>"#;

    #[test]
    fn broken_markup_is_shown_unchanged() {
        let mut store = MemoryStore::new();
        store.save("sidebar-scroll", "80".to_string());

        let mounted = mount(BROKEN, PageContext::new("https://site/a.html", ""), &mut store);

        assert_eq!(mounted.markup, BROKEN);
        assert!(mounted.sidebar.tree.entries.is_empty());
        assert_eq!(mounted.sidebar.active(), None);
        // the offset left by the previous page is still honoured
        assert_eq!(mounted.plan, ScrollPlan::Restore(80.0));
        assert!(store.is_empty());
    }

    #[test]
    fn rendered_markup_carries_the_resolved_state() {
        let toc = r#"<ol class="chapter"><li class="chapter-item"><a href="a.html">A</a></li><li class="chapter-item"><a href="b.html">B</a></li></ol>"#;

        let mounted = mount(toc, PageContext::new("https://site/b.html", ""), MemoryStore::new());

        let b = mounted.sidebar.find("B").unwrap();
        assert_eq!(mounted.sidebar.active(), Some(b));
        assert_eq!(mounted.plan, ScrollPlan::Center(b));
        assert!(mounted.markup.contains(markers::ACTIVE));
    }
}
