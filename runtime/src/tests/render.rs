use super::*;

#[test]
fn projects_state_onto_classes() {
    let mut sidebar = guide();
    let mut store = MemoryStore::new();
    sidebar.initialize(
        PageContext::new("https://docs.example/guide/install.html", "../"),
        &mut store,
    );

    let markup = sidebar.render();

    assert!(markup.starts_with("<ol class=\"chapter\"><li class=\"chapter-item expanded affix\"><a href=\"../index.html\">Preface</a></li>"));
    assert!(markup.contains("<li class=\"spacer\"></li><li class=\"part-title\">Guide</li>"));
    assert!(markup.contains("<li class=\"chapter-item expanded\"><a href=\"../guide/setup.html\"><strong aria-hidden=\"true\">1.</strong> Setup</a><a class=\"toggle\"><div>❱</div></a></li>"));
    assert!(markup.contains("<a href=\"../guide/install.html\" class=\"active\"><strong aria-hidden=\"true\">1.1.</strong> Install</a>"));
    assert!(markup.contains("<li class=\"chapter-item\"><a href=\"../guide/config.html\">"));
    assert!(markup.contains("<li class=\"chapter-item\"><div><strong aria-hidden=\"true\">2.</strong> Roadmap</div></li>"));
    assert_eq!(markup.matches("class=\"active\"").count(), 1);
    assert!(markup.ends_with("</ol>"));
}

#[test]
fn toggled_state_shows_up_in_markup() {
    let mut sidebar = guide();
    let config = sidebar.find("1.2").unwrap();
    sidebar.toggle(config).unwrap();

    let markup = sidebar.render();
    assert!(markup.contains("<li class=\"chapter-item expanded\"><a href=\"guide/config.html\">"));
}

#[test]
fn text_is_escaped() {
    let mut tree = NavigationTree::new();
    tree.add_entry(Entry::chapter(
        "Rock & <roll>",
        Some("1."),
        Some("a.html?x=\"1\""),
    ));
    let sidebar = Sidebar::new(tree, Config::default());

    assert_eq!(
        sidebar.render(),
        "<ol class=\"chapter\"><li class=\"chapter-item\"><a href=\"a.html?x=&quot;1&quot;\"><strong aria-hidden=\"true\">1.</strong> Rock &amp; &lt;roll&gt;</a></li></ol>"
    );
}

#[test]
fn rendered_markup_parses_back_to_the_same_rows() {
    let mut sidebar = full_book();
    let mut store = MemoryStore::new();
    sidebar.initialize(
        PageContext::new("https://book.example/iterator.html", ""),
        &mut store,
    );

    let reparsed = scrollbox_parser::parse(sidebar.render()).unwrap();

    assert_eq!(reparsed.len(), sidebar.tree.len());
    assert_eq!(reparsed.roots, sidebar.tree.roots);
    for (entry_id, entry) in reparsed.entries.iter().enumerate() {
        let rendered_from = &sidebar.tree.entries[entry_id];
        assert_eq!(entry.kind, rendered_from.kind);
        assert_eq!(entry.children, rendered_from.children);
        assert_eq!(entry.initial_state, sidebar.section_state(entry_id));
    }
}
