use crate::*;
use scrollbox_common::test_case::TestCase;

mod properties;
mod render;

pub(crate) fn fixture(content: &str) -> Sidebar {
    let test_case = TestCase::from_string(content, "fixture.md");
    Sidebar::from_markup(&test_case.toc, Config::default()).unwrap()
}

/// Nine chapters across three expanded sections.
pub(crate) fn small_book() -> Sidebar {
    fixture(include_str!(
        "../../../compatibility-tests/00000000001-open-chapter-page.md"
    ))
}

/// Forty-eight rows, taller than the default viewport.
pub(crate) fn full_book() -> Sidebar {
    fixture(include_str!(
        "../../../compatibility-tests/00000000004-scroll-restored-after-click.md"
    ))
}

/// Collapsed sections with toggles, a spacer, a part title and a draft.
pub(crate) fn guide() -> Sidebar {
    fixture(include_str!(
        "../../../compatibility-tests/00000000005-toggle-sections.md"
    ))
}
