//! Class names shared by the markup the generator emits and the markup we render.

pub const CHAPTER_LIST: &str = "chapter";
pub const SECTION_LIST: &str = "section";
pub const CHAPTER_ITEM: &str = "chapter-item";
pub const SPACER: &str = "spacer";
pub const PART_TITLE: &str = "part-title";
pub const TOGGLE: &str = "toggle";
pub const EXPANDED: &str = "expanded";
pub const ACTIVE: &str = "active";

/// Classes the renderer derives from an entry's kind and state, so they are
/// never carried through from source markup.
pub fn is_generated(class: &str) -> bool {
    matches!(
        class,
        CHAPTER_ITEM | SPACER | PART_TITLE | EXPANDED | ACTIVE
    )
}
