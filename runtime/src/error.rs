/// Errors reported by sidebar operations.
///
/// Initialization never fails; these only come back from operations that
/// address a single entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// No entry matches the number, href or label asked for
    #[error("Entry not found: {query}")]
    EntryNotFound { query: String },
    /// The entry has neither children nor a toggle control
    #[error("Entry is not a section: {entry}")]
    NotASection { entry: String },
    /// Draft chapters, spacers and part titles cannot be followed
    #[error("Entry has no page: {entry}")]
    NoTarget { entry: String },
}
