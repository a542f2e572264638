use scrollbox_common::{Config, EntryId};
use serde::Serialize;

/// What a page load does to the sidebar scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollPlan {
    /// Apply the offset persisted by the previous page.
    Restore(f64),
    /// Bring the active entry to the vertical middle of the viewport.
    Center(EntryId),
    /// Nothing to restore and nothing active.
    Stay,
}

/// Reads a persisted offset. Anything that is not a finite number counts as absent.
pub fn parse_offset(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|offset| offset.is_finite())
}

pub fn max_offset(rows: usize, config: &Config) -> f64 {
    (rows as f64 * config.entry_height - config.viewport_height).max(0.0)
}

pub fn clamp_offset(offset: f64, rows: usize, config: &Config) -> f64 {
    offset.clamp(0.0, max_offset(rows, config))
}

/// Offset that puts visible row `row` at the center of the viewport.
pub fn centered_offset(row: usize, rows: usize, config: &Config) -> f64 {
    let middle = row as f64 * config.entry_height + config.entry_height / 2.0;
    clamp_offset(middle - config.viewport_height / 2.0, rows, config)
}
