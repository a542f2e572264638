use serde::{Deserialize, Serialize};
use std::fmt;

/// Open/closed state of a section row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionState {
    #[default]
    Collapsed,
    Expanded,
}

impl SectionState {
    pub fn toggled(self) -> Self {
        match self {
            SectionState::Collapsed => SectionState::Expanded,
            SectionState::Expanded => SectionState::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == SectionState::Expanded
    }
}

impl fmt::Display for SectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionState::Collapsed => write!(f, "collapsed"),
            SectionState::Expanded => write!(f, "expanded"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveState {
    #[default]
    Inactive,
    Active,
}

impl ActiveState {
    pub fn is_active(self) -> bool {
        self == ActiveState::Active
    }
}
