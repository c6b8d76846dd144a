//! Shared identifiers and enums for the pane system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of leaves a pane tree may hold.
pub const MAX_PANES: usize = 4;

/// Smallest share an interactive resize may leave to either side of a divider.
pub const MIN_RATIO: f64 = 0.15;

/// Tolerance used when checking that sibling ratios sum to one.
pub const RATIO_EPSILON: f64 = 1e-9;

/// Unique identifier for a content tab
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Axis a split lays its children out along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children side by side, left to right
    Row,
    /// Children stacked, top to bottom
    Col,
}

/// Edge of an anchor pane that a new pane is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl DropSide {
    /// Split direction implied by this side
    pub fn direction(self) -> Direction {
        match self {
            DropSide::Left | DropSide::Right => Direction::Row,
            DropSide::Top | DropSide::Bottom => Direction::Col,
        }
    }

    /// Whether the new pane goes before the anchor (left/top)
    pub fn inserts_before(self) -> bool {
        matches!(self, DropSide::Left | DropSide::Top)
    }
}

/// Direction for pane navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Left,
    Right,
    Up,
    Down,
}
