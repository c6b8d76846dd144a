//! Tiling pane layout engine
//!
//! This module provides the pane infrastructure for split workspaces:
//! - `PaneNode`: n-ary tree of `Leaf` (one tab) and `Split` nodes with ratios
//! - [`tree_ops`]: insert / remove / ratio update, each returning a new tree
//! - [`layout`]: projection of a tree into leaf rects and divider hit regions
//! - [`drop_zone`]: cursor classification for drag-to-split

pub mod drop_zone;
pub mod layout;
pub mod tree_ops;
mod types;

pub use drop_zone::{DropZone, detect};
pub use layout::{DividerInfo, compute_dividers, compute_rects};
pub use tree_ops::{RemoveResult, insert, remove, remove_leaf, update_ratio};
pub use types::{
    Direction, DropSide, MAX_PANES, MIN_RATIO, NavigationDirection, PaneNode, RATIO_EPSILON,
    Rect, SplitChild, TabId,
};
