//! Core types for the pane system.
//!
//! Sub-modules:
//! - [`bounds`]: `Rect` pixel-space rectangle
//! - [`common`]: `TabId`, `Direction`, `DropSide`, `NavigationDirection`, limits
//! - [`pane_node`]: `PaneNode` n-ary tree for pane layout

mod bounds;
mod common;
mod pane_node;


pub use bounds::Rect;
pub use common::{
    Direction, DropSide, MAX_PANES, MIN_RATIO, NavigationDirection, RATIO_EPSILON, TabId,
};
pub use pane_node::{PaneNode, SplitChild};
