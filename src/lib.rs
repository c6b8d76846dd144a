// Library exports for the tiling pane engine and its command-line front end
//
// The engine itself is single-threaded and allocation-light: every tree
// operation returns a new tree and the coordinator is driven from one UI
// thread. The only shared state is the debug log file, guarded by a
// `parking_lot::Mutex` in `debug`.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod coordinator;
pub mod pane;
pub mod session;
pub mod surface;
pub mod tab;

pub use coordinator::{FrameBatcher, PaneCoordinator, PaneEvent};
pub use pane::{Direction, DropSide, PaneNode, Rect, TabId};
pub use surface::{PanePlacement, SurfaceHost};
pub use tab::{MemoryTier, Tab, Workspace, WorkspaceId};
