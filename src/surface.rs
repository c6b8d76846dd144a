//! Native content surface host contract.
//!
//! The pane engine never draws anything itself. Everything visible goes
//! through [`SurfaceHost::position`], which places (or, with an empty list,
//! hides) the native content surfaces of a workspace. The host also supplies
//! animation-frame callbacks used to batch pointer-driven updates.

use crate::pane::{Rect, TabId};
use serde::Serialize;

/// Placement of one tab's native surface, in content-area pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanePlacement {
    pub tab_id: TabId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PanePlacement {
    pub fn new(tab_id: TabId, rect: Rect) -> Self {
        Self {
            tab_id,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Outbound interface to whatever hosts the native content surfaces.
///
/// Implemented by the embedding application (and by [`RecordingHost`] for
/// headless use and tests).
pub trait SurfaceHost {
    /// Position every visible surface; surfaces not listed are hidden.
    ///
    /// `offset_x`/`offset_y` translate content-area coordinates to window
    /// coordinates (e.g. below a tab strip or beside a sidebar).
    fn position(
        &mut self,
        panes: &[PanePlacement],
        focused_tab_id: Option<&TabId>,
        offset_x: f64,
        offset_y: f64,
    );

    /// Ask for a single callback on the next animation frame.
    ///
    /// The host answers by calling `PaneCoordinator::on_frame`.
    fn request_frame(&mut self);
}

/// One recorded `position` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionCommand {
    pub panes: Vec<PanePlacement>,
    pub focused_tab_id: Option<TabId>,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl PositionCommand {
    /// Whether this command hides every surface
    pub fn is_hide(&self) -> bool {
        self.panes.is_empty()
    }
}

/// A host that records commands instead of moving real surfaces
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub commands: Vec<PositionCommand>,
    pub frame_requests: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent positioning command
    pub fn last(&self) -> Option<&PositionCommand> {
        self.commands.last()
    }
}

impl SurfaceHost for RecordingHost {
    fn position(
        &mut self,
        panes: &[PanePlacement],
        focused_tab_id: Option<&TabId>,
        offset_x: f64,
        offset_y: f64,
    ) {
        self.commands.push(PositionCommand {
            panes: panes.to_vec(),
            focused_tab_id: focused_tab_id.cloned(),
            offset_x,
            offset_y,
        });
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }
}
