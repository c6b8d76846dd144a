//! Divider drag and drag-to-split protocols for PaneCoordinator
//!
//! Both protocols share the same discipline:
//! 1. On pointer-down the native surfaces are hidden (empty positioning
//!    command) so opaque native windows cannot swallow pointer moves.
//! 2. Pointer moves only accumulate into a [`FrameBatcher`]; the first move
//!    after a frame asks the host for one animation frame.
//! 3. `on_frame` applies everything accumulated since the last frame in a
//!    single step.
//! 4. Pointer-up commits and re-issues the positioning command, revealing the
//!    surfaces at their new locations. There is no cancel path: losing the
//!    pointer capture is a pointer-up with nothing pending.

use super::{FrameBatcher, PaneCoordinator};
use crate::pane::layout::{compute_dividers, find_divider_at};
use crate::pane::{
    DividerInfo, DropZone, RemoveResult, TabId, detect, insert, remove_leaf, update_ratio,
};
use crate::surface::SurfaceHost;
use crate::tab::WorkspaceId;

/// Interactive session in progress
#[derive(Debug)]
pub(super) enum Interaction {
    Divider(DividerDrag),
    TabDrag(TabDrag),
}

/// Resize of one split by dragging the divider between two children
#[derive(Debug)]
pub(super) struct DividerDrag {
    workspace: WorkspaceId,
    divider: DividerInfo,
    /// Last pointer position seen
    last: (f64, f64),
    /// Pixels moved along the divider's axis since the last frame
    pending: FrameBatcher<f64>,
}

/// A tab being dragged over the content area to create a split
#[derive(Debug)]
pub(super) struct TabDrag {
    workspace: WorkspaceId,
    tab_id: TabId,
    /// Latest cursor position since the last frame
    pending: FrameBatcher<(f64, f64)>,
    pub(super) zone: Option<DropZone>,
}

impl<H: SurfaceHost> PaneCoordinator<H> {
    /// Dividers of the active workspace's tree
    pub fn dividers(&self) -> Vec<DividerInfo> {
        self.active_workspace()
            .and_then(|ws| ws.pane_layout.as_ref())
            .map(|tree| compute_dividers(tree, self.content_rect, self.gap))
            .unwrap_or_default()
    }

    /// Divider under a point, including the extra hit padding
    pub fn divider_at(&self, x: f64, y: f64) -> Option<DividerInfo> {
        find_divider_at(&self.dividers(), x, y, self.divider_hit_padding).cloned()
    }

    /// Pointer-down: start resizing if the pointer is on a divider
    pub fn begin_divider_drag(&mut self, x: f64, y: f64) -> bool {
        if self.interaction.is_some() {
            return false;
        }
        let (Some(workspace), Some(divider)) = (self.active_workspace, self.divider_at(x, y))
        else {
            return false;
        };

        crate::debug_info!(
            "PANE_DRAG",
            "Divider drag start at path {:?} child {}",
            divider.path,
            divider.child_idx
        );
        self.interaction = Some(Interaction::Divider(DividerDrag {
            workspace,
            divider,
            last: (x, y),
            pending: FrameBatcher::new(),
        }));
        self.hide_surfaces();
        true
    }

    /// Pointer-down on a tab (strip entry or pane) to drag it into a split
    pub fn begin_tab_drag(&mut self, tab_id: &TabId) -> bool {
        if self.interaction.is_some() {
            return false;
        }
        let Some(workspace) = self
            .active_workspace()
            .filter(|ws| ws.has_tab(tab_id))
            .map(|ws| ws.id)
        else {
            return false;
        };

        crate::debug_info!("PANE_DROP", "Tab drag start for {}", tab_id);
        self.interaction = Some(Interaction::TabDrag(TabDrag {
            workspace,
            tab_id: tab_id.clone(),
            pending: FrameBatcher::new(),
            zone: None,
        }));
        self.hide_surfaces();
        true
    }

    /// Pointer-move during a drag; coalesced until the next frame
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let request = match &mut self.interaction {
            Some(Interaction::Divider(drag)) => {
                let delta = drag
                    .divider
                    .axis_delta(x - drag.last.0, y - drag.last.1);
                drag.last = (x, y);
                drag.pending.push(delta, |a, b| a + b)
            }
            Some(Interaction::TabDrag(drag)) => drag.pending.push((x, y), |_, latest| latest),
            None => false,
        };
        if request {
            self.host.request_frame();
        }
    }

    /// Animation-frame callback: apply at most one update for everything
    /// accumulated since the previous frame
    pub fn on_frame(&mut self) {
        match self.interaction.take() {
            Some(Interaction::Divider(mut drag)) => {
                self.apply_divider_delta(&mut drag);
                self.interaction = Some(Interaction::Divider(drag));
            }
            Some(Interaction::TabDrag(mut drag)) => {
                self.refresh_drop_zone(&mut drag);
                self.interaction = Some(Interaction::TabDrag(drag));
            }
            None => {}
        }
    }

    /// Pointer-up: commit the drag and reveal the surfaces again
    pub fn end_drag(&mut self) {
        match self.interaction.take() {
            Some(Interaction::Divider(mut drag)) => {
                self.apply_divider_delta(&mut drag);
                crate::debug_info!("PANE_DRAG", "Divider drag committed");
            }
            Some(Interaction::TabDrag(mut drag)) => {
                self.refresh_drop_zone(&mut drag);
                match drag.zone.take() {
                    Some(zone) => self.drop_tab(drag.workspace, &drag.tab_id, zone),
                    None => crate::debug_log!("PANE_DROP", "Released outside any drop zone"),
                }
            }
            None => return,
        }
        self.sync_surfaces();
    }

    /// The window lost the pointer capture: pointer-up with nothing pending
    pub fn cancel_capture(&mut self) {
        match &mut self.interaction {
            Some(Interaction::Divider(drag)) => drag.pending.clear(),
            Some(Interaction::TabDrag(drag)) => {
                drag.pending.clear();
                drag.zone = None;
            }
            None => return,
        }
        self.end_drag();
    }

    fn apply_divider_delta(&mut self, drag: &mut DividerDrag) {
        let Some(pixels) = drag.pending.take() else {
            return;
        };
        let Some(index) = self.workspace_index(drag.workspace) else {
            return;
        };
        let span = drag.divider.span;
        if span <= 0.0 {
            return;
        }
        let ws = &mut self.workspaces[index];
        if let Some(tree) = ws.pane_layout.as_ref() {
            let updated = update_ratio(
                tree,
                &drag.divider.path,
                drag.divider.child_idx,
                pixels / span,
            );
            crate::debug_trace!("PANE_DRAG", "frame delta {:.1}px", pixels);
            ws.pane_layout = Some(updated);
        }
    }

    fn refresh_drop_zone(&mut self, drag: &mut TabDrag) {
        let Some((x, y)) = drag.pending.take() else {
            return;
        };
        let Some(ws) = self.workspace(drag.workspace) else {
            drag.zone = None;
            return;
        };
        let Some(active) = ws.active_tab_id.as_ref() else {
            drag.zone = None;
            return;
        };
        drag.zone = detect(
            ws.pane_layout.as_ref(),
            active,
            self.content_rect,
            self.gap,
            x,
            y,
        )
        .filter(|zone| zone.anchor_tab_id != drag.tab_id);
    }

    /// Insert the dragged tab at `zone`, first lifting it out of the tree if
    /// it is already a pane. A rejected insert keeps the original layout.
    fn drop_tab(&mut self, workspace: WorkspaceId, tab_id: &TabId, zone: DropZone) {
        let Some(index) = self.workspace_index(workspace) else {
            return;
        };
        let ws = &mut self.workspaces[index];
        if !ws.has_tab(tab_id) || &zone.anchor_tab_id == tab_id {
            return;
        }

        let base = match ws.pane_layout.as_ref() {
            Some(tree) => match remove_leaf(tree, tab_id) {
                RemoveResult::Removed(rest) => Some(rest),
                RemoveResult::Collapsed { .. } => None,
                RemoveResult::NotFound => Some(tree.clone()),
            },
            None => None,
        };

        match insert(base.as_ref(), &zone.anchor_tab_id, tab_id, zone.side) {
            Some(tree) => {
                log::info!(
                    "Dropped {} {:?} of {} in {}",
                    tab_id,
                    zone.side,
                    zone.anchor_tab_id,
                    ws.name
                );
                ws.pane_layout = Some(tree);
                ws.activate(tab_id);
            }
            None => {
                crate::debug_log!("PANE_DROP", "Drop of {} rejected, layout unchanged", tab_id)
            }
        }
    }
}
