//! Pane coordinator: per-workspace owner of the pane tree
//!
//! The PaneCoordinator owns every workspace and provides operations for:
//! - Reacting to tab lifecycle events (close, move, select, tier change)
//! - Toggling and extending splits
//! - Divider drag and drag-to-split interactions
//! - Suspending and destroying idle tabs
//! - Pushing the projected layout to the native surface host
//!
//! Sub-modules:
//! - [`frame`]: Pending-value accumulator for animation-frame batching.
//! - [`lifecycle`]: Tab and workspace lifecycle event handling.
//! - [`split`]: Split toggling, explicit splits, focus navigation.
//! - [`drag`]: Divider drag and drag-to-split protocols.
//! - [`sweep`]: Memory-tier sweep of idle tabs.
//! - [`session`]: Rebuilding workspaces from a saved session.

mod drag;
mod frame;
mod lifecycle;
mod session;
mod split;
mod sweep;

pub use frame::FrameBatcher;

use crate::pane::{DropZone, Rect, TabId, compute_rects};
use crate::surface::{PanePlacement, SurfaceHost};
use crate::tab::{MemoryTier, Workspace, WorkspaceId};
use drag::Interaction;
use std::time::Duration;
use tilepane_config::Config;

/// Lifecycle events consumed from the tab-management layer
#[derive(Debug, Clone, PartialEq)]
pub enum PaneEvent {
    /// A tab was closed by the user or the page
    TabClosed(TabId),
    /// A tab's native surface was suspended, destroyed or revived
    TabMemoryTierChanged(TabId, MemoryTier),
    /// A tab was selected in the tab strip
    TabSelected(TabId),
    /// A different workspace was brought to the front
    WorkspaceSwitched(WorkspaceId),
    /// A tab was moved to another workspace
    TabMoved { tab_id: TabId, to: WorkspaceId },
}

/// Owns every workspace's pane tree and drives the surface host
pub struct PaneCoordinator<H: SurfaceHost> {
    host: H,
    workspaces: Vec<Workspace>,
    active_workspace: Option<WorkspaceId>,
    /// Area available for panes, in content coordinates
    content_rect: Rect,
    /// Translation from content to window coordinates
    offset: (f64, f64),
    gap: f64,
    divider_hit_padding: f64,
    suspend_after: Duration,
    destroy_after: Duration,
    /// An internal (non-content) view covers the content area
    internal_view: bool,
    interaction: Option<Interaction>,
}

impl<H: SurfaceHost> PaneCoordinator<H> {
    /// Create a coordinator with no workspaces
    pub fn new(host: H, config: &Config) -> Self {
        Self {
            host,
            workspaces: Vec::new(),
            active_workspace: None,
            content_rect: Rect::default(),
            offset: (0.0, 0.0),
            gap: config.pane_gap,
            divider_hit_padding: config.divider_hit_padding(),
            suspend_after: config.suspend_after(),
            destroy_after: config.destroy_after(),
            internal_view: false,
            interaction: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.iter().find(|ws| ws.id == id)
    }

    pub fn active_workspace_id(&self) -> Option<WorkspaceId> {
        self.active_workspace
    }

    pub fn active_workspace(&self) -> Option<&Workspace> {
        self.workspace(self.active_workspace?)
    }

    /// Drop zone under the cursor during a drag-to-split, for preview rendering
    pub fn drop_preview(&self) -> Option<&DropZone> {
        match &self.interaction {
            Some(Interaction::TabDrag(drag)) => drag.zone.as_ref(),
            _ => None,
        }
    }

    /// Check if a divider drag or tab drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.interaction.is_some()
    }

    /// Single ingestion point for lifecycle events
    pub fn handle_event(&mut self, event: PaneEvent) {
        log::debug!("Pane event: {:?}", event);
        match event {
            PaneEvent::TabClosed(tab_id) => self.on_tab_closed(&tab_id),
            PaneEvent::TabMemoryTierChanged(tab_id, tier) => self.on_tier_changed(&tab_id, tier),
            PaneEvent::TabSelected(tab_id) => self.on_tab_selected(&tab_id),
            PaneEvent::WorkspaceSwitched(id) => self.on_workspace_switched(id),
            PaneEvent::TabMoved { tab_id, to } => self.on_tab_moved(&tab_id, to),
        }
    }

    /// The surrounding chrome was resized or moved
    pub fn set_content_rect(&mut self, rect: Rect, offset_x: f64, offset_y: f64) {
        self.content_rect = rect;
        self.offset = (offset_x, offset_y);
        self.sync_surfaces();
    }

    /// An internal view (settings, history, ...) covers or uncovers the content area
    pub fn set_internal_view(&mut self, shown: bool) {
        if self.internal_view != shown {
            self.internal_view = shown;
            self.sync_surfaces();
        }
    }

    /// Per-pane rectangles of the active workspace
    pub fn pane_rects(&self) -> Vec<(TabId, Rect)> {
        let Some(ws) = self.active_workspace() else {
            return Vec::new();
        };
        match (&ws.pane_layout, &ws.active_tab_id) {
            (Some(tree), _) => compute_rects(tree, self.content_rect, self.gap),
            (None, Some(active)) => vec![(active.clone(), self.content_rect)],
            (None, None) => Vec::new(),
        }
    }

    /// Push the active workspace's current layout to the host
    ///
    /// Surfaces stay hidden while an internal view is shown or a drag is in
    /// progress; the drag reveals them itself on release.
    pub fn sync_surfaces(&mut self) {
        if self.internal_view || self.interaction.is_some() {
            self.hide_surfaces();
            return;
        }
        let placements: Vec<PanePlacement> = self
            .pane_rects()
            .into_iter()
            .map(|(tab_id, rect)| PanePlacement::new(tab_id, rect))
            .collect();
        let focused = self
            .active_workspace()
            .and_then(|ws| ws.active_tab_id.clone());
        crate::debug_trace!(
            "PANE_TREE",
            "position {} panes, focus {:?}",
            placements.len(),
            focused
        );
        self.host
            .position(&placements, focused.as_ref(), self.offset.0, self.offset.1);
    }

    /// Hide every native surface so pointer events reach the engine's own UI
    fn hide_surfaces(&mut self) {
        let focused = self
            .active_workspace()
            .and_then(|ws| ws.active_tab_id.clone());
        self.host
            .position(&[], focused.as_ref(), self.offset.0, self.offset.1);
    }

    fn workspace_index(&self, id: WorkspaceId) -> Option<usize> {
        self.workspaces.iter().position(|ws| ws.id == id)
    }

    /// Index of the workspace that owns `tab_id`
    fn workspace_index_of_tab(&self, tab_id: &TabId) -> Option<usize> {
        self.workspaces.iter().position(|ws| ws.has_tab(tab_id))
    }

    fn active_index(&self) -> Option<usize> {
        self.workspace_index(self.active_workspace?)
    }

    fn is_active_index(&self, index: usize) -> bool {
        self.active_index() == Some(index)
    }
}
