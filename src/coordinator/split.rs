//! Split toggling, explicit splits and focus navigation for PaneCoordinator

use super::PaneCoordinator;
use crate::pane::layout::{find_in_direction, find_tab_at};
use crate::pane::{DropSide, NavigationDirection, TabId, insert};
use crate::surface::SurfaceHost;

impl<H: SurfaceHost> PaneCoordinator<H> {
    /// Enter or leave split mode in the active workspace
    ///
    /// Leaving keeps the previously active tab as the sole focus. Entering
    /// pairs the active tab with the most recently used eligible tab, placed
    /// to its right. Returns whether the workspace is split afterwards.
    pub fn toggle_split(&mut self) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let ws = &mut self.workspaces[index];

        if ws.pane_layout.take().is_some() {
            log::info!("Leaving split mode in {}", ws.name);
            self.sync_surfaces();
            return false;
        }

        let Some(active) = ws.active_tab_id.clone() else {
            return false;
        };
        let Some(candidate) = ws.split_candidate().map(|t| t.id.clone()) else {
            crate::debug_log!("PANE_TREE", "No split candidate in {}", ws.name);
            return false;
        };

        let Some(tree) = insert(None, &active, &candidate, DropSide::Right) else {
            return false;
        };
        log::info!("Split {} with {} in {}", active, candidate, ws.name);
        ws.pane_layout = Some(tree);
        if let Some(tab) = ws.tab_mut(&candidate) {
            tab.touch();
        }
        self.sync_surfaces();
        true
    }

    /// Show `tab_id` in a new pane on `side` of the active tab and focus it
    ///
    /// Rejected (returns false) when the tree is full, the tab is already a
    /// pane, or the tab is not in the active workspace.
    pub fn split_with(&mut self, tab_id: &TabId, side: DropSide) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let ws = &mut self.workspaces[index];
        let Some(active) = ws.active_tab_id.clone() else {
            return false;
        };
        if !ws.has_tab(tab_id) {
            return false;
        }

        let Some(tree) = insert(ws.pane_layout.as_ref(), &active, tab_id, side) else {
            crate::debug_log!("PANE_TREE", "split_with {} rejected", tab_id);
            return false;
        };
        ws.pane_layout = Some(tree);
        ws.activate(tab_id);
        self.sync_surfaces();
        true
    }

    /// Move focus to the nearest pane in `direction`
    pub fn focus_direction(&mut self, direction: NavigationDirection) -> bool {
        let Some(index) = self.active_index() else {
            return false;
        };
        let Some(from) = self.workspaces[index].active_tab_id.clone() else {
            return false;
        };
        let Some(target) = find_in_direction(&self.pane_rects(), &from, direction) else {
            return false;
        };
        log::debug!("Navigated {:?} from {} to {}", direction, from, target);
        self.workspaces[index].activate(&target);
        self.sync_surfaces();
        true
    }

    /// Focus the pane at a given pixel position (click-to-focus)
    pub fn focus_at(&mut self, x: f64, y: f64) -> Option<TabId> {
        let index = self.active_index()?;
        let rects = self.pane_rects();
        let target = find_tab_at(&rects, x, y)?.clone();
        if self.workspaces[index].active_tab_id.as_ref() != Some(&target) {
            self.workspaces[index].activate(&target);
            self.sync_surfaces();
        }
        Some(target)
    }
}
