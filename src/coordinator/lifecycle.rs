//! Tab and workspace lifecycle handling for PaneCoordinator
//!
//! Every reaction keeps two rules intact: a workspace's active tab is either
//! its sole focus or one of its tree's leaves, and a destroyed tab is never a
//! leaf.

use super::PaneCoordinator;
use crate::pane::{PaneNode, RemoveResult, TabId, remove_leaf};
use crate::surface::SurfaceHost;
use crate::tab::{MemoryTier, Tab, Workspace, WorkspaceId};
use uuid::Uuid;

/// Tab that should take focus when `tab_id` leaves `tree`
///
/// Prefers the nearest sibling slot of the removed leaf (the one before it,
/// else the one after), descending to that subtree's first leaf.
fn neighbour_focus(tree: &PaneNode, tab_id: &TabId) -> Option<TabId> {
    let path = tree.find_path(tab_id)?;
    let (&index, parent_path) = path.split_last()?;
    let PaneNode::Split { children, .. } = tree.node_at(parent_path)? else {
        return None;
    };
    let neighbour = if index > 0 { index - 1 } else { index + 1 };
    children.get(neighbour)?.node.first_tab().cloned()
}

impl<H: SurfaceHost> PaneCoordinator<H> {
    // =========================================================================
    // Workspaces
    // =========================================================================

    /// Create a new empty workspace
    ///
    /// The first workspace created becomes the active one.
    pub fn create_workspace(&mut self, name: &str) -> WorkspaceId {
        let ws = Workspace::new(name);
        let id = ws.id;
        log::info!("Created workspace {} ({})", name, id);
        self.workspaces.push(ws);
        if self.active_workspace.is_none() {
            self.active_workspace = Some(id);
            self.sync_surfaces();
        }
        id
    }

    /// Delete a workspace together with its tabs and pane layout
    pub fn delete_workspace(&mut self, id: WorkspaceId) {
        let Some(index) = self.workspace_index(id) else {
            return;
        };
        let was_active = self.is_active_index(index);
        let ws = self.workspaces.remove(index);
        log::info!(
            "Deleted workspace {} ({} tabs, split={})",
            ws.name,
            ws.tabs.len(),
            ws.is_split()
        );

        if was_active {
            self.interaction = None;
            self.active_workspace = self.workspaces.first().map(|ws| ws.id);
            self.sync_surfaces();
        }
    }

    /// Open a new tab in a workspace
    ///
    /// The tab becomes active only if the workspace had no tabs; selecting it
    /// otherwise is up to the caller.
    pub fn open_tab(&mut self, workspace: WorkspaceId, title: &str, url: &str) -> Option<TabId> {
        let index = self.workspace_index(workspace)?;
        let id = TabId::new(Uuid::new_v4().to_string());
        let was_empty = self.workspaces[index].tabs.is_empty();
        self.workspaces[index].push_tab(Tab::new(id.clone(), title, url));
        log::debug!("Opened tab {} in workspace {}", id, workspace);

        if was_empty && self.is_active_index(index) {
            self.sync_surfaces();
        }
        Some(id)
    }

    /// Mutable access to a tab's flags (pinned, media playback, title, ...)
    pub fn tab_mut(&mut self, tab_id: &TabId) -> Option<&mut Tab> {
        let index = self.workspace_index_of_tab(tab_id)?;
        self.workspaces[index].tab_mut(tab_id)
    }

    // =========================================================================
    // Lifecycle events
    // =========================================================================

    /// A tab was closed: drop it from its tree and its workspace
    pub fn on_tab_closed(&mut self, tab_id: &TabId) {
        let Some(index) = self.workspace_index_of_tab(tab_id) else {
            crate::debug_log!("PANE_FOCUS", "close of unknown tab {}", tab_id);
            return;
        };
        self.detach_tab(index, tab_id);
        if self.is_active_index(index) {
            self.sync_surfaces();
        }
    }

    /// A tab was moved to another workspace
    ///
    /// The source workspace sees a close; the destination shows the tab on
    /// its own.
    pub fn on_tab_moved(&mut self, tab_id: &TabId, to: WorkspaceId) {
        let (Some(from), Some(dest)) = (
            self.workspace_index_of_tab(tab_id),
            self.workspace_index(to),
        ) else {
            return;
        };
        if from == dest {
            return;
        }

        let Some(tab) = self.detach_tab(from, tab_id) else {
            return;
        };
        let ws = &mut self.workspaces[dest];
        ws.tabs.push(tab);
        if ws.pane_layout.take().is_some() {
            log::info!("Moved tab {} replaces split in {}", tab_id, ws.name);
        }
        ws.activate(tab_id);

        if self.is_active_index(from) || self.is_active_index(dest) {
            self.sync_surfaces();
        }
    }

    /// A tab's memory tier changed
    ///
    /// A tab being destroyed while it is a pane leaf is evicted from the tree
    /// first, exactly as if it had been closed, but stays in its workspace.
    pub fn on_tier_changed(&mut self, tab_id: &TabId, tier: MemoryTier) {
        let Some(index) = self.workspace_index_of_tab(tab_id) else {
            return;
        };
        if tier == MemoryTier::Destroyed && self.workspaces[index].is_leaf(tab_id) {
            crate::debug_info!("PANE_SWEEP", "Evicting destroyed tab {} from panes", tab_id);
            self.evict_leaf(index, tab_id);
        }
        if let Some(tab) = self.workspaces[index].tab_mut(tab_id) {
            tab.tier = tier;
        }
        if self.is_active_index(index) {
            self.sync_surfaces();
        }
    }

    /// A tab was selected in the tab strip
    ///
    /// Selecting a pane leaf moves focus within the split. Selecting any other
    /// tab exits the split and shows that tab alone. Selecting a tab in a
    /// background workspace also brings that workspace to the front.
    pub fn on_tab_selected(&mut self, tab_id: &TabId) {
        let Some(index) = self.workspace_index_of_tab(tab_id) else {
            return;
        };
        let ws = &mut self.workspaces[index];
        if !ws.is_leaf(tab_id) && ws.pane_layout.take().is_some() {
            crate::debug_info!(
                "PANE_FOCUS",
                "Selected non-pane tab {}, leaving split in {}",
                tab_id,
                ws.name
            );
        }
        ws.activate(tab_id);
        self.active_workspace = Some(ws.id);
        self.sync_surfaces();
    }

    /// A different workspace was brought to the front
    pub fn on_workspace_switched(&mut self, id: WorkspaceId) {
        let Some(index) = self.workspace_index(id) else {
            return;
        };
        if self.interaction.take().is_some() {
            log::debug!("Workspace switch abandons the drag in progress");
        }
        self.active_workspace = Some(id);
        let ws = &mut self.workspaces[index];
        for tab_id in ws.visible_tab_ids() {
            if let Some(tab) = ws.tab_mut(&tab_id) {
                tab.touch();
            }
        }
        self.sync_surfaces();
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Remove a tab from its workspace, fixing up the tree and focus
    fn detach_tab(&mut self, index: usize, tab_id: &TabId) -> Option<Tab> {
        self.evict_leaf(index, tab_id);
        let ws = &mut self.workspaces[index];
        let tab = ws.take_tab(tab_id)?;

        if ws.active_tab_id.as_ref() == Some(tab_id) {
            let next = ws.most_recent_tab(None).map(|t| t.id.clone());
            ws.active_tab_id = None;
            if let Some(next) = next {
                ws.activate(&next);
            }
        }
        Some(tab)
    }

    /// Remove a leaf from a workspace's tree, keeping focus on a visible tab
    pub(super) fn evict_leaf(&mut self, index: usize, tab_id: &TabId) {
        let ws = &mut self.workspaces[index];
        let Some(tree) = ws.pane_layout.as_ref() else {
            return;
        };
        let was_active = ws.active_tab_id.as_ref() == Some(tab_id);

        match remove_leaf(tree, tab_id) {
            RemoveResult::Removed(new_tree) => {
                let successor = if was_active {
                    neighbour_focus(tree, tab_id).or_else(|| new_tree.first_tab().cloned())
                } else {
                    None
                };
                ws.pane_layout = Some(new_tree);
                if let Some(next) = successor {
                    ws.activate(&next);
                }
            }
            RemoveResult::Collapsed { remaining } => {
                crate::debug_info!(
                    "PANE_TREE",
                    "Removing {} leaves a single pane ({:?})",
                    tab_id,
                    remaining
                );
                ws.pane_layout = None;
                if let Some(remaining) = remaining {
                    ws.activate(&remaining);
                }
            }
            RemoveResult::NotFound => {}
        }
    }
}
