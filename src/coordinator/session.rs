//! Rebuilding workspaces from a saved session

use super::PaneCoordinator;
use crate::pane::TabId;
use crate::session::SessionState;
use crate::session::restore::{RestoreIssue, restored_focus, validate_layout};
use crate::session::storage::load_session;
use crate::surface::SurfaceHost;
use crate::tab::{MemoryTier, Tab, Workspace, WorkspaceId};
use anyhow::Result;
use std::collections::HashSet;
use tilepane_config::Config;

impl<H: SurfaceHost> PaneCoordinator<H> {
    /// Startup restore from the configured session file
    ///
    /// Does nothing and returns `Ok(None)` when `restore_session` is off or no
    /// session was saved. A corrupt session file is an error and leaves the
    /// workspaces untouched.
    pub fn restore_from_config(
        &mut self,
        config: &Config,
    ) -> Result<Option<Vec<(WorkspaceId, RestoreIssue)>>> {
        if !config.restore_session {
            log::info!("Session restore disabled in config");
            return Ok(None);
        }
        let Some(state) = load_session(config)? else {
            return Ok(None);
        };
        Ok(Some(self.restore_session(&state)))
    }

    /// Replace all workspaces with the ones saved in `state`
    ///
    /// Restored tabs start suspended; only the visible tabs of the front
    /// workspace come back active. A pane tree that fails validation is
    /// dropped and its workspace shows the saved active tab (or its first tab)
    /// alone. Returns the discarded trees and why.
    pub fn restore_session(&mut self, state: &SessionState) -> Vec<(WorkspaceId, RestoreIssue)> {
        let mut issues = Vec::new();
        self.interaction = None;
        self.workspaces.clear();

        for saved in &state.workspaces {
            let mut ws = Workspace::with_id(saved.id, saved.name.clone());
            let mut restored: HashSet<TabId> = HashSet::new();

            for saved_tab in &saved.tabs {
                if !restored.insert(saved_tab.id.clone()) {
                    log::warn!(
                        "Session restore: duplicate tab {} in {}, skipped",
                        saved_tab.id,
                        saved.name
                    );
                    continue;
                }
                let mut tab = Tab::new(saved_tab.id.clone(), &saved_tab.title, &saved_tab.url);
                tab.pinned = saved_tab.pinned;
                tab.tier = MemoryTier::Suspended;
                ws.push_tab(tab);
            }

            if let Some(node) = &saved.pane_layout {
                match validate_layout(node, &restored) {
                    Ok(tree) => ws.pane_layout = Some(tree),
                    Err(issue) => {
                        log::warn!(
                            "Session restore: discarding pane layout of {}: {}",
                            saved.name,
                            issue
                        );
                        issues.push((saved.id, issue));
                    }
                }
            }

            ws.active_tab_id = restored_focus(saved, ws.pane_layout.as_ref());

            crate::debug_info!(
                "PANE_SESSION",
                "Restored workspace {} ({} tabs, split={})",
                ws.name,
                ws.tabs.len(),
                ws.is_split()
            );
            self.workspaces.push(ws);
        }

        let front = state
            .active_workspace
            .filter(|&i| i < self.workspaces.len())
            .unwrap_or(0);
        self.active_workspace = self.workspaces.get(front).map(|ws| ws.id);
        if let Some(ws) = self.workspaces.get_mut(front) {
            for tab_id in ws.visible_tab_ids() {
                if let Some(tab) = ws.tab_mut(&tab_id) {
                    tab.touch();
                }
            }
        }

        log::info!(
            "Restored {} workspaces ({} layouts discarded)",
            self.workspaces.len(),
            issues.len()
        );
        self.sync_surfaces();
        issues
    }
}
