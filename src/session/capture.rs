//! Capture current session state from the live coordinator

use super::{SessionPaneNode, SessionSplitChild, SessionState, SessionTab, SessionWorkspace};
use crate::coordinator::PaneCoordinator;
use crate::pane::PaneNode;
use crate::surface::SurfaceHost;

/// Capture the current session state from all workspaces
pub fn capture_session<H: SurfaceHost>(coordinator: &PaneCoordinator<H>) -> SessionState {
    let active_id = coordinator.active_workspace_id();
    let workspaces: Vec<SessionWorkspace> = coordinator
        .workspaces()
        .iter()
        .map(|ws| SessionWorkspace {
            id: ws.id,
            name: ws.name.clone(),
            tabs: ws
                .tabs()
                .iter()
                .map(|tab| SessionTab {
                    id: tab.id.clone(),
                    title: tab.title.clone(),
                    url: tab.url.clone(),
                    pinned: tab.pinned,
                })
                .collect(),
            active_tab_id: ws.active_tab_id().cloned(),
            pane_layout: ws.pane_layout().map(capture_pane_node),
        })
        .collect();

    let active_workspace = coordinator
        .workspaces()
        .iter()
        .position(|ws| Some(ws.id) == active_id);

    crate::debug_info!(
        "PANE_SESSION",
        "Captured {} workspaces ({} split)",
        workspaces.len(),
        workspaces.iter().filter(|ws| ws.pane_layout.is_some()).count()
    );

    SessionState {
        saved_at: chrono::Utc::now().to_rfc3339(),
        workspaces,
        active_workspace,
    }
}

/// Recursively capture a pane tree node into a session-serializable form
pub fn capture_pane_node(node: &PaneNode) -> SessionPaneNode {
    match node {
        PaneNode::Leaf(tab_id) => SessionPaneNode::Leaf {
            tab_id: tab_id.clone(),
        },
        PaneNode::Split {
            direction,
            children,
        } => SessionPaneNode::Split {
            direction: *direction,
            children: children
                .iter()
                .map(|child| SessionSplitChild {
                    pane: capture_pane_node(&child.node),
                    ratio: child.ratio,
                })
                .collect(),
        },
    }
}
