//! Session state types for save/restore on startup
//!
//! Every workspace is saved with its tabs and its pane tree so that the split
//! layout can be rebuilt on the next launch. Trees are validated against the
//! tabs that actually came back before being adopted (see [`restore`]).

pub mod capture;
pub mod restore;
pub mod storage;

use crate::pane::{Direction, TabId};
use crate::tab::WorkspaceId;
use serde::{Deserialize, Serialize};

/// Top-level session state: all workspaces at the time of save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Timestamp when the session was saved (RFC 3339)
    pub saved_at: String,
    /// All workspaces in the session
    pub workspaces: Vec<SessionWorkspace>,
    /// Index of the workspace that was in front
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_workspace: Option<usize>,
}

/// A single workspace in the saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionWorkspace {
    pub id: WorkspaceId,
    pub name: String,
    pub tabs: Vec<SessionTab>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab_id: Option<TabId>,
    /// Pane layout tree (None = single pane on the active tab)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane_layout: Option<SessionPaneNode>,
}

/// A single tab in a saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTab {
    pub id: TabId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
}

/// Recursive pane tree node for session persistence
///
/// Serialised without a tag: a leaf is `{"tab_id": ..}`, a split is
/// `{"direction": "row" | "col", "children": [{"pane": .., "ratio": ..}]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionPaneNode {
    Leaf {
        tab_id: TabId,
    },
    Split {
        direction: Direction,
        children: Vec<SessionSplitChild>,
    },
}

/// One child slot of a saved split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSplitChild {
    pub pane: SessionPaneNode,
    pub ratio: f64,
}

impl SessionPaneNode {
    /// Every tab id referenced by this subtree, in order (duplicates included)
    pub fn tab_ids(&self) -> Vec<&TabId> {
        match self {
            SessionPaneNode::Leaf { tab_id } => vec![tab_id],
            SessionPaneNode::Split { children, .. } => {
                children.iter().flat_map(|c| c.pane.tab_ids()).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_wire_format() {
        let leaf = SessionPaneNode::Leaf {
            tab_id: TabId::from("a"),
        };
        assert_eq!(serde_json::to_string(&leaf).unwrap(), r#"{"tab_id":"a"}"#);
    }

    #[test]
    fn test_split_wire_format() {
        let json = r#"{
            "direction": "row",
            "children": [
                {"pane": {"tab_id": "a"}, "ratio": 0.5},
                {"pane": {"direction": "col", "children": [
                    {"pane": {"tab_id": "b"}, "ratio": 0.25},
                    {"pane": {"tab_id": "c"}, "ratio": 0.75}
                ]}, "ratio": 0.5}
            ]
        }"#;
        let node: SessionPaneNode = serde_json::from_str(json).unwrap();
        match &node {
            SessionPaneNode::Split {
                direction,
                children,
            } => {
                assert_eq!(*direction, Direction::Row);
                assert_eq!(children.len(), 2);
                assert!(matches!(
                    children[1].pane,
                    SessionPaneNode::Split {
                        direction: Direction::Col,
                        ..
                    }
                ));
            }
            SessionPaneNode::Leaf { .. } => panic!("Expected Split at root"),
        }
        let ids: Vec<&str> = node.tab_ids().into_iter().map(|t| t.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_workspace_defaults_when_fields_missing() {
        let json = r#"{
            "id": "6f1c1f6e-4b0e-4a8f-9d7e-2f4d8f0b9a11",
            "name": "main",
            "tabs": [{"id": "a", "title": "A", "url": "https://a.test"}]
        }"#;
        let ws: SessionWorkspace = serde_json::from_str(json).unwrap();
        assert!(ws.active_tab_id.is_none());
        assert!(ws.pane_layout.is_none());
        assert!(!ws.tabs[0].pinned);
    }
}
