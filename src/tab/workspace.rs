//! Workspace: a named group of tabs sharing one viewing area
//!
//! A workspace owns its tabs, the active tab, and at most one pane tree. With
//! no tree the active tab fills the content area; with a tree the active tab
//! is always one of its leaves.

use super::{MemoryTier, Tab};
use crate::pane::{PaneNode, TabId};
use uuid::Uuid;

/// Unique identifier for a workspace
pub type WorkspaceId = Uuid;

/// A named group of tabs with an optional pane layout
#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub(crate) tabs: Vec<Tab>,
    pub(crate) active_tab_id: Option<TabId>,
    pub(crate) pane_layout: Option<PaneNode>,
}

impl Workspace {
    /// Create a new empty workspace
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Create an empty workspace with a known ID (session restore)
    pub fn with_id(id: WorkspaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tabs: Vec::new(),
            active_tab_id: None,
            pane_layout: None,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| &t.id == id)
    }

    pub(crate) fn tab_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| &t.id == id)
    }

    pub fn has_tab(&self, id: &TabId) -> bool {
        self.tab(id).is_some()
    }

    pub fn active_tab_id(&self) -> Option<&TabId> {
        self.active_tab_id.as_ref()
    }

    /// The pane tree, or `None` in single-pane mode
    pub fn pane_layout(&self) -> Option<&PaneNode> {
        self.pane_layout.as_ref()
    }

    /// Check if the workspace is split into multiple panes
    pub fn is_split(&self) -> bool {
        self.pane_layout.is_some()
    }

    /// Check if a tab is currently shown in a pane of the tree
    pub fn is_leaf(&self, id: &TabId) -> bool {
        self.pane_layout.as_ref().is_some_and(|tree| tree.contains(id))
    }

    /// Tab IDs currently visible: every leaf, or just the active tab
    pub fn visible_tab_ids(&self) -> Vec<TabId> {
        match (&self.pane_layout, &self.active_tab_id) {
            (Some(tree), _) => tree.tab_ids(),
            (None, Some(active)) => vec![active.clone()],
            (None, None) => Vec::new(),
        }
    }

    pub(crate) fn push_tab(&mut self, tab: Tab) {
        if self.active_tab_id.is_none() {
            self.active_tab_id = Some(tab.id.clone());
        }
        self.tabs.push(tab);
    }

    /// Remove a tab from the tab list without touching the pane tree
    pub(crate) fn take_tab(&mut self, id: &TabId) -> Option<Tab> {
        let idx = self.tabs.iter().position(|t| &t.id == id)?;
        Some(self.tabs.remove(idx))
    }

    /// Make `id` the active tab and mark it as shown
    pub(crate) fn activate(&mut self, id: &TabId) {
        if let Some(tab) = self.tab_mut(id) {
            tab.touch();
            self.active_tab_id = Some(id.clone());
        }
    }

    /// Most recently active tab other than `exclude`, skipping destroyed tabs
    pub(crate) fn most_recent_tab(&self, exclude: Option<&TabId>) -> Option<&Tab> {
        self.tabs
            .iter()
            .filter(|t| Some(&t.id) != exclude && t.tier != MemoryTier::Destroyed)
            .max_by_key(|t| t.last_active)
            .or_else(|| self.tabs.iter().find(|t| Some(&t.id) != exclude))
    }

    /// Most recently active tab that can join the active tab in a new split
    pub(crate) fn split_candidate(&self) -> Option<&Tab> {
        let active = self.active_tab_id.as_ref();
        self.tabs
            .iter()
            .filter(|t| Some(&t.id) != active && t.is_split_candidate())
            .max_by_key(|t| t.last_active)
    }
}
