//! Tab and workspace model
//!
//! This module provides the data the pane coordinator works over:
//! - `Tab`: one content tab with its memory tier and activity bookkeeping
//! - `Workspace`: a set of tabs, the active tab, and the optional pane tree
//! - `MemoryTier`: whether a tab's native content surface exists

mod workspace;

pub use workspace::{Workspace, WorkspaceId};

use crate::pane::TabId;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// URL prefixes of the application's own views (settings, new-tab page, ...)
pub const INTERNAL_URL_PREFIXES: &[&str] = &["about:", "tilepane://"];

/// Lifecycle state of a tab's native content surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryTier {
    /// Surface exists and is live
    Active,
    /// Surface exists but is frozen
    Suspended,
    /// Surface has been torn down; it must be recreated before being shown
    Destroyed,
}

/// A single content tab
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub tier: MemoryTier,
    /// Pinned tabs are never suspended or destroyed
    pub pinned: bool,
    /// Tabs playing audio or video are never suspended or destroyed
    pub playing_media: bool,
    /// Last time the tab was shown or interacted with
    pub last_active: Instant,
}

impl Tab {
    pub fn new(id: TabId, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            tier: MemoryTier::Active,
            pinned: false,
            playing_media: false,
            last_active: Instant::now(),
        }
    }

    /// Whether this tab shows one of the application's own views
    pub fn is_internal(&self) -> bool {
        INTERNAL_URL_PREFIXES
            .iter()
            .any(|prefix| self.url.starts_with(prefix))
    }

    /// Whether this tab may be offered as the partner of a new split
    pub fn is_split_candidate(&self) -> bool {
        !self.is_internal() && self.tier == MemoryTier::Active
    }

    /// Mark the tab as shown: reactivate its surface and reset idle time
    pub fn touch(&mut self) {
        self.tier = MemoryTier::Active;
        self.last_active = Instant::now();
    }
}
