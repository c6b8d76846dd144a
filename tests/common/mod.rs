//! Shared integration test helpers for tilepane.
//!
//! This module provides canonical factory functions used across the `tests/`
//! integration test suite.
//!
//! # Usage
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{coordinator, workspace_with_tabs};
//! ```
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#![allow(dead_code)]` attribute
//! suppresses warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use std::collections::HashSet;
use tilepane::pane::{MAX_PANES, PaneNode, RATIO_EPSILON, Rect, TabId};
use tilepane::surface::RecordingHost;
use tilepane::{PaneCoordinator, WorkspaceId};
use tilepane_config::Config;

/// Content area used by most coordinator tests: two 400px columns plus a 4px gap
pub const CONTENT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 804.0,
    h: 600.0,
};

/// Coordinator with default config, a recording host and `CONTENT` set
pub fn coordinator() -> PaneCoordinator<RecordingHost> {
    coordinator_with(&Config::default())
}

/// Coordinator with a specific config, a recording host and `CONTENT` set
pub fn coordinator_with(config: &Config) -> PaneCoordinator<RecordingHost> {
    let mut coord = PaneCoordinator::new(RecordingHost::new(), config);
    coord.set_content_rect(CONTENT, 0.0, 0.0);
    coord
}

/// Create a workspace holding `count` tabs; the first tab is active
pub fn workspace_with_tabs(
    coord: &mut PaneCoordinator<RecordingHost>,
    name: &str,
    count: usize,
) -> (WorkspaceId, Vec<TabId>) {
    let ws = coord.create_workspace(name);
    let tabs = (0..count)
        .map(|i| {
            coord
                .open_tab(ws, &format!("Tab {}", i), &format!("https://site{}.test", i))
                .expect("workspace exists")
        })
        .collect();
    (ws, tabs)
}

/// Assert every structural rule a live pane tree must satisfy
pub fn assert_tree_invariants(tree: &PaneNode) {
    let ids = tree.tab_ids();
    assert!(
        (2..=MAX_PANES).contains(&ids.len()),
        "leaf count {} out of range",
        ids.len()
    );
    let unique: HashSet<&TabId> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len(), "duplicate leaf in {:?}", tree);
    assert_splits_valid(tree);
}

fn assert_splits_valid(node: &PaneNode) {
    if let PaneNode::Split { children, .. } = node {
        assert!(children.len() >= 2, "split with {} children", children.len());
        let sum: f64 = children.iter().map(|c| c.ratio).sum();
        assert!((sum - 1.0).abs() < RATIO_EPSILON * 10.0, "ratios sum to {}", sum);
        for child in children {
            assert!(child.ratio > 0.0);
            assert_splits_valid(&child.node);
        }
    }
}

/// Assert that `rects` stay inside `outer` and never overlap
pub fn assert_rects_disjoint(rects: &[(TabId, Rect)], outer: Rect) {
    let area: f64 = rects.iter().map(|(_, r)| r.w * r.h).sum();
    assert!(area <= outer.w * outer.h + 1e-6);
    for (i, (_, a)) in rects.iter().enumerate() {
        assert!(a.x >= outer.x - 1e-9 && a.right() <= outer.right() + 1e-9);
        assert!(a.y >= outer.y - 1e-9 && a.bottom() <= outer.bottom() + 1e-9);
        for (_, b) in &rects[i + 1..] {
            let overlap_w = a.right().min(b.right()) - a.x.max(b.x);
            let overlap_h = a.bottom().min(b.bottom()) - a.y.max(b.y);
            assert!(overlap_w <= 1e-9 || overlap_h <= 1e-9, "{:?} overlaps {:?}", a, b);
        }
    }
}
