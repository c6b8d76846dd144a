//! Structural operations on pane trees.
//!
//! Every operation borrows the current tree and returns a new one; the input
//! is never modified. Callers replace their tree with the result only when an
//! operation is accepted.

use super::types::{DropSide, MAX_PANES, MIN_RATIO, PaneNode, SplitChild, TabId};

/// Result of attempting to remove a leaf from the tree
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveResult {
    /// Leaf was removed, returning the new tree (still at least two leaves)
    Removed(PaneNode),
    /// Removing the leaf leaves a single pane; the workspace drops its tree
    /// and focuses `remaining`
    Collapsed { remaining: Option<TabId> },
    /// Tab is not a leaf of the tree
    NotFound,
}

/// Build the two-leaf split that places `new_tab` on `side` of `anchor`
fn pair(anchor: TabId, new_tab: TabId, side: DropSide) -> PaneNode {
    let (first, second) = if side.inserts_before() {
        (new_tab, anchor)
    } else {
        (anchor, new_tab)
    };
    PaneNode::split(
        side.direction(),
        vec![(PaneNode::Leaf(first), 0.5), (PaneNode::Leaf(second), 0.5)],
    )
}

/// Insert `new_tab` as a new pane on `side` of `anchor`
///
/// With no current tree (single-pane mode) this creates a fresh 50/50 split.
/// Returns `None` when the insert is rejected: the tree is full, the anchor is
/// not a leaf, or the new tab is already shown.
pub fn insert(
    root: Option<&PaneNode>,
    anchor: &TabId,
    new_tab: &TabId,
    side: DropSide,
) -> Option<PaneNode> {
    if anchor == new_tab {
        return None;
    }

    let Some(root) = root else {
        return Some(pair(anchor.clone(), new_tab.clone(), side));
    };

    if root.leaf_count() >= MAX_PANES {
        crate::debug_log!("PANE_TREE", "insert {} rejected: tree is full", new_tab);
        return None;
    }
    if root.contains(new_tab) {
        crate::debug_log!("PANE_TREE", "insert {} rejected: already a pane", new_tab);
        return None;
    }

    let path = root.find_path(anchor)?;
    let Some((&index, parent_path)) = path.split_last() else {
        // Root is the anchor leaf itself
        return Some(pair(anchor.clone(), new_tab.clone(), side));
    };

    let mut new_root = root.clone();
    let PaneNode::Split {
        direction,
        children,
    } = new_root.node_at_mut(parent_path)?
    else {
        return None;
    };

    if *direction == side.direction() {
        // Same axis: become an immediate sibling, sharing the anchor's slot
        let half = children[index].ratio / 2.0;
        children[index].ratio = half;
        let at = if side.inserts_before() { index } else { index + 1 };
        children.insert(at, SplitChild::new(PaneNode::Leaf(new_tab.clone()), half));
    } else {
        // Cross axis: wrap the anchor in a nested split that inherits its slot
        children[index].node = pair(anchor.clone(), new_tab.clone(), side);
    }

    crate::debug_info!(
        "PANE_TREE",
        "Inserted {} {:?} of {} ({} panes)",
        new_tab,
        side,
        anchor,
        new_root.leaf_count()
    );
    Some(new_root)
}

/// Remove the leaf showing `tab_id`, reporting how the tree changed
pub fn remove_leaf(root: &PaneNode, tab_id: &TabId) -> RemoveResult {
    let Some(path) = root.find_path(tab_id) else {
        return RemoveResult::NotFound;
    };

    if root.leaf_count() <= 2 {
        let remaining = root.tab_ids().into_iter().find(|id| id != tab_id);
        return RemoveResult::Collapsed { remaining };
    }

    let Some((&index, parent_path)) = path.split_last() else {
        return RemoveResult::Collapsed { remaining: None };
    };

    let mut new_root = root.clone();
    if let Some(PaneNode::Split { children, .. }) = new_root.node_at_mut(parent_path) {
        let removed = children.remove(index);
        redistribute(children, removed.ratio);
    }
    collapse(&mut new_root);

    crate::debug_info!(
        "PANE_TREE",
        "Removed {} ({} panes remain)",
        tab_id,
        new_root.leaf_count()
    );
    RemoveResult::Removed(new_root)
}

/// Remove the leaf showing `tab_id`
///
/// Returns `None` when the removal drops the workspace back to a single pane.
/// An unknown tab leaves the tree unchanged.
pub fn remove(root: &PaneNode, tab_id: &TabId) -> Option<PaneNode> {
    match remove_leaf(root, tab_id) {
        RemoveResult::Removed(tree) => Some(tree),
        RemoveResult::Collapsed { .. } => None,
        RemoveResult::NotFound => Some(root.clone()),
    }
}

/// Hand a removed sibling's share to the remaining siblings, proportionally
fn redistribute(children: &mut [SplitChild], removed_ratio: f64) {
    let remaining = 1.0 - removed_ratio;
    if remaining > f64::EPSILON {
        let scale = 1.0 / remaining;
        for child in children.iter_mut() {
            child.ratio *= scale;
        }
    } else if !children.is_empty() {
        let even = 1.0 / children.len() as f64;
        for child in children.iter_mut() {
            child.ratio = even;
        }
    }
}

/// Replace every single-child split with its child, bottom-up
///
/// A promoted child takes over the slot ratio its former parent held.
fn collapse(node: &mut PaneNode) {
    let PaneNode::Split { children, .. } = node else {
        return;
    };
    for child in children.iter_mut() {
        collapse(&mut child.node);
    }
    if children.len() == 1
        && let Some(only) = children.pop()
    {
        *node = only.node;
    }
}

/// Move the divider between `children[child_idx]` and `children[child_idx + 1]`
/// of the split at `path` by `delta`
///
/// The pair's combined share is conserved. A move never pushes either side
/// below [`MIN_RATIO`]; a side that already sits below it (same-axis inserts
/// halve a slot) may only grow, so the divider never jumps against the drag.
/// A pair sharing less than `2 * MIN_RATIO` cannot fit two minimum panes and
/// its divider stays fixed. A path that no longer addresses a split (the tree
/// changed under a drag) returns the tree unchanged.
pub fn update_ratio(root: &PaneNode, path: &[usize], child_idx: usize, delta: f64) -> PaneNode {
    let mut new_root = root.clone();
    let Some(PaneNode::Split { children, .. }) = new_root.node_at_mut(path) else {
        crate::debug_log!("PANE_DRAG", "stale divider path {:?}, ignoring", path);
        return new_root;
    };
    if !delta.is_finite() || child_idx + 1 >= children.len() {
        return new_root;
    }

    let first = children[child_idx].ratio;
    let second = children[child_idx + 1].ratio;
    let sum = first + second;
    if sum < 2.0 * MIN_RATIO {
        return new_root;
    }

    let lower = first.min(MIN_RATIO);
    let upper = first.max(sum - MIN_RATIO);
    let new_first = (first + delta).clamp(lower, upper);
    children[child_idx].ratio = new_first;
    children[child_idx + 1].ratio = sum - new_first;
    new_root
}
