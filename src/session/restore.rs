//! Helpers for restoring session state
//!
//! A saved tree is only adopted when every leaf still refers to a restored tab
//! and the tree satisfies the same structural rules the live engine keeps.
//! Any violation discards the whole tree; there is no partial repair.

use super::{SessionPaneNode, SessionWorkspace};
use crate::pane::{MAX_PANES, PaneNode, SplitChild, TabId};
use std::collections::HashSet;
use thiserror::Error;

/// Tolerance for ratio sums read back from disk
///
/// Hand-edited files rarely sum to 1.0 exactly; within this tolerance the
/// ratios are renormalised instead of rejected.
const SAVED_RATIO_TOLERANCE: f64 = 1e-6;

/// Why a saved pane tree cannot be restored
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RestoreIssue {
    #[error("pane references tab {0} which was not restored")]
    MissingTab(TabId),

    #[error("tab {0} appears in more than one pane")]
    DuplicateTab(TabId),

    #[error("split has {0} children, at least 2 required")]
    TooFewChildren(usize),

    #[error("tree has {0} panes, expected 2 to {max}", max = MAX_PANES)]
    LeafCount(usize),

    #[error("split ratio {0} is not a positive finite number")]
    BadRatio(f64),

    #[error("split ratios sum to {0}, expected 1.0")]
    RatioSum(f64),
}

/// Validate a saved tree against the tabs restored for its workspace
///
/// Returns the live tree on success, or the first problem found.
pub fn validate_layout(
    node: &SessionPaneNode,
    restored: &HashSet<TabId>,
) -> Result<PaneNode, RestoreIssue> {
    let mut seen = HashSet::new();
    for tab_id in node.tab_ids() {
        if !restored.contains(tab_id) {
            return Err(RestoreIssue::MissingTab(tab_id.clone()));
        }
        if !seen.insert(tab_id) {
            return Err(RestoreIssue::DuplicateTab(tab_id.clone()));
        }
    }
    if !(2..=MAX_PANES).contains(&seen.len()) {
        return Err(RestoreIssue::LeafCount(seen.len()));
    }
    build_node(node)
}

/// The tab a restored workspace focuses
///
/// The saved active tab when it was restored, otherwise the first saved tab.
/// With a restored `tree` the focus must be one of its leaves, so a focus
/// outside the tree moves to the first leaf.
pub fn restored_focus(saved: &SessionWorkspace, tree: Option<&PaneNode>) -> Option<TabId> {
    let focus = saved
        .active_tab_id
        .as_ref()
        .filter(|id| saved.tabs.iter().any(|tab| &tab.id == *id))
        .or_else(|| saved.tabs.first().map(|tab| &tab.id));
    match tree {
        Some(tree) if !focus.is_some_and(|id| tree.contains(id)) => tree.first_tab().cloned(),
        _ => focus.cloned(),
    }
}

fn build_node(node: &SessionPaneNode) -> Result<PaneNode, RestoreIssue> {
    match node {
        SessionPaneNode::Leaf { tab_id } => Ok(PaneNode::Leaf(tab_id.clone())),
        SessionPaneNode::Split {
            direction,
            children,
        } => {
            if children.len() < 2 {
                return Err(RestoreIssue::TooFewChildren(children.len()));
            }
            if let Some(bad) = children
                .iter()
                .map(|c| c.ratio)
                .find(|r| !r.is_finite() || *r <= 0.0)
            {
                return Err(RestoreIssue::BadRatio(bad));
            }
            let sum: f64 = children.iter().map(|c| c.ratio).sum();
            if (sum - 1.0).abs() > SAVED_RATIO_TOLERANCE {
                return Err(RestoreIssue::RatioSum(sum));
            }

            let children = children
                .iter()
                .map(|c| Ok(SplitChild::new(build_node(&c.pane)?, c.ratio / sum)))
                .collect::<Result<Vec<_>, RestoreIssue>>()?;
            Ok(PaneNode::Split {
                direction: *direction,
                children,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::Direction;
    use crate::session::SessionSplitChild;

    fn leaf(id: &str) -> SessionPaneNode {
        SessionPaneNode::Leaf {
            tab_id: TabId::from(id),
        }
    }

    fn split(direction: Direction, children: Vec<(SessionPaneNode, f64)>) -> SessionPaneNode {
        SessionPaneNode::Split {
            direction,
            children: children
                .into_iter()
                .map(|(pane, ratio)| SessionSplitChild { pane, ratio })
                .collect(),
        }
    }

    fn restored(ids: &[&str]) -> HashSet<TabId> {
        ids.iter().map(|id| TabId::from(*id)).collect()
    }

    #[test]
    fn test_valid_tree_restores() {
        let saved = split(
            Direction::Row,
            vec![
                (leaf("a"), 0.5),
                (split(Direction::Col, vec![(leaf("b"), 0.5), (leaf("c"), 0.5)]), 0.5),
            ],
        );
        let tree = validate_layout(&saved, &restored(&["a", "b", "c"])).unwrap();
        assert_eq!(tree.leaf_count(), 3);
        assert!(tree.is_well_formed());
    }

    #[test]
    fn test_missing_tab_discards_tree() {
        let saved = split(Direction::Row, vec![(leaf("a"), 0.5), (leaf("gone"), 0.5)]);
        assert_eq!(
            validate_layout(&saved, &restored(&["a"])),
            Err(RestoreIssue::MissingTab(TabId::from("gone")))
        );
    }

    #[test]
    fn test_duplicate_tab_rejected() {
        let saved = split(Direction::Row, vec![(leaf("a"), 0.5), (leaf("a"), 0.5)]);
        assert_eq!(
            validate_layout(&saved, &restored(&["a"])),
            Err(RestoreIssue::DuplicateTab(TabId::from("a")))
        );
    }

    #[test]
    fn test_leaf_count_bounds() {
        assert_eq!(
            validate_layout(&leaf("a"), &restored(&["a"])),
            Err(RestoreIssue::LeafCount(1))
        );

        let five = split(
            Direction::Row,
            ["a", "b", "c", "d", "e"].iter().map(|id| (leaf(id), 0.2)).collect(),
        );
        assert_eq!(
            validate_layout(&five, &restored(&["a", "b", "c", "d", "e"])),
            Err(RestoreIssue::LeafCount(5))
        );
    }

    #[test]
    fn test_single_child_split_rejected() {
        let saved = split(
            Direction::Row,
            vec![
                (split(Direction::Col, vec![(leaf("a"), 1.0)]), 0.5),
                (leaf("b"), 0.5),
            ],
        );
        assert_eq!(
            validate_layout(&saved, &restored(&["a", "b"])),
            Err(RestoreIssue::TooFewChildren(1))
        );
    }

    #[test]
    fn test_bad_ratios_rejected() {
        let negative = split(Direction::Row, vec![(leaf("a"), -0.5), (leaf("b"), 1.5)]);
        assert_eq!(
            validate_layout(&negative, &restored(&["a", "b"])),
            Err(RestoreIssue::BadRatio(-0.5))
        );

        let short = split(Direction::Row, vec![(leaf("a"), 0.3), (leaf("b"), 0.3)]);
        assert!(matches!(
            validate_layout(&short, &restored(&["a", "b"])),
            Err(RestoreIssue::RatioSum(_))
        ));
    }

    #[test]
    fn test_near_unit_sum_is_renormalised() {
        let saved = split(
            Direction::Col,
            vec![(leaf("a"), 0.3333333), (leaf("b"), 0.6666666)],
        );
        let tree = validate_layout(&saved, &restored(&["a", "b"])).unwrap();
        assert!(tree.is_well_formed());
    }

    fn saved(tabs: &[&str], active: Option<&str>) -> SessionWorkspace {
        SessionWorkspace {
            id: uuid::Uuid::new_v4(),
            name: "main".to_string(),
            tabs: tabs
                .iter()
                .map(|id| crate::session::SessionTab {
                    id: TabId::from(*id),
                    title: id.to_string(),
                    url: format!("https://{}.test", id),
                    pinned: false,
                })
                .collect(),
            active_tab_id: active.map(TabId::from),
            pane_layout: None,
        }
    }

    #[test]
    fn test_restored_focus_fallbacks() {
        let ws = saved(&["a", "b", "c"], Some("b"));
        assert_eq!(restored_focus(&ws, None), Some(TabId::from("b")));

        let ws = saved(&["a", "b", "c"], None);
        assert_eq!(restored_focus(&ws, None), Some(TabId::from("a")));

        let ws = saved(&["a", "b", "c"], Some("gone"));
        assert_eq!(restored_focus(&ws, None), Some(TabId::from("a")));

        assert_eq!(restored_focus(&saved(&[], Some("a")), None), None);
    }

    #[test]
    fn test_restored_focus_stays_inside_tree() {
        let tree = validate_layout(
            &split(Direction::Row, vec![(leaf("b"), 0.5), (leaf("c"), 0.5)]),
            &restored(&["a", "b", "c"]),
        )
        .unwrap();
        let ws = saved(&["a", "b", "c"], Some("a"));
        assert_eq!(restored_focus(&ws, Some(&tree)), Some(TabId::from("b")));

        let ws = saved(&["a", "b", "c"], Some("c"));
        assert_eq!(restored_focus(&ws, Some(&tree)), Some(TabId::from("c")));
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            RestoreIssue::MissingTab(TabId::from("x")).to_string(),
            "pane references tab x which was not restored"
        );
        assert_eq!(
            RestoreIssue::LeafCount(5).to_string(),
            "tree has 5 panes, expected 2 to 4"
        );
    }
}
