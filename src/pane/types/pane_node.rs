//! `PaneNode`: n-ary tree structure for nested pane splits.

use super::common::{Direction, MAX_PANES, RATIO_EPSILON, TabId};

/// Tree node for pane layout
///
/// The pane tree is an n-ary tree where:
/// - Leaf nodes show exactly one tab
/// - Split nodes lay out two or more children along one axis, each with a
///   fractional share (`ratio`) of the space available along that axis
///
/// A workspace without a split holds no tree at all, so every reachable tree
/// has between 2 and [`MAX_PANES`] leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum PaneNode {
    /// A leaf node showing one tab
    Leaf(TabId),
    /// A split containing two or more children
    Split {
        /// Axis the children are laid out along
        direction: Direction,
        /// Children in layout order (left→right for Row, top→bottom for Col)
        children: Vec<SplitChild>,
    },
}

/// One child slot of a split together with its share of the split
#[derive(Debug, Clone, PartialEq)]
pub struct SplitChild {
    pub node: PaneNode,
    /// Fraction (0.0 to 1.0) of the parent's space along its axis
    pub ratio: f64,
}

impl SplitChild {
    pub fn new(node: PaneNode, ratio: f64) -> Self {
        Self { node, ratio }
    }
}

impl PaneNode {
    /// Create a new leaf node for a tab
    pub fn leaf(tab_id: impl Into<TabId>) -> Self {
        PaneNode::Leaf(tab_id.into())
    }

    /// Create a new split node from `(node, ratio)` pairs
    pub fn split(direction: Direction, children: Vec<(PaneNode, f64)>) -> Self {
        PaneNode::Split {
            direction,
            children: children
                .into_iter()
                .map(|(node, ratio)| SplitChild::new(node, ratio))
                .collect(),
        }
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        matches!(self, PaneNode::Leaf(_))
    }

    /// Get the tab if this is a leaf node
    pub fn as_tab(&self) -> Option<&TabId> {
        match self {
            PaneNode::Leaf(tab_id) => Some(tab_id),
            PaneNode::Split { .. } => None,
        }
    }

    /// Count total number of leaves
    pub fn leaf_count(&self) -> usize {
        match self {
            PaneNode::Leaf(_) => 1,
            PaneNode::Split { children, .. } => children.iter().map(|c| c.node.leaf_count()).sum(),
        }
    }

    /// Get all tab IDs in this subtree, in layout order
    pub fn tab_ids(&self) -> Vec<TabId> {
        let mut ids = Vec::new();
        self.collect_tab_ids(&mut ids);
        ids
    }

    fn collect_tab_ids(&self, ids: &mut Vec<TabId>) {
        match self {
            PaneNode::Leaf(tab_id) => ids.push(tab_id.clone()),
            PaneNode::Split { children, .. } => {
                for child in children {
                    child.node.collect_tab_ids(ids);
                }
            }
        }
    }

    /// First leaf in layout order
    pub fn first_tab(&self) -> Option<&TabId> {
        match self {
            PaneNode::Leaf(tab_id) => Some(tab_id),
            PaneNode::Split { children, .. } => children.first()?.node.first_tab(),
        }
    }

    /// Check whether a tab is a leaf of this subtree
    pub fn contains(&self, tab_id: &TabId) -> bool {
        self.find_path(tab_id).is_some()
    }

    /// Child-index path from this node to the leaf showing `tab_id`
    pub fn find_path(&self, tab_id: &TabId) -> Option<Vec<usize>> {
        match self {
            PaneNode::Leaf(id) => (id == tab_id).then(Vec::new),
            PaneNode::Split { children, .. } => {
                children.iter().enumerate().find_map(|(index, child)| {
                    child.node.find_path(tab_id).map(|mut rest| {
                        rest.insert(0, index);
                        rest
                    })
                })
            }
        }
    }

    /// Node reached by following `path` from this node
    pub fn node_at(&self, path: &[usize]) -> Option<&PaneNode> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => match self {
                PaneNode::Leaf(_) => None,
                PaneNode::Split { children, .. } => children.get(index)?.node.node_at(rest),
            },
        }
    }

    /// Mutable node reached by following `path` from this node
    pub(crate) fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut PaneNode> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => match self {
                PaneNode::Leaf(_) => None,
                PaneNode::Split { children, .. } => {
                    children.get_mut(index)?.node.node_at_mut(rest)
                }
            },
        }
    }

    /// Check every structural invariant of a live pane tree
    ///
    /// - every split has at least two children with positive ratios summing to 1
    /// - leaf count lies in `[2, MAX_PANES]`
    /// - no tab appears twice
    pub fn is_well_formed(&self) -> bool {
        let count = self.leaf_count();
        if !(2..=MAX_PANES).contains(&count) {
            return false;
        }
        let mut ids = self.tab_ids();
        ids.sort();
        ids.dedup();
        ids.len() == count && self.splits_well_formed()
    }

    fn splits_well_formed(&self) -> bool {
        match self {
            PaneNode::Leaf(_) => true,
            PaneNode::Split { children, .. } => {
                let sum: f64 = children.iter().map(|c| c.ratio).sum();
                children.len() >= 2
                    && children.iter().all(|c| c.ratio.is_finite() && c.ratio > 0.0)
                    && (sum - 1.0).abs() <= RATIO_EPSILON
                    && children.iter().all(|c| c.node.splits_well_formed())
            }
        }
    }
}
