//! Structural invariants of pane trees over whole operation sequences.
//!
//! Trees are grown through every combination of anchor and side, then torn
//! down in every order, checking the invariants after each step.

mod common;

use common::{assert_rects_disjoint, assert_tree_invariants};
use tilepane::pane::layout::{compute_dividers, compute_rects};
use tilepane::pane::{
    DropSide, MAX_PANES, MIN_RATIO, PaneNode, Rect, RemoveResult, TabId, insert, remove,
    remove_leaf, update_ratio,
};

const SIDES: [DropSide; 4] = [
    DropSide::Left,
    DropSide::Right,
    DropSide::Top,
    DropSide::Bottom,
];

const OUTER: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 1000.0,
    h: 700.0,
};

fn ids() -> Vec<TabId> {
    ["a", "b", "c", "d", "e"].iter().map(|s| TabId::from(*s)).collect()
}

/// Every tree reachable by inserting tabs a, b, c, d in order
fn all_full_trees() -> Vec<PaneNode> {
    let ids = ids();
    let mut trees: Vec<PaneNode> = SIDES
        .iter()
        .filter_map(|&side| insert(None, &ids[0], &ids[1], side))
        .collect();

    for next in &ids[2..MAX_PANES] {
        trees = trees
            .iter()
            .flat_map(|tree| {
                let anchors = tree.tab_ids();
                anchors
                    .into_iter()
                    .flat_map(move |anchor| {
                        SIDES
                            .iter()
                            .filter_map(move |&side| insert(Some(tree), &anchor, next, side))
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
    }
    trees
}

#[test]
fn test_grown_trees_keep_invariants() {
    let trees = all_full_trees();
    // 4 sides, then 2 anchors x 4 sides, then 3 anchors x 4 sides
    assert_eq!(trees.len(), 4 * 8 * 12);

    for tree in &trees {
        assert_tree_invariants(tree);
        assert_eq!(tree.leaf_count(), MAX_PANES);

        let rects = compute_rects(tree, OUTER, 4.0);
        assert_eq!(rects.len(), MAX_PANES);
        assert_rects_disjoint(&rects, OUTER);
    }
}

#[test]
fn test_full_trees_reject_fifth_pane() {
    let ids = ids();
    for tree in all_full_trees() {
        for anchor in tree.tab_ids() {
            for side in SIDES {
                assert!(insert(Some(&tree), &anchor, &ids[4], side).is_none());
            }
        }
    }
}

#[test]
fn test_teardown_in_every_order() {
    for tree in all_full_trees().into_iter().step_by(7) {
        let leaves = tree.tab_ids();
        for first in &leaves {
            let RemoveResult::Removed(three) = remove_leaf(&tree, first) else {
                panic!("4-leaf tree must survive one removal");
            };
            assert_tree_invariants(&three);
            assert!(!three.contains(first));

            for second in three.tab_ids() {
                let RemoveResult::Removed(two) = remove_leaf(&three, &second) else {
                    panic!("3-leaf tree must survive one removal");
                };
                assert_tree_invariants(&two);

                let survivors = two.tab_ids();
                match remove_leaf(&two, &survivors[0]) {
                    RemoveResult::Collapsed { remaining } => {
                        assert_eq!(remaining.as_ref(), Some(&survivors[1]));
                    }
                    other => panic!("expected collapse, got {:?}", other),
                }
                assert!(remove(&two, &survivors[1]).is_none());
            }
        }
    }
}

#[test]
fn test_divider_drags_respect_min_ratio() {
    for tree in all_full_trees().into_iter().step_by(5) {
        let mut current = tree;
        for divider in compute_dividers(&current, OUTER, 4.0) {
            for delta in [5.0, -5.0, 0.3, -0.7, 1.0] {
                let (before_first, before_second) = pair_ratios(&current, &divider.path, divider.child_idx);
                current = update_ratio(&current, &divider.path, divider.child_idx, delta);
                assert_tree_invariants(&current);

                let (first, second) = pair_ratios(&current, &divider.path, divider.child_idx);
                let sum = before_first + before_second;
                assert!((first + second - sum).abs() < 1e-9, "pair share not conserved");
                if sum >= 2.0 * MIN_RATIO {
                    // No side shrinks below the minimum, or below where it
                    // started when it was already narrower
                    assert!(first >= before_first.min(MIN_RATIO) - 1e-9);
                    assert!(second >= before_second.min(MIN_RATIO) - 1e-9);
                    // The divider moves with the drag or not at all
                    assert!((first - before_first) * delta >= -1e-12);
                } else {
                    // Too narrow to resize: left untouched
                    assert_eq!((first, second), (before_first, before_second));
                }
            }
        }
        // Structure never changes under resizing
        assert_eq!(current.leaf_count(), MAX_PANES);
    }
}

#[test]
fn test_halved_slot_resizes_with_the_drag() {
    let ab = insert(None, &TabId::from("A"), &TabId::from("B"), DropSide::Right).unwrap();
    let abc = insert(Some(&ab), &TabId::from("B"), &TabId::from("C"), DropSide::Right).unwrap();
    let row = insert(Some(&abc), &TabId::from("C"), &TabId::from("D"), DropSide::Right).unwrap();
    assert_eq!(pair_ratios(&row, &[], 1), (0.25, 0.125));

    // A small push right would need C to shrink further: refused, not reversed
    let pushed = update_ratio(&row, &[], 1, 0.001);
    assert_eq!(pair_ratios(&pushed, &[], 1), (0.25, 0.125));

    // Pulling left widens C by exactly the delta
    let pulled = update_ratio(&row, &[], 1, -0.01);
    let (b, c) = pair_ratios(&pulled, &[], 1);
    assert!((b - 0.24).abs() < 1e-12);
    assert!((c - 0.135).abs() < 1e-12);
    assert_tree_invariants(&pulled);
}

fn pair_ratios(root: &PaneNode, path: &[usize], child_idx: usize) -> (f64, f64) {
    match root.node_at(path) {
        Some(PaneNode::Split { children, .. }) => {
            (children[child_idx].ratio, children[child_idx + 1].ratio)
        }
        other => panic!("divider path does not address a split: {:?}", other),
    }
}

#[test]
fn test_dividers_sit_between_their_children() {
    for tree in all_full_trees().into_iter().step_by(11) {
        let rects = compute_rects(&tree, OUTER, 4.0);
        for divider in compute_dividers(&tree, OUTER, 4.0) {
            // A divider never overlaps a pane
            for (_, rect) in &rects {
                let overlap_w = rect.right().min(divider.rect.right()) - rect.x.max(divider.rect.x);
                let overlap_h =
                    rect.bottom().min(divider.rect.bottom()) - rect.y.max(divider.rect.y);
                assert!(overlap_w <= 1e-9 || overlap_h <= 1e-9);
            }
            assert!(divider.span > 0.0);
        }
    }
}
