//! Drop-zone detection for drag-to-split.
//!
//! Classifies a cursor position into an edge zone of the pane beneath it. The
//! result is recomputed on every pointer move during a drag and never
//! persisted.

use super::layout::compute_rects;
use super::types::{DropSide, MAX_PANES, PaneNode, Rect, TabId};

/// Fraction of a pane's width/height, measured from each edge, that counts as
/// an edge zone. The remaining center is a dead zone.
pub const EDGE_MARGIN: f64 = 0.25;

/// Where a dragged tab would land if released now
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    /// Pane the new split would be attached to
    pub anchor_tab_id: TabId,
    /// Edge of the anchor pane the cursor is over
    pub side: DropSide,
    /// Half of the anchor pane on `side`, for preview rendering only
    pub preview_rect: Rect,
}

/// Classify a position normalized to `[0, 1]²` within a pane
///
/// Horizontal edges win over vertical ones; the center is a dead zone so
/// ordinary clicks never split.
pub fn classify(rel_x: f64, rel_y: f64) -> Option<DropSide> {
    if rel_x < EDGE_MARGIN {
        Some(DropSide::Left)
    } else if rel_x > 1.0 - EDGE_MARGIN {
        Some(DropSide::Right)
    } else if rel_y < EDGE_MARGIN {
        Some(DropSide::Top)
    } else if rel_y > 1.0 - EDGE_MARGIN {
        Some(DropSide::Bottom)
    } else {
        None
    }
}

/// Detect the drop zone under the cursor
///
/// `layout` is the workspace tree, or `None` in single-pane mode where the
/// active tab fills `content_rect`. Returns `None` when the tree is full, the
/// cursor is outside every pane, or the cursor is in a pane's center.
pub fn detect(
    layout: Option<&PaneNode>,
    active_tab_id: &TabId,
    content_rect: Rect,
    gap: f64,
    cursor_x: f64,
    cursor_y: f64,
) -> Option<DropZone> {
    if layout.is_some_and(|tree| tree.leaf_count() >= MAX_PANES) {
        return None;
    }

    let rects = match layout {
        Some(tree) => compute_rects(tree, content_rect, gap),
        None => vec![(active_tab_id.clone(), content_rect)],
    };

    let (anchor, rect) = rects
        .into_iter()
        .find(|(_, rect)| rect.contains(cursor_x, cursor_y))?;
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return None;
    }

    let rel_x = ((cursor_x - rect.x) / rect.w).clamp(0.0, 1.0);
    let rel_y = ((cursor_y - rect.y) / rect.h).clamp(0.0, 1.0);
    let side = classify(rel_x, rel_y)?;

    Some(DropZone {
        anchor_tab_id: anchor,
        side,
        preview_rect: rect.half(side),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pane::types::Direction;

    #[test]
    fn test_single_pane_left_edge() {
        let zone = detect(
            None,
            &TabId::from("A"),
            Rect::new(0.0, 0.0, 200.0, 100.0),
            4.0,
            15.0,
            50.0,
        );
        assert_eq!(
            zone,
            Some(DropZone {
                anchor_tab_id: TabId::from("A"),
                side: DropSide::Left,
                preview_rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            })
        );
    }

    #[test]
    fn test_center_is_dead_zone() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert!(detect(None, &TabId::from("A"), rect, 4.0, 100.0, 50.0).is_none());
    }

    #[test]
    fn test_classify_edges() {
        assert_eq!(classify(0.9, 0.1), Some(DropSide::Right));
        assert_eq!(classify(0.5, 0.1), Some(DropSide::Top));
        assert_eq!(classify(0.5, 0.9), Some(DropSide::Bottom));
        assert_eq!(classify(0.1, 0.9), Some(DropSide::Left));
        assert_eq!(classify(0.25, 0.75), None);
    }

    #[test]
    fn test_detect_picks_pane_under_cursor() {
        let tree = PaneNode::split(
            Direction::Row,
            vec![(PaneNode::leaf("A"), 0.5), (PaneNode::leaf("B"), 0.5)],
        );
        let zone = detect(
            Some(&tree),
            &TabId::from("A"),
            Rect::new(0.0, 0.0, 204.0, 100.0),
            4.0,
            150.0,
            95.0,
        )
        .unwrap();
        assert_eq!(zone.anchor_tab_id, TabId::from("B"));
        assert_eq!(zone.side, DropSide::Bottom);
        assert_eq!(zone.preview_rect, Rect::new(104.0, 50.0, 100.0, 50.0));
    }

    #[test]
    fn test_detect_on_gap_or_outside_is_none() {
        let tree = PaneNode::split(
            Direction::Row,
            vec![(PaneNode::leaf("A"), 0.5), (PaneNode::leaf("B"), 0.5)],
        );
        let rect = Rect::new(0.0, 0.0, 204.0, 100.0);
        let a = TabId::from("A");
        assert!(detect(Some(&tree), &a, rect, 4.0, 102.0, 50.0).is_none());
        assert!(detect(Some(&tree), &a, rect, 4.0, 300.0, 50.0).is_none());
    }

    #[test]
    fn test_full_tree_has_no_drop_zone() {
        let column = |a: &str, b: &str| {
            PaneNode::split(
                Direction::Col,
                vec![(PaneNode::leaf(a), 0.5), (PaneNode::leaf(b), 0.5)],
            )
        };
        let tree = PaneNode::split(
            Direction::Row,
            vec![(column("A", "B"), 0.5), (column("C", "D"), 0.5)],
        );
        let rect = Rect::new(0.0, 0.0, 400.0, 400.0);
        assert!(detect(Some(&tree), &TabId::from("A"), rect, 4.0, 5.0, 5.0).is_none());
    }
}
