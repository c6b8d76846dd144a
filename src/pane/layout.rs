//! Projection of a pane tree onto pixel space.
//!
//! Turns a tree plus the outer content rectangle into per-leaf rectangles and
//! the divider strips between adjacent children. Pure geometry; nothing here
//! mutates the tree.

use super::types::{Direction, NavigationDirection, PaneNode, Rect, SplitChild, TabId};

/// A resize handle between two adjacent children of a split
#[derive(Debug, Clone, PartialEq)]
pub struct DividerInfo {
    /// Direction of the split that owns this divider
    pub direction: Direction,
    /// Strip of thickness `gap` between the two children
    pub rect: Rect,
    /// Child-index path from the root to the owning split
    pub path: Vec<usize>,
    /// Index of the child before (left of / above) the divider
    pub child_idx: usize,
    /// Pixels shared among the split's children along its axis (outer length
    /// minus gaps); a drag of `span` pixels moves the ratio by 1.0
    pub span: f64,
}

impl DividerInfo {
    /// Check if a point is on this divider, widened by `padding` on both sides
    /// of its thin axis
    pub fn hit(&self, x: f64, y: f64, padding: f64) -> bool {
        let r = &self.rect;
        match self.direction {
            Direction::Row => {
                x >= r.x - padding && x < r.right() + padding && y >= r.y && y < r.bottom()
            }
            Direction::Col => {
                x >= r.x && x < r.right() && y >= r.y - padding && y < r.bottom() + padding
            }
        }
    }

    /// Pointer movement along this divider's axis
    pub fn axis_delta(&self, dx: f64, dy: f64) -> f64 {
        match self.direction {
            Direction::Row => dx,
            Direction::Col => dy,
        }
    }
}

/// Split `outer` among `children` along `direction`
///
/// Returns each child's rect and the span shared among them. The last child
/// absorbs rounding so the children plus `(n - 1)` gaps exactly tile `outer`.
fn child_rects(
    direction: Direction,
    children: &[SplitChild],
    outer: Rect,
    gap: f64,
) -> (Vec<Rect>, f64) {
    let n = children.len();
    let gaps = gap * n.saturating_sub(1) as f64;
    let (start, length) = match direction {
        Direction::Row => (outer.x, outer.w),
        Direction::Col => (outer.y, outer.h),
    };
    let end = start + length;
    let span = (length - gaps).max(0.0);

    let mut rects = Vec::with_capacity(n);
    let mut offset = start;
    for (index, child) in children.iter().enumerate() {
        let size = if index + 1 == n {
            (end - offset).max(0.0)
        } else {
            span * child.ratio
        };
        rects.push(match direction {
            Direction::Row => Rect::new(offset, outer.y, size, outer.h),
            Direction::Col => Rect::new(outer.x, offset, outer.w, size),
        });
        offset += size + gap;
    }
    (rects, span)
}

/// Compute the rectangle of every leaf, in layout order
pub fn compute_rects(node: &PaneNode, outer: Rect, gap: f64) -> Vec<(TabId, Rect)> {
    let mut rects = Vec::new();
    collect_rects(node, outer, gap, &mut rects);
    rects
}

fn collect_rects(node: &PaneNode, outer: Rect, gap: f64, out: &mut Vec<(TabId, Rect)>) {
    match node {
        PaneNode::Leaf(tab_id) => out.push((tab_id.clone(), outer)),
        PaneNode::Split {
            direction,
            children,
        } => {
            let (rects, _) = child_rects(*direction, children, outer, gap);
            for (child, rect) in children.iter().zip(rects) {
                collect_rects(&child.node, rect, gap, out);
            }
        }
    }
}

/// Collect every divider in the tree
///
/// Each divider carries the path and child index that [`update_ratio`]
/// needs to find its split again.
///
/// [`update_ratio`]: super::tree_ops::update_ratio
pub fn compute_dividers(node: &PaneNode, outer: Rect, gap: f64) -> Vec<DividerInfo> {
    let mut dividers = Vec::new();
    let mut path = Vec::new();
    collect_dividers(node, outer, gap, &mut path, &mut dividers);
    dividers
}

fn collect_dividers(
    node: &PaneNode,
    outer: Rect,
    gap: f64,
    path: &mut Vec<usize>,
    out: &mut Vec<DividerInfo>,
) {
    let PaneNode::Split {
        direction,
        children,
    } = node
    else {
        return;
    };

    let (rects, span) = child_rects(*direction, children, outer, gap);
    for (index, pair) in rects.windows(2).enumerate() {
        let before = pair[0];
        let rect = match direction {
            Direction::Row => Rect::new(before.right(), outer.y, gap, outer.h),
            Direction::Col => Rect::new(outer.x, before.bottom(), outer.w, gap),
        };
        out.push(DividerInfo {
            direction: *direction,
            rect,
            path: path.clone(),
            child_idx: index,
            span,
        });
    }

    for (index, (child, rect)) in children.iter().zip(rects).enumerate() {
        path.push(index);
        collect_dividers(&child.node, rect, gap, path, out);
        path.pop();
    }
}

/// Find the divider under a point, if any
pub fn find_divider_at(
    dividers: &[DividerInfo],
    x: f64,
    y: f64,
    padding: f64,
) -> Option<&DividerInfo> {
    dividers.iter().find(|d| d.hit(x, y, padding))
}

/// Find the tab whose pane is at a given pixel position
pub fn find_tab_at(rects: &[(TabId, Rect)], x: f64, y: f64) -> Option<&TabId> {
    rects
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
        .map(|(tab_id, _)| tab_id)
}

/// Find the closest pane in a given direction from `from`
///
/// Returns the tab of the closest pane whose center lies in the requested
/// direction, or None if there is no pane in that direction.
pub fn find_in_direction(
    rects: &[(TabId, Rect)],
    from: &TabId,
    direction: NavigationDirection,
) -> Option<TabId> {
    let (_, from_rect) = rects.iter().find(|(id, _)| id == from)?;
    let from_center = from_rect.center();

    let mut best: Option<(&TabId, f64)> = None;
    for (tab_id, rect) in rects {
        if tab_id == from {
            continue;
        }

        let center = rect.center();
        let is_in_direction = match direction {
            NavigationDirection::Left => center.0 < from_center.0,
            NavigationDirection::Right => center.0 > from_center.0,
            NavigationDirection::Up => center.1 < from_center.1,
            NavigationDirection::Down => center.1 > from_center.1,
        };
        if !is_in_direction {
            continue;
        }

        // Weight the primary direction more heavily
        let dx = (center.0 - from_center.0).abs();
        let dy = (center.1 - from_center.1).abs();
        let distance = match direction {
            NavigationDirection::Left | NavigationDirection::Right => dx + dy * 2.0,
            NavigationDirection::Up | NavigationDirection::Down => dy + dx * 2.0,
        };

        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((tab_id, distance));
        }
    }

    best.map(|(tab_id, _)| tab_id.clone())
}
