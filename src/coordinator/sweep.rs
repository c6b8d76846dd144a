//! Memory-tier sweep of idle tabs

use super::PaneCoordinator;
use crate::pane::TabId;
use crate::surface::SurfaceHost;
use crate::tab::{MemoryTier, Tab, Workspace};
use std::time::{Duration, Instant};

/// Next tier for `tab` after `idle` time, or `None` to leave it alone
fn demotion(
    ws: &Workspace,
    tab: &Tab,
    in_active_workspace: bool,
    idle: Duration,
    suspend_after: Duration,
    destroy_after: Duration,
) -> Option<MemoryTier> {
    if tab.pinned || tab.playing_media || tab.is_internal() {
        return None;
    }
    if ws.active_tab_id.as_ref() == Some(&tab.id) {
        return None;
    }
    let is_leaf = ws.is_leaf(&tab.id);
    if is_leaf && in_active_workspace {
        return None;
    }

    match tab.tier {
        MemoryTier::Active if idle >= suspend_after => Some(MemoryTier::Suspended),
        MemoryTier::Suspended if idle >= destroy_after && !is_leaf => Some(MemoryTier::Destroyed),
        _ => None,
    }
}

impl<H: SurfaceHost> PaneCoordinator<H> {
    /// Demote idle tabs across all workspaces
    ///
    /// Active tabs idle for `suspend_after` are suspended, suspended tabs idle
    /// for `destroy_after` are destroyed. Visible tabs, pinned tabs, tabs
    /// playing media and internal pages are never touched. Returns the tier
    /// changes applied, for the caller to forward to the native layer.
    pub fn sweep(&mut self, now: Instant) -> Vec<(TabId, MemoryTier)> {
        let active_index = self.active_index();
        let (suspend_after, destroy_after) = (self.suspend_after, self.destroy_after);
        let mut changes = Vec::new();

        for (index, ws) in self.workspaces.iter_mut().enumerate() {
            let in_active = active_index == Some(index);
            let view: &Workspace = ws;
            let demoted: Vec<(TabId, MemoryTier)> = view
                .tabs
                .iter()
                .filter_map(|tab| {
                    let idle = now.saturating_duration_since(tab.last_active);
                    demotion(view, tab, in_active, idle, suspend_after, destroy_after)
                        .map(|tier| (tab.id.clone(), tier))
                })
                .collect();

            let name = ws.name.clone();
            for (tab_id, tier) in demoted {
                if let Some(tab) = ws.tab_mut(&tab_id) {
                    crate::debug_info!(
                        "PANE_SWEEP",
                        "{} {:?} -> {:?} in {}",
                        tab_id,
                        tab.tier,
                        tier,
                        name
                    );
                    tab.tier = tier;
                }
                changes.push((tab_id, tier));
            }
        }

        if !changes.is_empty() {
            log::debug!("Sweep demoted {} tabs", changes.len());
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinator::{PaneCoordinator, PaneEvent};
    use crate::pane::TabId;
    use crate::surface::RecordingHost;
    use crate::tab::MemoryTier;
    use std::time::{Duration, Instant};
    use tilepane_config::Config;

    fn coordinator() -> PaneCoordinator<RecordingHost> {
        let config = Config {
            suspend_after_secs: 10,
            destroy_after_secs: 100,
            ..Config::default()
        };
        PaneCoordinator::new(RecordingHost::new(), &config)
    }

    fn later(secs: u64) -> Instant {
        Instant::now() + Duration::from_secs(secs)
    }

    fn tier(coord: &PaneCoordinator<RecordingHost>, tab: &TabId) -> MemoryTier {
        coord
            .workspaces()
            .iter()
            .find_map(|ws| ws.tab(tab))
            .map(|t| t.tier)
            .unwrap()
    }

    #[test]
    fn test_idle_background_tab_suspended_then_destroyed() {
        let mut coord = coordinator();
        let ws = coord.create_workspace("main");
        let a = coord.open_tab(ws, "A", "https://a.test").unwrap();
        let b = coord.open_tab(ws, "B", "https://b.test").unwrap();
        assert_eq!(coord.active_workspace().unwrap().active_tab_id(), Some(&a));

        let changes = coord.sweep(later(20));
        assert_eq!(changes, vec![(b.clone(), MemoryTier::Suspended)]);

        let changes = coord.sweep(later(200));
        assert_eq!(changes, vec![(b.clone(), MemoryTier::Destroyed)]);
        assert_eq!(tier(&coord, &a), MemoryTier::Active);
    }

    #[test]
    fn test_sweep_skips_pinned_media_and_internal() {
        let mut coord = coordinator();
        let ws = coord.create_workspace("main");
        let _a = coord.open_tab(ws, "A", "https://a.test").unwrap();
        let pinned = coord.open_tab(ws, "P", "https://p.test").unwrap();
        let media = coord.open_tab(ws, "M", "https://m.test").unwrap();
        let internal = coord.open_tab(ws, "Settings", "about:settings").unwrap();
        coord.tab_mut(&pinned).unwrap().pinned = true;
        coord.tab_mut(&media).unwrap().playing_media = true;

        assert!(coord.sweep(later(1000)).is_empty());
        assert_eq!(tier(&coord, &internal), MemoryTier::Active);
    }

    #[test]
    fn test_sweep_spares_leaves_of_active_workspace() {
        let mut coord = coordinator();
        let ws = coord.create_workspace("main");
        coord.open_tab(ws, "A", "https://a.test").unwrap();
        coord.open_tab(ws, "B", "https://b.test").unwrap();
        assert!(coord.toggle_split());

        assert!(coord.sweep(later(1000)).is_empty());
    }

    #[test]
    fn test_background_leaf_suspended_but_never_destroyed() {
        let mut coord = coordinator();
        let first = coord.create_workspace("first");
        let a = coord.open_tab(first, "A", "https://a.test").unwrap();
        let b = coord.open_tab(first, "B", "https://b.test").unwrap();
        assert!(coord.toggle_split());

        let second = coord.create_workspace("second");
        let c = coord.open_tab(second, "C", "https://c.test").unwrap();
        coord.handle_event(PaneEvent::TabSelected(c));
        assert_eq!(coord.active_workspace_id(), Some(second));

        let changes = coord.sweep(later(50));
        // The first workspace's active tab is excluded; its other leaf is not.
        let active_first = coord.workspace(first).unwrap().active_tab_id().cloned();
        let other = if active_first.as_ref() == Some(&a) { &b } else { &a };
        assert_eq!(changes, vec![(other.clone(), MemoryTier::Suspended)]);

        assert!(coord.sweep(later(10_000)).is_empty());
        assert!(coord.workspace(first).unwrap().is_split());
    }
}
