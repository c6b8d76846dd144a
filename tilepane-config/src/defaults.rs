//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields.

// ── Pane geometry ──────────────────────────────────────────────────────────

pub fn pane_gap() -> f64 {
    4.0
}

pub fn divider_hit_width() -> f64 {
    8.0
}

// ── Memory sweep ───────────────────────────────────────────────────────────

pub fn suspend_after_secs() -> u64 {
    5 * 60
}

pub fn destroy_after_secs() -> u64 {
    30 * 60
}

// ── Session ────────────────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}
