//! Command-line interface for tilepane.
//!
//! The binary inspects saved sessions: it projects each workspace's pane tree
//! into pixel rectangles and reports trees that would be discarded on restore.

use crate::pane::layout::{compute_dividers, compute_rects};
use crate::pane::{Rect, TabId};
use crate::session::SessionState;
use crate::session::restore::{restored_focus, validate_layout};
use crate::session::storage::load_session_from;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tilepane_config::Config;

/// tilepane - inspect tiling pane layouts saved by the workspace engine
#[derive(Parser)]
#[command(name = "tilepane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", global = true, value_parser = parse_level)]
    pub log_level: Option<log::LevelFilter>,

    /// Config file to use instead of ~/.config/tilepane/config.yaml
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print pane and divider rectangles for every saved workspace
    Layout {
        /// Session file (default: the configured session file)
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,

        /// Content area width in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f64,

        /// Content area height in pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,

        /// Divider thickness in pixels (default: the configured pane gap)
        #[arg(long)]
        gap: Option<f64>,
    },
    /// Report whether each saved pane tree would be restored
    Check {
        /// Session file (default: the configured session file)
        #[arg(long, value_name = "FILE")]
        session: Option<PathBuf>,
    },
}

fn parse_level(value: &str) -> Result<log::LevelFilter, String> {
    match value.to_ascii_lowercase().as_str() {
        "off" => Ok(log::LevelFilter::Off),
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        other => Err(format!(
            "invalid log level '{}' (expected off, error, warn, info, debug or trace)",
            other
        )),
    }
}

/// Load the configuration named on the command line, or the default one
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => Config::load().context("Failed to load config"),
    }
}

/// Run the selected subcommand and return the process exit code
pub fn run(cli: &Cli, config: &Config) -> Result<i32> {
    match &cli.command {
        Commands::Layout {
            session,
            width,
            height,
            gap,
        } => {
            let state = read_session(session.as_deref(), config)?;
            let outer = Rect::new(0.0, 0.0, *width, *height);
            print!("{}", render_layout(&state, outer, gap.unwrap_or(config.pane_gap)));
            Ok(0)
        }
        Commands::Check { session } => {
            let state = read_session(session.as_deref(), config)?;
            let (report, all_restorable) = check_session(&state);
            print!("{}", report);
            Ok(if all_restorable { 0 } else { 1 })
        }
    }
}

fn read_session(path: Option<&Path>, config: &Config) -> Result<SessionState> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(|| config.session_path());
    load_session_from(&path)?.with_context(|| format!("No saved session at {:?}", path))
}

fn saved_tab_ids(state: &SessionState, index: usize) -> HashSet<TabId> {
    state.workspaces[index]
        .tabs
        .iter()
        .map(|tab| tab.id.clone())
        .collect()
}

/// Human-readable projection of every workspace in `state`
pub fn render_layout(state: &SessionState, outer: Rect, gap: f64) -> String {
    let mut out = String::new();
    for (index, ws) in state.workspaces.iter().enumerate() {
        let marker = if state.active_workspace == Some(index) { " *" } else { "" };
        let _ = writeln!(out, "{}{}", ws.name, marker);

        let tree = ws
            .pane_layout
            .as_ref()
            .map(|node| validate_layout(node, &saved_tab_ids(state, index)));
        match tree {
            Some(Ok(tree)) => {
                for (tab_id, rect) in compute_rects(&tree, outer, gap) {
                    let _ = writeln!(out, "  pane {}  {}", tab_id, format_rect(&rect));
                }
                for divider in compute_dividers(&tree, outer, gap) {
                    let _ = writeln!(
                        out,
                        "  divider {:?} at {:?}[{}]  {}",
                        divider.direction,
                        divider.path,
                        divider.child_idx,
                        format_rect(&divider.rect)
                    );
                }
            }
            Some(Err(issue)) => {
                let _ = writeln!(out, "  layout discarded: {}", issue);
                write_single_pane(&mut out, restored_focus(ws, None).as_ref(), outer);
            }
            None => write_single_pane(&mut out, restored_focus(ws, None).as_ref(), outer),
        }
    }
    out
}

fn write_single_pane(out: &mut String, active: Option<&TabId>, outer: Rect) {
    match active {
        Some(tab_id) => {
            let _ = writeln!(out, "  pane {}  {}", tab_id, format_rect(&outer));
        }
        None => {
            let _ = writeln!(out, "  (no tabs)");
        }
    }
}

fn format_rect(rect: &Rect) -> String {
    format!("{:.1},{:.1} {:.1}x{:.1}", rect.x, rect.y, rect.w, rect.h)
}

/// Per-workspace restore verdicts, and whether every tree would be kept
pub fn check_session(state: &SessionState) -> (String, bool) {
    let mut out = String::new();
    let mut all_restorable = true;
    for (index, ws) in state.workspaces.iter().enumerate() {
        match &ws.pane_layout {
            None => {
                let _ = writeln!(out, "{}: single pane", ws.name);
            }
            Some(node) => match validate_layout(node, &saved_tab_ids(state, index)) {
                Ok(tree) => {
                    let _ = writeln!(out, "{}: ok ({} panes)", ws.name, tree.leaf_count());
                }
                Err(issue) => {
                    all_restorable = false;
                    let _ = writeln!(out, "{}: discarded ({})", ws.name, issue);
                }
            },
        }
    }
    (out, all_restorable)
}
