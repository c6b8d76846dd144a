use anyhow::Result;
use clap::Parser;
use tilepane::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config errors are reported once logging is up
    let config = cli::load_config(&cli);
    let fallback = config
        .as_ref()
        .map(|c| c.log_level.to_level_filter())
        .unwrap_or(log::LevelFilter::Off);

    // CLI --log-level takes precedence, then RUST_LOG, then the config file.
    tilepane::debug::init_log_bridge(cli.log_level, fallback);
    log::info!("Starting tilepane {}", tilepane::VERSION);

    let config = config?;
    let code = match cli::run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tilepane: error: {e:#}");
            1
        }
    };

    if code != 0 {
        // No destructors with side effects are pending at this point.
        std::process::exit(code);
    }
    Ok(())
}
