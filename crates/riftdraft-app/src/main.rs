// riftdraft entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr; stdout carries the report)
// 2. Parse arguments
// 3. Load config, build the engine context
// 4. Load roster, then stat tables concurrently
// 5. Read the draft file into a DraftState
// 6. Evaluate and print the insights as JSON

mod draft_file;
mod loader;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use riftdraft_core::config;
use riftdraft_core::draft::{DraftContext, LaneFilter};
use riftdraft_core::insight;
use tracing::info;

use crate::draft_file::DraftFile;

#[derive(Parser, Debug)]
#[command(
    name = "riftdraft",
    about = "Score a champion draft and suggest synergies, matchups, combos and bans",
    version
)]
struct Args {
    /// Draft description (TOML with `bans`, `[team]` and `[enemy]`).
    #[arg(value_name = "DRAFT_FILE")]
    draft: PathBuf,

    /// Directory holding `config/` (or `defaults/`) and the data files.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Lane filter for synergy suggestions (ALL or a role); overrides config.
    #[arg(long, value_name = "ROLE")]
    lane: Option<String>,

    /// Minimum games behind a synergy suggestion; overrides config.
    #[arg(long, value_name = "N")]
    min_games: Option<u32>,

    /// Print single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let args = Args::parse();

    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve working directory")?,
    };

    let config = config::load_config_in(&base_dir).context("failed to load configuration")?;
    let mut ctx = DraftContext::from_config(&config).context("invalid configuration")?;
    if let Some(lane) = &args.lane {
        let filter = LaneFilter::parse(lane).with_context(|| format!("invalid --lane '{lane}'"))?;
        ctx = ctx.with_lane_filter(filter);
    }
    if let Some(games) = args.min_games {
        ctx = ctx.with_min_synergy_games(games);
    }
    info!(
        "Config loaded: lane filter {}, min synergy games {}, display count {}",
        ctx.lane_filter, ctx.min_synergy_games, ctx.display_count
    );

    let snapshot = loader::load_snapshot(&config, &base_dir)
        .await
        .context("failed to load data")?;

    let state = DraftFile::load(&args.draft)?
        .to_state(&snapshot.names)
        .context("failed to apply draft file")?;
    info!(
        "Draft: {} team picks, {} enemy picks, {} bans",
        state.team.len(),
        state.enemy.len(),
        state.bans.len()
    );

    let insights = insight::evaluate(&snapshot, &state, &ctx);
    let report = if args.compact {
        serde_json::to_string(&insights)
    } else {
        serde_json::to_string_pretty(&insights)
    }
    .context("failed to serialize insights")?;
    println!("{report}");

    Ok(())
}

/// Initialize tracing to stderr so stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("riftdraft=info,riftdraft_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
