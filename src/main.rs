//! shotlist - screenplay to shot list planner
//!
//! Usage:
//!   shotlist plan story.yaml                 Plan and write output/<project>/shot_list.json
//!   shotlist plan story.json --hero hero.json --format short_form
//!   shotlist step 6 shot_list.json --out shot_list.json
//!   shotlist validate shot_list.json         Check structural invariants
//!   shotlist show shot_list.json             Tabular view
//!   shotlist --help                          Show all commands

use anyhow::Result;
use clap::Parser;

use shotlist::cli::output::OutputMode;
use shotlist::cli::{execute, Cli};
use shotlist::config::load_config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shotlist=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);
    let config = load_config(cli.config.as_deref());

    execute(&cli.command, config, mode)
}
