//! CLI interface for shotlist.

pub mod handlers;
pub mod output;
pub mod progress;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ShotlistConfig;
use output::OutputMode;

/// shotlist - plan camera shots from a structured screenplay
#[derive(Parser)]
#[command(name = "shotlist", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./shotlist.toml, then ~/.shotlist/config.toml)
    #[arg(long, env = "SHOTLIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a full shot list from a screenplay (JSON or YAML)
    Plan {
        /// Screenplay artifact
        screenplay: PathBuf,
        /// Hero/antagonist appearance artifact
        #[arg(long)]
        hero: Option<PathBuf>,
        /// Story format: feature_film, short_film, series_episode, short_form
        #[arg(long)]
        format: Option<String>,
        /// Project id (default: slug of the screenplay title)
        #[arg(long)]
        project: Option<String>,
        /// Override the configured output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Plan without writing shot_list.json
        #[arg(long)]
        dry_run: bool,
    },

    /// Re-run a single stage (2-7) on an existing shot list
    Step {
        /// Stage number: 2 shot type, 3 camera, 4 pacing, 5 transitions, 6 prompts, 7 validation
        step: u8,
        /// Shot list to process
        shot_list: PathBuf,
        /// Hero artifact (used by stage 6)
        #[arg(long)]
        hero: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate a shot list
    Validate {
        shot_list: PathBuf,
        /// Expected scene count (default: scenes in the list)
        #[arg(long)]
        scenes: Option<usize>,
        /// Expected total duration in seconds (default: sum of scene targets)
        #[arg(long)]
        duration: Option<f64>,
    },

    /// Show a shot list as a table
    Show {
        shot_list: PathBuf,
        /// Only this scene
        #[arg(long)]
        scene: Option<u32>,
    },

    /// Print the JSON Schema of the shot list artifact
    Schema,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, elvish, powershell)
        shell: clap_complete::Shell,
    },
}

/// Dispatch a parsed command.
pub fn execute(cmd: &Commands, config: ShotlistConfig, mode: OutputMode) -> anyhow::Result<()> {
    match cmd {
        Commands::Plan {
            screenplay,
            hero,
            format,
            project,
            output_dir,
            dry_run,
        } => handlers::plan::handle_plan(
            config,
            handlers::plan::PlanArgs {
                screenplay,
                hero: hero.as_deref(),
                format: format.as_deref(),
                project: project.as_deref(),
                output_dir: output_dir.as_deref(),
                dry_run: *dry_run,
            },
            mode,
        )?,

        Commands::Step {
            step,
            shot_list,
            hero,
            out,
        } => handlers::step::handle_step(
            config,
            *step,
            shot_list,
            hero.as_deref(),
            out.as_deref(),
            mode,
        )?,

        Commands::Validate {
            shot_list,
            scenes,
            duration,
        } => handlers::validate::handle_validate(&config, shot_list, *scenes, *duration, mode)?,

        Commands::Show { shot_list, scene } => {
            handlers::show::handle_show(shot_list, *scene, mode)?
        }

        Commands::Schema => {
            let schema = schemars::schema_for!(crate::models::ShotList);
            output::output_json(&schema);
        }

        Commands::Completions { shell } => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "shotlist",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
