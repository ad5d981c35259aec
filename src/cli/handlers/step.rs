use std::path::Path;

use crate::cli::handlers::{load_artifact, write_artifact};
use crate::cli::output::{output_json, print_success, OutputMode};
use crate::config::ShotlistConfig;
use crate::models::{HeroArtifact, ShotList};
use crate::services::ShotPlanner;

pub fn handle_step(
    config: ShotlistConfig,
    step: u8,
    shot_list: &Path,
    hero: Option<&Path>,
    out: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let list: ShotList = load_artifact(shot_list)?;
    let hero = hero.map(load_artifact::<HeroArtifact>).transpose()?;

    let planner = ShotPlanner::new(config);
    let list = planner
        .run_step(step, list, hero.as_ref())
        .map_err(|e| anyhow::anyhow!("Step {} failed: {}", step, e))?;

    match out {
        Some(path) => {
            write_artifact(path, &list)?;
            match mode {
                OutputMode::Json => output_json(&serde_json::json!({
                    "step": step,
                    "output_path": path,
                    "total_shots": list.total_shots,
                })),
                OutputMode::Human => print_success(&format!(
                    "Step {} applied to {} shots, written to {}",
                    step,
                    list.shot_count(),
                    path.display()
                )),
            }
        }
        None => output_json(&list),
    }

    Ok(())
}
