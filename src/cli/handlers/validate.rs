use std::path::Path;

use crate::cli::handlers::load_artifact;
use crate::cli::output::{output_json, print_kv, print_report, OutputMode};
use crate::config::ShotlistConfig;
use crate::models::ShotList;
use crate::services::Validator;

pub fn handle_validate(
    config: &ShotlistConfig,
    shot_list: &Path,
    scenes: Option<usize>,
    duration: Option<f64>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let list: ShotList = load_artifact(shot_list)?;

    let expected_scenes = scenes.unwrap_or(list.scenes.len());
    let expected_duration = duration.unwrap_or_else(|| {
        list.scenes
            .iter()
            .map(|s| s.target_duration_seconds.max(0.0))
            .sum()
    });

    let report = Validator::new(config.scene_density_threshold).validate(
        &list,
        expected_scenes,
        expected_duration,
    );

    match mode {
        OutputMode::Json => output_json(&report),
        OutputMode::Human => {
            print_kv("Shot list", &shot_list.display().to_string());
            print_kv("Expected scenes", &expected_scenes.to_string());
            print_kv("Expected duration", &format!("{:.1}s", expected_duration));
            println!();
            print_report(&report);
        }
    }

    if !report.is_valid {
        anyhow::bail!("{} validation error(s)", report.errors.len());
    }
    Ok(())
}
