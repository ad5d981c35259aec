use std::path::Path;

use crate::cli::handlers::load_artifact;
use crate::cli::output::{output_json, print_header, print_hint, print_table, OutputMode};
use crate::models::{SceneShots, ShotList};
use crate::utils::text::truncate_at_word;

const CONTENT_WIDTH: usize = 48;

pub fn handle_show(shot_list: &Path, scene: Option<u32>, mode: OutputMode) -> anyhow::Result<()> {
    let list: ShotList = load_artifact(shot_list)?;

    let scenes: Vec<&SceneShots> = list
        .scenes
        .iter()
        .filter(|s| scene.is_none_or(|n| s.scene_number == n))
        .collect();
    if let Some(n) = scene {
        if scenes.is_empty() {
            anyhow::bail!("Scene {} not found in {}", n, shot_list.display());
        }
    }

    match mode {
        OutputMode::Json => output_json(&scenes),
        OutputMode::Human => {
            for s in scenes {
                print_header(&format!(
                    "Scene {}: {} [{}] {:.1}s",
                    s.scene_number,
                    s.slugline,
                    s.beat,
                    s.duration_seconds()
                ));
                print_hint(&format!(
                    "{}: {} -> {}",
                    s.visual_intent.conflict_axis,
                    s.visual_intent.emotional_start,
                    s.visual_intent.emotional_end
                ));
                print_table(
                    &["Shot", "Trigger", "Type", "Movement", "Dur", "Next", "Content"],
                    s.shots
                        .iter()
                        .map(|shot| {
                            vec![
                                shot.shot_id.clone(),
                                shot.trigger.to_string(),
                                label(shot.shot_type),
                                label(shot.camera_movement),
                                format!("{:.1}", shot.duration_seconds),
                                label(shot.transition_to_next),
                                truncate_at_word(&shot.content, CONTENT_WIDTH),
                            ]
                        })
                        .collect(),
                );
            }
        }
    }

    Ok(())
}

fn label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
