//! Transition planning (stage 5).

use tracing::{debug, info};

use crate::models::{Polarity, SceneShots, Shot, ShotList, StoryBeat, TransitionType};
use crate::services::stage::PipelineStage;
use crate::utils::slugline::time_of_day_changes;
use crate::ShotlistError;

#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionStage;

impl TransitionStage {
    pub fn new() -> Self {
        Self
    }
}

/// What the scene exit rule needs to know about the following scene.
#[derive(Debug, Clone)]
pub struct NextScene {
    pub slugline: String,
    pub polarity: Option<Polarity>,
}

impl From<&SceneShots> for NextScene {
    fn from(scene: &SceneShots) -> Self {
        Self {
            slugline: scene.slugline.clone(),
            polarity: scene.polarity,
        }
    }
}

impl PipelineStage for TransitionStage {
    fn step(&self) -> u8 {
        5
    }

    fn name(&self) -> &'static str {
        "transitions"
    }

    fn process(&self, mut shot_list: ShotList) -> Result<ShotList, ShotlistError> {
        let next_scenes: Vec<Option<NextScene>> = (0..shot_list.scenes.len())
            .map(|i| shot_list.scenes.get(i + 1).map(NextScene::from))
            .collect();

        for (scene, next) in shot_list.scenes.iter_mut().zip(next_scenes) {
            let count = scene.shots.len();
            for i in 0..count {
                let transition = if i + 1 < count {
                    within_scene(&scene.shots[i], &scene.shots[i + 1])
                } else {
                    let (t, reason) = scene_exit(scene, &scene.shots[i], next.as_ref());
                    debug!(scene = scene.scene_number, transition = %t, "{}", reason);
                    t
                };
                let shot = &mut scene.shots[i];
                shot.transition_to_next = Some(transition);
                shot.transition_duration = transition.crossfade_seconds();
            }
        }

        let cuts = shot_list
            .shots()
            .filter(|s| s.transition_to_next == Some(TransitionType::Cut))
            .count();
        info!(shots = shot_list.shot_count(), cuts, "Transitions planned");
        Ok(shot_list)
    }
}

/// Transition between two adjacent shots of the same scene.
pub fn within_scene(current: &Shot, next: &Shot) -> TransitionType {
    if current.is_dialogue() && !next.is_dialogue() {
        TransitionType::LCut
    } else {
        TransitionType::Cut
    }
}

/// Transition out of a scene's final shot. `next` is `None` for the last
/// scene of the list.
pub fn scene_exit(
    scene: &SceneShots,
    last_shot: &Shot,
    next: Option<&NextScene>,
) -> (TransitionType, &'static str) {
    let Some(next) = next else {
        return (TransitionType::FadeToBlack, "final scene fades out");
    };

    if StoryBeat::parse(&scene.beat).is_some_and(|b| b.is_act_boundary()) {
        return (TransitionType::FadeToBlack, "act boundary");
    }

    if time_of_day_changes(&scene.slugline, &next.slugline) {
        return (TransitionType::Dissolve, "time of day changes");
    }

    if let (Some(a), Some(b)) = (scene.polarity, next.polarity) {
        if a != b {
            return (TransitionType::SmashCut, "polarity flips");
        }
    }

    if last_shot.is_dialogue() {
        return (TransitionType::JCut, "dialogue carries into the next scene");
    }

    (TransitionType::Cut, "plain scene change")
}
