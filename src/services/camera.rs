//! Camera behaviour (stage 3): movement per shot plus cinematography notes.

use tracing::{debug, info};

use crate::models::rules::{default_camera_movement, default_shot_type, HIGH_INTENSITY_THRESHOLD};
use crate::models::{
    CameraHeight, CameraMovement, Cinematography, ContentTrigger, DistanceBand, Polarity,
    SceneShots, Shot, ShotList, ShotType,
};
use crate::services::stage::PipelineStage;
use crate::utils::slugline::{SluglineInfo, TimeOfDay};
use crate::ShotlistError;

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraStage;

impl CameraStage {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for CameraStage {
    fn step(&self) -> u8 {
        3
    }

    fn name(&self) -> &'static str {
        "camera"
    }

    fn process(&self, mut shot_list: ShotList) -> Result<ShotList, ShotlistError> {
        for scene in &mut shot_list.scenes {
            let lighting = lighting_intent_for(scene);
            for (position, shot) in scene.shots.iter_mut().enumerate() {
                let (movement, rationale) = choose_movement(shot, position);
                debug!(shot = %shot.shot_id, movement = %movement, "{}", rationale);
                shot.cinematography = Some(cinematography_for(shot, movement, &lighting));
                shot.camera_movement = Some(movement);
                shot.camera_rationale = rationale;
            }
        }
        info!(shots = shot_list.shot_count(), "Camera movement assigned");
        Ok(shot_list)
    }
}

/// Pick a camera movement. Earlier rules take priority.
pub fn choose_movement(shot: &Shot, position: usize) -> (CameraMovement, String) {
    let trigger = shot.trigger;

    if position == 0 && trigger == ContentTrigger::LocationEstablish {
        return (
            CameraMovement::PanRight,
            "Establishing pan surveys the location".to_string(),
        );
    }

    if shot.emotional_intensity >= HIGH_INTENSITY_THRESHOLD
        && matches!(
            trigger,
            ContentTrigger::EmotionalMoment | ContentTrigger::TensionBuilding
        )
    {
        return (
            CameraMovement::PushIn,
            format!(
                "Push in on high-intensity ({:.2}) {}",
                shot.emotional_intensity, trigger
            ),
        );
    }

    if trigger == ContentTrigger::ClimaxMoment {
        return (
            CameraMovement::Handheld,
            "Handheld energy for the climax".to_string(),
        );
    }

    if shot.is_disaster_moment {
        return (
            CameraMovement::PushIn,
            "Push in to emphasise the disaster moment".to_string(),
        );
    }

    match shot.shot_type {
        Some(ShotType::Pov) => {
            return (
                CameraMovement::Tracking,
                "POV tracks with the character's gaze".to_string(),
            )
        }
        Some(ShotType::ExtremeCloseUp) => {
            return (
                CameraMovement::Static,
                "Static hold on extreme close-up detail".to_string(),
            )
        }
        _ => {}
    }

    let movement = default_camera_movement(trigger);
    (movement, format!("Default movement for {}", trigger))
}

fn cinematography_for(shot: &Shot, movement: CameraMovement, lighting: &str) -> Cinematography {
    let shot_type = shot
        .shot_type
        .unwrap_or_else(|| default_shot_type(shot.trigger));
    let lighting_intent = if shot.is_disaster_moment {
        format!("{}, stark accent light", lighting)
    } else {
        lighting.to_string()
    };
    Cinematography {
        lens_mm: lens_for(shot_type),
        camera_height: height_for(shot.trigger, shot_type),
        distance_band: distance_for(shot_type),
        lighting_intent,
        blocking_intent: blocking_for(shot),
        generation_profile: generation_profile_for(movement).to_string(),
    }
}

fn lens_for(shot_type: ShotType) -> u16 {
    match shot_type {
        ShotType::ExtremeWide => 16,
        ShotType::Wide => 24,
        ShotType::Pov | ShotType::Group => 28,
        ShotType::Medium | ShotType::TwoShot => 35,
        ShotType::MediumClose | ShotType::OverShoulder => 50,
        ShotType::CloseUp => 85,
        ShotType::ExtremeCloseUp | ShotType::Insert => 100,
    }
}

fn distance_for(shot_type: ShotType) -> DistanceBand {
    match shot_type {
        ShotType::ExtremeWide | ShotType::Wide | ShotType::Group => DistanceBand::Far,
        ShotType::Medium | ShotType::TwoShot | ShotType::OverShoulder | ShotType::Pov => {
            DistanceBand::Mid
        }
        ShotType::MediumClose | ShotType::CloseUp => DistanceBand::Near,
        ShotType::ExtremeCloseUp | ShotType::Insert => DistanceBand::Macro,
    }
}

fn height_for(trigger: ContentTrigger, shot_type: ShotType) -> CameraHeight {
    match (trigger, shot_type) {
        (_, ShotType::Insert) => CameraHeight::Overhead,
        (_, ShotType::ExtremeWide) => CameraHeight::High,
        (ContentTrigger::ClimaxMoment | ContentTrigger::NewCharacterEnters, _) => {
            CameraHeight::Low
        }
        (
            ContentTrigger::TensionBuilding
            | ContentTrigger::LocationEstablish
            | ContentTrigger::TimeSkip,
            _,
        ) => CameraHeight::High,
        _ => CameraHeight::EyeLevel,
    }
}

fn blocking_for(shot: &Shot) -> String {
    let chars = &shot.characters_in_frame;
    match shot.trigger {
        ContentTrigger::LocationEstablish | ContentTrigger::TimeSkip => {
            "environment only, geography reads clearly".to_string()
        }
        ContentTrigger::DialogueExchange => match shot.primary_character() {
            Some(speaker) => format!("{} favoured, listener off-frame", speaker),
            None => "unseen speaker, frame holds the space".to_string(),
        },
        ContentTrigger::NewCharacterEnters => match chars.first() {
            Some(who) => format!("{} enters frame toward camera", who),
            None => "newcomer enters frame toward camera".to_string(),
        },
        ContentTrigger::ClimaxMoment => "bodies in motion crossing frame".to_string(),
        ContentTrigger::Reaction => "subject still, reacting off-frame".to_string(),
        _ => match chars.len() {
            0 => "action carries the frame".to_string(),
            1 => format!("{} centred", chars[0]),
            2 => format!("{} and {} share the frame", chars[0], chars[1]),
            _ => "ensemble staggered in depth".to_string(),
        },
    }
}

fn generation_profile_for(movement: CameraMovement) -> &'static str {
    match movement {
        CameraMovement::Static => "still_hold",
        CameraMovement::PushIn | CameraMovement::PullOut => "dolly_motion",
        CameraMovement::PanLeft
        | CameraMovement::PanRight
        | CameraMovement::TiltUp
        | CameraMovement::TiltDown => "camera_pan",
        CameraMovement::Tracking | CameraMovement::Crane | CameraMovement::Orbit => {
            "tracked_motion"
        }
        CameraMovement::Handheld => "handheld_shake",
    }
}

/// Scene-wide lighting intent from time of day and polarity.
fn lighting_intent_for(scene: &SceneShots) -> String {
    let base = match SluglineInfo::parse(&scene.slugline).time_of_day {
        Some(TimeOfDay::Day) => "natural daylight",
        Some(TimeOfDay::Night) => "low-key practical light",
        Some(TimeOfDay::Dawn) => "cool pre-dawn glow",
        Some(TimeOfDay::Dusk) => "warm golden-hour light",
        None => "motivated ambient light",
    };
    let mood = match scene.polarity {
        Some(Polarity::Positive) => "warm lift",
        Some(Polarity::Negative) => "hard contrast shadows",
        None => "balanced contrast",
    };
    format!("{}, {}", base, mood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SceneVisualIntent, ShotSegment, StoryFormat};

    fn shot(trigger: ContentTrigger, intensity: f64, shot_type: Option<ShotType>) -> Shot {
        let mut s = Shot::from_segment(
            1,
            ShotSegment {
                index: 1,
                trigger,
                content: "c".into(),
                dialogue: None,
                characters_in_frame: vec![],
                emotional_intensity: intensity,
                is_disaster_moment: false,
            },
            2,
            "axis",
        );
        s.shot_type = shot_type;
        s
    }

    #[test]
    fn test_priority_order() {
        let est = shot(ContentTrigger::LocationEstablish, 0.3, Some(ShotType::Wide));
        assert_eq!(choose_movement(&est, 0).0, CameraMovement::PanRight);

        let emo = shot(ContentTrigger::EmotionalMoment, 0.9, Some(ShotType::ExtremeCloseUp));
        assert_eq!(choose_movement(&emo, 2).0, CameraMovement::PushIn);

        let climax = shot(ContentTrigger::ClimaxMoment, 1.0, Some(ShotType::ExtremeCloseUp));
        assert_eq!(choose_movement(&climax, 2).0, CameraMovement::Handheld);

        let mut disaster = shot(ContentTrigger::Revelation, 0.7, Some(ShotType::MediumClose));
        disaster.is_disaster_moment = true;
        assert_eq!(choose_movement(&disaster, 2).0, CameraMovement::PushIn);

        let pov = shot(ContentTrigger::TensionBuilding, 0.3, Some(ShotType::Pov));
        assert_eq!(choose_movement(&pov, 2).0, CameraMovement::Tracking);

        let ecu = shot(ContentTrigger::Revelation, 0.9, Some(ShotType::ExtremeCloseUp));
        assert_eq!(choose_movement(&ecu, 2).0, CameraMovement::Static);

        let plain = shot(ContentTrigger::ActionBeat, 0.3, Some(ShotType::Medium));
        let (m, rationale) = choose_movement(&plain, 1);
        assert_eq!(m, CameraMovement::Tracking);
        insta::assert_snapshot!(rationale, @"Default movement for ACTION_BEAT");
    }

    #[test]
    fn test_low_intensity_emotion_uses_default() {
        let emo = shot(ContentTrigger::EmotionalMoment, 0.4, Some(ShotType::CloseUp));
        let (m, r) = choose_movement(&emo, 1);
        assert_eq!(m, default_camera_movement(ContentTrigger::EmotionalMoment));
        assert!(r.starts_with("Default"));
    }

    #[test]
    fn test_stage_fills_cinematography() {
        let mut list = ShotList::new("p", "t", StoryFormat::ShortFilm);
        list.scenes.push(SceneShots {
            scene_number: 1,
            slugline: "EXT. DOCKS - NIGHT".into(),
            beat: "Setup".into(),
            polarity: Some(Polarity::Negative),
            visual_intent: SceneVisualIntent::default(),
            target_duration_seconds: 0.0,
            shots: vec![
                shot(ContentTrigger::LocationEstablish, 0.3, Some(ShotType::Wide)),
                shot(ContentTrigger::ActionBeat, 0.3, None),
            ],
        });
        let list = CameraStage::new().process(list).unwrap();
        let first = list.scenes[0].shots[0].cinematography.as_ref().unwrap();
        assert_eq!(first.lens_mm, 24);
        assert_eq!(first.distance_band, DistanceBand::Far);
        assert_eq!(first.lighting_intent, "low-key practical light, hard contrast shadows");
        assert_eq!(first.generation_profile, "camera_pan");
        assert!(first.missing_fields().is_empty());

        // No shot type yet: lens falls back to the trigger default framing.
        let second = list.scenes[0].shots[1].cinematography.as_ref().unwrap();
        assert_eq!(second.lens_mm, 35);
        assert!(second.missing_fields().is_empty());
    }

    #[test]
    fn test_every_movement_has_a_profile() {
        for m in [
            CameraMovement::Static,
            CameraMovement::PanLeft,
            CameraMovement::Handheld,
            CameraMovement::Orbit,
        ] {
            assert!(!generation_profile_for(m).is_empty());
        }
    }
}
