//! Shot-type assignment (stage 2).
//!
//! Rules, first match wins:
//! 1. establishing first shot → `WIDE`
//! 2. dialogue → shot/reverse-shot cycle
//! 3. intensity ≥ 0.7 → tiered close framings
//! 4. intensity ≥ 0.5 → medium framing
//! 5. trigger default, then the two-shot / group override

use tracing::{debug, info};

use crate::models::rules::{
    default_shot_type, DIALOGUE_CYCLE, HIGH_INTENSITY_SHOTS, HIGH_INTENSITY_THRESHOLD,
    MEDIUM_INTENSITY_SHOTS, MEDIUM_INTENSITY_THRESHOLD,
};
use crate::models::{ContentTrigger, Shot, ShotList, ShotType};
use crate::services::stage::PipelineStage;
use crate::ShotlistError;

/// Guards the tier index against `0.8 - 0.7 = 0.0999…`.
const TIER_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default)]
pub struct ShotTypeStage;

impl ShotTypeStage {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for ShotTypeStage {
    fn step(&self) -> u8 {
        2
    }

    fn name(&self) -> &'static str {
        "shot_type"
    }

    fn process(&self, mut shot_list: ShotList) -> Result<ShotList, ShotlistError> {
        for scene in &mut shot_list.scenes {
            let mut dialogue_counter = 0usize;
            for (position, shot) in scene.shots.iter_mut().enumerate() {
                let (shot_type, rationale) =
                    choose_shot_type(shot, position, &mut dialogue_counter);
                debug!(shot = %shot.shot_id, shot_type = %shot_type, "{}", rationale);
                shot.shot_type = Some(shot_type);
                shot.shot_type_rationale = rationale;
            }
        }
        info!(shots = shot_list.shot_count(), "Shot types assigned");
        Ok(shot_list)
    }
}

/// Pick a framing for one shot. `position` is the index within its scene.
pub fn choose_shot_type(
    shot: &Shot,
    position: usize,
    dialogue_counter: &mut usize,
) -> (ShotType, String) {
    if position == 0 && shot.trigger == ContentTrigger::LocationEstablish {
        return (
            ShotType::Wide,
            "Scene opener establishes location with a wide frame".to_string(),
        );
    }

    if shot.trigger == ContentTrigger::DialogueExchange {
        let slot = *dialogue_counter % DIALOGUE_CYCLE.len();
        *dialogue_counter += 1;
        let shot_type = DIALOGUE_CYCLE[slot];
        return (
            shot_type,
            format!(
                "Dialogue shot/reverse-shot position {} of {}",
                slot + 1,
                DIALOGUE_CYCLE.len()
            ),
        );
    }

    let intensity = shot.emotional_intensity;
    if intensity >= HIGH_INTENSITY_THRESHOLD {
        let tier = high_intensity_tier(intensity);
        return (
            HIGH_INTENSITY_SHOTS[tier],
            format!("High intensity ({:.2}) tightens framing to tier {}", intensity, tier + 1),
        );
    }

    if intensity >= MEDIUM_INTENSITY_THRESHOLD {
        return (
            MEDIUM_INTENSITY_SHOTS[0],
            format!("Medium intensity ({:.2}) keeps a medium frame", intensity),
        );
    }

    let default = default_shot_type(shot.trigger);
    match shot.characters_in_frame.len() {
        2 => (
            ShotType::TwoShot,
            format!("Two characters in frame override default {}", default),
        ),
        n if n >= 3 => (
            ShotType::Group,
            format!("{} characters in frame override default {}", n, default),
        ),
        _ => (default, format!("Default framing for {}", shot.trigger)),
    }
}

/// Index into the high-intensity list: `floor((i − 0.7) / 0.1)`, clamped.
fn high_intensity_tier(intensity: f64) -> usize {
    let raw = ((intensity - HIGH_INTENSITY_THRESHOLD) / 0.1 + TIER_EPSILON).floor();
    (raw.max(0.0) as usize).min(HIGH_INTENSITY_SHOTS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DialogueLine, ShotSegment};

    fn shot(trigger: ContentTrigger, intensity: f64, chars: &[&str]) -> Shot {
        let dialogue = (trigger == ContentTrigger::DialogueExchange).then(|| DialogueLine {
            speaker: chars.first().copied().unwrap_or("UNKNOWN").to_string(),
            text: "line".into(),
        });
        Shot::from_segment(
            1,
            ShotSegment {
                index: 0,
                trigger,
                content: "c".into(),
                dialogue,
                characters_in_frame: chars.iter().map(|c| c.to_string()).collect(),
                emotional_intensity: intensity,
                is_disaster_moment: false,
            },
            1,
            "axis",
        )
    }

    #[test]
    fn test_establishing_first_is_wide() {
        let mut counter = 0;
        let establish = shot(ContentTrigger::LocationEstablish, 0.9, &[]);
        let (t, _) = choose_shot_type(&establish, 0, &mut counter);
        assert_eq!(t, ShotType::Wide);
    }

    #[test]
    fn test_establish_not_first_falls_through() {
        let mut counter = 0;
        let late = shot(ContentTrigger::LocationEstablish, 0.2, &[]);
        let (t, _) = choose_shot_type(&late, 3, &mut counter);
        assert_eq!(t, default_shot_type(ContentTrigger::LocationEstablish));
    }

    #[test]
    fn test_dialogue_cycles() {
        let mut counter = 0;
        let types: Vec<ShotType> = (0..4)
            .map(|i| {
                let speaker = if i % 2 == 0 { "MARA" } else { "JONAH" };
                choose_shot_type(
                    &shot(ContentTrigger::DialogueExchange, 0.9, &[speaker]),
                    i + 1,
                    &mut counter,
                )
                .0
            })
            .collect();
        assert_eq!(
            types,
            vec![
                ShotType::OverShoulder,
                ShotType::MediumClose,
                ShotType::CloseUp,
                ShotType::OverShoulder
            ]
        );
    }

    #[test]
    fn test_high_intensity_tiers() {
        assert_eq!(high_intensity_tier(0.7), 0);
        assert_eq!(high_intensity_tier(0.79), 0);
        assert_eq!(high_intensity_tier(0.8), 1);
        assert_eq!(high_intensity_tier(0.9), 2);
        assert_eq!(high_intensity_tier(1.0), 2);
    }

    #[test]
    fn test_medium_intensity_ignores_character_count() {
        let mut counter = 0;
        let (t, _) = choose_shot_type(
            &shot(ContentTrigger::ActionBeat, 0.5, &["A", "B", "C"]),
            1,
            &mut counter,
        );
        assert_eq!(t, ShotType::Medium);
    }

    #[test]
    fn test_character_count_overrides_default() {
        let mut counter = 0;
        let pair = shot(ContentTrigger::ActionBeat, 0.3, &["A", "B"]);
        let (two, _) = choose_shot_type(&pair, 1, &mut counter);
        assert_eq!(two, ShotType::TwoShot);
        let trio = shot(ContentTrigger::ActionBeat, 0.3, &["A", "B", "C"]);
        let (group, rationale) = choose_shot_type(&trio, 1, &mut counter);
        assert_eq!(group, ShotType::Group);
        insta::assert_snapshot!(rationale, @"3 characters in frame override default MEDIUM");
    }

    #[test]
    fn test_counter_resets_per_scene() {
        use crate::models::{SceneShots, SceneVisualIntent, StoryFormat};
        let mut list = ShotList::new("p", "t", StoryFormat::ShortFilm);
        for n in 1..=2 {
            list.scenes.push(SceneShots {
                scene_number: n,
                slugline: "INT. A - DAY".into(),
                beat: "Setup".into(),
                polarity: None,
                visual_intent: SceneVisualIntent::default(),
                target_duration_seconds: 0.0,
                shots: vec![
                    shot(ContentTrigger::DialogueExchange, 0.3, &["MARA"]),
                    shot(ContentTrigger::DialogueExchange, 0.3, &["JONAH"]),
                ],
            });
        }
        let list = ShotTypeStage::new().process(list).unwrap();
        for scene in &list.scenes {
            assert_eq!(scene.shots[0].shot_type, Some(ShotType::OverShoulder));
            assert_eq!(scene.shots[1].shot_type, Some(ShotType::MediumClose));
            assert!(!scene.shots[1].shot_type_rationale.is_empty());
        }
    }
}
