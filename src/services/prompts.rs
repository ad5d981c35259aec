//! Prompt generation (stage 6).
//!
//! Every shot gets three generator prompts plus audio and init-image hints:
//!
//! * `scene_prompt`: character prefix, content, framing, motion, location
//!   mood, polarity mood, quality tag
//! * `setting_prompt`: the location alone, with nobody in it
//! * `video_prompt`: motion, content, duration

use tracing::{debug, info};

use crate::models::rules::default_shot_type;
use crate::models::{
    CameraMovement, ContentTrigger, HeroArtifact, InitImageSource, Polarity, SceneShots, Shot,
    ShotList, ShotType,
};
use crate::services::stage::PipelineStage;
use crate::utils::slugline::{SluglineInfo, TimeOfDay};
use crate::utils::text::{join_parts, truncate_at_word};
use crate::ShotlistError;

pub const DEFAULT_NEGATIVE_PROMPT: &str =
    "blurry, low quality, distorted faces, extra limbs, watermark, text, oversaturated";

pub const QUALITY_TAG: &str = "cinematic lighting, 35mm film still, high detail";

pub const MAX_CONTENT_CHARS: usize = 200;

const STING_INTENSITY: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct PromptStage {
    hero: Option<HeroArtifact>,
    negative_prompt: String,
}

impl Default for PromptStage {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PromptStage {
    /// A blank `negative_prompt` override keeps the default.
    pub fn new(hero: Option<HeroArtifact>, negative_prompt: Option<String>) -> Self {
        let negative_prompt = negative_prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NEGATIVE_PROMPT.to_string());
        Self {
            hero,
            negative_prompt,
        }
    }

    /// Appearance prefix for the shot's primary character, empty if unknown.
    pub fn character_prefix(&self, shot: &Shot) -> String {
        let Some(hero) = &self.hero else {
            return String::new();
        };
        shot.primary_character()
            .and_then(|name| hero.lookup(name))
            .map(|p| join_words(&[p.adjective_descriptor.as_str(), p.name.as_str()]))
            .unwrap_or_default()
    }

    fn fill(&self, shot: &mut Shot, scene: &SceneContext) {
        let prefix = self.character_prefix(shot);
        let content = truncate_at_word(&shot.content, MAX_CONTENT_CHARS);
        let shot_type = shot
            .shot_type
            .unwrap_or_else(|| default_shot_type(shot.trigger));
        let motion = shot.camera_movement.map(motion_phrase).unwrap_or_default();

        shot.scene_prompt = join_parts(&[
            prefix.as_str(),
            content.as_str(),
            framing_phrase(shot_type),
            motion,
            scene.location_mood.as_str(),
            scene.polarity_mood,
            QUALITY_TAG,
        ]);
        shot.setting_prompt = join_parts(&[
            scene.location_mood.as_str(),
            "empty, no people",
            QUALITY_TAG,
        ]);
        shot.video_prompt = join_parts(&[
            motion.to_string(),
            content,
            format!("{:.1} second shot", shot.duration_seconds),
        ]);
        shot.negative_prompt = self.negative_prompt.clone();
        shot.character_prompt_prefix = prefix;
        shot.ambient_description = ambient_description(&scene.info, shot);
    }
}

impl PipelineStage for PromptStage {
    fn step(&self) -> u8 {
        6
    }

    fn name(&self) -> &'static str {
        "prompts"
    }

    fn process(&self, mut shot_list: ShotList) -> Result<ShotList, ShotlistError> {
        let mut first = true;
        let mut prefixed = 0usize;
        for scene in &mut shot_list.scenes {
            let context = SceneContext::from(&*scene);
            for shot in &mut scene.shots {
                self.fill(shot, &context);
                shot.init_image_source = Some(init_image_source(shot, first));
                first = false;
                if !shot.character_prompt_prefix.is_empty() {
                    prefixed += 1;
                }
                debug!(shot = %shot.shot_id, prompt = %shot.scene_prompt, "Prompt built");
            }
        }
        info!(
            shots = shot_list.shot_count(),
            with_character_prefix = prefixed,
            "Prompts generated"
        );
        Ok(shot_list)
    }
}

/// Per-scene values shared by all of its shots.
struct SceneContext {
    info: SluglineInfo,
    location_mood: String,
    polarity_mood: &'static str,
}

impl From<&SceneShots> for SceneContext {
    fn from(scene: &SceneShots) -> Self {
        let info = SluglineInfo::parse(&scene.slugline);
        let location_mood = join_parts(&[info.location_phrase().as_str(), time_mood(&info)]);
        Self {
            info,
            location_mood,
            polarity_mood: polarity_mood(scene.polarity),
        }
    }
}

/// `generated` for the very first shot, `reference` when characters are on
/// screen, otherwise chain from the previous frame.
pub fn init_image_source(shot: &Shot, first_in_list: bool) -> InitImageSource {
    if first_in_list {
        InitImageSource::Generated
    } else if !shot.characters_in_frame.is_empty() {
        InitImageSource::Reference
    } else {
        InitImageSource::PreviousFrame
    }
}

pub fn framing_phrase(shot_type: ShotType) -> &'static str {
    match shot_type {
        ShotType::ExtremeWide => "extreme wide shot",
        ShotType::Wide => "wide shot",
        ShotType::Medium => "medium shot",
        ShotType::MediumClose => "medium close-up",
        ShotType::CloseUp => "close-up",
        ShotType::ExtremeCloseUp => "extreme close-up",
        ShotType::OverShoulder => "over-the-shoulder shot",
        ShotType::Pov => "point-of-view shot",
        ShotType::TwoShot => "two-shot",
        ShotType::Group => "group shot",
        ShotType::Insert => "insert detail shot",
    }
}

/// Empty for a static camera.
pub fn motion_phrase(movement: CameraMovement) -> &'static str {
    match movement {
        CameraMovement::Static => "",
        CameraMovement::PanLeft => "camera pans left",
        CameraMovement::PanRight => "camera pans right",
        CameraMovement::TiltUp => "camera tilts up",
        CameraMovement::TiltDown => "camera tilts down",
        CameraMovement::PushIn => "slow push in",
        CameraMovement::PullOut => "slow pull out",
        CameraMovement::Tracking => "tracking shot",
        CameraMovement::Handheld => "handheld camera",
        CameraMovement::Crane => "sweeping crane move",
        CameraMovement::Orbit => "camera orbits the subject",
    }
}

fn time_mood(info: &SluglineInfo) -> &'static str {
    let exterior = info.is_exterior();
    match (info.time_of_day, exterior) {
        (Some(TimeOfDay::Day), true) => "bright exterior daylight",
        (Some(TimeOfDay::Day), false) => "soft daylight through windows",
        (Some(TimeOfDay::Night), true) => "moonlit exterior night",
        (Some(TimeOfDay::Night), false) => "dim interior night lighting",
        (Some(TimeOfDay::Dawn), true) => "pale dawn sky",
        (Some(TimeOfDay::Dawn), false) => "early light filtering in",
        (Some(TimeOfDay::Dusk), true) => "golden hour exterior",
        (Some(TimeOfDay::Dusk), false) => "warm dusk interior light",
        (None, true) => "exterior",
        (None, false) => "interior",
    }
}

fn polarity_mood(polarity: Option<Polarity>) -> &'static str {
    match polarity {
        Some(Polarity::Positive) => "hopeful atmosphere",
        Some(Polarity::Negative) => "ominous atmosphere",
        None => "neutral atmosphere",
    }
}

const STREET_WORDS: &[&str] = &["STREET", "STREETS", "ROAD", "AVENUE", "HIGHWAY"];
const RAIN_WORDS: &[&str] = &["RAIN", "RAINY", "RAINING", "DOWNPOUR", "STORM"];

fn ambient_description(info: &SluglineInfo, shot: &Shot) -> String {
    let mut parts = vec![if info.is_exterior() {
        "outdoor ambience"
    } else {
        "quiet room tone"
    }];
    match info.time_of_day {
        Some(TimeOfDay::Day) => parts.push("daytime bustle"),
        Some(TimeOfDay::Night) => parts.push("night hush"),
        Some(TimeOfDay::Dawn) => parts.push("early birdsong"),
        Some(TimeOfDay::Dusk) => parts.push("evening wind"),
        None => {}
    }
    if info.mentions(STREET_WORDS) {
        parts.push("passing traffic");
    }
    if info.mentions(RAIN_WORDS) {
        parts.push("steady rain");
    }
    if let Some(sting) = sting_cue(shot) {
        parts.push(sting);
    }
    join_parts(&parts)
}

fn sting_cue(shot: &Shot) -> Option<&'static str> {
    match shot.trigger {
        ContentTrigger::ClimaxMoment => Some("percussive impact sting"),
        ContentTrigger::Revelation => Some("revelation sting"),
        ContentTrigger::TensionBuilding => Some("low tension drone"),
        _ if shot.emotional_intensity >= STING_INTENSITY => Some("dramatic sting"),
        _ => None,
    }
}

fn join_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CharacterProfile, DialogueLine, SceneVisualIntent, ShotSegment, StoryFormat,
    };

    fn shot(trigger: ContentTrigger, content: &str, chars: &[&str]) -> Shot {
        Shot::from_segment(
            1,
            ShotSegment {
                index: 0,
                trigger,
                content: content.into(),
                dialogue: None,
                characters_in_frame: chars.iter().map(|c| c.to_string()).collect(),
                emotional_intensity: 0.5,
                is_disaster_moment: false,
            },
            1,
            "axis",
        )
    }

    fn hero() -> HeroArtifact {
        HeroArtifact {
            hero: Some(CharacterProfile {
                name: "Mara Voss".into(),
                adjective_descriptor: "rain-soaked courier in a red coat".into(),
            }),
            antagonist: None,
        }
    }

    fn list_with(slugline: &str, polarity: Option<Polarity>, shots: Vec<Shot>) -> ShotList {
        let mut list = ShotList::new("p", "t", StoryFormat::ShortFilm);
        list.scenes.push(SceneShots {
            scene_number: 1,
            slugline: slugline.into(),
            beat: "Setup".into(),
            polarity,
            visual_intent: SceneVisualIntent::default(),
            target_duration_seconds: 0.0,
            shots,
        });
        list
    }

    #[test]
    fn test_scene_prompt_order() {
        let mut s = shot(ContentTrigger::DialogueExchange, "Mara: we leave tonight", &["MARA"]);
        s.dialogue = Some(DialogueLine {
            speaker: "MARA".into(),
            text: "we leave tonight".into(),
        });
        s.shot_type = Some(ShotType::OverShoulder);
        s.camera_movement = Some(CameraMovement::Static);
        s.duration_seconds = 3.0;

        let list = list_with("EXT. HARBOR STREET - NIGHT", Some(Polarity::Negative), vec![s]);
        let list = PromptStage::new(Some(hero()), None).process(list).unwrap();
        let s = &list.scenes[0].shots[0];
        insta::assert_snapshot!(
            s.scene_prompt,
            @"rain-soaked courier in a red coat Mara Voss, Mara: we leave tonight, over-the-shoulder shot, harbor street, moonlit exterior night, ominous atmosphere, cinematic lighting, 35mm film still, high detail"
        );
        assert_eq!(s.character_prompt_prefix, "rain-soaked courier in a red coat Mara Voss");
        assert_eq!(s.video_prompt, "Mara: we leave tonight, 3.0 second shot");
        assert_eq!(
            s.setting_prompt,
            "harbor street, moonlit exterior night, empty, no people, cinematic lighting, 35mm film still, high detail"
        );
        assert_eq!(
            s.ambient_description,
            "outdoor ambience, night hush, passing traffic"
        );
        assert_eq!(s.negative_prompt, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_unmatched_character_has_no_prefix() {
        let stage = PromptStage::new(Some(hero()), None);
        let s = shot(ContentTrigger::ActionBeat, "x", &["JONAH"]);
        assert_eq!(stage.character_prefix(&s), "");
        assert_eq!(PromptStage::default().character_prefix(&s), "");
    }

    #[test]
    fn test_content_truncated() {
        let long = "word ".repeat(100);
        let list = list_with(
            "INT. ROOM - DAY",
            None,
            vec![shot(ContentTrigger::ActionBeat, &long, &[])],
        );
        let list = PromptStage::default().process(list).unwrap();
        let video = &list.scenes[0].shots[0].video_prompt;
        // Truncated content plus ", 0.0 second shot".
        assert!(video.chars().count() <= MAX_CONTENT_CHARS + 20);
    }

    #[test]
    fn test_negative_prompt_override() {
        let stage = PromptStage::new(None, Some("cartoon, anime".into()));
        let list = list_with(
            "INT. ROOM - DAY",
            None,
            vec![shot(ContentTrigger::ActionBeat, "x", &[])],
        );
        let list = stage.process(list).unwrap();
        assert_eq!(list.scenes[0].shots[0].negative_prompt, "cartoon, anime");

        let blank = PromptStage::new(None, Some("  ".into()));
        assert_eq!(blank.negative_prompt, DEFAULT_NEGATIVE_PROMPT);
    }

    #[test]
    fn test_init_image_policy() {
        let list = list_with(
            "INT. ROOM - DAY",
            None,
            vec![
                shot(ContentTrigger::LocationEstablish, "INT. ROOM - DAY", &[]),
                shot(ContentTrigger::ActionBeat, "Mara waits", &["MARA"]),
                shot(ContentTrigger::ActionBeat, "The clock ticks", &[]),
            ],
        );
        let list = PromptStage::default().process(list).unwrap();
        let sources: Vec<_> = list.shots().map(|s| s.init_image_source).collect();
        assert_eq!(
            sources,
            vec![
                Some(InitImageSource::Generated),
                Some(InitImageSource::Reference),
                Some(InitImageSource::PreviousFrame),
            ]
        );
    }

    #[test]
    fn test_ambient_keywords_match_whole_slugline_words() {
        let quiet = shot(ContentTrigger::ActionBeat, "x", &[]);
        let ambient = |slug: &str| ambient_description(&SluglineInfo::parse(slug), &quiet);

        assert_eq!(
            ambient("EXT. ALLEY - NIGHT - RAIN"),
            "outdoor ambience, night hush, steady rain"
        );
        assert_eq!(
            ambient("INT. TRAIN STATION - DAY"),
            "quiet room tone, daytime bustle"
        );
        assert_eq!(
            ambient("EXT. MAIN STREET - DAY"),
            "outdoor ambience, daytime bustle, passing traffic"
        );
    }

    #[test]
    fn test_sting_cue() {
        let mut s = shot(ContentTrigger::ActionBeat, "x", &[]);
        assert_eq!(sting_cue(&s), None);
        s.emotional_intensity = 0.85;
        assert_eq!(sting_cue(&s), Some("dramatic sting"));
        let climax = shot(ContentTrigger::ClimaxMoment, "x", &[]);
        assert_eq!(sting_cue(&climax), Some("percussive impact sting"));
    }

    #[test]
    fn test_prompts_never_empty() {
        let list = list_with("", None, vec![shot(ContentTrigger::LocationEstablish, "", &[])]);
        let list = PromptStage::default().process(list).unwrap();
        let s = &list.scenes[0].shots[0];
        assert!(!s.scene_prompt.is_empty());
        assert!(!s.setting_prompt.is_empty());
        assert!(!s.video_prompt.is_empty());
    }
}
