//! Scene decomposition: screenplay scenes → ordered shot segments.
//!
//! Every scene opens on an establishing segment. Action paragraphs are
//! classified by fixed vocabularies (checked in order, first hit wins), and a
//! character cue plus its dialogue collapse into one dialogue segment.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::models::rules::{beat_intensity, StoryBeat};
use crate::models::{
    ContentTrigger, DialogueLine, ElementType, Polarity, SceneShots, SceneVisualIntent,
    Screenplay, ScreenplayScene, Shot, ShotList, ShotSegment, StoryFormat,
};
use crate::utils::slugline::SluglineInfo;
use crate::utils::text::{first_keyword_hit, has_character_introduction, split_paragraphs};

/// Climax vocabulary. Only escalates in climax-eligible beats.
pub const CLIMAX_KEYWORDS: &[&str] = &[
    "explod",
    "detonat",
    "crash",
    "collaps",
    "gunshot",
    "gunfire",
    "battle",
    "showdown",
    "shoots",
    "stabs",
    "screams",
    "destroy",
    "final blow",
];

pub const REVELATION_KEYWORDS: &[&str] = &[
    "realiz",
    "discover",
    "reveal",
    "truth",
    "secret",
    "recogni",
    "understands",
    "finally sees",
    "the answer",
];

pub const EMOTIONAL_KEYWORDS: &[&str] = &[
    "tears",
    "cries",
    "crying",
    "sobs",
    "weep",
    "embrace",
    "hugs",
    "kiss",
    "trembl",
    "grief",
    "heartbr",
    "laughs",
];

pub const TENSION_KEYWORDS: &[&str] = &[
    "slowly",
    "creep",
    "shadow",
    "silence",
    "footsteps",
    "waits",
    "watches",
    "lurk",
    "stalk",
    "listens",
    "whisper",
    "holds her breath",
    "holds his breath",
];

/// Speaker used for dialogue without a preceding character cue.
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

const ESTABLISH_INTENSITY_DROP: f64 = 0.2;
const ESTABLISH_INTENSITY_FLOOR: f64 = 0.2;
const CLIMAX_BOOST: f64 = 0.3;
const EMOTIONAL_BOOST: f64 = 0.2;

/// Stage 1. Builds the initial `ShotList` from a screenplay.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decomposer;

impl Decomposer {
    pub fn new() -> Self {
        Self
    }

    /// Decompose every scene and assign contiguous global order starting at 1.
    pub fn decompose(
        &self,
        screenplay: &Screenplay,
        format: StoryFormat,
        project_id: &str,
    ) -> ShotList {
        let mut list = ShotList::new(project_id, screenplay.title.clone(), format);
        let mut global_order: u32 = 0;
        let scene_numbers = assign_scene_numbers(screenplay);

        for (scene, scene_number) in screenplay.scenes.iter().zip(scene_numbers) {
            let visual_intent = derive_visual_intent(scene);
            let segments = self.decompose_scene(scene);

            let shots: Vec<Shot> = segments
                .into_iter()
                .map(|seg| {
                    global_order += 1;
                    Shot::from_segment(
                        scene_number,
                        seg,
                        global_order,
                        &visual_intent.conflict_axis,
                    )
                })
                .collect();

            info!(
                scene = scene_number,
                shots = shots.len(),
                beat = %scene.beat,
                "Scene decomposed"
            );

            list.scenes.push(SceneShots {
                scene_number,
                slugline: scene.slugline.clone(),
                beat: scene.beat.clone(),
                polarity: Polarity::parse(&scene.emotional_polarity),
                visual_intent,
                target_duration_seconds: scene.estimated_duration_seconds.max(0.0),
                shots,
            });
        }

        list.recompute_totals();
        list
    }

    /// Split one scene into ordered segments.
    pub fn decompose_scene(&self, scene: &ScreenplayScene) -> Vec<ShotSegment> {
        let beat = StoryBeat::parse(&scene.beat);
        let base = beat_intensity(beat);
        let is_disaster_scene = beat.is_some_and(|b| b.is_disaster());
        let allows_climax = beat.is_some_and(|b| b.allows_climax());

        let mut segments = vec![ShotSegment {
            index: 0,
            trigger: ContentTrigger::LocationEstablish,
            content: scene.slugline.clone(),
            dialogue: None,
            characters_in_frame: Vec::new(),
            emotional_intensity: (base - ESTABLISH_INTENSITY_DROP).max(ESTABLISH_INTENSITY_FLOOR),
            is_disaster_moment: false,
        }];

        let mut pending_cue: Option<String> = None;

        for element in &scene.elements {
            match &element.element_type {
                ElementType::Action => {
                    pending_cue = None;
                    for paragraph in split_paragraphs(&element.content) {
                        let trigger = classify_action(&paragraph, allows_climax);
                        let intensity = boosted_intensity(base, trigger);
                        let is_disaster_moment = is_disaster_scene
                            && matches!(
                                trigger,
                                ContentTrigger::ClimaxMoment | ContentTrigger::Revelation
                            );
                        let characters =
                            characters_mentioned(&paragraph, &scene.characters_present);
                        debug!(
                            index = segments.len(),
                            trigger = %trigger,
                            intensity,
                            is_disaster_moment,
                            "Classified action paragraph"
                        );
                        segments.push(ShotSegment {
                            index: segments.len(),
                            trigger,
                            content: paragraph,
                            dialogue: None,
                            characters_in_frame: characters,
                            emotional_intensity: intensity,
                            is_disaster_moment,
                        });
                    }
                }
                ElementType::Character => {
                    pending_cue = Some(cue_name(&element.content));
                }
                ElementType::Dialogue => {
                    let speaker = pending_cue
                        .take()
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string());
                    let characters = if speaker == UNKNOWN_SPEAKER {
                        Vec::new()
                    } else {
                        vec![speaker.clone()]
                    };
                    segments.push(ShotSegment {
                        index: segments.len(),
                        trigger: ContentTrigger::DialogueExchange,
                        content: element.content.trim().to_string(),
                        dialogue: Some(DialogueLine {
                            speaker,
                            text: element.content.trim().to_string(),
                        }),
                        characters_in_frame: characters,
                        emotional_intensity: base.clamp(0.0, 1.0),
                        is_disaster_moment: false,
                    });
                }
                ElementType::Slugline => {
                    pending_cue = None;
                }
                // Parentheticals and other non-filmable lines keep a pending cue alive.
                ElementType::Other(kind) => {
                    debug!(kind = %kind, "Skipping non-filmable element");
                }
            }
        }

        segments
    }
}

/// Unique scene numbers in screenplay order.
///
/// An explicit number is kept the first time it appears. Unnumbered and
/// repeated scenes take the first free number from their 1-based position on,
/// skipping every number some other scene claims explicitly.
pub fn assign_scene_numbers(screenplay: &Screenplay) -> Vec<u32> {
    let explicit: HashSet<u32> = screenplay
        .scenes
        .iter()
        .map(|s| s.scene_number)
        .filter(|n| *n > 0)
        .collect();
    let mut taken = HashSet::new();

    screenplay
        .scenes
        .iter()
        .enumerate()
        .map(|(idx, scene)| {
            let n = scene.scene_number;
            if n > 0 && taken.insert(n) {
                return n;
            }
            let mut candidate = idx as u32 + 1;
            while explicit.contains(&candidate) || taken.contains(&candidate) {
                candidate += 1;
            }
            taken.insert(candidate);
            candidate
        })
        .collect()
}

/// Classify an action paragraph. First matching check wins.
pub fn classify_action(paragraph: &str, allows_climax: bool) -> ContentTrigger {
    if has_character_introduction(paragraph) {
        return ContentTrigger::NewCharacterEnters;
    }
    if first_keyword_hit(paragraph, CLIMAX_KEYWORDS).is_some() {
        return if allows_climax {
            ContentTrigger::ClimaxMoment
        } else {
            ContentTrigger::ActionBeat
        };
    }
    if first_keyword_hit(paragraph, REVELATION_KEYWORDS).is_some() {
        return ContentTrigger::Revelation;
    }
    if first_keyword_hit(paragraph, EMOTIONAL_KEYWORDS).is_some() {
        return ContentTrigger::EmotionalMoment;
    }
    if first_keyword_hit(paragraph, TENSION_KEYWORDS).is_some() {
        return ContentTrigger::TensionBuilding;
    }
    ContentTrigger::ActionBeat
}

fn boosted_intensity(base: f64, trigger: ContentTrigger) -> f64 {
    let boost = match trigger {
        ContentTrigger::ClimaxMoment => CLIMAX_BOOST,
        ContentTrigger::EmotionalMoment => EMOTIONAL_BOOST,
        _ => 0.0,
    };
    (base + boost).clamp(0.0, 1.0)
}

/// Strip cue extensions: `MARA (V.O.)` → `MARA`.
fn cue_name(cue: &str) -> String {
    cue.split('(').next().unwrap_or_default().trim().to_string()
}

/// Scene characters named in the paragraph, by full or first name.
fn characters_mentioned(paragraph: &str, characters: &[String]) -> Vec<String> {
    let lower = paragraph.to_lowercase();
    characters
        .iter()
        .filter(|name| {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                return false;
            }
            let first = name.split_whitespace().next().unwrap_or_default();
            contains_phrase(&lower, &name) || (first.len() > 1 && contains_phrase(&lower, first))
        })
        .cloned()
        .collect()
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whole-word match: `ed` is found in "ed waits" but not in "opened".
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let needle = words(phrase);
    if needle.is_empty() {
        return false;
    }
    words(haystack)
        .windows(needle.len())
        .any(|window| window == needle.as_slice())
}

/// Scene contract: explicit fields win, gaps are derived from beat and polarity.
fn derive_visual_intent(scene: &ScreenplayScene) -> SceneVisualIntent {
    let beat = StoryBeat::parse(&scene.beat);
    let polarity = Polarity::parse(&scene.emotional_polarity);

    let conflict_axis = non_blank(scene.conflict_axis.as_deref()).unwrap_or_else(|| {
        beat.map_or("want vs obstacle", |b| b.default_conflict_axis())
            .to_string()
    });

    let (default_start, default_end) = match polarity {
        Some(Polarity::Positive) => ("uncertain", "hopeful"),
        Some(Polarity::Negative) => ("hopeful", "shaken"),
        None => ("guarded", "unresolved"),
    };
    let emotional_start =
        non_blank(scene.emotional_start.as_deref()).unwrap_or_else(|| default_start.to_string());
    let emotional_end =
        non_blank(scene.emotional_end.as_deref()).unwrap_or_else(|| default_end.to_string());

    let continuity_anchors = if scene.continuity_anchors.is_empty() {
        let location = SluglineInfo::parse(&scene.slugline).location_phrase();
        std::iter::once(location)
            .chain(scene.characters_present.iter().cloned())
            .filter(|a| !a.trim().is_empty())
            .collect()
    } else {
        scene.continuity_anchors.clone()
    };

    SceneVisualIntent {
        conflict_axis,
        emotional_start,
        emotional_end,
        continuity_anchors,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
