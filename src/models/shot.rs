//! Shot list aggregate: shots, scene groupings and the root `ShotList`.
//!
//! The `ShotList` is created by decomposition and moved through every later
//! stage. Each stage fills only its own fields on [`Shot`]; fields a stage has
//! not reached yet stay `None` / empty so the validator can tell them apart.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::vocab::{
    CameraHeight, CameraMovement, ContentTrigger, DistanceBand, InitImageSource, PacingCurve,
    Polarity, ShotType, StoryFormat, TransitionType,
};

// ============================================================================
// Segments
// ============================================================================

/// A spoken line attached to a shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Pre-shot unit produced by decomposition. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotSegment {
    pub index: usize,
    pub trigger: ContentTrigger,
    pub content: String,
    pub dialogue: Option<DialogueLine>,
    pub characters_in_frame: Vec<String>,
    pub emotional_intensity: f64,
    pub is_disaster_moment: bool,
}

// ============================================================================
// Shots
// ============================================================================

/// Lens, placement and intent notes for a generator or camera crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Cinematography {
    pub lens_mm: u16,
    pub camera_height: CameraHeight,
    pub distance_band: DistanceBand,
    pub lighting_intent: String,
    pub blocking_intent: String,
    pub generation_profile: String,
}

impl Cinematography {
    /// Names of text fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.lens_mm == 0 {
            missing.push("lens_mm");
        }
        if self.lighting_intent.trim().is_empty() {
            missing.push("lighting_intent");
        }
        if self.blocking_intent.trim().is_empty() {
            missing.push("blocking_intent");
        }
        if self.generation_profile.trim().is_empty() {
            missing.push("generation_profile");
        }
        missing
    }
}

/// One camera shot in the final artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Shot {
    /// `"{scene_number}:{shot_number}"`.
    pub shot_id: String,
    pub scene_number: u32,
    pub shot_number: u32,
    pub global_order: u32,

    // Decomposition
    pub trigger: ContentTrigger,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialogue: Option<DialogueLine>,
    #[serde(default)]
    pub characters_in_frame: Vec<String>,
    pub emotional_intensity: f64,
    #[serde(default)]
    pub is_disaster_moment: bool,
    #[serde(default)]
    pub conflict_axis: String,

    // Shot type
    #[serde(default)]
    pub shot_type: Option<ShotType>,
    #[serde(default)]
    pub shot_type_rationale: String,

    // Camera
    #[serde(default)]
    pub camera_movement: Option<CameraMovement>,
    #[serde(default)]
    pub camera_rationale: String,
    #[serde(default)]
    pub cinematography: Option<Cinematography>,

    // Pacing
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub pacing_curve: Option<PacingCurve>,

    // Transitions
    #[serde(default)]
    pub transition_to_next: Option<TransitionType>,
    #[serde(default)]
    pub transition_duration: f64,

    // Prompts
    #[serde(default)]
    pub setting_prompt: String,
    #[serde(default)]
    pub scene_prompt: String,
    #[serde(default)]
    pub video_prompt: String,
    #[serde(default)]
    pub negative_prompt: String,
    #[serde(default)]
    pub character_prompt_prefix: String,
    #[serde(default)]
    pub ambient_description: String,
    #[serde(default)]
    pub init_image_source: Option<InitImageSource>,
}

impl Shot {
    /// Build an unplanned shot from a decomposed segment.
    pub fn from_segment(
        scene_number: u32,
        segment: ShotSegment,
        global_order: u32,
        conflict_axis: &str,
    ) -> Self {
        let shot_number = segment.index as u32 + 1;
        Self {
            shot_id: format!("{}:{}", scene_number, shot_number),
            scene_number,
            shot_number,
            global_order,
            trigger: segment.trigger,
            content: segment.content,
            dialogue: segment.dialogue,
            characters_in_frame: segment.characters_in_frame,
            emotional_intensity: segment.emotional_intensity,
            is_disaster_moment: segment.is_disaster_moment,
            conflict_axis: conflict_axis.to_string(),
            shot_type: None,
            shot_type_rationale: String::new(),
            camera_movement: None,
            camera_rationale: String::new(),
            cinematography: None,
            duration_seconds: 0.0,
            pacing_curve: None,
            transition_to_next: None,
            transition_duration: 0.0,
            setting_prompt: String::new(),
            scene_prompt: String::new(),
            video_prompt: String::new(),
            negative_prompt: String::new(),
            character_prompt_prefix: String::new(),
            ambient_description: String::new(),
            init_image_source: None,
        }
    }

    pub fn is_dialogue(&self) -> bool {
        self.trigger == ContentTrigger::DialogueExchange
    }

    /// Speaker if the shot carries dialogue, otherwise the first character in frame.
    pub fn primary_character(&self) -> Option<&str> {
        self.dialogue
            .as_ref()
            .map(|d| d.speaker.as_str())
            .filter(|s| !s.is_empty() && *s != "UNKNOWN")
            .or_else(|| self.characters_in_frame.first().map(String::as_str))
    }
}

// ============================================================================
// Scenes
// ============================================================================

/// Narrative contract a scene's shots must honour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneVisualIntent {
    pub conflict_axis: String,
    pub emotional_start: String,
    pub emotional_end: String,
    #[serde(default)]
    pub continuity_anchors: Vec<String>,
}

/// Shots belonging to one screenplay scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneShots {
    pub scene_number: u32,
    pub slugline: String,
    pub beat: String,
    #[serde(default)]
    pub polarity: Option<Polarity>,
    pub visual_intent: SceneVisualIntent,
    /// Declared scene length in seconds; zero disables rescaling.
    #[serde(default)]
    pub target_duration_seconds: f64,
    #[serde(default)]
    pub shots: Vec<Shot>,
}

impl SceneShots {
    pub fn duration_seconds(&self) -> f64 {
        self.shots.iter().map(|s| s.duration_seconds).sum()
    }
}

// ============================================================================
// Shot List
// ============================================================================

/// Root aggregate and sole persisted artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotList {
    pub project_id: String,
    #[serde(default)]
    pub title: String,
    pub format: StoryFormat,
    pub aspect_ratio: String,
    #[serde(default)]
    pub total_shots: usize,
    #[serde(default)]
    pub total_duration_seconds: f64,
    #[serde(default)]
    pub scenes: Vec<SceneShots>,
}

impl ShotList {
    pub fn new(
        project_id: impl Into<String>,
        title: impl Into<String>,
        format: StoryFormat,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            title: title.into(),
            format,
            aspect_ratio: format.aspect_ratio().to_string(),
            total_shots: 0,
            total_duration_seconds: 0.0,
            scenes: Vec::new(),
        }
    }

    /// Placeholder returned by a failed run.
    pub fn empty(project_id: impl Into<String>, format: StoryFormat) -> Self {
        Self::new(project_id, "", format)
    }

    pub fn shots(&self) -> impl Iterator<Item = &Shot> {
        self.scenes.iter().flat_map(|s| s.shots.iter())
    }

    pub fn shots_mut(&mut self) -> impl Iterator<Item = &mut Shot> {
        self.scenes.iter_mut().flat_map(|s| s.shots.iter_mut())
    }

    pub fn shot_count(&self) -> usize {
        self.scenes.iter().map(|s| s.shots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shot_count() == 0
    }

    /// Refresh the denormalized totals from the scene contents.
    pub fn recompute_totals(&mut self) {
        self.total_shots = self.shot_count();
        let total: f64 = self.scenes.iter().map(|s| s.duration_seconds()).sum();
        self.total_duration_seconds = (total * 10.0).round() / 10.0;
    }

    pub fn summary(&self) -> ShotListSummary {
        let mut by_shot_type = BTreeMap::new();
        let mut by_transition = BTreeMap::new();
        let mut disaster_moments = 0;
        for shot in self.shots() {
            if let Some(t) = shot.shot_type {
                *by_shot_type.entry(t.as_str().to_string()).or_insert(0) += 1;
            }
            if let Some(t) = shot.transition_to_next {
                *by_transition.entry(t.as_str().to_string()).or_insert(0) += 1;
            }
            if shot.is_disaster_moment {
                disaster_moments += 1;
            }
        }
        ShotListSummary {
            scenes: self.scenes.len(),
            shots: self.shot_count(),
            duration_seconds: self.total_duration_seconds,
            disaster_moments,
            by_shot_type,
            by_transition,
        }
    }
}

/// Counts used for CLI reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotListSummary {
    pub scenes: usize,
    pub shots: usize,
    pub duration_seconds: f64,
    pub disaster_moments: usize,
    pub by_shot_type: BTreeMap<String, usize>,
    pub by_transition: BTreeMap<String, usize>,
}
