//! Input artifacts: the screenplay and the hero/character sheet.
//!
//! Both are produced upstream and are free-form, so every field is permissive:
//! missing values fall back to empty strings, empty lists and zero durations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Screenplay
// ============================================================================

/// A full screenplay as emitted by the story pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Screenplay {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scenes: Vec<ScreenplayScene>,
}

impl Screenplay {
    /// Sum of every scene's declared duration.
    pub fn total_estimated_duration(&self) -> f64 {
        self.scenes
            .iter()
            .map(|s| s.estimated_duration_seconds.max(0.0))
            .sum()
    }
}

/// One screenplay scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScreenplayScene {
    #[serde(default)]
    pub scene_number: u32,
    #[serde(default)]
    pub slugline: String,
    #[serde(default)]
    pub beat: String,
    #[serde(default)]
    pub emotional_polarity: String,
    #[serde(default)]
    pub characters_present: Vec<String>,
    #[serde(default)]
    pub estimated_duration_seconds: f64,
    #[serde(default)]
    pub elements: Vec<ScreenplayElement>,
    /// Optional structure-analysis fields; derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_end: Option<String>,
    #[serde(default)]
    pub continuity_anchors: Vec<String>,
}

/// A typed line of screenplay text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScreenplayElement {
    pub element_type: ElementType,
    #[serde(default)]
    pub content: String,
}

impl ScreenplayElement {
    pub fn new(element_type: ElementType, content: impl Into<String>) -> Self {
        Self {
            element_type,
            content: content.into(),
        }
    }
}

/// Screenplay element kind.
///
/// Serializes as lowercase strings. Kinds the planner does not film
/// (parentheticals, transitions, ...) are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, JsonSchema)]
pub enum ElementType {
    Slugline,
    Action,
    Character,
    Dialogue,
    Other(String),
}

impl Serialize for ElementType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ElementType::Slugline => serializer.serialize_str("slugline"),
            ElementType::Action => serializer.serialize_str("action"),
            ElementType::Character => serializer.serialize_str("character"),
            ElementType::Dialogue => serializer.serialize_str("dialogue"),
            ElementType::Other(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.to_lowercase().as_str() {
            "slugline" | "scene_heading" => ElementType::Slugline,
            "action" => ElementType::Action,
            "character" => ElementType::Character,
            "dialogue" => ElementType::Dialogue,
            _ => ElementType::Other(s),
        })
    }
}

// ============================================================================
// Hero / Character Sheet
// ============================================================================

/// Character appearance artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct HeroArtifact {
    #[serde(default)]
    pub hero: Option<CharacterProfile>,
    #[serde(default)]
    pub antagonist: Option<CharacterProfile>,
}

/// Name plus a visual descriptor used as a prompt prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CharacterProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub adjective_descriptor: String,
}

impl HeroArtifact {
    /// Find the profile whose name matches `name`.
    ///
    /// Matches the full name or the first name, ignoring case, so a cue
    /// like `MARA` finds `Mara Voss`.
    pub fn lookup(&self, name: &str) -> Option<&CharacterProfile> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        [self.hero.as_ref(), self.antagonist.as_ref()]
            .into_iter()
            .flatten()
            .find(|p| {
                let full = p.name.trim().to_lowercase();
                if full.is_empty() {
                    return false;
                }
                let first = full.split_whitespace().next().unwrap_or_default();
                full == needle || first == needle
            })
    }
}
