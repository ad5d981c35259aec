//! Closed vocabularies shared by every pipeline stage.
//!
//! Triggers, framings, camera movements and transitions are exhaustive enums so
//! the rule tables in [`crate::models::rules`] must be revisited whenever a new
//! member is added.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Content Triggers
// ============================================================================

/// The semantic reason a new shot begins.
///
/// Assigned once during decomposition and never altered by later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentTrigger {
    LocationEstablish,
    NewCharacterEnters,
    DialogueExchange,
    ActionBeat,
    EmotionalMoment,
    Revelation,
    TimeSkip,
    TensionBuilding,
    ClimaxMoment,
    Reaction,
}

impl ContentTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentTrigger::LocationEstablish => "LOCATION_ESTABLISH",
            ContentTrigger::NewCharacterEnters => "NEW_CHARACTER_ENTERS",
            ContentTrigger::DialogueExchange => "DIALOGUE_EXCHANGE",
            ContentTrigger::ActionBeat => "ACTION_BEAT",
            ContentTrigger::EmotionalMoment => "EMOTIONAL_MOMENT",
            ContentTrigger::Revelation => "REVELATION",
            ContentTrigger::TimeSkip => "TIME_SKIP",
            ContentTrigger::TensionBuilding => "TENSION_BUILDING",
            ContentTrigger::ClimaxMoment => "CLIMAX_MOMENT",
            ContentTrigger::Reaction => "REACTION",
        }
    }
}

impl std::fmt::Display for ContentTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Framing, Movement, Transition
// ============================================================================

/// Camera framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotType {
    ExtremeWide,
    Wide,
    Medium,
    MediumClose,
    CloseUp,
    ExtremeCloseUp,
    OverShoulder,
    Pov,
    TwoShot,
    Group,
    Insert,
}

impl ShotType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::ExtremeWide => "EXTREME_WIDE",
            ShotType::Wide => "WIDE",
            ShotType::Medium => "MEDIUM",
            ShotType::MediumClose => "MEDIUM_CLOSE",
            ShotType::CloseUp => "CLOSE_UP",
            ShotType::ExtremeCloseUp => "EXTREME_CLOSE_UP",
            ShotType::OverShoulder => "OVER_SHOULDER",
            ShotType::Pov => "POV",
            ShotType::TwoShot => "TWO_SHOT",
            ShotType::Group => "GROUP",
            ShotType::Insert => "INSERT",
        }
    }
}

impl std::fmt::Display for ShotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Camera motion during a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CameraMovement {
    Static,
    PanLeft,
    PanRight,
    TiltUp,
    TiltDown,
    PushIn,
    PullOut,
    Tracking,
    Handheld,
    Crane,
    Orbit,
}

impl CameraMovement {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMovement::Static => "STATIC",
            CameraMovement::PanLeft => "PAN_LEFT",
            CameraMovement::PanRight => "PAN_RIGHT",
            CameraMovement::TiltUp => "TILT_UP",
            CameraMovement::TiltDown => "TILT_DOWN",
            CameraMovement::PushIn => "PUSH_IN",
            CameraMovement::PullOut => "PULL_OUT",
            CameraMovement::Tracking => "TRACKING",
            CameraMovement::Handheld => "HANDHELD",
            CameraMovement::Crane => "CRANE",
            CameraMovement::Orbit => "ORBIT",
        }
    }
}

impl std::fmt::Display for CameraMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship between a shot and the one that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionType {
    Cut,
    LCut,
    JCut,
    Dissolve,
    FadeToBlack,
    SmashCut,
    MatchCut,
}

impl TransitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::Cut => "CUT",
            TransitionType::LCut => "L_CUT",
            TransitionType::JCut => "J_CUT",
            TransitionType::Dissolve => "DISSOLVE",
            TransitionType::FadeToBlack => "FADE_TO_BLACK",
            TransitionType::SmashCut => "SMASH_CUT",
            TransitionType::MatchCut => "MATCH_CUT",
        }
    }

    /// Crossfade length in seconds. Hard cuts carry none.
    pub fn crossfade_seconds(&self) -> f64 {
        match self {
            TransitionType::Cut | TransitionType::SmashCut | TransitionType::MatchCut => 0.0,
            TransitionType::LCut | TransitionType::JCut => 0.5,
            TransitionType::Dissolve => 1.0,
            TransitionType::FadeToBlack => 1.5,
        }
    }
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Scene-Level Labels
// ============================================================================

/// Target story format. Drives the global pace multiplier and aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoryFormat {
    #[default]
    FeatureFilm,
    ShortFilm,
    SeriesEpisode,
    ShortForm,
}

impl StoryFormat {
    /// Parse from string (case-insensitive, `-` and `_` interchangeable).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "feature_film" | "feature" => Some(StoryFormat::FeatureFilm),
            "short_film" | "short" => Some(StoryFormat::ShortFilm),
            "series_episode" | "series" | "episode" => Some(StoryFormat::SeriesEpisode),
            "short_form" | "social" | "vertical" => Some(StoryFormat::ShortForm),
            _ => None,
        }
    }

    /// Short-form formats compress pacing, feature length expands it.
    pub fn pace_multiplier(&self) -> f64 {
        match self {
            StoryFormat::FeatureFilm => 1.2,
            StoryFormat::ShortFilm => 1.0,
            StoryFormat::SeriesEpisode => 0.9,
            StoryFormat::ShortForm => 0.7,
        }
    }

    pub fn aspect_ratio(&self) -> &'static str {
        match self {
            StoryFormat::FeatureFilm => "2.39:1",
            StoryFormat::ShortFilm | StoryFormat::SeriesEpisode => "16:9",
            StoryFormat::ShortForm => "9:16",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoryFormat::FeatureFilm => "feature_film",
            StoryFormat::ShortFilm => "short_film",
            StoryFormat::SeriesEpisode => "series_episode",
            StoryFormat::ShortForm => "short_form",
        }
    }
}

impl std::fmt::Display for StoryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a scene ends better (`+`) or worse (`-`) for the protagonist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Polarity {
    #[serde(rename = "+")]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl Polarity {
    /// Parse a free-form polarity label. Anything unrecognised is undefined.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "+" | "positive" | "pos" => Some(Polarity::Positive),
            "-" | "negative" | "neg" => Some(Polarity::Negative),
            _ => None,
        }
    }
}

/// Tempo label derived from a scene's structural beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PacingCurve {
    Accelerating,
    Rapid,
    Decelerating,
    Moderate,
}

impl PacingCurve {
    pub fn multiplier(&self) -> f64 {
        match self {
            PacingCurve::Accelerating => 0.9,
            PacingCurve::Rapid => 0.75,
            PacingCurve::Decelerating => 1.15,
            PacingCurve::Moderate => 1.0,
        }
    }
}

/// Where a generator takes the first frame of a shot from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InitImageSource {
    /// Character reference sheet.
    Reference,
    /// Last frame of the preceding shot.
    PreviousFrame,
    /// Freshly generated still.
    Generated,
}

// ============================================================================
// Cinematography Bands
// ============================================================================

/// Vertical camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CameraHeight {
    High,
    EyeLevel,
    Low,
    Overhead,
}

impl CameraHeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraHeight::High => "high",
            CameraHeight::EyeLevel => "eye_level",
            CameraHeight::Low => "low",
            CameraHeight::Overhead => "overhead",
        }
    }
}

/// Subject distance band, coarser than shot type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DistanceBand {
    Far,
    Mid,
    Near,
    Macro,
}

impl DistanceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceBand::Far => "far",
            DistanceBand::Mid => "mid",
            DistanceBand::Near => "near",
            DistanceBand::Macro => "macro",
        }
    }
}
