//! Rule tables consulted by the pipeline stages.
//!
//! Defaults live here as exhaustive `match` tables; the override logic that
//! sits on top of them lives in the stage modules under [`crate::services`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::vocab::{CameraMovement, ContentTrigger, PacingCurve, ShotType};

/// Dialogue shot/reverse-shot cycle.
pub const DIALOGUE_CYCLE: [ShotType; 3] = [
    ShotType::OverShoulder,
    ShotType::MediumClose,
    ShotType::CloseUp,
];

/// High-intensity framings, ordered from least to most extreme.
pub const HIGH_INTENSITY_SHOTS: [ShotType; 3] = [
    ShotType::MediumClose,
    ShotType::CloseUp,
    ShotType::ExtremeCloseUp,
];

pub const MEDIUM_INTENSITY_SHOTS: [ShotType; 2] = [ShotType::Medium, ShotType::MediumClose];

pub const HIGH_INTENSITY_THRESHOLD: f64 = 0.7;
pub const MEDIUM_INTENSITY_THRESHOLD: f64 = 0.5;

/// Intensity used when a beat label is missing or unrecognised.
pub const DEFAULT_BEAT_INTENSITY: f64 = 0.5;

// ============================================================================
// Trigger Tables
// ============================================================================

/// Default framing for a trigger.
pub fn default_shot_type(trigger: ContentTrigger) -> ShotType {
    match trigger {
        ContentTrigger::LocationEstablish => ShotType::Wide,
        ContentTrigger::NewCharacterEnters => ShotType::Medium,
        ContentTrigger::DialogueExchange => ShotType::OverShoulder,
        ContentTrigger::ActionBeat => ShotType::Medium,
        ContentTrigger::EmotionalMoment => ShotType::CloseUp,
        ContentTrigger::Revelation => ShotType::MediumClose,
        ContentTrigger::TimeSkip => ShotType::ExtremeWide,
        ContentTrigger::TensionBuilding => ShotType::Pov,
        ContentTrigger::ClimaxMoment => ShotType::Wide,
        ContentTrigger::Reaction => ShotType::CloseUp,
    }
}

/// Default camera movement for a trigger.
pub fn default_camera_movement(trigger: ContentTrigger) -> CameraMovement {
    match trigger {
        ContentTrigger::LocationEstablish => CameraMovement::PanRight,
        ContentTrigger::NewCharacterEnters => CameraMovement::Tracking,
        ContentTrigger::DialogueExchange => CameraMovement::Static,
        ContentTrigger::ActionBeat => CameraMovement::Tracking,
        ContentTrigger::EmotionalMoment => CameraMovement::PushIn,
        ContentTrigger::Revelation => CameraMovement::PullOut,
        ContentTrigger::TimeSkip => CameraMovement::Crane,
        ContentTrigger::TensionBuilding => CameraMovement::PushIn,
        ContentTrigger::ClimaxMoment => CameraMovement::Handheld,
        ContentTrigger::Reaction => CameraMovement::Static,
    }
}

/// Base on-screen duration in seconds before any multipliers.
pub fn base_duration(trigger: ContentTrigger) -> f64 {
    match trigger {
        ContentTrigger::LocationEstablish => 4.0,
        ContentTrigger::NewCharacterEnters => 3.5,
        ContentTrigger::DialogueExchange => 3.0,
        ContentTrigger::ActionBeat => 2.5,
        ContentTrigger::EmotionalMoment => 4.0,
        ContentTrigger::Revelation => 3.5,
        ContentTrigger::TimeSkip => 2.0,
        ContentTrigger::TensionBuilding => 3.0,
        ContentTrigger::ClimaxMoment => 2.5,
        ContentTrigger::Reaction => 2.0,
    }
}

// ============================================================================
// Story Beats
// ============================================================================

/// Structural story-position label (fifteen-beat outline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoryBeat {
    OpeningImage,
    ThemeStated,
    Setup,
    Catalyst,
    Debate,
    BreakIntoTwo,
    BStory,
    FunAndGames,
    Midpoint,
    BadGuysCloseIn,
    AllIsLost,
    DarkNightOfTheSoul,
    BreakIntoThree,
    Finale,
    FinalImage,
}

impl StoryBeat {
    /// Parse a free-form beat label ("All Is Lost", "break-into-three", ...).
    pub fn parse(label: &str) -> Option<Self> {
        let key = normalize_beat_label(label);
        let beat = match key.as_str() {
            "opening_image" | "opening" => StoryBeat::OpeningImage,
            "theme_stated" => StoryBeat::ThemeStated,
            "setup" | "set_up" => StoryBeat::Setup,
            "catalyst" | "inciting_incident" => StoryBeat::Catalyst,
            "debate" => StoryBeat::Debate,
            "break_into_two" | "break_into_2" => StoryBeat::BreakIntoTwo,
            "b_story" | "bstory" => StoryBeat::BStory,
            "fun_and_games" | "fun_games" => StoryBeat::FunAndGames,
            "midpoint" | "mid_point" => StoryBeat::Midpoint,
            "bad_guys_close_in" => StoryBeat::BadGuysCloseIn,
            "all_is_lost" => StoryBeat::AllIsLost,
            "dark_night_of_the_soul" | "dark_night" => StoryBeat::DarkNightOfTheSoul,
            "break_into_three" | "break_into_3" => StoryBeat::BreakIntoThree,
            "finale" | "climax" => StoryBeat::Finale,
            "final_image" | "closing_image" => StoryBeat::FinalImage,
            _ => return None,
        };
        Some(beat)
    }

    /// Beats that mark a major plot turn.
    pub fn is_disaster(&self) -> bool {
        matches!(
            self,
            StoryBeat::Catalyst
                | StoryBeat::Midpoint
                | StoryBeat::AllIsLost
                | StoryBeat::BreakIntoThree
        )
    }

    /// Beats that close an act.
    pub fn is_act_boundary(&self) -> bool {
        matches!(self, StoryBeat::BreakIntoTwo | StoryBeat::BreakIntoThree)
    }

    /// Beats whose action may escalate to a climax moment.
    ///
    /// Finale-family beats plus the midpoint.
    pub fn allows_climax(&self) -> bool {
        matches!(
            self,
            StoryBeat::Finale
                | StoryBeat::AllIsLost
                | StoryBeat::BreakIntoThree
                | StoryBeat::Midpoint
        )
    }

    pub fn base_intensity(&self) -> f64 {
        match self {
            StoryBeat::OpeningImage => 0.3,
            StoryBeat::ThemeStated => 0.3,
            StoryBeat::Setup => 0.3,
            StoryBeat::Catalyst => 0.6,
            StoryBeat::Debate => 0.4,
            StoryBeat::BreakIntoTwo => 0.5,
            StoryBeat::BStory => 0.4,
            StoryBeat::FunAndGames => 0.5,
            StoryBeat::Midpoint => 0.7,
            StoryBeat::BadGuysCloseIn => 0.6,
            StoryBeat::AllIsLost => 0.8,
            StoryBeat::DarkNightOfTheSoul => 0.6,
            StoryBeat::BreakIntoThree => 0.7,
            StoryBeat::Finale => 0.9,
            StoryBeat::FinalImage => 0.4,
        }
    }

    pub fn pacing_curve(&self) -> PacingCurve {
        match self {
            StoryBeat::Finale | StoryBeat::Midpoint => PacingCurve::Rapid,
            StoryBeat::Catalyst
            | StoryBeat::FunAndGames
            | StoryBeat::BadGuysCloseIn
            | StoryBeat::BreakIntoThree => PacingCurve::Accelerating,
            StoryBeat::OpeningImage
            | StoryBeat::ThemeStated
            | StoryBeat::AllIsLost
            | StoryBeat::DarkNightOfTheSoul
            | StoryBeat::FinalImage => PacingCurve::Decelerating,
            StoryBeat::Setup | StoryBeat::Debate | StoryBeat::BreakIntoTwo | StoryBeat::BStory => {
                PacingCurve::Moderate
            }
        }
    }

    /// Coarse conflict framing used when a scene carries no explicit axis.
    pub fn default_conflict_axis(&self) -> &'static str {
        match self {
            StoryBeat::OpeningImage | StoryBeat::ThemeStated | StoryBeat::Setup => {
                "status quo vs unspoken want"
            }
            StoryBeat::Catalyst | StoryBeat::Debate => "comfort vs call to change",
            StoryBeat::BreakIntoTwo | StoryBeat::BStory | StoryBeat::FunAndGames => {
                "new world vs old habits"
            }
            StoryBeat::Midpoint | StoryBeat::BadGuysCloseIn => "false victory vs rising threat",
            StoryBeat::AllIsLost | StoryBeat::DarkNightOfTheSoul => "hope vs despair",
            StoryBeat::BreakIntoThree | StoryBeat::Finale | StoryBeat::FinalImage => {
                "protagonist vs antagonist"
            }
        }
    }
}

/// Base intensity for an optional beat.
pub fn beat_intensity(beat: Option<StoryBeat>) -> f64 {
    beat.map_or(DEFAULT_BEAT_INTENSITY, |b| b.base_intensity())
}

/// Pacing curve for an optional beat.
pub fn beat_pacing_curve(beat: Option<StoryBeat>) -> PacingCurve {
    beat.map_or(PacingCurve::Moderate, |b| b.pacing_curve())
}

fn normalize_beat_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_beat_labels() {
        assert_eq!(StoryBeat::parse("Midpoint"), Some(StoryBeat::Midpoint));
        assert_eq!(StoryBeat::parse("All Is Lost"), Some(StoryBeat::AllIsLost));
        assert_eq!(
            StoryBeat::parse("break-into-three"),
            Some(StoryBeat::BreakIntoThree)
        );
        assert_eq!(
            StoryBeat::parse("Dark Night of the Soul"),
            Some(StoryBeat::DarkNightOfTheSoul)
        );
        assert_eq!(StoryBeat::parse("Finale "), Some(StoryBeat::Finale));
        assert_eq!(StoryBeat::parse("interlude"), None);
        assert_eq!(StoryBeat::parse(""), None);
    }

    #[test]
    fn test_disaster_beats() {
        let disasters: Vec<_> = [
            StoryBeat::Catalyst,
            StoryBeat::Midpoint,
            StoryBeat::AllIsLost,
            StoryBeat::BreakIntoThree,
        ]
        .into_iter()
        .filter(|b| b.is_disaster())
        .collect();
        assert_eq!(disasters.len(), 4);
        assert!(!StoryBeat::Finale.is_disaster());
        assert!(!StoryBeat::Setup.is_disaster());
    }

    #[test]
    fn test_climax_allowed_for_finale_family_and_midpoint() {
        assert!(StoryBeat::Finale.allows_climax());
        assert!(StoryBeat::AllIsLost.allows_climax());
        assert!(StoryBeat::BreakIntoThree.allows_climax());
        assert!(StoryBeat::Midpoint.allows_climax());
        assert!(!StoryBeat::Catalyst.allows_climax());
        assert!(!StoryBeat::Setup.allows_climax());
        assert!(!StoryBeat::FunAndGames.allows_climax());
    }

    #[test]
    fn test_act_boundaries() {
        assert!(StoryBeat::BreakIntoTwo.is_act_boundary());
        assert!(StoryBeat::BreakIntoThree.is_act_boundary());
        assert!(!StoryBeat::Midpoint.is_act_boundary());
    }

    #[test]
    fn test_unknown_beat_defaults() {
        assert_eq!(beat_intensity(None), DEFAULT_BEAT_INTENSITY);
        assert_eq!(beat_pacing_curve(None), PacingCurve::Moderate);
    }

    #[test]
    fn test_default_tables_cover_establish() {
        assert_eq!(
            default_shot_type(ContentTrigger::LocationEstablish),
            ShotType::Wide
        );
        assert_eq!(
            default_camera_movement(ContentTrigger::ClimaxMoment),
            CameraMovement::Handheld
        );
        assert!(base_duration(ContentTrigger::Reaction) > 0.0);
    }
}
