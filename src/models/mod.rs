pub mod rules;
pub mod screenplay;
pub mod shot;
pub mod vocab;

pub use rules::StoryBeat;
pub use screenplay::{
    CharacterProfile, ElementType, HeroArtifact, Screenplay, ScreenplayElement, ScreenplayScene,
};
pub use shot::{
    Cinematography, DialogueLine, SceneShots, SceneVisualIntent, Shot, ShotList, ShotListSummary,
    ShotSegment,
};
pub use vocab::{
    CameraHeight, CameraMovement, ContentTrigger, DistanceBand, InitImageSource, PacingCurve,
    Polarity, ShotType, StoryFormat, TransitionType,
};
