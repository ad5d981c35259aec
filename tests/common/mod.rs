#![allow(dead_code)]

pub mod builders;

use shotlist::config::ShotlistConfig;
use shotlist::models::{HeroArtifact, Screenplay, ShotList, StoryFormat};
use shotlist::services::{RunOutcome, ShotPlanner};

/// Run the full pipeline without touching the filesystem.
pub fn plan(screenplay: &Screenplay, format: StoryFormat) -> RunOutcome {
    plan_with_hero(screenplay, None, format)
}

pub fn plan_with_hero(
    screenplay: &Screenplay,
    hero: Option<&HeroArtifact>,
    format: StoryFormat,
) -> RunOutcome {
    ShotPlanner::new(ShotlistConfig::default())
        .without_persistence()
        .run(screenplay, hero, format, "test-project")
}

/// Plan and return the list, panicking on a failed run.
pub fn plan_list(screenplay: &Screenplay, format: StoryFormat) -> ShotList {
    let outcome = plan(screenplay, format);
    assert!(outcome.success, "run failed: {}", outcome.message);
    outcome.shot_list
}
