//! Structural and narrative-contract checks over a finished shot list.
//!
//! Validation never fails a run. Errors mark the list as invalid (degraded),
//! warnings are advisory.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{ShotList, TransitionType};
use crate::services::stage::PipelineStage;
use crate::ShotlistError;

/// Minimum share of plain cuts in a long list.
pub const MIN_CUT_RATIO: f64 = 0.7;
/// Lists shorter than this skip the cut-ratio check.
pub const MIN_SHOTS_FOR_CUT_RATIO: usize = 10;
/// Lists longer than this must flag at least one disaster moment.
pub const DISASTER_REQUIRED_ABOVE: usize = 20;
pub const MIN_DURATION_RATIO: f64 = 0.5;
pub const MAX_DURATION_RATIO: f64 = 2.0;
pub const DEFAULT_DENSITY_THRESHOLD: usize = 25;

/// At most this many shot ids are listed in a single error message.
const MAX_LISTED_IDS: usize = 5;

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// False if any error was recorded.
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// All findings with a severity prefix, errors first.
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| format!("ERROR: {}", e))
            .chain(self.warnings.iter().map(|w| format!("WARNING: {}", w)))
            .collect()
    }
}

// ============================================================================
// Validator
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Validator {
    density_threshold: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_DENSITY_THRESHOLD)
    }
}

impl Validator {
    pub fn new(density_threshold: usize) -> Self {
        Self { density_threshold }
    }

    /// Check `shot_list` against the screenplay it was planned from.
    ///
    /// `expected_total_duration <= 0` disables the duration range check.
    pub fn validate(
        &self,
        shot_list: &ShotList,
        expected_scene_count: usize,
        expected_total_duration: f64,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        let actual = shot_list.shot_count();
        if actual == 0 {
            report.add_error("Shot list is empty");
            return report;
        }

        if shot_list.total_shots != actual {
            report.add_error(format!(
                "total_shots is {} but the list holds {} shots",
                shot_list.total_shots, actual
            ));
        }

        if shot_list.scenes.len() != expected_scene_count {
            report.add_error(format!(
                "Expected {} scenes, found {}",
                expected_scene_count,
                shot_list.scenes.len()
            ));
        }

        check_shots(shot_list, &mut report);
        check_cut_ratio(shot_list, &mut report);
        check_total_duration(shot_list, expected_total_duration, &mut report);
        check_global_order(shot_list, &mut report);
        check_disaster_moments(shot_list, &mut report);
        check_scene_intent(shot_list, &mut report);

        for scene in &shot_list.scenes {
            if scene.shots.len() > self.density_threshold {
                report.add_warning(format!(
                    "Scene {} has {} shots (threshold {}), possible over-decomposition",
                    scene.scene_number,
                    scene.shots.len(),
                    self.density_threshold
                ));
            }
        }

        for w in &report.warnings {
            warn!("{}", w);
        }
        info!(
            valid = report.is_valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Shot list validated"
        );
        report
    }
}

/// Validate with the default density threshold.
pub fn validate(
    shot_list: &ShotList,
    expected_scene_count: usize,
    expected_total_duration: f64,
) -> ValidationReport {
    Validator::default().validate(shot_list, expected_scene_count, expected_total_duration)
}

fn check_shots(shot_list: &ShotList, report: &mut ValidationReport) {
    let mut bad_duration = Vec::new();
    let mut missing_prompt = Vec::new();
    let mut missing_axis = Vec::new();
    let mut missing_cinematography = Vec::new();
    let mut duplicate_id = Vec::new();
    let mut seen = HashSet::new();

    for shot in shot_list.shots() {
        if !seen.insert(shot.shot_id.as_str()) {
            duplicate_id.push(shot.shot_id.as_str());
        }
        if shot.duration_seconds.is_nan() || shot.duration_seconds <= 0.0 {
            bad_duration.push(shot.shot_id.as_str());
        }
        if [&shot.setting_prompt, &shot.scene_prompt, &shot.video_prompt]
            .iter()
            .any(|p| p.trim().is_empty())
        {
            missing_prompt.push(shot.shot_id.as_str());
        }
        if shot.conflict_axis.trim().is_empty() {
            missing_axis.push(shot.shot_id.as_str());
        }
        let complete = shot
            .cinematography
            .as_ref()
            .is_some_and(|c| c.missing_fields().is_empty());
        if !complete {
            missing_cinematography.push(shot.shot_id.as_str());
        }
    }

    let checks = [
        (bad_duration, "non-positive duration"),
        (missing_prompt, "missing a generation prompt"),
        (missing_axis, "missing conflict axis"),
        (missing_cinematography, "incomplete cinematography"),
        (duplicate_id, "a duplicate shot id"),
    ];
    for (ids, what) in checks {
        if !ids.is_empty() {
            report.add_error(format!("{} shots with {}: {}", ids.len(), what, list_ids(&ids)));
        }
    }
}

fn check_cut_ratio(shot_list: &ShotList, report: &mut ValidationReport) {
    let total = shot_list.shot_count();
    if total < MIN_SHOTS_FOR_CUT_RATIO {
        return;
    }
    let cuts = shot_list
        .shots()
        .filter(|s| s.transition_to_next == Some(TransitionType::Cut))
        .count();
    let ratio = cuts as f64 / total as f64;
    if ratio < MIN_CUT_RATIO {
        report.add_error(format!(
            "Only {:.0}% of transitions are plain cuts (minimum {:.0}%)",
            ratio * 100.0,
            MIN_CUT_RATIO * 100.0
        ));
    }
}

fn check_total_duration(shot_list: &ShotList, expected: f64, report: &mut ValidationReport) {
    if expected <= 0.0 {
        return;
    }
    let total: f64 = shot_list.scenes.iter().map(|s| s.duration_seconds()).sum();
    let (low, high) = (expected * MIN_DURATION_RATIO, expected * MAX_DURATION_RATIO);
    if total < low || total > high {
        report.add_error(format!(
            "Total duration {:.1}s outside [{:.1}s, {:.1}s] for expected {:.1}s",
            total, low, high, expected
        ));
    }
}

fn check_global_order(shot_list: &ShotList, report: &mut ValidationReport) {
    let broken = shot_list
        .shots()
        .enumerate()
        .find(|(i, s)| s.global_order as usize != i + 1);
    if let Some((i, shot)) = broken {
        report.add_error(format!(
            "global_order is not contiguous: shot {} at position {} has order {}",
            shot.shot_id,
            i + 1,
            shot.global_order
        ));
    }
}

fn check_disaster_moments(shot_list: &ShotList, report: &mut ValidationReport) {
    let total = shot_list.shot_count();
    if total > DISASTER_REQUIRED_ABOVE && !shot_list.shots().any(|s| s.is_disaster_moment) {
        report.add_error(format!("No disaster moments flagged across {} shots", total));
    }
}

fn check_scene_intent(shot_list: &ShotList, report: &mut ValidationReport) {
    for scene in &shot_list.scenes {
        let intent = &scene.visual_intent;
        let mut missing = Vec::new();
        if intent.conflict_axis.trim().is_empty() {
            missing.push("conflict_axis");
        }
        if intent.emotional_start.trim().is_empty() {
            missing.push("emotional_start");
        }
        if intent.emotional_end.trim().is_empty() {
            missing.push("emotional_end");
        }
        if !missing.is_empty() {
            report.add_error(format!(
                "Scene {} missing visual intent: {}",
                scene.scene_number,
                missing.join(", ")
            ));
        }
    }
}

fn list_ids(ids: &[&str]) -> String {
    let shown = ids.iter().take(MAX_LISTED_IDS).copied().collect::<Vec<_>>().join(", ");
    if ids.len() > MAX_LISTED_IDS {
        format!("{} (+{} more)", shown, ids.len() - MAX_LISTED_IDS)
    } else {
        shown
    }
}

// ============================================================================
// Final Stage
// ============================================================================

/// Step 7: refresh totals and validate against the list's own scene
/// targets. Findings are logged, the list passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationStage {
    validator: Validator,
}

impl ValidationStage {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }
}

impl PipelineStage for ValidationStage {
    fn step(&self) -> u8 {
        7
    }

    fn name(&self) -> &'static str {
        "validation"
    }

    fn process(&self, mut shot_list: ShotList) -> Result<ShotList, ShotlistError> {
        shot_list.recompute_totals();
        let expected: f64 = shot_list
            .scenes
            .iter()
            .map(|s| s.target_duration_seconds.max(0.0))
            .sum();
        let report = self
            .validator
            .validate(&shot_list, shot_list.scenes.len(), expected);
        for e in &report.errors {
            warn!("Validation error: {}", e);
        }
        Ok(shot_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CameraHeight, Cinematography, ContentTrigger, DistanceBand, SceneShots, SceneVisualIntent,
        Shot, ShotSegment, StoryFormat,
    };

    fn complete_shot(scene: u32, index: usize, order: u32) -> Shot {
        let mut s = Shot::from_segment(
            scene,
            ShotSegment {
                index,
                trigger: ContentTrigger::ActionBeat,
                content: "c".into(),
                dialogue: None,
                characters_in_frame: vec![],
                emotional_intensity: 0.5,
                is_disaster_moment: false,
            },
            order,
            "want vs fear",
        );
        s.duration_seconds = 2.0;
        s.transition_to_next = Some(TransitionType::Cut);
        s.setting_prompt = "set".into();
        s.scene_prompt = "scene".into();
        s.video_prompt = "video".into();
        s.cinematography = Some(Cinematography {
            lens_mm: 35,
            camera_height: CameraHeight::EyeLevel,
            distance_band: DistanceBand::Mid,
            lighting_intent: "l".into(),
            blocking_intent: "b".into(),
            generation_profile: "g".into(),
        });
        s
    }

    fn intent() -> SceneVisualIntent {
        SceneVisualIntent {
            conflict_axis: "want vs fear".into(),
            emotional_start: "calm".into(),
            emotional_end: "shaken".into(),
            continuity_anchors: vec![],
        }
    }

    /// `scenes` scenes with `per_scene` valid shots each.
    fn valid_list(scenes: u32, per_scene: usize) -> ShotList {
        let mut list = ShotList::new("p", "t", StoryFormat::ShortFilm);
        let mut order = 1;
        for n in 1..=scenes {
            let shots = (0..per_scene)
                .map(|i| {
                    let s = complete_shot(n, i, order);
                    order += 1;
                    s
                })
                .collect();
            list.scenes.push(SceneShots {
                scene_number: n,
                slugline: "INT. A - DAY".into(),
                beat: "Setup".into(),
                polarity: None,
                visual_intent: intent(),
                target_duration_seconds: 0.0,
                shots,
            });
        }
        list.recompute_totals();
        list
    }

    #[test]
    fn test_valid_list_passes() {
        let list = valid_list(2, 3);
        let report = validate(&list, 2, 12.0);
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_list_fails() {
        let list = ShotList::new("p", "t", StoryFormat::ShortFilm);
        let report = validate(&list, 0, 0.0);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Shot list is empty".to_string()]);
    }

    #[test]
    fn test_count_mismatches() {
        let mut list = valid_list(2, 3);
        list.total_shots = 7;
        let report = validate(&list, 3, 0.0);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_bad_duration_and_missing_prompt() {
        let mut list = valid_list(1, 3);
        list.scenes[0].shots[1].duration_seconds = 0.0;
        list.scenes[0].shots[2].video_prompt.clear();
        let report = validate(&list, 1, 0.0);
        assert!(!report.is_valid);
        insta::assert_snapshot!(report.errors.join("\n"), @r"
        1 shots with non-positive duration: 1:2
        1 shots with missing a generation prompt: 1:3
        ");
    }

    #[test]
    fn test_duplicate_shot_ids() {
        let mut list = valid_list(2, 2);
        for s in list.scenes[1].shots.iter_mut() {
            s.shot_id = s.shot_id.replacen('2', "1", 1);
        }
        let report = validate(&list, 2, 0.0);
        assert_eq!(
            report.errors,
            vec!["2 shots with a duplicate shot id: 1:1, 1:2".to_string()]
        );
    }

    #[test]
    fn test_cut_ratio_only_for_long_lists() {
        let mut short = valid_list(1, 3);
        for s in short.shots_mut() {
            s.transition_to_next = Some(TransitionType::Dissolve);
        }
        assert!(validate(&short, 1, 0.0).is_valid);

        let mut long = valid_list(1, 10);
        for s in long.shots_mut().take(4) {
            s.transition_to_next = Some(TransitionType::Dissolve);
        }
        let report = validate(&long, 1, 0.0);
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("60%"));
    }

    #[test]
    fn test_duration_range() {
        let list = valid_list(1, 3); // 6s total
        assert!(validate(&list, 1, 12.0).is_valid);
        assert!(!validate(&list, 1, 12.1).is_valid);
        assert!(validate(&list, 1, 3.0).is_valid);
        assert!(!validate(&list, 1, 2.9).is_valid);
        assert!(validate(&list, 1, 0.0).is_valid);
    }

    #[test]
    fn test_global_order_gap() {
        let mut list = valid_list(1, 3);
        list.scenes[0].shots[2].global_order = 5;
        let report = validate(&list, 1, 0.0);
        assert!(report.errors[0].starts_with("global_order is not contiguous"));
    }

    #[test]
    fn test_disaster_required_for_long_lists() {
        let mut list = valid_list(3, 7);
        assert!(!validate(&list, 3, 0.0).is_valid);
        list.scenes[1].shots[2].is_disaster_moment = true;
        assert!(validate(&list, 3, 0.0).is_valid);
    }

    #[test]
    fn test_contract_fields() {
        let mut list = valid_list(1, 3);
        list.scenes[0].visual_intent.emotional_end.clear();
        list.scenes[0].shots[0].conflict_axis.clear();
        list.scenes[0].shots[1].cinematography = None;
        let report = validate(&list, 1, 0.0);
        assert_eq!(report.errors.len(), 3);
        assert!(report
            .errors
            .iter()
            .any(|e| e == "Scene 1 missing visual intent: emotional_end"));
    }

    #[test]
    fn test_density_warning_is_soft() {
        let list = valid_list(1, 6);
        let report = Validator::new(5).validate(&list, 1, 0.0);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.messages().len(), 1);
    }

    #[test]
    fn test_list_ids_truncates() {
        let ids = ["a", "b", "c", "d", "e", "f", "g"];
        assert_eq!(list_ids(&ids), "a, b, c, d, e (+2 more)");
    }

    #[test]
    fn test_validation_stage_refreshes_totals() {
        let mut list = valid_list(1, 3);
        list.total_shots = 0;
        let list = ValidationStage::default().process(list).unwrap();
        assert_eq!(list.total_shots, 3);
    }
}
