//! Pacing (stage 4): raw per-shot estimates, then per-scene rescale to the
//! declared scene length.

use tracing::{debug, info};

use crate::models::rules::{base_duration, beat_pacing_curve, HIGH_INTENSITY_THRESHOLD};
use crate::models::{Shot, ShotList, StoryBeat, StoryFormat};
use crate::services::stage::PipelineStage;
use crate::ShotlistError;

pub const DEFAULT_WORDS_PER_SECOND: f64 = 2.5;
pub const SPEECH_BUFFER_SECONDS: f64 = 0.5;
pub const DISASTER_MULTIPLIER: f64 = 1.15;
pub const MIN_SHOT_SECONDS: f64 = 1.0;
pub const MAX_SHOT_SECONDS: f64 = 30.0;

const LOW_INTENSITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct PacingStage {
    words_per_second: f64,
}

impl Default for PacingStage {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS_PER_SECOND)
    }
}

impl PacingStage {
    /// Non-positive or non-finite speech rates fall back to the default.
    pub fn new(words_per_second: f64) -> Self {
        let words_per_second = if words_per_second.is_finite() && words_per_second > 0.0 {
            words_per_second
        } else {
            DEFAULT_WORDS_PER_SECOND
        };
        Self { words_per_second }
    }

    /// Phase 1: duration before scene-level reconciliation.
    pub fn raw_duration(&self, shot: &Shot, format: StoryFormat, beat: Option<StoryBeat>) -> f64 {
        let base = base_duration(shot.trigger);
        let spoken = match &shot.dialogue {
            Some(line) => {
                let speech = line.word_count() as f64 / self.words_per_second;
                base.max(speech + SPEECH_BUFFER_SECONDS)
            }
            None => base,
        };

        let disaster = if shot.is_disaster_moment {
            DISASTER_MULTIPLIER
        } else {
            1.0
        };
        let raw = spoken
            * format.pace_multiplier()
            * beat_pacing_curve(beat).multiplier()
            * intensity_multiplier(shot.emotional_intensity)
            * disaster;
        raw.max(MIN_SHOT_SECONDS)
    }
}

impl PipelineStage for PacingStage {
    fn step(&self) -> u8 {
        4
    }

    fn name(&self) -> &'static str {
        "pacing"
    }

    fn process(&self, mut shot_list: ShotList) -> Result<ShotList, ShotlistError> {
        let format = shot_list.format;
        for scene in &mut shot_list.scenes {
            let beat = StoryBeat::parse(&scene.beat);
            let curve = beat_pacing_curve(beat);
            let raw: Vec<f64> = scene
                .shots
                .iter()
                .map(|shot| self.raw_duration(shot, format, beat))
                .collect();

            let scale = scale_factor(&raw, scene.target_duration_seconds).ok_or_else(|| {
                ShotlistError::stage(
                    self.name(),
                    format!("scene {} produced a non-finite scale", scene.scene_number),
                )
            })?;
            debug!(
                scene = scene.scene_number,
                raw_total = raw.iter().sum::<f64>(),
                target = scene.target_duration_seconds,
                scale,
                "Scene rescaled"
            );

            for (shot, raw) in scene.shots.iter_mut().zip(raw) {
                shot.duration_seconds = finalize_duration(raw * scale);
                shot.pacing_curve = Some(curve);
            }
        }
        shot_list.recompute_totals();
        info!(
            shots = shot_list.total_shots,
            duration = shot_list.total_duration_seconds,
            "Pacing applied"
        );
        Ok(shot_list)
    }
}

fn intensity_multiplier(intensity: f64) -> f64 {
    if intensity >= HIGH_INTENSITY_THRESHOLD {
        0.9
    } else if intensity <= LOW_INTENSITY_THRESHOLD {
        1.1
    } else {
        1.0
    }
}

/// Phase 2 scale: `target / raw_sum`, or 1.0 when the scene declares no
/// target. `None` if the ratio is not finite.
pub fn scale_factor(raw: &[f64], target: f64) -> Option<f64> {
    let raw_sum: f64 = raw.iter().sum();
    if target <= 0.0 || raw.is_empty() {
        return Some(1.0);
    }
    let scale = target / raw_sum;
    scale.is_finite().then_some(scale)
}

/// Clamp to the shot bounds and round to one decimal.
pub fn finalize_duration(seconds: f64) -> f64 {
    let clamped = seconds.clamp(MIN_SHOT_SECONDS, MAX_SHOT_SECONDS);
    (clamped * 10.0).round() / 10.0
}
