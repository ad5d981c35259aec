//! Orchestrator: runs decomposition and stages 2–7, validates, persists.
//!
//! This is the only component that touches the filesystem and the only
//! place a stage error is turned into a failed run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::ShotlistConfig;
use crate::models::{HeroArtifact, Screenplay, ShotList, StoryFormat};
use crate::services::camera::CameraStage;
use crate::services::decomposition::Decomposer;
use crate::services::pacing::PacingStage;
use crate::services::progress::{noop_progress, ProgressReporter};
use crate::services::prompts::PromptStage;
use crate::services::shot_type::ShotTypeStage;
use crate::services::stage::PipelineStage;
use crate::services::transitions::TransitionStage;
use crate::services::validator::{ValidationReport, ValidationStage, Validator};
use crate::utils::sanitize::validate_project_id;
use crate::ShotlistError;

pub const SHOT_LIST_FILE: &str = "shot_list.json";

/// Decomposition plus the six stages that follow it.
pub const TOTAL_STEPS: usize = 7;

/// Result of a full planning run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// False only when a stage or persistence failed. Validation errors
    /// still count as a (degraded) success.
    pub success: bool,
    pub shot_list: ShotList,
    pub message: String,
    /// Absent when the run failed before validation.
    pub report: Option<ValidationReport>,
    pub output_path: Option<PathBuf>,
}

/// Plans shot lists from screenplays.
pub struct ShotPlanner {
    config: ShotlistConfig,
    progress: Arc<dyn ProgressReporter>,
    persist: bool,
}

impl Default for ShotPlanner {
    fn default() -> Self {
        Self::new(ShotlistConfig::default())
    }
}

impl ShotPlanner {
    pub fn new(config: ShotlistConfig) -> Self {
        Self {
            config,
            progress: noop_progress(),
            persist: true,
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Skip writing `shot_list.json`.
    pub fn without_persistence(mut self) -> Self {
        self.persist = false;
        self
    }

    pub fn config(&self) -> &ShotlistConfig {
        &self.config
    }

    /// Where a project's shot list is written.
    pub fn output_path(&self, project_id: &str) -> PathBuf {
        self.config
            .output_dir
            .join(project_id)
            .join(SHOT_LIST_FILE)
    }

    /// Run the whole pipeline. Never panics on bad input and never returns
    /// an error: failures come back as `success: false` with an empty list.
    pub fn run(
        &self,
        screenplay: &Screenplay,
        hero: Option<&HeroArtifact>,
        format: StoryFormat,
        project_id: &str,
    ) -> RunOutcome {
        info!(
            project = project_id,
            scenes = screenplay.scenes.len(),
            format = %format,
            "Planning shot list"
        );

        match self.try_run(screenplay, hero, format, project_id) {
            Ok((shot_list, report, output_path)) => {
                let summary = format!(
                    "{} shots across {} scenes ({:.1}s)",
                    shot_list.total_shots,
                    shot_list.scenes.len(),
                    shot_list.total_duration_seconds
                );
                let message = if report.is_valid {
                    info!(project = project_id, "Shot list planned: {}", summary);
                    format!("Planned {}", summary)
                } else {
                    warn!(
                        project = project_id,
                        errors = report.errors.len(),
                        "Shot list planned with validation errors"
                    );
                    format!(
                        "Planned {} with {} validation error(s)",
                        summary,
                        report.errors.len()
                    )
                };
                RunOutcome {
                    success: true,
                    shot_list,
                    message,
                    report: Some(report),
                    output_path,
                }
            }
            Err(e) => {
                error!(project = project_id, "Shot list planning failed: {}", e);
                RunOutcome {
                    success: false,
                    shot_list: ShotList::empty(project_id, format),
                    message: e.to_string(),
                    report: None,
                    output_path: None,
                }
            }
        }
    }

    fn try_run(
        &self,
        screenplay: &Screenplay,
        hero: Option<&HeroArtifact>,
        format: StoryFormat,
        project_id: &str,
    ) -> Result<(ShotList, ValidationReport, Option<PathBuf>), ShotlistError> {
        let project_id = validate_project_id(project_id)?;

        self.progress.step(0, TOTAL_STEPS, "decomposition");
        let mut shot_list = Decomposer::new().decompose(screenplay, format, project_id);

        for stage in self.stages(hero) {
            self.progress
                .step(stage.step() as usize - 1, TOTAL_STEPS, stage.name());
            shot_list = stage.process(shot_list)?;
        }
        shot_list.recompute_totals();

        self.progress.step(TOTAL_STEPS - 1, TOTAL_STEPS, "validation");
        let report = self.validator().validate(
            &shot_list,
            screenplay.scenes.len(),
            screenplay.total_estimated_duration(),
        );

        let output_path = if self.persist {
            Some(persist_shot_list(&shot_list, &self.config.output_dir)?)
        } else {
            None
        };
        self.progress.step(TOTAL_STEPS, TOTAL_STEPS, "done");

        Ok((shot_list, report, output_path))
    }

    /// Run one stage (2–7) on an existing list.
    ///
    /// Step 1 needs the screenplay and is rejected.
    pub fn run_step(
        &self,
        step: u8,
        shot_list: ShotList,
        hero: Option<&HeroArtifact>,
    ) -> Result<ShotList, ShotlistError> {
        let stage: Box<dyn PipelineStage> = match step {
            1 => {
                return Err(ShotlistError::InvalidStep {
                    step,
                    reason: "decomposition needs the screenplay, use run()".to_string(),
                })
            }
            7 => Box::new(ValidationStage::new(self.validator())),
            _ => self
                .stages(hero)
                .into_iter()
                .find(|s| s.step() == step)
                .ok_or_else(|| ShotlistError::InvalidStep {
                    step,
                    reason: "steps run from 2 to 7".to_string(),
                })?,
        };
        info!(step, stage = stage.name(), "Running single stage");
        stage.process(shot_list)
    }

    /// Stages 2–6 in pipeline order.
    fn stages(&self, hero: Option<&HeroArtifact>) -> Vec<Box<dyn PipelineStage>> {
        vec![
            Box::new(ShotTypeStage::new()),
            Box::new(CameraStage::new()),
            Box::new(PacingStage::new(self.config.words_per_second)),
            Box::new(TransitionStage::new()),
            Box::new(PromptStage::new(
                hero.cloned(),
                self.config.negative_prompt.clone(),
            )),
        ]
    }

    fn validator(&self) -> Validator {
        Validator::new(self.config.scene_density_threshold)
    }
}

/// Write `<output_dir>/<project_id>/shot_list.json` and return its path.
pub fn persist_shot_list(
    shot_list: &ShotList,
    output_dir: &Path,
) -> Result<PathBuf, ShotlistError> {
    let project_id = validate_project_id(&shot_list.project_id)?;
    let dir = output_dir.join(project_id);
    std::fs::create_dir_all(&dir).map_err(|e| ShotlistError::Io {
        message: format!("Failed to create {}: {}", dir.display(), e),
        source: Some(e),
    })?;

    let path = dir.join(SHOT_LIST_FILE);
    let json = serde_json::to_string_pretty(shot_list)?;
    std::fs::write(&path, json).map_err(|e| ShotlistError::Io {
        message: format!("Failed to write {}: {}", path.display(), e),
        source: Some(e),
    })?;
    info!("Wrote {}", path.display());
    Ok(path)
}
