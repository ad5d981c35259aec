pub mod camera;
pub mod decomposition;
pub mod pacing;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod shot_type;
pub mod stage;
pub mod transitions;
pub mod validator;

pub use camera::CameraStage;
pub use decomposition::Decomposer;
pub use pacing::PacingStage;
pub use pipeline::{persist_shot_list, RunOutcome, ShotPlanner};
pub use progress::{noop_progress, NoopProgressReporter, ProgressReporter};
pub use prompts::{PromptStage, DEFAULT_NEGATIVE_PROMPT};
pub use shot_type::ShotTypeStage;
pub use stage::PipelineStage;
pub use transitions::TransitionStage;
pub use validator::{validate, ValidationReport, ValidationStage, Validator};
