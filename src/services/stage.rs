//! Common interface for the post-decomposition pipeline stages.

use crate::models::ShotList;
use crate::ShotlistError;

/// A pipeline stage that enriches an owned shot list and hands it back.
///
/// Stages take the list by value so no stage can hold on to it after
/// returning. Each stage writes only the shot fields it owns.
pub trait PipelineStage: Send + Sync {
    /// Pipeline position (2–7), matching `ShotPlanner::run_step`.
    fn step(&self) -> u8;

    /// Short stage name for logs and errors.
    fn name(&self) -> &'static str;

    fn process(&self, shot_list: ShotList) -> Result<ShotList, ShotlistError>;
}
