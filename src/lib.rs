//! Fitness coach engine: rule-table workout plan generation and progress
//! analytics, with optional narrative insights from a text generator.

pub mod config;
pub mod errors;
pub mod llm;
pub mod models;
pub mod rules;
pub mod services;
pub mod storage;

pub use errors::{CoachError, CoachResult, ValidationError};

use models::{
    ChangeResult, FitnessLevel, GeneratedPlan, Goal, HealthInfo, ProgressEntry, ProgressSummary,
    ProgressType, Schedule,
};
use services::{PlanGenerator, ProgressAnalyzer};

/// Generate a plan from the standard rule tables.
///
/// The result has no owner or name; `WorkoutPlanService::create_plan` attaches
/// them when the plan is stored as a `WorkoutPlan`.
pub fn generate_plan(
    fitness_level: FitnessLevel,
    goal: Goal,
    schedule: Schedule,
    health_info: &HealthInfo,
) -> Result<GeneratedPlan, ValidationError> {
    PlanGenerator::default().generate(fitness_level, goal, schedule, health_info)
}

/// Summarize entries with the default thresholds
pub fn summarize_progress(entries: &[ProgressEntry]) -> ProgressSummary {
    ProgressAnalyzer::default().summarize(entries)
}

pub fn calculate_change(
    entries: &[ProgressEntry],
    entry_type: ProgressType,
) -> Option<ChangeResult> {
    ProgressAnalyzer::calculate_change(entries, entry_type)
}
