// Business logic services

pub mod insight_service;
pub mod plan_generation_service;
pub mod progress_analysis_service;
pub mod progress_service;
pub mod workout_plan_service;

pub use insight_service::{CoachingContext, InsightService};
pub use plan_generation_service::PlanGenerator;
pub use progress_analysis_service::{InsightThresholds, ProgressAnalyzer};
pub use progress_service::ProgressService;
pub use workout_plan_service::WorkoutPlanService;
