use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::{CoachError, CoachResult, ValidationError};
use crate::llm::{TextGenerationRequest, TextGenerator};
use crate::models::{ChangeResult, FitnessLevel, Goal, ProgressEntry, ProgressSummary, Workout};

pub const PROGRESS_ANALYST_PROMPT: &str =
    "You are a fitness progress analyst providing insights on user progress.";
pub const PROGRESS_COACH_PROMPT: &str =
    "You are a fitness coach providing recommendations based on user progress.";
pub const WORKOUT_FEEDBACK_PROMPT: &str =
    "You are a fitness coach providing feedback on completed workouts.";
pub const DEFAULT_WORKOUT_FEEDBACK: &str = "Great job completing your workout!";

pub const COACH_CHAT_PROMPT: &str = "You are an expert AI fitness coach with deep knowledge of \
    exercise science, nutrition, and health.
Your role is to provide accurate, helpful, and motivating guidance to users while \
    maintaining a professional and supportive tone.
You should:
1. Provide evidence-based advice
2. Explain concepts clearly and concisely
3. Adapt recommendations based on user's fitness level and goals
4. Prioritize safety and proper form
5. Encourage sustainable habits over quick fixes
6. Be motivating while maintaining realism";

/// What the coach knows about the user when writing recommendations
#[derive(Debug, Clone, Default)]
pub struct CoachingContext {
    pub goals: Vec<Goal>,
    pub fitness_level: Option<FitnessLevel>,
}

/// Narrative coaching on top of the rule-based analytics.
///
/// Without a generator, or when it fails, every method degrades to "no
/// insight" instead of an error; only `chat` reports failures.
#[derive(Clone, Default)]
pub struct InsightService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl InsightService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Short analysis of a freshly logged entry and its change
    pub async fn progress_insight(
        &self,
        entry: &ProgressEntry,
        change: &ChangeResult,
    ) -> Option<String> {
        let metrics = serde_json::to_string(&entry.metrics).unwrap_or_default();
        let context = format!(
            "Analyze this progress:\nType: {}\nCurrent Value: {} {}\n\
             Change: {:.2}% over {} days\nAdditional Metrics: {}",
            entry.entry_type,
            entry.value,
            entry.unit,
            change.percentage,
            change.time_frame_days(),
            metrics
        );

        self.generate_optional(TextGenerationRequest::new(PROGRESS_ANALYST_PROMPT, context))
            .await
    }

    pub async fn progress_recommendations(
        &self,
        summary: &ProgressSummary,
        context: &CoachingContext,
    ) -> Option<String> {
        let goals = context
            .goals
            .iter()
            .map(|goal| goal.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let level = context
            .fitness_level
            .map(|level| level.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let summary = serde_json::to_string(summary).unwrap_or_default();

        let prompt = format!(
            "Generate recommendations based on:\nUser Goals: {}\nFitness Level: {}\n\
             Progress Summary: {}",
            goals, level, summary
        );

        self.generate_optional(TextGenerationRequest::new(PROGRESS_COACH_PROMPT, prompt))
            .await
    }

    pub async fn workout_feedback(&self, workout: &Workout) -> String {
        let exercises = serde_json::to_string(&workout.exercises).unwrap_or_default();
        let prompt = format!(
            "Provide feedback for this workout: Duration: {} minutes Exercises: {}",
            workout.duration, exercises
        );

        self.generate_optional(TextGenerationRequest::new(WORKOUT_FEEDBACK_PROMPT, prompt))
            .await
            .unwrap_or_else(|| DEFAULT_WORKOUT_FEEDBACK.to_string())
    }

    /// Free-form question to the coach
    pub async fn chat(&self, message: &str) -> CoachResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::new("message", "Message cannot be empty").into());
        }

        let generator = self.generator.as_ref().ok_or_else(|| {
            CoachError::ExternalService("Text generation is not configured".to_string())
        })?;

        info!("Sending chat message to coach ({} chars)", message.len());
        generator
            .generate(&TextGenerationRequest::new(COACH_CHAT_PROMPT, message))
            .await
    }

    async fn generate_optional(&self, request: TextGenerationRequest) -> Option<String> {
        let generator = self.generator.as_ref()?;
        match generator.generate(&request).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Insight unavailable: {}", e);
                None
            }
        }
    }
}
