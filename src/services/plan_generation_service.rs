use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ValidationError;
use crate::models::{
    Exercise, ExerciseCategory, FitnessLevel, GeneratedPlan, Goal, HealthInfo, HealthRecommendation,
    PlanGenerationRequest, PlanStatus, Schedule, Workout,
};
use crate::rules::RuleSet;

/// Builds weekly routines from the rule tables.
///
/// Generation is deterministic apart from the fresh workout ids: the same
/// inputs always give the same names, categories and exercises.
#[derive(Clone, Default)]
pub struct PlanGenerator {
    rules: Arc<RuleSet>,
}

impl PlanGenerator {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate a raw request at the boundary, then generate
    pub fn generate_from_request(
        &self,
        request: &PlanGenerationRequest,
    ) -> Result<GeneratedPlan, ValidationError> {
        let input = request.validate()?;
        self.generate(
            input.fitness_level,
            input.goal,
            input.schedule,
            &input.health_info,
        )
    }

    pub fn generate(
        &self,
        fitness_level: FitnessLevel,
        goal: Goal,
        schedule: Schedule,
        health_info: &HealthInfo,
    ) -> Result<GeneratedPlan, ValidationError> {
        schedule.validate()?;

        info!(
            "Generating {} plan for {} level, {} days x {} min",
            goal, fitness_level, schedule.days_per_week, schedule.session_duration
        );

        let workouts = self.generate_workouts(fitness_level, goal, schedule)?;
        let health_recommendations = self.health_recommendations(health_info);

        debug!(
            "Generated {} workouts and {} health recommendation blocks",
            workouts.len(),
            health_recommendations.len()
        );

        Ok(GeneratedPlan {
            fitness_level,
            goal,
            schedule,
            health_info: health_info.clone(),
            workouts,
            health_recommendations,
            status: PlanStatus::Active,
        })
    }

    /// Category trained on day `day_index` (0-based) for a goal
    pub fn category_for_day(
        &self,
        goal: Goal,
        day_index: usize,
    ) -> Result<ExerciseCategory, ValidationError> {
        let categories = self.rules.categories_for(goal).ok_or_else(|| {
            ValidationError::new("goal", format!("no workout categories configured for {}", goal))
        })?;
        Ok(categories[day_index % categories.len()])
    }

    fn generate_workouts(
        &self,
        fitness_level: FitnessLevel,
        goal: Goal,
        schedule: Schedule,
    ) -> Result<Vec<Workout>, ValidationError> {
        (0..schedule.days_per_week as usize)
            .map(|day| {
                let category = self.category_for_day(goal, day)?;
                let templates = self
                    .rules
                    .templates_for(category, fitness_level)
                    .ok_or_else(|| {
                        ValidationError::new(
                            "fitness_level",
                            format!(
                                "no {} exercises configured for {} level",
                                category, fitness_level
                            ),
                        )
                    })?;

                // injected tables are checked here, not when the rule set is built
                let exercises = templates
                    .iter()
                    .map(|template| {
                        if template.category != category {
                            return Err(ValidationError::new(
                                "exercise.type",
                                format!(
                                    "{} template '{}' listed under {} exercises",
                                    template.category, template.name, category
                                ),
                            ));
                        }
                        template.validate()?;
                        Ok(Exercise {
                            completed: false,
                            ..template.clone()
                        })
                    })
                    .collect::<Result<Vec<_>, ValidationError>>()?;

                Ok(Workout {
                    id: Uuid::new_v4(),
                    name: format!("{} Workout {}", category.capitalized(), day + 1),
                    category,
                    duration: schedule.session_duration,
                    difficulty: fitness_level,
                    exercises,
                })
            })
            .collect()
    }

    pub fn health_recommendations(&self, health_info: &HealthInfo) -> Vec<HealthRecommendation> {
        self.rules.health().recommendations_for(health_info)
    }
}
