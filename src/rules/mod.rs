//! Static rule and knowledge tables that drive plan generation.
//!
//! The tables are plain data owned by a [`RuleSet`] which is handed to the
//! plan generator at construction time, so alternate rule sets can be swapped
//! in without touching the generator.

pub mod exercise_templates;
pub mod health_knowledge;

use std::collections::HashMap;

use crate::models::{Exercise, ExerciseCategory, FitnessLevel, Goal};

pub use exercise_templates::{standard_exercise_templates, standard_goal_categories};
pub use health_knowledge::HealthKnowledge;

#[derive(Debug, Clone)]
pub struct RuleSet {
    goal_categories: HashMap<Goal, Vec<ExerciseCategory>>,
    exercise_templates: HashMap<(ExerciseCategory, FitnessLevel), Vec<Exercise>>,
    health: HealthKnowledge,
}

impl RuleSet {
    pub fn new(
        goal_categories: HashMap<Goal, Vec<ExerciseCategory>>,
        exercise_templates: HashMap<(ExerciseCategory, FitnessLevel), Vec<Exercise>>,
        health: HealthKnowledge,
    ) -> Self {
        Self {
            goal_categories,
            exercise_templates,
            health,
        }
    }

    /// The tables shipped with the application
    pub fn standard() -> Self {
        Self::new(
            standard_goal_categories(),
            standard_exercise_templates(),
            HealthKnowledge::standard(),
        )
    }

    pub fn with_goal_categories(mut self, goal: Goal, categories: Vec<ExerciseCategory>) -> Self {
        self.goal_categories.insert(goal, categories);
        self
    }

    pub fn without_goal(mut self, goal: Goal) -> Self {
        self.goal_categories.remove(&goal);
        self
    }

    pub fn with_templates(
        mut self,
        category: ExerciseCategory,
        level: FitnessLevel,
        exercises: Vec<Exercise>,
    ) -> Self {
        self.exercise_templates.insert((category, level), exercises);
        self
    }

    pub fn without_templates(mut self, category: ExerciseCategory, level: FitnessLevel) -> Self {
        self.exercise_templates.remove(&(category, level));
        self
    }

    pub fn with_health_knowledge(mut self, health: HealthKnowledge) -> Self {
        self.health = health;
        self
    }

    /// Category rotation for a goal; `None` or empty when the goal has no rule
    pub fn categories_for(&self, goal: Goal) -> Option<&[ExerciseCategory]> {
        self.goal_categories
            .get(&goal)
            .map(Vec::as_slice)
            .filter(|categories| !categories.is_empty())
    }

    pub fn templates_for(
        &self,
        category: ExerciseCategory,
        level: FitnessLevel,
    ) -> Option<&[Exercise]> {
        self.exercise_templates
            .get(&(category, level))
            .map(Vec::as_slice)
    }

    pub fn health(&self) -> &HealthKnowledge {
        &self.health
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
