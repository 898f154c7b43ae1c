use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

pub const MIN_DAYS_PER_WEEK: u8 = 1;
pub const MAX_DAYS_PER_WEEK: u8 = 7;
pub const MIN_SESSION_MINUTES: u32 = 15;
pub const MAX_SESSION_MINUTES: u32 = 180;

/// Intensity tier of the athlete, also used as a workout's difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(ValidationError::unknown_variant(
                "fitness_level",
                other,
                &["beginner", "intermediate", "advanced"],
            )),
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target outcome driving which workout categories a plan rotates through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Strength,
    Endurance,
    Flexibility,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::Strength,
        Goal::Endurance,
        Goal::Flexibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Strength => "strength",
            Goal::Endurance => "endurance",
            Goal::Flexibility => "flexibility",
        }
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight_loss" => Ok(Goal::WeightLoss),
            "muscle_gain" => Ok(Goal::MuscleGain),
            "strength" => Ok(Goal::Strength),
            "endurance" => Ok(Goal::Endurance),
            "flexibility" => Ok(Goal::Flexibility),
            other => Err(ValidationError::unknown_variant(
                "goal",
                other,
                &["weight_loss", "muscle_gain", "strength", "endurance", "flexibility"],
            )),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Hiit,
    Flexibility,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 4] = [
        ExerciseCategory::Strength,
        ExerciseCategory::Cardio,
        ExerciseCategory::Hiit,
        ExerciseCategory::Flexibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "strength",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Hiit => "hiit",
            ExerciseCategory::Flexibility => "flexibility",
        }
    }

    /// Label used in generated workout names, e.g. "Hiit" in "Hiit Workout 2"
    pub fn capitalized(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for ExerciseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(ExerciseCategory::Strength),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "hiit" => Ok(ExerciseCategory::Hiit),
            "flexibility" => Ok(ExerciseCategory::Flexibility),
            other => Err(ValidationError::unknown_variant(
                "category",
                other,
                &["strength", "cardio", "hiit", "flexibility"],
            )),
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single movement inside a workout.
///
/// `duration` is in minutes for cardio and in seconds for interval and
/// stretching work; `rest` is always in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(rename = "type")]
    pub category: ExerciseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Exercise {
    pub fn strength(name: &str, sets: u32, reps: u32, rest: u32, notes: &str) -> Self {
        Self {
            name: name.to_string(),
            category: ExerciseCategory::Strength,
            sets: Some(sets),
            reps: Some(reps),
            duration: None,
            rest: Some(rest),
            notes: Some(notes.to_string()),
            completed: false,
        }
    }

    pub fn timed(category: ExerciseCategory, name: &str, duration: u32, notes: &str) -> Self {
        Self {
            name: name.to_string(),
            category,
            sets: None,
            reps: None,
            duration: Some(duration),
            rest: None,
            notes: Some(notes.to_string()),
            completed: false,
        }
    }

    pub fn interval(name: &str, duration: u32, rest: u32, notes: &str) -> Self {
        Self {
            rest: Some(rest),
            ..Self::timed(ExerciseCategory::Hiit, name, duration, notes)
        }
    }

    /// Check that the fields the category requires are present and positive
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("exercise.name"));
        }

        let require = |field: &str, value: Option<u32>| -> Result<(), ValidationError> {
            match value {
                None => Err(ValidationError::new(
                    format!("exercise.{}", field),
                    format!("is required for {} exercises", self.category),
                )),
                Some(0) => Err(ValidationError::new(
                    format!("exercise.{}", field),
                    "must be positive",
                )),
                Some(_) => Ok(()),
            }
        };

        match self.category {
            ExerciseCategory::Strength => {
                require("sets", self.sets)?;
                require("reps", self.reps)?;
            }
            ExerciseCategory::Cardio | ExerciseCategory::Flexibility => {
                require("duration", self.duration)?;
            }
            ExerciseCategory::Hiit => {
                require("duration", self.duration)?;
                require("rest", self.rest)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category: ExerciseCategory,
    /// Target session length in minutes
    pub duration: u32,
    pub difficulty: FitnessLevel,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::missing("workout.name"));
        }
        if self.duration == 0 {
            return Err(ValidationError::new("workout.duration", "must be positive"));
        }
        for exercise in &self.exercises {
            exercise.validate()?;
        }
        Ok(())
    }

    pub fn completed_exercises(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }
}

/// Weekly cadence of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days_per_week: u8,
    /// Minutes per session
    pub session_duration: u32,
}

impl Schedule {
    pub fn new(days_per_week: u8, session_duration: u32) -> Result<Self, ValidationError> {
        let schedule = Self {
            days_per_week,
            session_duration,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&self.days_per_week) {
            return Err(ValidationError::out_of_range(
                "schedule.days_per_week",
                MIN_DAYS_PER_WEEK as i64,
                MAX_DAYS_PER_WEEK as i64,
                self.days_per_week as i64,
            ));
        }
        if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&self.session_duration) {
            return Err(ValidationError::out_of_range(
                "schedule.session_duration",
                MIN_SESSION_MINUTES as i64,
                MAX_SESSION_MINUTES as i64,
                self.session_duration as i64,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalInfo {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<u32>,
}

/// Self-reported health context used to attach safety guidance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInfo {
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub injuries: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecommendation {
    pub warning: String,
    pub recommendations: Vec<String>,
}

impl HealthRecommendation {
    pub fn new(warning: &str, recommendations: &[&str]) -> Self {
        Self {
            warning: warning.to_string(),
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

/// Raw plan-generation input as it arrives from a form or JSON body.
///
/// Every field is optional so that absent values surface as a
/// [`ValidationError`] naming the field instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanGenerationRequest {
    pub fitness_level: Option<String>,
    pub goal: Option<String>,
    pub schedule: Option<ScheduleRequest>,
    #[serde(default)]
    pub health_info: Option<HealthInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub days_per_week: Option<i64>,
    pub session_duration: Option<i64>,
}

/// Plan-generation input after boundary validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlanInput {
    pub fitness_level: FitnessLevel,
    pub goal: Goal,
    pub schedule: Schedule,
    pub health_info: HealthInfo,
}

impl PlanGenerationRequest {
    pub fn validate(&self) -> Result<ValidatedPlanInput, ValidationError> {
        let fitness_level: FitnessLevel = self
            .fitness_level
            .as_deref()
            .ok_or_else(|| ValidationError::missing("fitness_level"))?
            .parse()?;
        let goal: Goal = self
            .goal
            .as_deref()
            .ok_or_else(|| ValidationError::missing("goal"))?
            .parse()?;

        let schedule = self
            .schedule
            .as_ref()
            .ok_or_else(|| ValidationError::missing("schedule"))?;
        let days = schedule
            .days_per_week
            .ok_or_else(|| ValidationError::missing("schedule.days_per_week"))?;
        let minutes = schedule
            .session_duration
            .ok_or_else(|| ValidationError::missing("schedule.session_duration"))?;

        if !(MIN_DAYS_PER_WEEK as i64..=MAX_DAYS_PER_WEEK as i64).contains(&days) {
            return Err(ValidationError::out_of_range(
                "schedule.days_per_week",
                MIN_DAYS_PER_WEEK as i64,
                MAX_DAYS_PER_WEEK as i64,
                days,
            ));
        }
        if !(MIN_SESSION_MINUTES as i64..=MAX_SESSION_MINUTES as i64).contains(&minutes) {
            return Err(ValidationError::out_of_range(
                "schedule.session_duration",
                MIN_SESSION_MINUTES as i64,
                MAX_SESSION_MINUTES as i64,
                minutes,
            ));
        }

        Ok(ValidatedPlanInput {
            fitness_level,
            goal,
            schedule: Schedule {
                days_per_week: days as u8,
                session_duration: minutes as u32,
            },
            health_info: self.health_info.clone().unwrap_or_default(),
        })
    }
}

/// Output of the plan generator before it is attached to an owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub fitness_level: FitnessLevel,
    pub goal: Goal,
    pub schedule: Schedule,
    pub health_info: HealthInfo,
    pub workouts: Vec<Workout>,
    pub health_recommendations: Vec<HealthRecommendation>,
    pub status: PlanStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fitness_level: FitnessLevel,
    pub goal: Goal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_info: Option<PhysicalInfo>,
    #[serde(default)]
    pub health_info: HealthInfo,
    #[serde(default)]
    pub health_recommendations: Vec<HealthRecommendation>,
    pub schedule: Schedule,
    pub workouts: Vec<Workout>,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutPlan {
    pub fn from_generated(
        user_id: Uuid,
        name: String,
        description: Option<String>,
        physical_info: Option<PhysicalInfo>,
        generated: GeneratedPlan,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description,
            fitness_level: generated.fitness_level,
            goal: generated.goal,
            physical_info,
            health_info: generated.health_info,
            health_recommendations: generated.health_recommendations,
            schedule: generated.schedule,
            workouts: generated.workouts,
            status: generated.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn workout(&self, workout_id: Uuid) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == workout_id)
    }

    pub fn workout_mut(&mut self, workout_id: Uuid) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == workout_id)
    }

    pub fn remove_workout(&mut self, workout_id: Uuid) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id == workout_id)?;
        Some(self.workouts.remove(index))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Fields accepted when creating a plan for a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub physical_info: Option<PhysicalInfo>,
    #[serde(flatten)]
    pub generation: PlanGenerationRequest,
}

/// Whole-plan edits; the only fields a user may overwrite
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlanRequest {
    pub name: Option<String>,
    pub workouts: Option<Vec<Workout>>,
    pub schedule: Option<Schedule>,
    pub status: Option<PlanStatus>,
}

/// Fields of a workout a user may edit in place
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    pub duration: Option<u32>,
    pub difficulty: Option<FitnessLevel>,
    pub exercises: Option<Vec<Exercise>>,
}

impl UpdateWorkoutRequest {
    pub fn apply(self, workout: &mut Workout) {
        if let Some(name) = self.name {
            workout.name = name;
        }
        if let Some(duration) = self.duration {
            workout.duration = duration;
        }
        if let Some(difficulty) = self.difficulty {
            workout.difficulty = difficulty;
        }
        if let Some(exercises) = self.exercises {
            workout.exercises = exercises;
        }
    }
}
