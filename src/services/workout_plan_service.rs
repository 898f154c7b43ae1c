use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::{CoachError, CoachResult, ValidationError};
use crate::models::{
    CreatePlanRequest, PlanStatus, UpdatePlanRequest, UpdateWorkoutRequest, Workout, WorkoutPlan,
};
use crate::services::plan_generation_service::PlanGenerator;
use crate::storage::PlanStore;

/// Owner-scoped lifecycle of generated plans
#[derive(Clone)]
pub struct WorkoutPlanService<S> {
    store: Arc<S>,
    generator: PlanGenerator,
}

impl<S: PlanStore> WorkoutPlanService<S> {
    pub fn new(store: Arc<S>, generator: PlanGenerator) -> Self {
        Self { store, generator }
    }

    pub async fn create_plan(
        &self,
        user_id: Uuid,
        request: CreatePlanRequest,
    ) -> CoachResult<WorkoutPlan> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ValidationError::missing("name"))?
            .to_string();

        let generated = self.generator.generate_from_request(&request.generation)?;
        let plan = WorkoutPlan::from_generated(
            user_id,
            name,
            request.description,
            request.physical_info,
            generated,
        );

        let plan = self.store.insert_plan(plan).await?;
        info!("Created plan {} for user {}", plan.id, user_id);
        Ok(plan)
    }

    pub async fn list_plans(&self, user_id: Uuid) -> CoachResult<Vec<WorkoutPlan>> {
        self.store.list_plans(user_id).await
    }

    pub async fn get_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<WorkoutPlan> {
        self.store
            .find_plan(user_id, plan_id)
            .await?
            .ok_or_else(|| CoachError::not_found("Workout plan"))
    }

    pub async fn update_plan(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        request: UpdatePlanRequest,
    ) -> CoachResult<WorkoutPlan> {
        let mut plan = self.get_plan(user_id, plan_id).await?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(ValidationError::missing("name").into());
            }
            plan.name = name;
        }
        if let Some(schedule) = request.schedule {
            schedule.validate()?;
            plan.schedule = schedule;
        }
        if let Some(workouts) = request.workouts {
            for workout in &workouts {
                workout.validate()?;
            }
            plan.workouts = workouts;
        }
        if let Some(status) = request.status {
            plan.status = status;
        }

        self.persist(plan).await
    }

    pub async fn archive_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<WorkoutPlan> {
        let mut plan = self.get_plan(user_id, plan_id).await?;
        plan.status = PlanStatus::Archived;
        self.persist(plan).await
    }

    pub async fn delete_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<()> {
        if !self.store.delete_plan(user_id, plan_id).await? {
            return Err(CoachError::not_found("Workout plan"));
        }
        info!("Deleted plan {} for user {}", plan_id, user_id);
        Ok(())
    }

    pub async fn add_workout(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        mut workout: Workout,
    ) -> CoachResult<WorkoutPlan> {
        workout.validate()?;
        let mut plan = self.get_plan(user_id, plan_id).await?;
        if plan.workout(workout.id).is_some() {
            workout.id = Uuid::new_v4();
        }
        plan.workouts.push(workout);
        self.persist(plan).await
    }

    pub async fn update_workout(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        workout_id: Uuid,
        request: UpdateWorkoutRequest,
    ) -> CoachResult<WorkoutPlan> {
        let mut plan = self.get_plan(user_id, plan_id).await?;
        let workout = plan
            .workout_mut(workout_id)
            .ok_or_else(|| CoachError::not_found("Workout"))?;

        let mut edited = workout.clone();
        request.apply(&mut edited);
        edited.validate()?;
        *workout = edited;

        self.persist(plan).await
    }

    pub async fn remove_workout(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        workout_id: Uuid,
    ) -> CoachResult<WorkoutPlan> {
        let mut plan = self.get_plan(user_id, plan_id).await?;
        plan.remove_workout(workout_id)
            .ok_or_else(|| CoachError::not_found("Workout"))?;
        self.persist(plan).await
    }

    pub async fn set_exercise_completed(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        workout_id: Uuid,
        exercise_index: usize,
        completed: bool,
    ) -> CoachResult<WorkoutPlan> {
        let mut plan = self.get_plan(user_id, plan_id).await?;
        let workout = plan
            .workout_mut(workout_id)
            .ok_or_else(|| CoachError::not_found("Workout"))?;
        let exercise = workout
            .exercises
            .get_mut(exercise_index)
            .ok_or_else(|| CoachError::not_found("Exercise"))?;
        exercise.completed = completed;

        self.persist(plan).await
    }

    async fn persist(&self, mut plan: WorkoutPlan) -> CoachResult<WorkoutPlan> {
        plan.touch();
        if !self.store.save_plan(&plan).await? {
            return Err(CoachError::not_found("Workout plan"));
        }
        Ok(plan)
    }
}
