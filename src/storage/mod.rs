//! Persistence seams for plans and progress entries.
//!
//! Every lookup is scoped by owner: a record that exists but belongs to
//! another user is reported exactly like a missing one.

pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoachResult;
use crate::models::{ProgressEntry, ProgressQuery, WorkoutPlan};

pub use memory::InMemoryStore;

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn insert_plan(&self, plan: WorkoutPlan) -> CoachResult<WorkoutPlan>;

    async fn find_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<Option<WorkoutPlan>>;

    /// Plans for a user, newest first
    async fn list_plans(&self, user_id: Uuid) -> CoachResult<Vec<WorkoutPlan>>;

    /// Replace a stored plan; returns false when it no longer exists
    async fn save_plan(&self, plan: &WorkoutPlan) -> CoachResult<bool>;

    async fn delete_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<bool>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn insert_entry(&self, entry: ProgressEntry) -> CoachResult<ProgressEntry>;

    async fn find_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> CoachResult<Option<ProgressEntry>>;

    /// Entries matching the query, oldest first
    async fn list_entries(
        &self,
        user_id: Uuid,
        query: &ProgressQuery,
    ) -> CoachResult<Vec<ProgressEntry>>;

    async fn save_entry(&self, entry: &ProgressEntry) -> CoachResult<bool>;

    async fn delete_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> CoachResult<Option<ProgressEntry>>;
}
