use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PlanStore, ProgressStore};
use crate::errors::CoachResult;
use crate::models::{ProgressEntry, ProgressQuery, WorkoutPlan};

/// Process-local store backing both plans and progress entries
#[derive(Clone, Default)]
pub struct InMemoryStore {
    plans: Arc<RwLock<HashMap<Uuid, WorkoutPlan>>>,
    entries: Arc<RwLock<HashMap<Uuid, ProgressEntry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn plan_count(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl PlanStore for InMemoryStore {
    async fn insert_plan(&self, plan: WorkoutPlan) -> CoachResult<WorkoutPlan> {
        self.plans.write().await.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn find_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<Option<WorkoutPlan>> {
        let plans = self.plans.read().await;
        Ok(plans
            .get(&plan_id)
            .filter(|plan| plan.user_id == user_id)
            .cloned())
    }

    async fn list_plans(&self, user_id: Uuid) -> CoachResult<Vec<WorkoutPlan>> {
        let mut plans: Vec<WorkoutPlan> = self
            .plans
            .read()
            .await
            .values()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    async fn save_plan(&self, plan: &WorkoutPlan) -> CoachResult<bool> {
        let mut plans = self.plans.write().await;
        match plans.get_mut(&plan.id) {
            Some(existing) if existing.user_id == plan.user_id => {
                *existing = plan.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_plan(&self, user_id: Uuid, plan_id: Uuid) -> CoachResult<bool> {
        let mut plans = self.plans.write().await;
        let owned = plans.get(&plan_id).map_or(false, |plan| plan.user_id == user_id);
        if owned {
            plans.remove(&plan_id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl ProgressStore for InMemoryStore {
    async fn insert_entry(&self, entry: ProgressEntry) -> CoachResult<ProgressEntry> {
        self.entries.write().await.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn find_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> CoachResult<Option<ProgressEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&entry_id)
            .filter(|entry| entry.user_id == user_id)
            .cloned())
    }

    async fn list_entries(
        &self,
        user_id: Uuid,
        query: &ProgressQuery,
    ) -> CoachResult<Vec<ProgressEntry>> {
        let mut entries: Vec<ProgressEntry> = self
            .entries
            .read()
            .await
            .values()
            .filter(|entry| entry.user_id == user_id && query.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(entries)
    }

    async fn save_entry(&self, entry: &ProgressEntry) -> CoachResult<bool> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(&entry.id) {
            Some(existing) if existing.user_id == entry.user_id => {
                *existing = entry.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> CoachResult<Option<ProgressEntry>> {
        let mut entries = self.entries.write().await;
        let owned = entries.get(&entry_id).map_or(false, |entry| entry.user_id == user_id);
        Ok(if owned { entries.remove(&entry_id) } else { None })
    }
}
