use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AnalyticsConfig;
use crate::errors::{CoachError, CoachResult, ValidationError};
use crate::models::{
    LoggedProgress, NewProgressEntry, ProgressEntry, ProgressInsights, ProgressQuery,
    ProgressUpdate, SummaryReport,
};
use crate::services::insight_service::{CoachingContext, InsightService};
use crate::services::progress_analysis_service::ProgressAnalyzer;
use crate::storage::ProgressStore;

/// Days of history used for rule-based insights
pub const INSIGHT_WINDOW_DAYS: i64 = 30;

/// Longest summary window accepted, about ten years
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Logging, editing and analysing one user's progress entries
#[derive(Clone)]
pub struct ProgressService<S> {
    store: Arc<S>,
    analyzer: ProgressAnalyzer,
    insights: InsightService,
    config: AnalyticsConfig,
}

impl<S: ProgressStore> ProgressService<S> {
    pub fn new(store: Arc<S>, insights: InsightService, config: AnalyticsConfig) -> Self {
        Self {
            store,
            analyzer: ProgressAnalyzer::new(config.thresholds),
            insights,
            config,
        }
    }

    /// Store an entry, compare it with the previous one of the same type and,
    /// for large swings, ask the coach for a short analysis
    pub async fn log_entry(
        &self,
        user_id: Uuid,
        new_entry: NewProgressEntry,
    ) -> CoachResult<LoggedProgress> {
        new_entry.validate()?;

        let entry = self
            .store
            .insert_entry(ProgressEntry::new(user_id, new_entry))
            .await?;
        info!("Logged {} entry {} for user {}", entry.entry_type, entry.id, user_id);

        let history = self
            .store
            .list_entries(
                user_id,
                &ProgressQuery {
                    entry_type: Some(entry.entry_type),
                    start_date: None,
                    end_date: Some(entry.date),
                },
            )
            .await?;
        let change = ProgressAnalyzer::calculate_change(&history, entry.entry_type);

        let insight = match &change {
            Some(change) if change.percentage.abs() > self.config.insight_change_threshold => {
                debug!("Change of {:.2}% exceeds insight threshold", change.percentage);
                self.insights.progress_insight(&entry, change).await
            }
            _ => None,
        };

        Ok(LoggedProgress {
            progress: entry,
            change,
            insight,
        })
    }

    /// Matching entries, newest first
    pub async fn list_entries(
        &self,
        user_id: Uuid,
        query: &ProgressQuery,
    ) -> CoachResult<Vec<ProgressEntry>> {
        let mut entries = self.store.list_entries(user_id, query).await?;
        entries.reverse();
        Ok(entries)
    }

    pub async fn get_entry(&self, user_id: Uuid, entry_id: Uuid) -> CoachResult<ProgressEntry> {
        self.store
            .find_entry(user_id, entry_id)
            .await?
            .ok_or_else(|| CoachError::not_found("Progress entry"))
    }

    pub async fn update_entry(
        &self,
        user_id: Uuid,
        entry_id: Uuid,
        update: ProgressUpdate,
    ) -> CoachResult<ProgressEntry> {
        update.validate()?;
        let mut entry = self.get_entry(user_id, entry_id).await?;
        update.apply(&mut entry);

        if !self.store.save_entry(&entry).await? {
            return Err(CoachError::not_found("Progress entry"));
        }
        Ok(entry)
    }

    pub async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> CoachResult<ProgressEntry> {
        self.store
            .delete_entry(user_id, entry_id)
            .await?
            .ok_or_else(|| CoachError::not_found("Progress entry"))
    }

    /// Summary of the last `window_days` days ending at `now`.
    /// Windows outside `1..=MAX_WINDOW_DAYS` are rejected.
    pub async fn summary(
        &self,
        user_id: Uuid,
        window_days: Option<i64>,
        now: DateTime<Utc>,
        context: &CoachingContext,
    ) -> CoachResult<SummaryReport> {
        let window = window_days.unwrap_or(self.config.summary_window_days);
        let entries = self.window(user_id, window, now).await?;

        let summary = self.analyzer.summarize(&entries);
        let recommendations = self.analyzer.recommendations(
            ProgressAnalyzer::weight_trend(&entries).as_ref(),
            summary.consistency.as_ref().map(|c| c.tracking_adherence),
        );

        let coach_recommendations = if entries.is_empty() {
            None
        } else {
            self.insights.progress_recommendations(&summary, context).await
        };

        Ok(SummaryReport {
            summary,
            recommendations,
            coach_recommendations,
        })
    }

    pub async fn insights(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> CoachResult<ProgressInsights> {
        let entries = self.window(user_id, INSIGHT_WINDOW_DAYS, now).await?;
        Ok(self.analyzer.insights(&entries))
    }

    async fn window(
        &self,
        user_id: Uuid,
        days: i64,
        now: DateTime<Utc>,
    ) -> CoachResult<Vec<ProgressEntry>> {
        let query = ProgressQuery {
            entry_type: None,
            start_date: Some(window_start(days, now)?),
            end_date: Some(now),
        };
        self.store.list_entries(user_id, &query).await
    }
}

fn window_start(days: i64, now: DateTime<Utc>) -> Result<DateTime<Utc>, ValidationError> {
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(ValidationError::out_of_range("window_days", 1, MAX_WINDOW_DAYS, days));
    }
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| ValidationError::new("window_days", "reaches before the earliest date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockTextGenerator;
    use crate::models::{ProgressMetrics, ProgressType, WeightDirection};
    use crate::services::progress_analysis_service::{
        LOW_CONSISTENCY_MESSAGE, RAPID_WEIGHT_CHANGE_MESSAGE,
    };
    use crate::storage::InMemoryStore;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 7, 0, 0).unwrap()
    }

    fn weight(value: f64, day: u32) -> NewProgressEntry {
        NewProgressEntry {
            entry_type: ProgressType::Weight,
            value,
            unit: "kg".into(),
            date: Some(at(day)),
            metrics: ProgressMetrics::default(),
            notes: None,
        }
    }

    fn service(insights: InsightService) -> ProgressService<InMemoryStore> {
        ProgressService::new(
            Arc::new(InMemoryStore::new()),
            insights,
            AnalyticsConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_log_entry_computes_change_and_requests_insight() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Ok("Big drop, check hydration".to_string()));
        let service = service(InsightService::new(Arc::new(generator)));
        let owner = Uuid::new_v4();

        let first = service.log_entry(owner, weight(80.0, 1)).await.unwrap();
        assert!(first.change.is_none());
        assert!(first.insight.is_none());

        let second = service.log_entry(owner, weight(76.0, 8)).await.unwrap();
        let change = second.change.unwrap();
        assert_eq!(change.absolute, -4.0);
        assert_eq!(change.percentage, -5.0);
        assert_eq!(change.time_frame_days(), 7);
        // -5% is not beyond the 5% threshold
        assert!(second.insight.is_none());

        let third = service.log_entry(owner, weight(68.4, 15)).await.unwrap();
        assert_eq!(third.insight.as_deref(), Some("Big drop, check hydration"));
    }

    #[tokio::test]
    async fn test_backdated_entry_compares_with_earlier_history() {
        let service = service(InsightService::disabled());
        let owner = Uuid::new_v4();

        service.log_entry(owner, weight(80.0, 1)).await.unwrap();
        service.log_entry(owner, weight(70.0, 20)).await.unwrap();
        let backdated = service.log_entry(owner, weight(88.0, 10)).await.unwrap();

        let change = backdated.change.unwrap();
        assert_eq!(change.absolute, 8.0);
        assert_eq!(change.percentage, 10.0);
    }

    #[tokio::test]
    async fn test_list_update_delete() {
        let service = service(InsightService::disabled());
        let owner = Uuid::new_v4();

        service.log_entry(owner, weight(80.0, 1)).await.unwrap();
        let latest = service.log_entry(owner, weight(79.0, 3)).await.unwrap().progress;

        let listed = service.list_entries(owner, &ProgressQuery::default()).await.unwrap();
        assert_eq!(listed[0].id, latest.id);

        let updated = service
            .update_entry(
                owner,
                latest.id,
                ProgressUpdate {
                    notes: Some("after vacation".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("after vacation"));
        assert_eq!(updated.value, 79.0);

        let bad = ProgressUpdate {
            unit: Some("".into()),
            ..Default::default()
        };
        assert_matches!(
            service.update_entry(owner, latest.id, bad).await,
            Err(CoachError::Validation(_))
        );

        service.delete_entry(owner, latest.id).await.unwrap();
        assert_matches!(
            service.get_entry(owner, latest.id).await,
            Err(CoachError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn test_summary_applies_threshold_rules() {
        let service = service(InsightService::disabled());
        let owner = Uuid::new_v4();

        // 4 kg in a week, logged on 2 of 8 days
        service.log_entry(owner, weight(84.0, 1)).await.unwrap();
        service.log_entry(owner, weight(80.0, 8)).await.unwrap();

        let report = service
            .summary(owner, None, at(10), &CoachingContext::default())
            .await
            .unwrap();

        let weight = report.summary.weight.unwrap();
        assert_eq!(weight.start, 84.0);
        assert_eq!(weight.current, 80.0);
        assert_eq!(report.summary.consistency.unwrap().tracking_adherence, 25.0);
        assert_eq!(
            report.recommendations,
            vec![RAPID_WEIGHT_CHANGE_MESSAGE.to_string(), LOW_CONSISTENCY_MESSAGE.to_string()]
        );
        assert!(report.coach_recommendations.is_none());
    }

    #[tokio::test]
    async fn test_insights_cover_last_thirty_days() {
        let service = service(InsightService::disabled());
        let owner = Uuid::new_v4();

        service.log_entry(owner, weight(90.0, 1)).await.unwrap();
        service.log_entry(owner, weight(80.0, 24)).await.unwrap();
        service.log_entry(owner, weight(79.0, 31)).await.unwrap();

        // May 1 falls outside a window ending June 22
        let now = Utc.with_ymd_and_hms(2024, 6, 22, 0, 0, 0).unwrap();
        let insights = service.insights(owner, now).await.unwrap();
        let trend = insights.weight_trend.unwrap();
        assert_eq!(trend.direction, WeightDirection::Losing);
        assert_eq!(trend.weekly_rate, 1.0);
    }

    #[tokio::test]
    async fn test_summary_window_must_be_in_range() {
        let service = service(InsightService::disabled());
        let owner = Uuid::new_v4();
        service.log_entry(owner, weight(80.0, 1)).await.unwrap();
        let ctx = CoachingContext::default();

        for days in [0, -3, MAX_WINDOW_DAYS + 1, 100_000_000, i64::MAX, i64::MIN] {
            assert_matches!(
                service.summary(owner, Some(days), at(10), &ctx).await,
                Err(CoachError::Validation(e)) if e.field == "window_days",
                "window of {} days",
                days
            );
        }

        let report = service
            .summary(owner, Some(MAX_WINDOW_DAYS), at(10), &ctx)
            .await
            .unwrap();
        assert_eq!(report.summary.consistency.unwrap().tracking_adherence, 100.0);
    }

    #[tokio::test]
    async fn test_configured_window_is_checked_too() {
        let config = AnalyticsConfig {
            summary_window_days: i64::MAX,
            ..Default::default()
        };
        let service = ProgressService::new(
            Arc::new(InMemoryStore::new()),
            InsightService::disabled(),
            config,
        );

        let result = service
            .summary(Uuid::new_v4(), None, at(10), &CoachingContext::default())
            .await;
        assert_matches!(result, Err(CoachError::Validation(_)));
    }

    #[test]
    fn test_window_start_near_the_earliest_date() {
        assert_matches!(
            window_start(1, DateTime::<Utc>::MIN_UTC),
            Err(e) if e.field == "window_days"
        );
        assert_eq!(window_start(7, at(10)).unwrap(), at(3));
    }
}
