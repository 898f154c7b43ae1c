#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use std::sync::Mutex;
use uuid::Uuid;

use fitness_coach::errors::{CoachError, CoachResult};
use fitness_coach::llm::{TextGenerationRequest, TextGenerator};
use fitness_coach::models::*;

/// Builders for realistic test data
pub struct MockDataGenerator;

impl MockDataGenerator {
    pub fn start_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap()
    }

    pub fn day(offset: i64) -> DateTime<Utc> {
        Self::start_date() + Duration::days(offset)
    }

    pub fn new_entry(entry_type: ProgressType, value: f64, day: i64) -> NewProgressEntry {
        let unit = match entry_type {
            ProgressType::Weight => "kg",
            ProgressType::Strength => "kg",
            ProgressType::Measurements => "cm",
            ProgressType::Cardio => "km",
        };
        NewProgressEntry {
            entry_type,
            value,
            unit: unit.to_string(),
            date: Some(Self::day(day)),
            metrics: ProgressMetrics::default(),
            notes: None,
        }
    }

    pub fn entry(user_id: Uuid, entry_type: ProgressType, value: f64, day: i64) -> ProgressEntry {
        ProgressEntry::new(user_id, Self::new_entry(entry_type, value, day))
    }

    pub fn weight_series(user_id: Uuid, values: &[(i64, f64)]) -> Vec<ProgressEntry> {
        values
            .iter()
            .map(|(day, value)| Self::entry(user_id, ProgressType::Weight, *value, *day))
            .collect()
    }

    pub fn strength_entry(
        user_id: Uuid,
        day: i64,
        volume: f64,
        lifts: &[(&str, f64)],
    ) -> ProgressEntry {
        let mut entry = Self::new_entry(ProgressType::Strength, volume, day);
        entry.metrics.volume = Some(volume);
        entry.metrics.one_rep_max = Some(
            lifts
                .iter()
                .map(|(name, max)| (name.to_string(), *max))
                .collect::<BTreeMap<_, _>>(),
        );
        ProgressEntry::new(user_id, entry)
    }

    pub fn measurement_entry(user_id: Uuid, day: i64, waist: f64, arms: f64) -> ProgressEntry {
        let mut entry = Self::new_entry(ProgressType::Measurements, waist, day);
        entry.metrics.waist = Some(waist);
        entry.metrics.arms = Some(arms);
        ProgressEntry::new(user_id, entry)
    }

    pub fn plan_request(level: &str, goal: &str, days: i64, minutes: i64) -> PlanGenerationRequest {
        PlanGenerationRequest {
            fitness_level: Some(level.to_string()),
            goal: Some(goal.to_string()),
            schedule: Some(ScheduleRequest {
                days_per_week: Some(days),
                session_duration: Some(minutes),
            }),
            health_info: None,
        }
    }
}

/// Canned text generator that records every prompt it receives
pub struct RecordingGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<TextGenerationRequest>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, request: &TextGenerationRequest) -> CoachResult<String> {
        self.prompts.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| CoachError::ExternalService("generator offline".to_string()))
    }
}
