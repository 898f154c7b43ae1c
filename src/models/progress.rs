use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressType {
    Weight,
    Strength,
    Measurements,
    Cardio,
}

impl ProgressType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressType::Weight => "weight",
            ProgressType::Strength => "strength",
            ProgressType::Measurements => "measurements",
            ProgressType::Cardio => "cardio",
        }
    }
}

impl FromStr for ProgressType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight" => Ok(ProgressType::Weight),
            "strength" => Ok(ProgressType::Strength),
            "measurements" => Ok(ProgressType::Measurements),
            "cardio" => Ok(ProgressType::Cardio),
            other => Err(ValidationError::unknown_variant(
                "type",
                other,
                &["weight", "strength", "measurements", "cardio"],
            )),
        }
    }
}

impl fmt::Display for ProgressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body parts tracked by measurement entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Chest,
    Waist,
    Hips,
    Arms,
    Legs,
}

impl BodyPart {
    pub const ALL: [BodyPart; 5] = [
        BodyPart::Chest,
        BodyPart::Waist,
        BodyPart::Hips,
        BodyPart::Arms,
        BodyPart::Legs,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRate {
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

/// Category-specific measurements attached to a progress entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressMetrics {
    // weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_mass: Option<f64>,

    // strength; volume is total weight x reps x sets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_rep_max: Option<BTreeMap<String, f64>>,

    // cardio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<HeartRate>,

    // measurements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legs: Option<f64>,
}

impl ProgressMetrics {
    pub fn measurement(&self, part: BodyPart) -> Option<f64> {
        match part {
            BodyPart::Chest => self.chest,
            BodyPart::Waist => self.waist,
            BodyPart::Hips => self.hips,
            BodyPart::Arms => self.arms,
            BodyPart::Legs => self.legs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub entry_type: ProgressType,
    pub value: f64,
    pub unit: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub metrics: ProgressMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressEntry {
    pub fn new(user_id: Uuid, new_entry: NewProgressEntry) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            entry_type: new_entry.entry_type,
            value: new_entry.value,
            unit: new_entry.unit,
            date: new_entry.date.unwrap_or(now),
            metrics: new_entry.metrics,
            notes: new_entry.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProgressEntry {
    #[serde(rename = "type")]
    pub entry_type: ProgressType,
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metrics: ProgressMetrics,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewProgressEntry {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.value.is_finite() {
            return Err(ValidationError::new("value", "must be a finite number"));
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::missing("unit"));
        }
        Ok(())
    }
}

/// Editable fields of a logged entry; type and date are fixed once logged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub metrics: Option<ProgressMetrics>,
    pub notes: Option<String>,
}

impl ProgressUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(value) = self.value {
            if !value.is_finite() {
                return Err(ValidationError::new("value", "must be a finite number"));
            }
        }
        if let Some(unit) = &self.unit {
            if unit.trim().is_empty() {
                return Err(ValidationError::missing("unit"));
            }
        }
        Ok(())
    }

    pub fn apply(self, entry: &mut ProgressEntry) {
        if let Some(value) = self.value {
            entry.value = value;
        }
        if let Some(unit) = self.unit {
            entry.unit = unit;
        }
        if let Some(metrics) = self.metrics {
            entry.metrics = metrics;
        }
        if self.notes.is_some() {
            entry.notes = self.notes;
        }
        entry.updated_at = Utc::now();
    }
}

/// Filter criteria for listing progress entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressQuery {
    pub entry_type: Option<ProgressType>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ProgressQuery {
    pub fn matches(&self, entry: &ProgressEntry) -> bool {
        if let Some(entry_type) = self.entry_type {
            if entry.entry_type != entry_type {
                return false;
            }
        }

        if let Some(start) = self.start_date {
            if entry.date < start {
                return false;
            }
        }

        if let Some(end) = self.end_date {
            if entry.date > end {
                return false;
            }
        }

        true
    }
}

/// Difference between the latest entry of a type and the one logged before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeResult {
    pub absolute: f64,
    pub percentage: f64,
    pub time_frame_ms: i64,
}

impl ChangeResult {
    pub fn time_frame_days(&self) -> i64 {
        (self.time_frame_ms as f64 / 86_400_000.0).round() as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Fluctuating,
    #[serde(rename = "insufficient data")]
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Fluctuating => "Fluctuating",
            Trend::InsufficientData => "insufficient data",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub start: f64,
    pub current: f64,
    pub change: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthSummary {
    /// Percent change in volume between the first and last strength entry
    pub volume_change: Option<f64>,
    /// Best one-rep max observed per exercise
    pub max_lifts: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSummary {
    pub changes: BTreeMap<BodyPart, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencySummary {
    pub tracking_adherence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub weight: Option<WeightSummary>,
    pub strength: Option<StrengthSummary>,
    pub measurements: Option<MeasurementSummary>,
    pub consistency: Option<ConsistencySummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightDirection {
    Gaining,
    Losing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTrend {
    pub direction: WeightDirection,
    /// Absolute change per week in the entry unit
    pub weekly_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthGain {
    pub volume_increase: f64,
    pub percentage: Option<f64>,
}

/// Rule-based view of recent progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressInsights {
    pub weight_trend: Option<WeightTrend>,
    pub strength_gain: Option<StrengthGain>,
    pub consistency_score: Option<f64>,
    pub recommendations: Vec<String>,
}

/// Result of logging an entry: the stored entry, its change and an optional coach note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedProgress {
    pub progress: ProgressEntry,
    pub change: Option<ChangeResult>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub summary: ProgressSummary,
    pub recommendations: Vec<String>,
    pub coach_recommendations: Option<String>,
}
