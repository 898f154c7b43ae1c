use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

use crate::models::{
    BodyPart, ChangeResult, ConsistencySummary, MeasurementSummary, ProgressEntry,
    ProgressInsights, ProgressSummary, ProgressType, StrengthGain, StrengthSummary, Trend,
    WeightDirection, WeightSummary, WeightTrend,
};

/// Number of trailing values inspected when classifying a trend
const TREND_WINDOW: usize = 3;

const MS_PER_DAY: f64 = 86_400_000.0;

pub const RAPID_WEIGHT_CHANGE_MESSAGE: &str =
    "Consider slowing down weight change to ensure sustainable progress";
pub const LOW_CONSISTENCY_MESSAGE: &str =
    "Try to log your progress more consistently for better tracking";

/// Limits that turn computed numbers into rule-based advice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    /// Weekly weight change (entry unit per week) above which a caution is raised
    pub max_weekly_weight_change: f64,
    /// Tracking adherence percentage below which a reminder is raised
    pub min_consistency: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            max_weekly_weight_change: 1.0,
            min_consistency: 70.0,
        }
    }
}

/// Pure analytics over one user's progress entries
#[derive(Debug, Clone, Default)]
pub struct ProgressAnalyzer {
    thresholds: InsightThresholds,
}

impl ProgressAnalyzer {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Change between the newest entry of `entry_type` and the latest one before it.
    ///
    /// Returns `None` without enough history or when the previous value is zero.
    pub fn calculate_change(
        entries: &[ProgressEntry],
        entry_type: ProgressType,
    ) -> Option<ChangeResult> {
        let of_type = sorted_of_type(entries, entry_type);
        let latest = *of_type.last()?;
        let previous = of_type.iter().rev().find(|e| e.date < latest.date)?;

        if previous.value == 0.0 {
            return None;
        }

        let absolute = latest.value - previous.value;
        Some(ChangeResult {
            absolute,
            percentage: absolute * 100.0 / previous.value,
            time_frame_ms: (latest.date - previous.date).num_milliseconds(),
        })
    }

    /// Classify the last three values; fewer than three is insufficient data
    pub fn analyze_trend(values: &[f64]) -> Trend {
        if values.len() < TREND_WINDOW {
            return Trend::InsufficientData;
        }

        let recent = &values[values.len() - TREND_WINDOW..];
        let diffs: Vec<f64> = recent.windows(2).map(|pair| pair[1] - pair[0]).collect();

        if diffs.iter().all(|d| *d > 0.0) {
            Trend::Increasing
        } else if diffs.iter().all(|d| *d < 0.0) {
            Trend::Decreasing
        } else {
            Trend::Fluctuating
        }
    }

    /// Percentage of calendar days in the tracked span that have at least one entry.
    ///
    /// The span is inclusive of the first and last day, so a single day is 100.
    /// An empty list has no adherence and yields 0.
    pub fn calculate_consistency(entries: &[ProgressEntry]) -> f64 {
        let days: HashSet<NaiveDate> = entries.iter().map(|e| e.date.date_naive()).collect();
        let (Some(first), Some(last)) = (days.iter().min(), days.iter().max()) else {
            return 0.0;
        };

        let span_days = (*last - *first).num_days() + 1;
        days.len() as f64 / span_days as f64 * 100.0
    }

    pub fn summarize(&self, entries: &[ProgressEntry]) -> ProgressSummary {
        ProgressSummary {
            weight: Self::summarize_weight(entries),
            strength: Self::summarize_strength(entries),
            measurements: Self::summarize_measurements(entries),
            consistency: if entries.is_empty() {
                None
            } else {
                Some(ConsistencySummary {
                    tracking_adherence: Self::calculate_consistency(entries),
                })
            },
        }
    }

    fn summarize_weight(entries: &[ProgressEntry]) -> Option<WeightSummary> {
        let weights = sorted_of_type(entries, ProgressType::Weight);
        if weights.len() < 2 {
            return None;
        }

        let start = weights[0].value;
        let current = weights[weights.len() - 1].value;
        let values: Vec<f64> = weights.iter().map(|e| e.value).collect();

        Some(WeightSummary {
            start,
            current,
            change: current - start,
            trend: Self::analyze_trend(&values),
        })
    }

    fn summarize_strength(entries: &[ProgressEntry]) -> Option<StrengthSummary> {
        let lifts = sorted_of_type(entries, ProgressType::Strength);
        if lifts.len() < 2 {
            return None;
        }

        let volume_change = percent_change(
            lifts[0].metrics.volume,
            lifts[lifts.len() - 1].metrics.volume,
        );

        let mut max_lifts: BTreeMap<String, f64> = BTreeMap::new();
        for entry in &lifts {
            let Some(one_rep_max) = &entry.metrics.one_rep_max else {
                continue;
            };
            for (exercise, weight) in one_rep_max {
                max_lifts
                    .entry(exercise.clone())
                    .and_modify(|best| *best = best.max(*weight))
                    .or_insert(*weight);
            }
        }

        Some(StrengthSummary {
            volume_change,
            max_lifts,
        })
    }

    fn summarize_measurements(entries: &[ProgressEntry]) -> Option<MeasurementSummary> {
        let measurements = sorted_of_type(entries, ProgressType::Measurements);
        if measurements.len() < 2 {
            return None;
        }

        let changes = BodyPart::ALL
            .iter()
            .filter_map(|part| {
                let mut recorded = measurements.iter().filter_map(|e| e.metrics.measurement(*part));
                let first = recorded.next()?;
                let last = recorded.last()?;
                Some((*part, last - first))
            })
            .collect();

        Some(MeasurementSummary { changes })
    }

    /// Weight direction and weekly rate between the first and last weight entry
    pub fn weight_trend(entries: &[ProgressEntry]) -> Option<WeightTrend> {
        let weights = sorted_of_type(entries, ProgressType::Weight);
        if weights.len() < 2 {
            return None;
        }

        let first = weights[0];
        let last = weights[weights.len() - 1];
        let change = last.value - first.value;
        // spans shorter than a day are treated as one day
        let span_days = ((last.date - first.date).num_milliseconds() as f64 / MS_PER_DAY).max(1.0);
        let weekly_change = change / (span_days / 7.0);

        Some(WeightTrend {
            direction: if weekly_change > 0.0 {
                WeightDirection::Gaining
            } else {
                WeightDirection::Losing
            },
            weekly_rate: weekly_change.abs(),
        })
    }

    pub fn strength_gain(entries: &[ProgressEntry]) -> Option<StrengthGain> {
        let lifts = sorted_of_type(entries, ProgressType::Strength);
        if lifts.len() < 2 {
            return None;
        }

        let first = lifts[0].metrics.volume?;
        let last = lifts[lifts.len() - 1].metrics.volume?;

        Some(StrengthGain {
            volume_increase: last - first,
            percentage: percent_change(Some(first), Some(last)),
        })
    }

    /// Threshold rules over computed trends
    pub fn recommendations(
        &self,
        weight_trend: Option<&WeightTrend>,
        consistency: Option<f64>,
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if let Some(trend) = weight_trend {
            if trend.weekly_rate > self.thresholds.max_weekly_weight_change {
                recommendations.push(RAPID_WEIGHT_CHANGE_MESSAGE.to_string());
            }
        }

        if let Some(score) = consistency {
            if score < self.thresholds.min_consistency {
                recommendations.push(LOW_CONSISTENCY_MESSAGE.to_string());
            }
        }

        recommendations
    }

    /// Rule-based insights; an empty list yields an empty result
    pub fn insights(&self, entries: &[ProgressEntry]) -> ProgressInsights {
        if entries.is_empty() {
            return ProgressInsights {
                weight_trend: None,
                strength_gain: None,
                consistency_score: None,
                recommendations: Vec::new(),
            };
        }

        let weight_trend = Self::weight_trend(entries);
        let consistency_score = Self::calculate_consistency(entries);
        let recommendations = self.recommendations(weight_trend.as_ref(), Some(consistency_score));

        ProgressInsights {
            weight_trend,
            strength_gain: Self::strength_gain(entries),
            consistency_score: Some(consistency_score),
            recommendations,
        }
    }
}

fn sorted_of_type(entries: &[ProgressEntry], entry_type: ProgressType) -> Vec<&ProgressEntry> {
    let mut of_type: Vec<&ProgressEntry> = entries
        .iter()
        .filter(|e| e.entry_type == entry_type)
        .collect();
    of_type.sort_by_key(|e| e.date);
    of_type
}

fn percent_change(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    match (from, to) {
        (Some(from), Some(to)) if from != 0.0 => Some((to - from) * 100.0 / from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProgressEntry, ProgressMetrics};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn entry_on(
        entry_type: ProgressType,
        value: f64,
        day: i64,
        metrics: ProgressMetrics,
    ) -> ProgressEntry {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        ProgressEntry::new(
            Uuid::nil(),
            NewProgressEntry {
                entry_type,
                value,
                unit: "kg".into(),
                date: Some(base + Duration::days(day)),
                metrics,
                notes: None,
            },
        )
    }

    fn weight(value: f64, day: i64) -> ProgressEntry {
        entry_on(ProgressType::Weight, value, day, ProgressMetrics::default())
    }

    #[test]
    fn test_analyze_trend_classification() {
        assert_eq!(ProgressAnalyzer::analyze_trend(&[10.0, 12.0, 15.0]), Trend::Increasing);
        assert_eq!(ProgressAnalyzer::analyze_trend(&[15.0, 12.0, 10.0]), Trend::Decreasing);
        assert_eq!(ProgressAnalyzer::analyze_trend(&[10.0, 15.0, 12.0]), Trend::Fluctuating);
        assert_eq!(ProgressAnalyzer::analyze_trend(&[10.0]), Trend::InsufficientData);
        assert_eq!(ProgressAnalyzer::analyze_trend(&[10.0, 11.0]), Trend::InsufficientData);
        assert_eq!(ProgressAnalyzer::analyze_trend(&[]), Trend::InsufficientData);
    }

    #[test]
    fn test_analyze_trend_uses_last_three_values_only() {
        assert_eq!(
            ProgressAnalyzer::analyze_trend(&[50.0, 1.0, 2.0, 3.0]),
            Trend::Increasing
        );
        // a flat step is neither increasing nor decreasing
        assert_eq!(ProgressAnalyzer::analyze_trend(&[1.0, 1.0, 2.0]), Trend::Fluctuating);
    }

    #[test]
    fn test_calculate_change_between_two_entries() {
        let entries = vec![weight(80.0, 0), weight(76.0, 7)];
        let change = ProgressAnalyzer::calculate_change(&entries, ProgressType::Weight).unwrap();

        assert_eq!(change.absolute, -4.0);
        assert_eq!(change.percentage, -5.0);
        assert_eq!(change.time_frame_ms, 7 * 86_400_000);
        assert_eq!(change.time_frame_days(), 7);
    }

    #[test]
    fn test_calculate_change_uses_newest_and_its_predecessor() {
        // unsorted input, other types interleaved
        let entries = vec![
            weight(90.0, 3),
            entry_on(ProgressType::Strength, 100.0, 4, ProgressMetrics::default()),
            weight(100.0, 0),
            weight(99.0, 5),
        ];
        let change = ProgressAnalyzer::calculate_change(&entries, ProgressType::Weight).unwrap();
        assert_eq!(change.absolute, 9.0);
        assert_eq!(change.percentage, 10.0);
    }

    #[test]
    fn test_calculate_change_without_history_or_zero_base() {
        let change = ProgressAnalyzer::calculate_change;
        assert!(change(&[], ProgressType::Weight).is_none());
        assert!(change(&[weight(80.0, 0)], ProgressType::Weight).is_none());
        assert!(change(&[weight(80.0, 0), weight(81.0, 1)], ProgressType::Cardio).is_none());
        assert!(change(&[weight(0.0, 0), weight(81.0, 1)], ProgressType::Weight).is_none());
    }

    #[test]
    fn test_consistency_over_ten_day_window() {
        let every_day: Vec<ProgressEntry> = (0..10).map(|d| weight(80.0, d)).collect();
        assert_eq!(ProgressAnalyzer::calculate_consistency(&every_day), 100.0);

        let every_other_day: Vec<ProgressEntry> =
            [0, 2, 4, 6, 9].iter().map(|d| weight(80.0, *d)).collect();
        assert_eq!(ProgressAnalyzer::calculate_consistency(&every_other_day), 50.0);
    }

    #[test]
    fn test_consistency_degenerate_cases() {
        assert_eq!(ProgressAnalyzer::calculate_consistency(&[]), 0.0);
        assert_eq!(ProgressAnalyzer::calculate_consistency(&[weight(80.0, 0)]), 100.0);
        let same_day = vec![weight(80.0, 0), weight(79.0, 0), weight(78.0, 0)];
        assert_eq!(ProgressAnalyzer::calculate_consistency(&same_day), 100.0);
    }

    #[test]
    fn test_summary_requires_two_entries_per_type() {
        let analyzer = ProgressAnalyzer::default();
        let summary = analyzer.summarize(&[weight(80.0, 0)]);
        assert!(summary.weight.is_none());
        assert!(summary.strength.is_none());
        assert!(summary.measurements.is_none());
        assert_eq!(summary.consistency.unwrap().tracking_adherence, 100.0);

        let empty = analyzer.summarize(&[]);
        assert!(empty.consistency.is_none());
    }

    #[test]
    fn test_weight_summary() {
        let summary = ProgressAnalyzer::default().summarize(&[
            weight(82.0, 0),
            weight(81.0, 1),
            weight(80.5, 2),
        ]);
        let weight = summary.weight.unwrap();
        assert_eq!(weight.start, 82.0);
        assert_eq!(weight.current, 80.5);
        assert_eq!(weight.change, -1.5);
        assert_eq!(weight.trend, Trend::Decreasing);
    }

    #[test]
    fn test_strength_summary_tracks_best_lifts() {
        let lift = |volume: Option<f64>, lifts: &[(&str, f64)], day: i64| {
            entry_on(
                ProgressType::Strength,
                0.0,
                day,
                ProgressMetrics {
                    volume,
                    one_rep_max: Some(lifts.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
                    ..Default::default()
                },
            )
        };

        let summary = ProgressAnalyzer::default().summarize(&[
            lift(Some(4000.0), &[("squat", 120.0), ("bench", 90.0)], 0),
            lift(None, &[("squat", 130.0)], 3),
            lift(Some(5000.0), &[("squat", 125.0), ("deadlift", 160.0)], 6),
        ]);

        let strength = summary.strength.unwrap();
        assert_eq!(strength.volume_change, Some(25.0));
        assert_eq!(strength.max_lifts["squat"], 130.0);
        assert_eq!(strength.max_lifts["bench"], 90.0);
        assert_eq!(strength.max_lifts["deadlift"], 160.0);
    }

    #[test]
    fn test_strength_volume_change_guarded_against_zero() {
        let zero_volume = ProgressMetrics {
            volume: Some(0.0),
            ..Default::default()
        };
        let volume = ProgressMetrics {
            volume: Some(100.0),
            ..Default::default()
        };
        let summary = ProgressAnalyzer::default().summarize(&[
            entry_on(ProgressType::Strength, 0.0, 0, zero_volume),
            entry_on(ProgressType::Strength, 0.0, 1, volume),
        ]);
        assert_eq!(summary.strength.unwrap().volume_change, None);
    }

    #[test]
    fn test_measurement_deltas_use_entries_with_the_field() {
        let measured = |chest: Option<f64>, waist: Option<f64>, day: i64| {
            entry_on(
                ProgressType::Measurements,
                0.0,
                day,
                ProgressMetrics {
                    chest,
                    waist,
                    ..Default::default()
                },
            )
        };

        let summary = ProgressAnalyzer::default().summarize(&[
            measured(Some(100.0), None, 0),
            measured(Some(101.5), Some(88.0), 5),
            measured(None, Some(85.0), 10),
        ]);

        let changes = summary.measurements.unwrap().changes;
        assert_eq!(changes[&BodyPart::Chest], 1.5);
        assert_eq!(changes[&BodyPart::Waist], -3.0);
        assert!(!changes.contains_key(&BodyPart::Hips));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let analyzer = ProgressAnalyzer::default();
        let entries = vec![weight(80.0, 0), weight(79.0, 2), weight(78.5, 4)];
        assert_eq!(analyzer.summarize(&entries), analyzer.summarize(&entries));
    }

    #[test]
    fn test_rapid_weight_loss_triggers_caution() {
        let analyzer = ProgressAnalyzer::default();
        let entries = vec![weight(90.0, 0), weight(87.0, 7)];
        let insights = analyzer.insights(&entries);

        let trend = insights.weight_trend.unwrap();
        assert_eq!(trend.direction, WeightDirection::Losing);
        assert_eq!(trend.weekly_rate, 3.0);
        assert!(insights
            .recommendations
            .contains(&RAPID_WEIGHT_CHANGE_MESSAGE.to_string()));
        // two logged days out of eight
        assert!(insights
            .recommendations
            .contains(&LOW_CONSISTENCY_MESSAGE.to_string()));
    }

    #[test]
    fn test_steady_consistent_logging_has_no_warnings() {
        let analyzer = ProgressAnalyzer::default();
        let entries: Vec<ProgressEntry> =
            (0..14).map(|d| weight(80.0 - d as f64 * 0.05, d)).collect();
        let insights = analyzer.insights(&entries);
        assert!(insights.recommendations.is_empty());
        assert_eq!(insights.consistency_score, Some(100.0));
    }

    #[test]
    fn test_custom_thresholds() {
        let analyzer = ProgressAnalyzer::new(InsightThresholds {
            max_weekly_weight_change: 5.0,
            min_consistency: 10.0,
        });
        let entries = vec![weight(90.0, 0), weight(87.0, 7)];
        assert!(analyzer.insights(&entries).recommendations.is_empty());
    }
}
