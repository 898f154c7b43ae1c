use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use fitness_coach::config::AppConfig;
use fitness_coach::llm::OpenAiCompatibleClient;
use fitness_coach::models::{NewProgressEntry, ProgressEntry, ProgressType, SummaryReport};
use fitness_coach::services::{CoachingContext, InsightService, ProgressAnalyzer};

#[derive(Args)]
pub struct SummaryCommand {
    /// JSON array of progress entries
    #[arg(short, long)]
    file: PathBuf,

    /// Also ask the configured text generator for recommendations
    #[arg(long)]
    coach: bool,
}

impl SummaryCommand {
    pub async fn execute(self, config: &AppConfig) -> Result<()> {
        let entries = read_entries(&self.file)?;

        let analyzer = ProgressAnalyzer::new(config.analytics.thresholds);
        let summary = analyzer.summarize(&entries);
        let recommendations = analyzer.recommendations(
            ProgressAnalyzer::weight_trend(&entries).as_ref(),
            summary.consistency.as_ref().map(|c| c.tracking_adherence),
        );

        let coach_recommendations = if self.coach && config.llm.enabled && !entries.is_empty() {
            let client = OpenAiCompatibleClient::from_config(&config.llm)?;
            InsightService::new(Arc::new(client))
                .progress_recommendations(&summary, &CoachingContext::default())
                .await
        } else {
            None
        };

        let report = SummaryReport {
            summary,
            recommendations,
            coach_recommendations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }
}

#[derive(Args)]
pub struct ChangeCommand {
    /// JSON array of progress entries
    #[arg(short, long)]
    file: PathBuf,

    /// Entry type: weight, strength, measurements or cardio
    #[arg(short = 't', long = "type")]
    entry_type: String,
}

impl ChangeCommand {
    pub async fn execute(self) -> Result<()> {
        let entry_type: ProgressType = self.entry_type.parse()?;
        let entries = read_entries(&self.file)?;

        match ProgressAnalyzer::calculate_change(&entries, entry_type) {
            Some(change) => {
                let output = json!({
                    "absolute": change.absolute,
                    "percentage": change.percentage,
                    "time_frame_ms": change.time_frame_ms,
                    "time_frame_days": change.time_frame_days(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            None => println!("insufficient data"),
        }
        Ok(())
    }
}

/// Entries in a file carry no owner; they are analysed as a single anonymous user
fn read_entries(path: &Path) -> Result<Vec<ProgressEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let new_entries: Vec<NewProgressEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse progress entries in {}", path.display()))?;

    new_entries
        .into_iter()
        .map(|entry| -> Result<ProgressEntry> {
            entry.validate()?;
            Ok(ProgressEntry::new(Uuid::nil(), entry))
        })
        .collect()
}
