use anyhow::{ensure, Context, Result};
use std::env;

use crate::services::progress_analysis_service::InsightThresholds;
use crate::services::progress_service::MAX_WINDOW_DAYS;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_level: String,
    pub llm: LlmConfig,
    pub analytics: AnalyticsConfig,
}

impl AppConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(AppConfig {
            log_level,
            llm: LlmConfig::from_env()?,
            analytics: AnalyticsConfig::from_env()?,
        })
    }
}

/// Connection settings for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Whether an endpoint was configured at all; insights are skipped otherwise
    pub enabled: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_retries: 3,
            enabled: false,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let explicit_url = env::var("LLM_BASE_URL").ok();
        let api_key = env::var("LLM_API_KEY").ok().filter(|key| !key.is_empty());

        Ok(Self {
            enabled: explicit_url.is_some() || api_key.is_some(),
            base_url: explicit_url.unwrap_or(defaults.base_url),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            api_key,
            timeout_secs: parse_var("LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
            max_retries: parse_var("LLM_MAX_RETRIES", defaults.max_retries)?,
        })
    }
}

/// Tunables for progress analysis and insight requests
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Absolute percentage change that makes a new entry worth a coach insight
    pub insight_change_threshold: f64,
    /// Days of history covered by summaries and insights
    pub summary_window_days: i64,
    pub thresholds: InsightThresholds,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            insight_change_threshold: 5.0,
            summary_window_days: 30,
            thresholds: InsightThresholds::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let summary_window_days = parse_var("SUMMARY_WINDOW_DAYS", defaults.summary_window_days)?;
        check_window(summary_window_days)?;

        Ok(Self {
            insight_change_threshold: parse_var(
                "INSIGHT_CHANGE_THRESHOLD",
                defaults.insight_change_threshold,
            )?,
            summary_window_days,
            thresholds: InsightThresholds {
                max_weekly_weight_change: parse_var(
                    "MAX_WEEKLY_WEIGHT_CHANGE",
                    defaults.thresholds.max_weekly_weight_change,
                )?,
                min_consistency: parse_var(
                    "MIN_CONSISTENCY",
                    defaults.thresholds.min_consistency,
                )?,
            },
        })
    }
}

fn check_window(days: i64) -> Result<()> {
    ensure!(
        (1..=MAX_WINDOW_DAYS).contains(&days),
        "SUMMARY_WINDOW_DAYS must be between 1 and {}, got {}",
        MAX_WINDOW_DAYS,
        days
    );
    Ok(())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let llm = LlmConfig::default();
        assert!(!llm.enabled);
        assert_eq!(llm.timeout_secs, 30);

        let analytics = AnalyticsConfig::default();
        assert_eq!(analytics.insight_change_threshold, 5.0);
        assert_eq!(analytics.summary_window_days, 30);
        assert_eq!(analytics.thresholds.min_consistency, 70.0);
    }

    #[test]
    fn test_parse_var_reports_bad_values() {
        env::set_var("FITNESS_COACH_TEST_BAD_NUMBER", "seven");
        let result: Result<u32> = parse_var("FITNESS_COACH_TEST_BAD_NUMBER", 3);
        assert!(result.is_err());
        env::remove_var("FITNESS_COACH_TEST_BAD_NUMBER");

        let result: Result<u32> = parse_var("FITNESS_COACH_TEST_UNSET_NUMBER", 3);
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_summary_window_bounds() {
        assert!(check_window(1).is_ok());
        assert!(check_window(MAX_WINDOW_DAYS).is_ok());
        assert!(check_window(0).is_err());
        assert!(check_window(MAX_WINDOW_DAYS + 1).is_err());
        assert!(check_window(i64::MAX).is_err());
    }
}
