use anyhow::Result;
use clap::Args;

use fitness_coach::models::{HealthInfo, PlanGenerationRequest, ScheduleRequest};
use fitness_coach::services::PlanGenerator;

#[derive(Args)]
pub struct PlanCommand {
    /// Fitness level: beginner, intermediate or advanced
    #[arg(short, long)]
    level: String,

    /// Goal: weight_loss, muscle_gain, strength, endurance or flexibility
    #[arg(short, long)]
    goal: String,

    /// Training days per week (1-7)
    #[arg(short, long)]
    days: i64,

    /// Minutes per session (15-180)
    #[arg(long)]
    duration: i64,

    /// Medical condition, repeatable
    #[arg(long = "condition")]
    conditions: Vec<String>,

    /// Injury, repeatable
    #[arg(long = "injury")]
    injuries: Vec<String>,

    /// Physical limitation, repeatable
    #[arg(long = "limitation")]
    limitations: Vec<String>,
}

impl PlanCommand {
    pub async fn execute(self) -> Result<()> {
        let request = PlanGenerationRequest {
            fitness_level: Some(self.level),
            goal: Some(self.goal),
            schedule: Some(ScheduleRequest {
                days_per_week: Some(self.days),
                session_duration: Some(self.duration),
            }),
            health_info: Some(HealthInfo {
                medical_conditions: self.conditions,
                injuries: self.injuries,
                limitations: self.limitations,
            }),
        };

        let plan = PlanGenerator::default().generate_from_request(&request)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        Ok(())
    }
}
