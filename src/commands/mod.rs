mod chat;
mod plan;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use fitness_coach::config::AppConfig;

pub use chat::ChatCommand;
pub use plan::PlanCommand;
pub use progress::{ChangeCommand, SummaryCommand};

#[derive(Parser)]
#[command(name = "fitness-coach")]
#[command(about = "Workout plan generation and progress analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly workout plan
    Plan(PlanCommand),

    /// Summarize progress entries read from a JSON file
    Summary(SummaryCommand),

    /// Change between the two most recent entries of a type
    Change(ChangeCommand),

    /// Ask the coach a question
    Chat(ChatCommand),
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self, config: AppConfig) -> Result<()> {
        debug!("Text generation enabled: {}", config.llm.enabled);

        match self.command {
            Commands::Plan(cmd) => cmd.execute().await,
            Commands::Summary(cmd) => cmd.execute(&config).await,
            Commands::Change(cmd) => cmd.execute().await,
            Commands::Chat(cmd) => cmd.execute(&config).await,
        }
    }
}
