// Plan and progress records shared by the generator, the analyzer and the stores

pub mod progress;
pub mod workout_plan;

pub use progress::*;
pub use workout_plan::*;
