use std::collections::HashMap;

use crate::models::{Exercise, ExerciseCategory, FitnessLevel, Goal};

use ExerciseCategory::{Cardio, Flexibility, Hiit, Strength};

/// Category rotation per goal; day `i` trains `categories[i % len]`
pub fn standard_goal_categories() -> HashMap<Goal, Vec<ExerciseCategory>> {
    HashMap::from([
        (Goal::WeightLoss, vec![Cardio, Hiit, Strength]),
        (Goal::MuscleGain, vec![Strength, Hiit]),
        (Goal::Strength, vec![Strength, Hiit]),
        (Goal::Endurance, vec![Cardio, Hiit]),
        (Goal::Flexibility, vec![Flexibility, Strength]),
    ])
}

pub fn standard_exercise_templates() -> HashMap<(ExerciseCategory, FitnessLevel), Vec<Exercise>> {
    let mut templates = HashMap::new();

    templates.insert(
        (Strength, FitnessLevel::Beginner),
        vec![
            Exercise::strength(
                "Bodyweight Squats",
                3,
                12,
                60,
                "Keep back straight, knees aligned with toes",
            ),
            Exercise::strength(
                "Push-ups (Knee)",
                3,
                10,
                60,
                "Keep core tight, elbows close to body",
            ),
            Exercise::strength("Dumbbell Rows", 3, 12, 60, "Keep back straight, pull elbows up"),
        ],
    );
    templates.insert(
        (Strength, FitnessLevel::Intermediate),
        vec![
            Exercise::strength(
                "Barbell Squats",
                4,
                10,
                90,
                "Keep back straight, knees aligned with toes",
            ),
            Exercise::strength("Push-ups", 4, 12, 90, "Keep core tight, elbows close to body"),
            Exercise::strength("Pull-ups", 4, 8, 90, "Full range of motion, controlled descent"),
        ],
    );
    templates.insert(
        (Strength, FitnessLevel::Advanced),
        vec![
            Exercise::strength(
                "Weighted Squats",
                5,
                8,
                120,
                "Keep back straight, knees aligned with toes",
            ),
            Exercise::strength(
                "Weighted Push-ups",
                5,
                10,
                120,
                "Keep core tight, elbows close to body",
            ),
            Exercise::strength(
                "Weighted Pull-ups",
                5,
                6,
                120,
                "Full range of motion, controlled descent",
            ),
        ],
    );

    templates.insert(
        (Cardio, FitnessLevel::Beginner),
        vec![
            Exercise::timed(Cardio, "Walking", 20, "Brisk pace, maintain good posture"),
            Exercise::timed(Cardio, "Light Jogging", 10, "Maintain conversation pace"),
        ],
    );
    templates.insert(
        (Cardio, FitnessLevel::Intermediate),
        vec![
            Exercise::timed(Cardio, "Jogging", 25, "Moderate pace, maintain conversation"),
            Exercise::timed(Cardio, "High Knees", 10, "Keep core tight, high knees"),
        ],
    );
    templates.insert(
        (Cardio, FitnessLevel::Advanced),
        vec![
            Exercise::timed(Cardio, "Running", 30, "Challenging pace, maintain form"),
            Exercise::timed(Cardio, "Burpees", 10, "Full range of motion, maintain form"),
        ],
    );

    templates.insert(
        (Hiit, FitnessLevel::Beginner),
        vec![
            Exercise::interval("Jumping Jacks", 30, 30, "Light impact, maintain form"),
            Exercise::interval("Mountain Climbers", 30, 30, "Keep core tight, controlled movement"),
        ],
    );
    templates.insert(
        (Hiit, FitnessLevel::Intermediate),
        vec![
            Exercise::interval("Burpees", 45, 15, "Full range of motion, maintain form"),
            Exercise::interval(
                "Kettlebell Swings",
                45,
                15,
                "Keep back straight, controlled movement",
            ),
        ],
    );
    templates.insert(
        (Hiit, FitnessLevel::Advanced),
        vec![
            Exercise::interval("Burpee Pull-ups", 60, 30, "Full range of motion, maintain form"),
            Exercise::interval(
                "Kettlebell Complex",
                60,
                30,
                "Keep back straight, controlled movement",
            ),
        ],
    );

    templates.insert(
        (Flexibility, FitnessLevel::Beginner),
        vec![
            Exercise::timed(Flexibility, "Cat-Cow Stretch", 60, "Slow, controlled movements"),
            Exercise::timed(
                Flexibility,
                "Hip Flexor Stretch",
                60,
                "Keep back straight, gentle stretch",
            ),
        ],
    );
    templates.insert(
        (Flexibility, FitnessLevel::Intermediate),
        vec![
            Exercise::timed(
                Flexibility,
                "Dynamic Stretching",
                90,
                "Controlled movements, full range",
            ),
            Exercise::timed(Flexibility, "Yoga Flow", 90, "Maintain breath, controlled movements"),
        ],
    );
    templates.insert(
        (Flexibility, FitnessLevel::Advanced),
        vec![
            Exercise::timed(
                Flexibility,
                "Advanced Yoga Flow",
                120,
                "Complex poses, maintain breath",
            ),
            Exercise::timed(
                Flexibility,
                "Mobility Work",
                120,
                "Full range of motion, controlled movements",
            ),
        ],
    );

    templates
}
