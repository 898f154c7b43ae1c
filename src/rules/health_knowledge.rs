use std::collections::HashMap;
use tracing::debug;

use crate::models::{HealthInfo, HealthRecommendation};

/// Safety guidance keyed by lower-cased condition names
#[derive(Debug, Clone, Default)]
pub struct HealthKnowledge {
    pub diseases: HashMap<String, HealthRecommendation>,
    pub injuries: HashMap<String, HealthRecommendation>,
    pub limitations: HashMap<String, HealthRecommendation>,
}

fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

fn table(entries: Vec<(&str, HealthRecommendation)>) -> HashMap<String, HealthRecommendation> {
    entries
        .into_iter()
        .map(|(key, block)| (normalize(key), block))
        .collect()
}

impl HealthKnowledge {
    pub fn standard() -> Self {
        Self {
            diseases: table(vec![
                ("diabetes", HealthRecommendation::new("⚠️ Diabetes Management", &[
                    "Monitor blood sugar before and after workouts",
                    "Avoid high-intensity exercises if blood sugar is too high or too low",
                    "Stay hydrated throughout the workout",
                    "Keep glucose tablets or snacks nearby during exercise",
                ])),
                ("hypertension", HealthRecommendation::new("⚠️ High Blood Pressure", &[
                    "Avoid exercises that cause sudden spikes in blood pressure",
                    "Focus on controlled breathing during exercises",
                    "Include more low-impact cardio activities",
                    "Monitor heart rate during workouts",
                ])),
                ("asthma", HealthRecommendation::new("⚠️ Asthma Management", &[
                    "Keep inhaler readily available during workouts",
                    "Start with a proper warm-up to prevent exercise-induced asthma",
                    "Choose exercises with controlled breathing patterns",
                    "Avoid outdoor workouts during high pollen or pollution days",
                ])),
                ("heart condition", HealthRecommendation::new("⚠️ Heart Condition", &[
                    "Start with low-intensity exercises",
                    "Monitor heart rate closely during workouts",
                    "Include regular rest periods",
                    "Avoid exercises that cause chest pain or discomfort",
                ])),
                ("arthritis", HealthRecommendation::new("⚠️ Arthritis Management", &[
                    "Focus on low-impact exercises",
                    "Include proper warm-up and cool-down",
                    "Use joint-friendly movements",
                    "Avoid exercises that put excessive stress on affected joints",
                ])),
            ]),
            injuries: table(vec![
                ("knee injury", HealthRecommendation::new("⚠️ Knee Injury", &[
                    "Avoid high-impact exercises",
                    "Focus on strengthening surrounding muscles",
                    "Use proper knee support during workouts",
                    "Include gentle stretching exercises",
                ])),
                ("back injury", HealthRecommendation::new("⚠️ Back Injury", &[
                    "Avoid exercises that strain the lower back",
                    "Maintain proper form during all exercises",
                    "Include core strengthening exercises",
                    "Use proper lifting techniques",
                ])),
                ("shoulder injury", HealthRecommendation::new("⚠️ Shoulder Injury", &[
                    "Avoid overhead exercises",
                    "Focus on shoulder stability exercises",
                    "Use lighter weights with proper form",
                    "Include gentle shoulder mobility work",
                ])),
                ("ankle sprain", HealthRecommendation::new("⚠️ Ankle Sprain", &[
                    "Avoid exercises that put stress on the ankle",
                    "Use ankle support during workouts",
                    "Focus on balance and stability exercises",
                    "Include gentle ankle mobility work",
                ])),
                ("wrist injury", HealthRecommendation::new("⚠️ Wrist Injury", &[
                    "Avoid exercises that strain the wrists",
                    "Use wrist wraps for support",
                    "Focus on exercises that don't require wrist flexion",
                    "Include gentle wrist mobility work",
                ])),
                ("hip injury", HealthRecommendation::new("⚠️ Hip Injury", &[
                    "Avoid exercises that put stress on the hips",
                    "Focus on hip stability exercises",
                    "Include gentle hip mobility work",
                    "Use proper form during lower body exercises",
                ])),
                ("elbow injury", HealthRecommendation::new("⚠️ Elbow Injury", &[
                    "Avoid exercises that strain the elbows",
                    "Use elbow support during workouts",
                    "Focus on exercises that don't require elbow flexion",
                    "Include gentle elbow mobility work",
                ])),
                ("neck injury", HealthRecommendation::new("⚠️ Neck Injury", &[
                    "Avoid exercises that strain the neck",
                    "Maintain proper neck alignment during exercises",
                    "Focus on neck stability exercises",
                    "Include gentle neck mobility work",
                ])),
                ("hamstring strain", HealthRecommendation::new("⚠️ Hamstring Strain", &[
                    "Avoid exercises that stretch or strain hamstrings",
                    "Focus on gentle hamstring mobility work",
                    "Include strengthening exercises for surrounding muscles",
                    "Use proper warm-up before lower body exercises",
                ])),
                ("calf strain", HealthRecommendation::new("⚠️ Calf Strain", &[
                    "Avoid exercises that strain the calves",
                    "Focus on gentle calf mobility work",
                    "Include strengthening exercises for surrounding muscles",
                    "Use proper warm-up before lower body exercises",
                ])),
            ]),
            limitations: table(vec![
                ("limited mobility", HealthRecommendation::new("⚠️ Limited Mobility", &[
                    "Focus on exercises within your range of motion",
                    "Include gentle stretching exercises",
                    "Use modifications for exercises as needed",
                    "Take regular breaks during workouts",
                ])),
                ("balance issues", HealthRecommendation::new("⚠️ Balance Issues", &[
                    "Include balance training exercises",
                    "Use support when needed",
                    "Start with stable exercises before progressing",
                    "Focus on core strengthening",
                ])),
                ("joint pain", HealthRecommendation::new("⚠️ Joint Pain", &[
                    "Avoid exercises that cause pain",
                    "Use proper joint support",
                    "Focus on low-impact exercises",
                    "Include gentle joint mobility work",
                ])),
                ("fatigue", HealthRecommendation::new("⚠️ Fatigue Management", &[
                    "Start with shorter workout sessions",
                    "Include regular rest periods",
                    "Focus on proper nutrition and hydration",
                    "Listen to your body's signals",
                ])),
                ("breathing difficulties", HealthRecommendation::new("⚠️ Breathing Difficulties", &[
                    "Focus on controlled breathing exercises",
                    "Start with low-intensity activities",
                    "Include regular rest periods",
                    "Monitor breathing during workouts",
                ])),
                ("posture issues", HealthRecommendation::new("⚠️ Posture Issues", &[
                    "Focus on posture-correcting exercises",
                    "Include core strengthening",
                    "Use proper form during all exercises",
                    "Include gentle stretching exercises",
                ])),
                ("coordination issues", HealthRecommendation::new("⚠️ Coordination Issues", &[
                    "Start with simple exercises",
                    "Focus on basic movement patterns",
                    "Include coordination exercises",
                    "Use clear verbal cues during exercises",
                ])),
                ("strength limitations", HealthRecommendation::new("⚠️ Strength Limitations", &[
                    "Start with bodyweight exercises",
                    "Use lighter weights with proper form",
                    "Focus on proper technique",
                    "Gradually increase intensity",
                ])),
                (
                    "flexibility limitations",
                    HealthRecommendation::new("⚠️ Flexibility Limitations", &[
                        "Include gentle stretching exercises",
                        "Focus on mobility work",
                        "Use modifications for exercises",
                        "Avoid forcing movements",
                    ]),
                ),
                ("endurance limitations", HealthRecommendation::new("⚠️ Endurance Limitations", &[
                    "Start with shorter workout sessions",
                    "Include regular rest periods",
                    "Focus on building endurance gradually",
                    "Monitor intensity during workouts",
                ])),
            ]),
        }
    }

    pub fn condition(&self, term: &str) -> Option<&HealthRecommendation> {
        self.diseases.get(&normalize(term))
    }

    pub fn injury(&self, term: &str) -> Option<&HealthRecommendation> {
        self.injuries.get(&normalize(term))
    }

    pub fn limitation(&self, term: &str) -> Option<&HealthRecommendation> {
        self.limitations.get(&normalize(term))
    }

    /// One block per matched term, in input order: conditions, then injuries, then limitations.
    /// Unknown terms are skipped.
    pub fn recommendations_for(&self, health_info: &HealthInfo) -> Vec<HealthRecommendation> {
        type Lookup = for<'k> fn(&'k HealthKnowledge, &str) -> Option<&'k HealthRecommendation>;
        let lookups: [(&str, &[String], Lookup); 3] = [
            ("medical condition", health_info.medical_conditions.as_slice(), Self::condition),
            ("injury", health_info.injuries.as_slice(), Self::injury),
            ("limitation", health_info.limitations.as_slice(), Self::limitation),
        ];

        let mut recommendations = Vec::new();
        for (kind, terms, lookup) in lookups {
            for term in terms {
                match lookup(self, term) {
                    Some(block) => recommendations.push(block.clone()),
                    None => debug!("No health guidance for {} '{}'", kind, term),
                }
            }
        }
        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let knowledge = HealthKnowledge::standard();
        assert_eq!(
            knowledge.condition("  Diabetes ").map(|b| b.warning.as_str()),
            Some("⚠️ Diabetes Management")
        );
        assert!(knowledge.injury("Knee Injury").is_some());
        assert!(knowledge.limitation("FATIGUE").is_some());
    }

    #[test]
    fn test_tables_are_independent() {
        let knowledge = HealthKnowledge::standard();
        // an injury term is not matched as a medical condition
        assert!(knowledge.condition("knee injury").is_none());
        assert!(knowledge.injury("diabetes").is_none());
    }

    #[test]
    fn test_every_block_has_recommendations() {
        let knowledge = HealthKnowledge::standard();
        let all = knowledge
            .diseases
            .values()
            .chain(knowledge.injuries.values())
            .chain(knowledge.limitations.values());
        for block in all {
            assert!(block.warning.starts_with("⚠️"));
            assert!(!block.recommendations.is_empty());
        }
    }

    #[test]
    fn test_recommendations_keep_duplicates_and_skip_unknown_terms() {
        let knowledge = HealthKnowledge::standard();
        let info = HealthInfo {
            medical_conditions: vec!["asthma".into(), "gout".into(), "Asthma".into()],
            injuries: vec!["back injury".into()],
            limitations: vec!["balance issues".into()],
        };

        let blocks = knowledge.recommendations_for(&info);
        let warnings: Vec<&str> = blocks.iter().map(|b| b.warning.as_str()).collect();
        assert_eq!(
            warnings,
            vec![
                "⚠️ Asthma Management",
                "⚠️ Asthma Management",
                "⚠️ Back Injury",
                "⚠️ Balance Issues",
            ]
        );
    }
}
