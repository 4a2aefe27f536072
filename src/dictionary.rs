use crate::types::checklist::{Checklist, ChecklistItem, ChecklistKind};
use std::collections::HashMap;

/// Built-in checklist for a given encounter kind, including its topic map.
/// Static configuration data; loaded once per session.
pub fn builtin(kind: ChecklistKind) -> Checklist {
    let items = match kind {
        ChecklistKind::Default => default_items(),
        ChecklistKind::InitialEvaluation => initial_evaluation_items(),
        ChecklistKind::FollowUp => follow_up_items(),
    };
    Checklist {
        name: kind.as_str().to_string(),
        topic_map: builtin_topic_map(kind, &items),
        items,
    }
}

fn item(id: &str, text: &str, category: &str, keywords: &[&str]) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        text: text.to_string(),
        category: category.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        threshold: None,
    }
}

fn default_items() -> Vec<ChecklistItem> {
    vec![
        item(
            "chief-complaint",
            "Reason for today's visit",
            "presenting",
            &["concern", "problem", "reason", "complaint", "brings", "visit"],
        ),
        item(
            "sleep",
            "Sleep quality and patterns",
            "symptoms",
            &["sleep", "insomnia", "tired", "rest", "awake", "nightmare"],
        ),
        item(
            "mood",
            "Mood and affect",
            "symptoms",
            &["mood", "depressed", "depression", "sad", "irritable", "down"],
        ),
        item(
            "anxiety",
            "Anxiety and stress levels",
            "symptoms",
            &["anxiety", "worried", "nervous", "panic", "fear", "stress"],
        ),
        item(
            "appetite",
            "Appetite and weight changes",
            "symptoms",
            &["appetite", "eating", "weight", "meal", "hungry"],
        ),
        item(
            "energy",
            "Energy and motivation",
            "symptoms",
            &["energy", "fatigue", "motivation", "exhausted"],
        ),
        item(
            "medication",
            "Current medications and dosing",
            "treatment",
            &["medication", "dose", "prescription", "refill", "pill", "mg"],
        ),
        item(
            "side-effects",
            "Medication side effects",
            "treatment",
            &["side effect", "side effects", "nausea", "dizzy", "headache", "drowsy"],
        ),
        item(
            "substance-use",
            "Substance use screening",
            "screening",
            &["alcohol", "drinking", "smoking", "drug", "cannabis", "caffeine"],
        ),
        item(
            "safety",
            "Safety and self-harm screening",
            "screening",
            &["suicidal", "suicide", "self harm", "hopeless", "safety", "harm"],
        ),
        item(
            "social",
            "Social support and relationships",
            "context",
            &["family", "friends", "support", "relationship", "isolated"],
        ),
        item(
            "functioning",
            "Work, school and daily functioning",
            "context",
            &["work", "school", "daily", "routine", "functioning"],
        ),
    ]
}

fn initial_evaluation_items() -> Vec<ChecklistItem> {
    let mut items = default_items();
    items.extend([
        item(
            "medical-history",
            "Past medical and psychiatric history",
            "history",
            &["history", "diagnosis", "condition", "surgery", "illness"],
        ),
        item(
            "family-history",
            "Family psychiatric history",
            "history",
            &["family history", "mother", "father", "genetic", "relatives"],
        ),
        item(
            "allergies",
            "Allergies and adverse reactions",
            "history",
            &["allergy", "allergies", "reaction", "intolerance"],
        ),
        item(
            "prior-treatment",
            "Previous treatment and providers",
            "history",
            &["therapy", "counseling", "hospitalized", "treatment", "psychiatrist"],
        ),
        item(
            "trauma",
            "Trauma and loss history",
            "history",
            &["trauma", "abuse", "loss", "grief"],
        ),
        item(
            "goals",
            "Treatment goals and expectations",
            "plan",
            &["goal", "goals", "expectations", "hope"],
        ),
    ]);
    items
}

fn follow_up_items() -> Vec<ChecklistItem> {
    vec![
        item(
            "medication-adherence",
            "Medication adherence since last visit",
            "treatment",
            &["taking", "missed", "adherence", "medication", "refill"],
        ),
        item(
            "side-effects",
            "Medication side effects",
            "treatment",
            &["side effect", "side effects", "nausea", "dizzy", "headache", "drowsy"],
        ),
        item(
            "symptom-change",
            "Symptom change since last visit",
            "symptoms",
            &["better", "worse", "improved", "same", "change"],
        ),
        item(
            "sleep",
            "Sleep quality and patterns",
            "symptoms",
            &["sleep", "insomnia", "tired", "rest", "awake"],
        ),
        item(
            "mood",
            "Mood and affect",
            "symptoms",
            &["mood", "depressed", "depression", "sad", "irritable", "down"],
        ),
        item(
            "safety",
            "Safety and self-harm screening",
            "screening",
            &["suicidal", "suicide", "self harm", "hopeless", "safety", "harm"],
        ),
        item(
            "plan",
            "Plan and next appointment",
            "plan",
            &["plan", "follow up", "next", "appointment", "schedule"],
        ),
    ]
}

// Topic labels follow the speech service's taxonomy, which is coarser than
// the checklists; only labels with an obvious item mapping are listed and
// anything else falls back to keyword scoring.
fn builtin_topic_map(kind: ChecklistKind, items: &[ChecklistItem]) -> HashMap<String, Vec<String>> {
    let candidates: &[(&str, &[&str])] = match kind {
        ChecklistKind::FollowUp => &[
            ("sleep", &["sleep"]),
            ("mood", &["mood"]),
            ("medication", &["medication-adherence", "side-effects"]),
            ("safety", &["safety"]),
        ],
        _ => &[
            ("sleep", &["sleep"]),
            ("mood", &["mood"]),
            ("anxiety", &["anxiety"]),
            ("medication", &["medication", "side-effects"]),
            ("substance_use", &["substance-use"]),
            ("safety", &["safety"]),
        ],
    };

    candidates
        .iter()
        .map(|(label, ids)| {
            (
                label.to_string(),
                ids.iter()
                    .filter(|id| items.iter().any(|item| &item.id == *id))
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_item_has_keywords() {
        for kind in ChecklistKind::all() {
            let checklist = builtin(kind);
            assert!(!checklist.items.is_empty());
            for item in &checklist.items {
                assert!(
                    !item.keywords.is_empty(),
                    "builtin item '{}' should carry keywords",
                    item.id
                );
            }
        }
    }

    #[test]
    fn builtin_item_ids_are_unique() {
        for kind in ChecklistKind::all() {
            let checklist = builtin(kind);
            let mut ids = checklist
                .items
                .iter()
                .map(|item| item.id.as_str())
                .collect::<Vec<_>>();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), checklist.items.len());
        }
    }

    #[test]
    fn topic_map_references_existing_items() {
        for kind in ChecklistKind::all() {
            let checklist = builtin(kind);
            for ids in checklist.topic_map.values() {
                for id in ids {
                    assert!(checklist.item(id).is_some(), "dangling topic target: {id}");
                }
            }
        }
    }

    #[test]
    fn follow_up_is_shorter_than_initial_evaluation() {
        assert!(
            builtin(ChecklistKind::FollowUp).items.len()
                < builtin(ChecklistKind::InitialEvaluation).items.len()
        );
    }
}
