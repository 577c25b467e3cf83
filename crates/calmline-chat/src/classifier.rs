//! Keyword classifier.
//!
//! Normalizes user text (trim + lowercase) and reports which keyword
//! categories it touches, plus whether it reads as a question.

use regex::Regex;
use std::sync::LazyLock;

use crate::keywords::Category;

static INTERROGATIVE_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:how|what|why|should|could|would|when|where|is|are|do|does|can)\b")
        .expect("Invalid interrogative regex")
});

/// Per-call classification flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub stress: bool,
    pub confusion: bool,
    pub decision: bool,
    pub planning: bool,
    pub blockers: bool,
    pub timeline: bool,
    pub assumptions: bool,
    pub is_question: bool,
}

impl Classification {
    /// Returns whether the given category matched.
    pub fn matches(&self, category: Category) -> bool {
        match category {
            Category::Stress => self.stress,
            Category::Confusion => self.confusion,
            Category::Decision => self.decision,
            Category::Planning => self.planning,
            Category::Blockers => self.blockers,
            Category::Timeline => self.timeline,
            Category::Assumptions => self.assumptions,
        }
    }

    /// Matched categories in declaration order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.matches(*c))
            .collect()
    }
}

/// Lowercase and trim, the form every trigger is matched against.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Classify raw user text. Total over all inputs; empty text yields all-false flags.
pub fn classify(text: &str) -> Classification {
    let normalized = normalize(text);
    let hit = |c: Category| c.is_triggered_by(&normalized);

    let classification = Classification {
        stress: hit(Category::Stress),
        confusion: hit(Category::Confusion),
        decision: hit(Category::Decision),
        planning: hit(Category::Planning),
        blockers: hit(Category::Blockers),
        timeline: hit(Category::Timeline),
        assumptions: hit(Category::Assumptions),
        is_question: normalized.contains('?') || INTERROGATIVE_OPENER.is_match(&normalized),
    };

    tracing::debug!(
        categories = ?classification.categories(),
        is_question = classification.is_question,
        "Classified input"
    );
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Empty and neutral input ----

    #[test]
    fn test_empty_input_all_false() {
        assert_eq!(classify(""), Classification::default());
        assert_eq!(classify("   \t\n"), Classification::default());
    }

    #[test]
    fn test_neutral_statement() {
        let c = classify("I need to figure out dinner");
        assert!(c.categories().is_empty());
        assert!(!c.is_question);
    }

    // ---- Categories ----

    #[test]
    fn test_stress_and_confusion_together() {
        let c = classify("I'm so stressed and confused about this");
        assert!(c.stress);
        assert!(c.confusion);
        assert_eq!(c.categories(), vec![Category::Stress, Category::Confusion]);
    }

    #[test]
    fn test_case_insensitive() {
        let c = classify("DEADLINE is TOMORROW");
        assert!(c.timeline);
    }

    #[test]
    fn test_decision_with_timeline_and_question() {
        let c = classify("should I choose option A or B, it's urgent");
        assert!(c.decision);
        assert!(c.timeline);
        assert!(c.is_question);
        assert!(!c.planning);
        assert!(!c.blockers);
    }

    #[test]
    fn test_blockers_and_assumptions() {
        let c = classify("I'm stuck and it obviously has to be my fault");
        assert!(c.blockers);
        assert!(c.assumptions);
        assert!(!c.decision);
    }

    // ---- Question detection ----

    #[test]
    fn test_question_mark_anywhere() {
        assert!(classify("this is fine?").is_question);
        assert!(classify("ok? sure").is_question);
    }

    #[test]
    fn test_interrogative_opener() {
        for text in [
            "how do I start",
            "What now",
            "why bother",
            "Should I go",
            "could it work",
            "would that help",
            "when is it",
            "where to begin",
            "is it me",
            "are we there",
            "do I care",
            "does it matter",
            "can we talk",
        ] {
            assert!(classify(text).is_question, "{:?} not a question", text);
        }
    }

    #[test]
    fn test_opener_requires_word_boundary() {
        assert!(!classify("island life").is_question);
        assert!(!classify("canned soup").is_question);
        assert!(!classify("however it goes").is_question);
    }

    #[test]
    fn test_opener_must_lead_the_text() {
        assert!(!classify("I wonder how it works").is_question);
    }

    #[test]
    fn test_opener_after_leading_whitespace() {
        assert!(classify("   what happened").is_question);
    }

    #[test]
    fn test_deterministic() {
        let text = "Can I pick a plan before the deadline?";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_matches_round_trips_categories() {
        let c = classify("I'm worried about the schedule");
        for cat in Category::ALL {
            assert_eq!(c.matches(cat), c.categories().contains(&cat));
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello World \n"), "hello world");
    }
}
