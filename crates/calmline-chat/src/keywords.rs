//! Keyword categories and their trigger phrases.

use std::fmt;

/// A keyword category that user text can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Stress,
    Confusion,
    Decision,
    Planning,
    Blockers,
    Timeline,
    Assumptions,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Stress,
        Category::Confusion,
        Category::Decision,
        Category::Planning,
        Category::Blockers,
        Category::Timeline,
        Category::Assumptions,
    ];

    /// Lowercase trigger phrases. Matched by substring against normalized text.
    pub fn triggers(&self) -> &'static [&'static str] {
        match self {
            Category::Stress => &[
                "stress",
                "stressed",
                "overwhelm",
                "overwhelmed",
                "anxious",
                "anxiety",
                "pressure",
                "worried",
                "panic",
            ],
            Category::Confusion => &[
                "confused",
                "unclear",
                "not sure",
                "don't know",
                "lost",
                "unsure",
                "uncertain",
            ],
            Category::Decision => &[
                "decide",
                "decision",
                "choose",
                "choice",
                "pick",
                "options",
                "option",
                "vs",
                "versus",
                "tradeoff",
                "trade-off",
            ],
            Category::Planning => &[
                "plan",
                "timeline",
                "schedule",
                "organize",
                "next step",
                "roadmap",
                "map",
                "arrange",
            ],
            Category::Blockers => &[
                "stuck", "blocked", "can't", "cannot", "problem", "issue", "barrier", "hangup",
            ],
            Category::Timeline => &[
                "today", "tonight", "tomorrow", "deadline", "due", "week", "soon", "urgent",
                "rush",
            ],
            Category::Assumptions => &[
                "obviously",
                "clearly",
                "must be",
                "has to",
                "no way",
                "always",
                "never",
            ],
        }
    }

    /// Returns whether any trigger phrase occurs in already-normalized text.
    pub fn is_triggered_by(&self, normalized: &str) -> bool {
        self.triggers()
            .iter()
            .any(|phrase| normalized.contains(phrase))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Stress => "stress",
            Category::Confusion => "confusion",
            Category::Decision => "decision",
            Category::Planning => "planning",
            Category::Blockers => "blockers",
            Category::Timeline => "timeline",
            Category::Assumptions => "assumptions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
