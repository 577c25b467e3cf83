//! Reply composition.
//!
//! Builds a templated reply from the classification of the latest user text
//! and the conversation so far. Pure: the same text and history always give
//! the same reply.

use crate::classifier::{classify, Classification};
use crate::types::{Message, Role};

// =============================================================================
// Sentence templates
// =============================================================================

pub const OPENING_STRESS: &str = "I can hear the pressure in that.";
pub const OPENING_CONFUSION: &str = "Alright, let's bring this into focus.";
pub const OPENING_DEFAULT: &str = "Thanks for trusting me with that.";

pub const BODY_DECISION: &str = "Let's line up the real choices and weigh what matters most.";
pub const BODY_PLANNING: &str = "We can map the next steps so each one feels manageable.";
pub const BODY_BLOCKERS: &str = "We'll isolate the blocker and loosen it one piece at a time.";
pub const BODY_QUESTION: &str = "We'll reason through it so you can move forward with confidence.";
pub const BODY_DEFAULT: &str = "We'll walk through this steadily and keep it grounded.";

pub const ASSUMPTIONS_NOTE: &str =
    "If any assumption feels shaky, we'll test it instead of leaning on it.";
pub const TIMELINE_NOTE: &str = "We'll keep an eye on timing so clarity and pace move together.";

pub const FOLLOW_UP_DECISION: &str = "Which outcome matters most for you right now?";
pub const FOLLOW_UP_PLANNING: &str = "What's the next step that would make everything else easier?";
pub const FOLLOW_UP_BLOCKERS: &str = "What's the single snag that feels heaviest at this moment?";
pub const FOLLOW_UP_QUESTION: &str = "What facts do we already have that can anchor the answer?";
pub const FOLLOW_UP_DEFAULT: &str = "What part would you like us to untangle first?";

// =============================================================================
// ReplyComposer
// =============================================================================

/// Composes empathetic replies from keyword classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyComposer;

impl ReplyComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose the reply for `text`.
    ///
    /// `history` is the conversation including the just-submitted user message.
    pub fn compose(&self, text: &str, history: &[Message]) -> String {
        self.compose_sentences(text, history).join(" ")
    }

    /// The reply as ordered sentences: opening, body, optional notes, optional follow-up.
    pub fn compose_sentences(&self, text: &str, history: &[Message]) -> Vec<&'static str> {
        let c = classify(text);
        let mut sentences = vec![opening_for(&c), body_for(&c)];

        if c.assumptions {
            sentences.push(ASSUMPTIONS_NOTE);
        }
        if c.timeline {
            sentences.push(TIMELINE_NOTE);
        }

        let user_turns = history.iter().filter(|m| m.role == Role::User).count();
        let needs_clarifier =
            c.confusion || (!c.is_question && !c.decision && !c.planning && user_turns == 1);
        let ends_open = sentences
            .last()
            .map(|s| !s.ends_with('?'))
            .unwrap_or(true);

        if needs_clarifier || ends_open {
            sentences.push(follow_up_for(&c));
        }

        sentences
    }
}

fn opening_for(c: &Classification) -> &'static str {
    if c.stress {
        OPENING_STRESS
    } else if c.confusion {
        OPENING_CONFUSION
    } else {
        OPENING_DEFAULT
    }
}

fn body_for(c: &Classification) -> &'static str {
    if c.decision {
        BODY_DECISION
    } else if c.planning {
        BODY_PLANNING
    } else if c.blockers {
        BODY_BLOCKERS
    } else if c.is_question {
        BODY_QUESTION
    } else {
        BODY_DEFAULT
    }
}

/// The closing question a classification would ask.
pub fn follow_up_for(c: &Classification) -> &'static str {
    if c.decision {
        FOLLOW_UP_DECISION
    } else if c.planning {
        FOLLOW_UP_PLANNING
    } else if c.blockers {
        FOLLOW_UP_BLOCKERS
    } else if c.is_question {
        FOLLOW_UP_QUESTION
    } else {
        FOLLOW_UP_DEFAULT
    }
}

// =============================================================================
// Tests
// =============================================================================
