//! Intent recognition for caller messages.
//!
//! Fixed keyword classification over lower-cased text, plus a length
//! heuristic that promotes long unrecognized messages to free-text case
//! descriptions. There is no natural-language understanding here.

pub mod keywords;

use keywords::{contains_keyword, RULES};

/// A recognized meaning of one caller message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    RoleVictim,
    RolePlaintiff,
    CategoryCivil,
    CategoryLabor,
    CategoryCriminal,
    CategoryUnknown,
    Affirmative,
    Negative,
    PrefersAfternoon,
    /// An explicit day/time token naming a published slot.
    SlotChoice,
    RepeatRequest,
    TopicRole,
    TopicCategories,
    TopicSchedule,
    /// A substantive legal question that interrupts the intake flow.
    InterruptingLegalTopic,
    Closing,
    RestartRequest,
}

/// Outcome of classifying one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// A keyword rule matched.
    Recognized(Intent),
    /// No rule matched but the message is long enough to be a case
    /// description.
    Description,
    /// No rule matched and the message is too short to be a description.
    Unclassified,
}

/// Keyword-based message classifier.
///
/// Pure function of the message text and the rule table; holds no state
/// beyond the configured description threshold.
#[derive(Clone, Debug)]
pub struct Classifier {
    /// Minimum trimmed character count for the description fallback.
    description_min_chars: usize,
}

impl Classifier {
    pub fn new(description_min_chars: usize) -> Self {
        Self {
            description_min_chars,
        }
    }

    /// Return the first intent whose keyword set intersects the message,
    /// or `None` when no rule matches. Keywords match on word boundaries.
    pub fn classify(&self, text: &str) -> Option<Intent> {
        let lowered = text.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| contains_keyword(&lowered, kw)))
            .map(|rule| rule.intent)
    }

    /// Classify with the description fallback applied.
    pub fn classify_message(&self, text: &str) -> Classification {
        match self.classify(text) {
            Some(intent) => Classification::Recognized(intent),
            None if text.trim().chars().count() > self.description_min_chars => {
                Classification::Description
            }
            None => Classification::Unclassified,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(lexintake_core::config::DialogConfig::default().description_min_chars)
    }
}
