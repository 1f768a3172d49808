//! Objective grammar extraction.
//!
//! Outcome statements are written as
//! `(I) REMEMBERING: Students will identify key terms.`: an optional
//! parenthesized cognitive-level tag, a taxonomy word, a colon, then free
//! text. The instructional verb is the word following `shall`/`will`, or the
//! first word of the free text when neither appears.

use crate::core::{CognitiveLevel, ObjectiveGrammar};
use once_cell::sync::Lazy;
use regex::Regex;

static OBJECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\(([IED])\))?\s*(\w+)\s*:\s*(.*)").unwrap());
static MODAL_VERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:shall|will)\s+(\w+)").unwrap());

/// Derive `{cognitive_level, taxonomy_level, verb}` from a statement.
///
/// A statement that does not follow the grammar yields all-`None` fields;
/// this is missing data for validators to report, not an error.
pub fn extract_objective(statement: &str) -> ObjectiveGrammar {
    let Some(caps) = OBJECTIVE.captures(statement) else {
        return ObjectiveGrammar::default();
    };

    let cognitive_level = caps
        .get(1)
        .and_then(|m| CognitiveLevel::from_tag(m.as_str()));
    let taxonomy_level = caps.get(2).map(|m| m.as_str().to_lowercase());
    let verb = caps
        .get(3)
        .map(|m| m.as_str().trim())
        .filter(|rest| !rest.is_empty())
        .and_then(extract_verb);

    ObjectiveGrammar {
        cognitive_level,
        taxonomy_level,
        verb,
    }
}

fn extract_verb(text: &str) -> Option<String> {
    if let Some(caps) = MODAL_VERB.captures(text) {
        return caps.get(1).map(|m| m.as_str().to_lowercase());
    }
    text.split_whitespace().next().map(str::to_lowercase)
}
