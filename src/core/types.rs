use serde::{Deserialize, Serialize};
use std::fmt;

/// Cognitive level tag written in front of an objective: `(I)`, `(E)` or `(D)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CognitiveLevel {
    I,
    E,
    D,
}

impl CognitiveLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "I" => Some(Self::I),
            "E" => Some(Self::E),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::E => "E",
            Self::D => "D",
        }
    }
}

impl fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six levels of the revised Bloom taxonomy, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyLevel {
    Remembering = 1,
    Understanding = 2,
    Applying = 3,
    Analyzing = 4,
    Evaluating = 5,
    Creating = 6,
}

impl TaxonomyLevel {
    pub const ALL: [TaxonomyLevel; 6] = [
        Self::Remembering,
        Self::Understanding,
        Self::Applying,
        Self::Analyzing,
        Self::Evaluating,
        Self::Creating,
    ];

    /// Parse a lower-cased taxonomy word. Only the exact gerund forms are recognised.
    pub fn parse(level: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == level)
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remembering => "remembering",
            Self::Understanding => "understanding",
            Self::Applying => "applying",
            Self::Analyzing => "analyzing",
            Self::Evaluating => "evaluating",
            Self::Creating => "creating",
        }
    }
}

impl fmt::Display for TaxonomyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grammar fields derived from a free-text objective statement.
///
/// All fields are optional: an unparseable statement yields all `None`,
/// which validators report as missing data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveGrammar {
    pub cognitive_level: Option<CognitiveLevel>,
    pub taxonomy_level: Option<String>,
    pub verb: Option<String>,
}

impl ObjectiveGrammar {
    /// Ranked taxonomy level, if the taxonomy word is a known level.
    pub fn taxonomy(&self) -> Option<TaxonomyLevel> {
        self.taxonomy_level.as_deref().and_then(TaxonomyLevel::parse)
    }

    pub fn is_empty(&self) -> bool {
        self.cognitive_level.is_none() && self.taxonomy_level.is_none() && self.verb.is_none()
    }
}

/// Percentages parsed out of a performance target cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceTarget {
    pub performance_target: Option<u32>,
    pub passing_score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntendedLearningOutcome {
    pub statement: String,
    pub assessment_tool: String,
    #[serde(flatten)]
    pub target: PerformanceTarget,
    #[serde(flatten)]
    pub grammar: ObjectiveGrammar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutcome {
    pub statement: String,
    #[serde(rename = "ilo")]
    pub intended_learning_outcomes: Vec<IntendedLearningOutcome>,
    #[serde(flatten)]
    pub grammar: ObjectiveGrammar,
}

impl CourseOutcome {
    pub fn new(statement: impl Into<String>, grammar: ObjectiveGrammar) -> Self {
        Self {
            statement: statement.into(),
            intended_learning_outcomes: Vec::new(),
            grammar,
        }
    }

    pub fn last_ilo(&self) -> Option<&IntendedLearningOutcome> {
        self.intended_learning_outcomes.last()
    }
}

/// Plan-level metadata scraped from label cells anywhere in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoaepMetadata {
    pub faculty: Option<String>,
    pub course: Option<String>,
    #[serde(rename = "sy")]
    pub school_year: Option<String>,
    pub semester: Option<u32>,
}

/// A course outcomes assessment plan, rebuilt from the canonical table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoaepRecord {
    #[serde(flatten)]
    pub metadata: CoaepMetadata,
    #[serde(rename = "co")]
    pub course_outcomes: Vec<CourseOutcome>,
}

impl CoaepRecord {
    pub fn new(metadata: CoaepMetadata) -> Self {
        Self {
            metadata,
            course_outcomes: Vec::new(),
        }
    }

    pub fn ilo_count(&self) -> usize {
        self.course_outcomes
            .iter()
            .map(|co| co.intended_learning_outcomes.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_rank_order() {
        let ranks: Vec<u8> = TaxonomyLevel::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        assert!(TaxonomyLevel::Applying < TaxonomyLevel::Analyzing);
    }

    #[test]
    fn test_taxonomy_parse_is_exact() {
        assert_eq!(TaxonomyLevel::parse("evaluating"), Some(TaxonomyLevel::Evaluating));
        assert_eq!(TaxonomyLevel::parse("Evaluating"), None);
        assert_eq!(TaxonomyLevel::parse("evaluate"), None);
    }

    #[test]
    fn test_cognitive_level_from_tag() {
        assert_eq!(CognitiveLevel::from_tag("D"), Some(CognitiveLevel::D));
        assert_eq!(CognitiveLevel::from_tag("X"), None);
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let mut record = CoaepRecord::new(CoaepMetadata {
            faculty: Some("Dela Cruz".into()),
            course: Some("IT 101".into()),
            school_year: Some("2024-2025".into()),
            semester: Some(1),
        });
        let mut co = CourseOutcome::new(
            "(E) APPLYING: Students will build a page.",
            ObjectiveGrammar {
                cognitive_level: Some(CognitiveLevel::E),
                taxonomy_level: Some("applying".into()),
                verb: Some("build".into()),
            },
        );
        co.intended_learning_outcomes.push(IntendedLearningOutcome {
            statement: "APPLYING: Write markup.".into(),
            assessment_tool: "Lab exercise".into(),
            target: PerformanceTarget {
                performance_target: Some(80),
                passing_score: Some(75),
            },
            grammar: ObjectiveGrammar::default(),
        });
        record.course_outcomes.push(co);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sy"], "2024-2025");
        assert_eq!(json["co"][0]["cognitive_level"], "E");
        assert_eq!(json["co"][0]["ilo"][0]["performance_target"], 80);
        assert_eq!(json["co"][0]["ilo"][0]["passing_score"], 75);
        assert!(json["co"][0]["ilo"][0]["verb"].is_null());
    }
}
