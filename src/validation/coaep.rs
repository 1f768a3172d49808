//! Domain rules for course outcomes assessment plans.

use super::{RecordValidator, ValidationIssue};
use crate::core::{CoaepRecord, CourseOutcome, TaxonomyLevel};
use crate::table::CanonicalTable;

pub const MIN_CO_TAXO: &str = "MIN_CO_TAXO";
pub const LAST_ILO_TAXO: &str = "LAST_ILO_TAXO";
pub const ILO_TAXO_ORDER: &str = "ILO_TAXO_ORDER";

/// Levels a course outcome may not sit at unless configured otherwise.
pub const DEFAULT_DISALLOWED_CO_LEVELS: [TaxonomyLevel; 2] =
    [TaxonomyLevel::Remembering, TaxonomyLevel::Understanding];

/// The registered COAEP validators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoaepValidator {
    /// No course outcome may use one of `disallowed`
    MinCoTaxonomy { disallowed: Vec<TaxonomyLevel> },
    /// Each course outcome's last ILO shares its taxonomy level
    LastIloTaxonomy,
    /// ILO taxonomy ranks never decrease within a course outcome
    IloTaxonomyOrder,
}

impl CoaepValidator {
    pub fn min_co_taxonomy() -> Self {
        Self::MinCoTaxonomy {
            disallowed: DEFAULT_DISALLOWED_CO_LEVELS.to_vec(),
        }
    }

    /// The default registration, in report order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::min_co_taxonomy(),
            Self::LastIloTaxonomy,
            Self::IloTaxonomyOrder,
        ]
    }

    /// Resolve a configuration key such as `"ilo_taxonomy_order"`.
    pub fn from_key(key: &str, disallowed: &[TaxonomyLevel]) -> Option<Self> {
        match key {
            "min_co_taxonomy" => Some(Self::MinCoTaxonomy {
                disallowed: disallowed.to_vec(),
            }),
            "last_ilo_taxonomy" => Some(Self::LastIloTaxonomy),
            "ilo_taxonomy_order" => Some(Self::IloTaxonomyOrder),
            _ => None,
        }
    }
}

impl RecordValidator<CoaepRecord> for CoaepValidator {
    fn name(&self) -> &str {
        match self {
            Self::MinCoTaxonomy { .. } => MIN_CO_TAXO,
            Self::LastIloTaxonomy => LAST_ILO_TAXO,
            Self::IloTaxonomyOrder => ILO_TAXO_ORDER,
        }
    }

    fn check(&self, record: &CoaepRecord, table: &CanonicalTable) -> Vec<ValidationIssue> {
        record
            .course_outcomes
            .iter()
            .enumerate()
            .flat_map(|(idx, co)| match self {
                Self::MinCoTaxonomy { disallowed } => check_min_taxonomy(idx + 1, co, disallowed, table),
                Self::LastIloTaxonomy => check_last_ilo(idx + 1, co, table),
                Self::IloTaxonomyOrder => check_ilo_order(idx + 1, co, table),
            })
            .collect()
    }
}

fn check_min_taxonomy(
    number: usize,
    co: &CourseOutcome,
    disallowed: &[TaxonomyLevel],
    table: &CanonicalTable,
) -> Vec<ValidationIssue> {
    let at = table.find_value(&co.statement);
    let Some(level) = co.grammar.taxonomy_level.as_deref() else {
        return vec![ValidationIssue::new(
            MIN_CO_TAXO,
            format!("No taxonomy level for CO Statement: {}", co.statement),
        )
        .at(at)];
    };

    match TaxonomyLevel::parse(level) {
        Some(rank) if disallowed.contains(&rank) => vec![ValidationIssue::new(
            MIN_CO_TAXO,
            format!(
                "CO {} cannot have a taxonomy level of {}.",
                number,
                level.to_uppercase()
            ),
        )
        .at(at)],
        _ => Vec::new(),
    }
}

fn check_last_ilo(number: usize, co: &CourseOutcome, table: &CanonicalTable) -> Vec<ValidationIssue> {
    let Some(last) = co.last_ilo() else {
        return vec![ValidationIssue::new(LAST_ILO_TAXO, format!("No ILO for CO {number}."))
            .at(table.find_value(&co.statement))];
    };

    let at = table.find_value(&last.statement);
    match last.grammar.taxonomy_level.as_deref() {
        None => vec![ValidationIssue::new(
            LAST_ILO_TAXO,
            format!("Last ILO for CO {number} has no Taxonomy Level."),
        )
        .at(at)],
        Some(level) if Some(level) != co.grammar.taxonomy_level.as_deref() => {
            vec![ValidationIssue::new(
                LAST_ILO_TAXO,
                format!("Last ILO for CO {number} does not match CO Taxonomy Level."),
            )
            .at(at)]
        }
        Some(_) => Vec::new(),
    }
}

fn check_ilo_order(number: usize, co: &CourseOutcome, table: &CanonicalTable) -> Vec<ValidationIssue> {
    let Some(first) = co.intended_learning_outcomes.first() else {
        return vec![ValidationIssue::new(ILO_TAXO_ORDER, format!("No ILOs for CO {number}."))
            .at(table.find_value(&co.statement))];
    };
    let first_at = table.find_value(&first.statement);

    let mut issues = Vec::new();
    // (index, rank) of the last ILO that did not break the order
    let mut last_valid: Option<(usize, u8)> = None;
    for (idx, ilo) in co.intended_learning_outcomes.iter().enumerate() {
        // Unknown levels are reported by the field checks
        let Some(rank) = ilo.grammar.taxonomy().map(|t| t.rank()) else {
            continue;
        };

        match last_valid {
            Some((prev_idx, prev_rank)) if rank < prev_rank => {
                let mut issue = ValidationIssue::new(
                    ILO_TAXO_ORDER,
                    format!(
                        "Under CO {}, ILO {} should not have a taxonomy level lower than ILO {}'s.",
                        number,
                        idx + 1,
                        prev_idx + 1
                    ),
                );
                if let Some(at) = first_at {
                    issue = issue.at_cell(at.row + idx, at.column);
                }
                issues.push(issue);
            }
            _ => last_valid = Some((idx, rank)),
        }
    }
    issues
}
