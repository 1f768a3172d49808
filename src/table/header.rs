//! Heuristic header row detection.
//!
//! Exported plans put their column labels at different rows and columns
//! depending on who filled in the template. The locator scans the top of the
//! sheet for the first row naming enough of the expected columns.

use super::source::RawTable;

pub const DEFAULT_SCAN_ROWS: usize = 20;
pub const DEFAULT_MIN_MATCHES: usize = 3;

const CO_KEYWORDS: &[&str] = &["course outcome", "co statement", "outcome statement"];
const ILO_KEYWORDS: &[&str] = &["intended learning", "ilo", "learning outcome"];
const ASSESSMENT_TOOL_KEYWORDS: &[&str] = &["assessment tool", "assessment method", "tool"];
const PERFORMANCE_TARGET_KEYWORDS: &[&str] = &["performance target", "target", "passing"];

/// Where the header row sits and which column each label was found in.
///
/// A column that was not found in the accepted row stays `None`; the format
/// builder then reads nothing from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub header_row: usize,
    pub course_outcome: Option<usize>,
    pub ilo: Option<usize>,
    pub assessment_tool: Option<usize>,
    pub performance_target: Option<usize>,
}

impl HeaderLayout {
    pub fn matched_columns(&self) -> usize {
        [
            self.course_outcome,
            self.ilo,
            self.assessment_tool,
            self.performance_target,
        ]
        .iter()
        .filter(|c| c.is_some())
        .count()
    }
}

/// Scan settings for [`locate_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderScan {
    pub max_rows: usize,
    pub min_matches: usize,
}

impl Default for HeaderScan {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_SCAN_ROWS,
            min_matches: DEFAULT_MIN_MATCHES,
        }
    }
}

/// Find the header row within the first `scan.max_rows` rows.
///
/// The first row (top-down) in which at least `scan.min_matches` of the four
/// columns resolve wins; later rows are never considered, even if they would
/// match more columns. `None` means no header could be detected.
pub fn locate_header(table: &RawTable, scan: HeaderScan) -> Option<HeaderLayout> {
    table
        .rows()
        .iter()
        .take(scan.max_rows)
        .enumerate()
        .find_map(|(idx, row)| {
            let cells: Vec<String> = row.iter().map(|c| c.trim().to_lowercase()).collect();
            let layout = HeaderLayout {
                header_row: idx,
                course_outcome: find_column(&cells, CO_KEYWORDS),
                ilo: find_column(&cells, ILO_KEYWORDS),
                assessment_tool: find_column(&cells, ASSESSMENT_TOOL_KEYWORDS),
                performance_target: find_column(&cells, PERFORMANCE_TARGET_KEYWORDS),
            };

            if layout.matched_columns() >= scan.min_matches {
                log::debug!("header row detected at {}: {:?}", idx, layout);
                Some(layout)
            } else {
                None
            }
        })
}

fn find_column(cells: &[String], keywords: &[&str]) -> Option<usize> {
    cells
        .iter()
        .position(|cell| keywords.iter().any(|k| cell.contains(k)))
}
