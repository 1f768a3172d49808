use crate::common::integers;
use crate::core::PerformanceTarget;

/// Parse a performance target such as `"80% of students will score 75% or higher"`.
///
/// The first embedded integer is the performance target, the second the
/// passing score. Missing integers stay `None`.
pub fn parse_performance_target(text: &str) -> PerformanceTarget {
    let mut numbers = integers(text);
    PerformanceTarget {
        performance_target: numbers.next(),
        passing_score: numbers.next(),
    }
}
