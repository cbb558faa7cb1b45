//! Adaptive lesson recommendations: constants, candidate types, and the
//! pure scoring helpers shared by the strategies.
//!
//! - [`ports`] -- store traits the engine is constructed with.
//! - [`strategies`] -- the six scoring rules.
//! - [`engine`] -- orchestration (run, rank, truncate, replace).

pub mod engine;
pub mod ports;
pub mod strategies;

use crate::error::CoreError;
use crate::types::DbId;

pub use engine::{EngineConfig, RecommendationEngine};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Number of recommendations kept when the caller does not specify a limit.
pub const DEFAULT_RECOMMENDATION_LIMIT: i32 = 5;

/// Largest `limit` a single generation run accepts.
pub const MAX_RECOMMENDATION_LIMIT: i32 = 50;

/// Trailing window that counts as "recent" course engagement.
pub const DEFAULT_RECENT_ACTIVITY_DAYS: i64 = 7;

/// Longest recent-activity window accepted from configuration.
pub const MAX_RECENT_ACTIVITY_DAYS: i64 = 365;

// ---------------------------------------------------------------------------
// Strategy parameters
// ---------------------------------------------------------------------------

/// In-progress lessons considered, most recently accessed first.
pub const IN_PROGRESS_LOOKBACK: usize = 3;
/// Priority of an in-progress lesson touched today.
pub const IN_PROGRESS_BASE_PRIORITY: i32 = 90;
/// Priority lost per day since last access.
pub const IN_PROGRESS_DECAY_PER_DAY: i32 = 5;
/// Floor for in-progress priority regardless of staleness.
pub const IN_PROGRESS_MIN_PRIORITY: i32 = 70;
/// Days since access above which the reason mentions the gap.
pub const IN_PROGRESS_STALE_DAYS: i64 = 3;

/// Inclusive lower bound of the course-gap completion band, in percent.
pub const GAP_BAND_MIN_PERCENT: i64 = 50;
/// Exclusive upper bound of the course-gap completion band, in percent.
pub const GAP_BAND_MAX_PERCENT: i64 = 95;
/// Base priority for course-gap candidates.
pub const GAP_BASE_PRIORITY: i32 = 60;

pub const NEXT_LESSON_PRIORITY: i32 = 55;

/// Completed lessons with less than this share of the estimate are reviewed.
pub const REVIEW_RATIO_THRESHOLD_PERCENT: i64 = 50;
pub const REVIEW_LIMIT: usize = 2;
pub const REVIEW_PRIORITY: i32 = 40;

pub const NEW_COURSE_LIMIT: usize = 2;
pub const NEW_COURSE_PRIORITY: i32 = 30;

pub const COLD_START_LIMIT: usize = 3;
pub const COLD_START_BEGINNER_PRIORITY: i32 = 85;
pub const COLD_START_ANY_PRIORITY: i32 = 80;

// ---------------------------------------------------------------------------
// Candidates
// ---------------------------------------------------------------------------

/// The scoring rule that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    ContinueInProgress,
    CourseGap,
    NextLesson,
    Review,
    NewCourse,
    ColdStart,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContinueInProgress => "continue_in_progress",
            Self::CourseGap => "course_gap",
            Self::NextLesson => "next_lesson",
            Self::Review => "review",
            Self::NewCourse => "new_course",
            Self::ColdStart => "cold_start",
        }
    }
}

/// A scored lesson suggestion, before ranking and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub lesson_id: DbId,
    pub reason: String,
    pub priority: i32,
    pub strategy: Strategy,
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Validate the requested number of recommendations.
pub fn validate_limit(limit: i32) -> Result<(), CoreError> {
    if !(1..=MAX_RECOMMENDATION_LIMIT).contains(&limit) {
        return Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_RECOMMENDATION_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

/// Validate the recent-activity window, in days.
pub fn validate_recent_activity_days(days: i64) -> Result<(), CoreError> {
    if !(1..=MAX_RECENT_ACTIVITY_DAYS).contains(&days) {
        return Err(CoreError::Validation(format!(
            "recent activity window must be between 1 and {MAX_RECENT_ACTIVITY_DAYS} days, got {days}"
        )));
    }
    Ok(())
}

/// Sort by priority descending and keep the first `limit`.
///
/// The sort is stable, so equal priorities keep strategy order.
pub fn rank(mut candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));
    candidates.truncate(limit);
    candidates
}

/// `max(90 - 5 * days, 70)`; negative day counts are treated as today.
pub fn in_progress_priority(days_since_access: i64) -> i32 {
    let days = days_since_access.max(0);
    let raw = i64::from(IN_PROGRESS_BASE_PRIORITY)
        .saturating_sub(days.saturating_mul(i64::from(IN_PROGRESS_DECAY_PER_DAY)));
    raw.max(i64::from(IN_PROGRESS_MIN_PRIORITY)) as i32
}

/// Whether `completed / total` falls in `[50%, 95%)`.
pub fn in_gap_band(completed: usize, total: usize) -> bool {
    if total == 0 {
        return false;
    }
    let scaled = completed as i64 * 100;
    let total = total as i64;
    scaled >= GAP_BAND_MIN_PERCENT * total && scaled < GAP_BAND_MAX_PERCENT * total
}

/// `60 + floor(percent * 0.3)`, computed as `60 + floor(completed * 30 / total)`.
pub fn gap_priority(completed: usize, total: usize) -> i32 {
    if total == 0 {
        return GAP_BASE_PRIORITY;
    }
    GAP_BASE_PRIORITY + ((completed * 30) / total) as i32
}

/// Completion percentage for display.
pub fn completion_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// Whether a completed lesson got less than half of its estimated time.
pub fn is_low_investment(time_spent_minutes: i32, estimated_minutes: i32) -> bool {
    estimated_minutes > 0
        && i64::from(time_spent_minutes) * 100
            < REVIEW_RATIO_THRESHOLD_PERCENT * i64::from(estimated_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(lesson_id: DbId, priority: i32, strategy: Strategy) -> Candidate {
        Candidate {
            lesson_id,
            reason: String::new(),
            priority,
            strategy,
        }
    }

    // -- validate_limit --

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(-3).is_err());
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(DEFAULT_RECOMMENDATION_LIMIT).is_ok());
        assert!(validate_limit(MAX_RECOMMENDATION_LIMIT).is_ok());
        assert!(validate_limit(MAX_RECOMMENDATION_LIMIT + 1).is_err());
    }

    #[test]
    fn recent_activity_window_bounds() {
        assert!(validate_recent_activity_days(0).is_err());
        assert!(validate_recent_activity_days(-7).is_err());
        assert!(validate_recent_activity_days(1).is_ok());
        assert!(validate_recent_activity_days(DEFAULT_RECENT_ACTIVITY_DAYS).is_ok());
        assert!(validate_recent_activity_days(MAX_RECENT_ACTIVITY_DAYS).is_ok());
        assert!(validate_recent_activity_days(i64::MAX).is_err());
    }

    // -- in_progress_priority --

    #[test]
    fn in_progress_priority_decays_to_floor() {
        assert_eq!(in_progress_priority(0), 90);
        assert_eq!(in_progress_priority(1), 85);
        assert_eq!(in_progress_priority(3), 75);
        assert_eq!(in_progress_priority(4), 70);
        assert_eq!(in_progress_priority(10), 70);
        assert_eq!(in_progress_priority(i64::MAX), 70);
    }

    #[test]
    fn in_progress_priority_future_access_counts_as_today() {
        assert_eq!(in_progress_priority(-2), 90);
    }

    // -- gap band and priority --

    #[test]
    fn gap_band_edges() {
        assert!(!in_gap_band(4, 10));
        assert!(in_gap_band(5, 10));
        assert!(in_gap_band(9, 10));
        assert!(!in_gap_band(19, 20)); // exactly 95%
        assert!(in_gap_band(18, 20)); // 90%
        assert!(!in_gap_band(10, 10));
        assert!(!in_gap_band(0, 0));
    }

    #[test]
    fn gap_priority_matches_floor_of_scaled_percent() {
        assert_eq!(gap_priority(6, 10), 78);
        assert_eq!(gap_priority(5, 10), 75);
        assert_eq!(gap_priority(2, 3), 80);
        assert_eq!(gap_priority(9, 10), 87);
        assert_eq!(gap_priority(37, 40), 87);
    }

    #[test]
    fn completion_percent_rounds_for_display() {
        assert_eq!(format!("{:.0}", completion_percent(2, 3)), "67");
        assert_eq!(format!("{:.0}", completion_percent(6, 10)), "60");
        assert_eq!(completion_percent(1, 0), 0.0);
    }

    // -- is_low_investment --

    #[test]
    fn low_investment_threshold_is_strict() {
        assert!(is_low_investment(4, 10));
        assert!(!is_low_investment(5, 10));
        assert!(is_low_investment(0, 30));
        assert!(!is_low_investment(0, 0));
    }

    // -- rank --

    #[test]
    fn rank_sorts_descending_and_truncates() {
        let ranked = rank(
            vec![
                candidate(1, 40, Strategy::Review),
                candidate(2, 90, Strategy::ContinueInProgress),
                candidate(3, 55, Strategy::NextLesson),
            ],
            2,
        );
        let ids: Vec<DbId> = ranked.iter().map(|c| c.lesson_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn rank_keeps_insertion_order_on_ties() {
        let ranked = rank(
            vec![
                candidate(7, 70, Strategy::ContinueInProgress),
                candidate(8, 70, Strategy::ContinueInProgress),
                candidate(9, 70, Strategy::CourseGap),
            ],
            10,
        );
        let ids: Vec<DbId> = ranked.iter().map(|c| c.lesson_id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn rank_keeps_duplicates() {
        let ranked = rank(
            vec![
                candidate(4, 78, Strategy::CourseGap),
                candidate(4, 55, Strategy::NextLesson),
            ],
            5,
        );
        assert_eq!(ranked.len(), 2);
    }
}
