//! Course, progress, and activity vocabulary shared by the db and api layers.
//!
//! The string forms here are the values stored in the `courses.difficulty`,
//! `progress.status`, and `activities.event_type` columns.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound for a single `time_spent` increment, in minutes (one day).
pub const MAX_TIME_SPENT_INCREMENT: i32 = 24 * 60;

// ---------------------------------------------------------------------------
// Progress status
// ---------------------------------------------------------------------------

/// Per-lesson progress state for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

const VALID_PROGRESS_STATUSES: &[&str] = &["not_started", "in_progress", "completed"];

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid progress status '{s}'. Must be one of: {}",
                VALID_PROGRESS_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Course difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

const VALID_DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced"];

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(CoreError::Validation(format!(
                "Invalid difficulty '{s}'. Must be one of: {}",
                VALID_DIFFICULTIES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Activity event types
// ---------------------------------------------------------------------------

/// Kinds of entries in the append-only activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityEventType {
    LessonStart,
    LessonComplete,
    SessionStart,
    SessionEnd,
}

const VALID_EVENT_TYPES: &[&str] = &["lesson_start", "lesson_complete", "session_start", "session_end"];

impl ActivityEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessonStart => "lesson_start",
            Self::LessonComplete => "lesson_complete",
            Self::SessionStart => "session_start",
            Self::SessionEnd => "session_end",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "lesson_start" => Ok(Self::LessonStart),
            "lesson_complete" => Ok(Self::LessonComplete),
            "session_start" => Ok(Self::SessionStart),
            "session_end" => Ok(Self::SessionEnd),
            _ => Err(CoreError::Validation(format!(
                "Invalid event type '{s}'. Must be one of: {}",
                VALID_EVENT_TYPES.join(", ")
            ))),
        }
    }

    /// Lesson-scoped events must reference a lesson; session events may not.
    pub fn requires_lesson(&self) -> bool {
        matches!(self, Self::LessonStart | Self::LessonComplete)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a minutes value reported by a client (progress or activity).
pub fn validate_minutes(minutes: i32, field: &str) -> Result<(), CoreError> {
    if !(0..=MAX_TIME_SPENT_INCREMENT).contains(&minutes) {
        return Err(CoreError::Validation(format!(
            "{field} must be between 0 and {MAX_TIME_SPENT_INCREMENT}, got {minutes}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Course progress
// ---------------------------------------------------------------------------

/// Completion percentage of a course, rounded to two decimals.
pub fn course_progress_percent(completed_lessons: i32, total_lessons: i32) -> f64 {
    if total_lessons <= 0 {
        return 0.0;
    }
    let percent = f64::from(completed_lessons) / f64::from(total_lessons) * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Course-level status: only completed lessons move a course out of
/// `not_started`.
pub fn course_status(completed_lessons: i32, total_lessons: i32) -> ProgressStatus {
    if total_lessons > 0 && completed_lessons >= total_lessons {
        ProgressStatus::Completed
    } else if completed_lessons > 0 {
        ProgressStatus::InProgress
    } else {
        ProgressStatus::NotStarted
    }
}
