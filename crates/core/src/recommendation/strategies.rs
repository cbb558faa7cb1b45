//! The scoring rules. Each returns zero or more [`Candidate`]s for one
//! student and propagates store errors; the engine decides what to do with
//! a failing rule.

use std::collections::HashSet;

use chrono::Duration;

use crate::error::CoreError;
use crate::learning::{Difficulty, ProgressStatus};
use crate::recommendation::ports::{CourseCatalog, CourseSummary, LessonSummary, ProgressStore};
use crate::recommendation::{
    completion_percent, gap_priority, in_gap_band, in_progress_priority, is_low_investment,
    validate_recent_activity_days, Candidate, Strategy, COLD_START_ANY_PRIORITY,
    COLD_START_BEGINNER_PRIORITY, COLD_START_LIMIT, IN_PROGRESS_LOOKBACK, IN_PROGRESS_STALE_DAYS,
    NEW_COURSE_LIMIT, NEW_COURSE_PRIORITY, NEXT_LESSON_PRIORITY, REVIEW_LIMIT, REVIEW_PRIORITY,
};
use crate::types::{DbId, Timestamp};

/// Everything a strategy reads from, for one student at one instant.
pub struct StrategyContext<'a> {
    pub catalog: &'a dyn CourseCatalog,
    pub progress: &'a dyn ProgressStore,
    pub student_id: DbId,
    pub now: Timestamp,
    pub recent_activity_days: i64,
}

impl StrategyContext<'_> {
    /// Ids of every lesson the student has completed.
    async fn completed_lesson_ids(&self) -> Result<HashSet<DbId>, CoreError> {
        Ok(self
            .progress
            .student_progress(self.student_id)
            .await?
            .into_iter()
            .filter(|p| p.status == ProgressStatus::Completed)
            .map(|p| p.lesson_id)
            .collect())
    }
}

/// First lesson of `lessons` (already in `order`) the student has not completed.
fn first_incomplete<'l>(
    lessons: &'l [LessonSummary],
    completed: &HashSet<DbId>,
) -> Option<&'l LessonSummary> {
    lessons.iter().find(|l| !completed.contains(&l.id))
}

fn completed_count(lessons: &[LessonSummary], completed: &HashSet<DbId>) -> usize {
    lessons.iter().filter(|l| completed.contains(&l.id)).count()
}

// ---------------------------------------------------------------------------
// Continue in-progress
// ---------------------------------------------------------------------------

/// Up to three most recently accessed in-progress lessons, scored by how
/// recently they were touched.
pub async fn continue_in_progress(ctx: &StrategyContext<'_>) -> Result<Vec<Candidate>, CoreError> {
    let mut in_progress: Vec<_> = ctx
        .progress
        .student_progress(ctx.student_id)
        .await?
        .into_iter()
        .filter(|p| p.status == ProgressStatus::InProgress)
        .collect();
    in_progress.sort_by(|a, b| b.last_accessed.cmp(&a.last_accessed));

    Ok(in_progress
        .into_iter()
        .take(IN_PROGRESS_LOOKBACK)
        .map(|p| {
            let days = (ctx.now - p.last_accessed).num_days().max(0);
            let mut reason = format!("You're {} minutes into this lesson", p.time_spent_minutes);
            if days > IN_PROGRESS_STALE_DAYS {
                reason.push_str(&format!(" (last accessed {days} days ago)"));
            }
            Candidate {
                lesson_id: p.lesson_id,
                reason,
                priority: in_progress_priority(days),
                strategy: Strategy::ContinueInProgress,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Course gap filling
// ---------------------------------------------------------------------------

/// Next lesson of every published course the student is 50-95% through.
pub async fn course_gaps(ctx: &StrategyContext<'_>) -> Result<Vec<Candidate>, CoreError> {
    let completed = ctx.completed_lesson_ids().await?;
    let mut candidates = Vec::new();

    for course in ctx.catalog.published_courses().await? {
        let lessons = ctx.catalog.course_lessons(course.id).await?;
        if lessons.is_empty() {
            continue;
        }

        let done = completed_count(&lessons, &completed);
        if !in_gap_band(done, lessons.len()) {
            continue;
        }

        if let Some(next) = first_incomplete(&lessons, &completed) {
            candidates.push(Candidate {
                lesson_id: next.id,
                reason: format!(
                    "You're {:.0}% through {} - finish strong!",
                    completion_percent(done, lessons.len()),
                    course.title
                ),
                priority: gap_priority(done, lessons.len()),
                strategy: Strategy::CourseGap,
            });
        }
    }

    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Next sequential lesson
// ---------------------------------------------------------------------------

/// In courses with recent activity, the first incomplete lesson, provided
/// the lesson right before it is completed.
///
/// A course's first lesson has no predecessor and is never emitted here. A
/// window outside `1..=365` days fails the rule.
pub async fn next_lessons(ctx: &StrategyContext<'_>) -> Result<Vec<Candidate>, CoreError> {
    validate_recent_activity_days(ctx.recent_activity_days)?;
    let since = ctx.now - Duration::days(ctx.recent_activity_days);
    let active: HashSet<DbId> = ctx
        .progress
        .recent_activity_course_ids(ctx.student_id, since)
        .await?
        .into_iter()
        .collect();
    if active.is_empty() {
        return Ok(Vec::new());
    }

    let completed = ctx.completed_lesson_ids().await?;
    let mut candidates = Vec::new();

    for course in ctx.catalog.published_courses().await? {
        if !active.contains(&course.id) {
            continue;
        }
        let lessons = ctx.catalog.course_lessons(course.id).await?;
        let Some(next) = first_incomplete(&lessons, &completed) else {
            continue;
        };

        let previous = lessons
            .iter()
            .filter(|l| l.order < next.order)
            .max_by_key(|l| l.order);

        if let Some(previous) = previous {
            if completed.contains(&previous.id) {
                candidates.push(Candidate {
                    lesson_id: next.id,
                    reason: format!("Next lesson in {}", course.title),
                    priority: NEXT_LESSON_PRIORITY,
                    strategy: Strategy::NextLesson,
                });
            }
        }
    }

    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Low-investment review
// ---------------------------------------------------------------------------

/// Completed lessons that got under half of their estimated time, weakest
/// first.
pub async fn reviews(ctx: &StrategyContext<'_>) -> Result<Vec<Candidate>, CoreError> {
    let mut weak: Vec<_> = ctx
        .progress
        .student_progress(ctx.student_id)
        .await?
        .into_iter()
        .filter(|p| p.status == ProgressStatus::Completed)
        .filter(|p| is_low_investment(p.time_spent_minutes, p.estimated_minutes))
        .collect();

    weak.sort_by(|a, b| {
        let ra = f64::from(a.time_spent_minutes) / f64::from(a.estimated_minutes);
        let rb = f64::from(b.time_spent_minutes) / f64::from(b.estimated_minutes);
        ra.total_cmp(&rb)
    });

    Ok(weak
        .into_iter()
        .take(REVIEW_LIMIT)
        .map(|p| Candidate {
            lesson_id: p.lesson_id,
            reason: format!(
                "Quick review - you spent only {}/{} min on this",
                p.time_spent_minutes, p.estimated_minutes
            ),
            priority: REVIEW_PRIORITY,
            strategy: Strategy::Review,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// New course suggestion
// ---------------------------------------------------------------------------

/// Once the student has fully completed a course, suggest up to two
/// published courses they have not touched yet.
///
/// Only the first fully completed course in catalog order triggers the
/// suggestion, and the fresh courses are taken in catalog order too.
pub async fn new_courses(ctx: &StrategyContext<'_>) -> Result<Vec<Candidate>, CoreError> {
    let progress = ctx.progress.student_progress(ctx.student_id).await?;
    let completed: HashSet<DbId> = progress
        .iter()
        .filter(|p| p.status == ProgressStatus::Completed)
        .map(|p| p.lesson_id)
        .collect();

    let courses = ctx.catalog.published_courses().await?;
    let mut candidates = Vec::new();

    for course in &courses {
        let lessons = ctx.catalog.course_lessons(course.id).await?;
        if lessons.is_empty() || completed_count(&lessons, &completed) != lessons.len() {
            continue;
        }

        let started: HashSet<DbId> = progress.iter().map(|p| p.course_id).collect();
        let fresh = courses
            .iter()
            .filter(|c| !started.contains(&c.id))
            .take(NEW_COURSE_LIMIT);

        for new_course in fresh {
            if let Some(first) = first_lesson(ctx.catalog, new_course.id).await? {
                candidates.push(Candidate {
                    lesson_id: first.id,
                    reason: format!("Start a new challenge: {}", new_course.title),
                    priority: NEW_COURSE_PRIORITY,
                    strategy: Strategy::NewCourse,
                });
            }
        }
        break;
    }

    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Cold start
// ---------------------------------------------------------------------------

/// First lessons of beginner courses; failing that, of any published course.
///
/// Unlike the other rules, cold start picks the oldest courses (by id) rather
/// than the first ones by title.
pub async fn cold_start(ctx: &StrategyContext<'_>) -> Result<Vec<Candidate>, CoreError> {
    let mut courses = ctx.catalog.published_courses().await?;
    courses.sort_by_key(|c| c.id);

    let beginner: Vec<&CourseSummary> = courses
        .iter()
        .filter(|c| c.difficulty == Difficulty::Beginner)
        .take(COLD_START_LIMIT)
        .collect();
    let candidates = first_lessons_of(ctx.catalog, &beginner, COLD_START_BEGINNER_PRIORITY, |c| {
        format!("Start your learning journey with {}", c.title)
    })
    .await?;
    if !candidates.is_empty() {
        return Ok(candidates);
    }

    let any: Vec<&CourseSummary> = courses.iter().take(COLD_START_LIMIT).collect();
    first_lessons_of(ctx.catalog, &any, COLD_START_ANY_PRIORITY, |c| {
        format!("Begin with {}", c.title)
    })
    .await
}

async fn first_lessons_of(
    catalog: &dyn CourseCatalog,
    courses: &[&CourseSummary],
    priority: i32,
    reason: impl Fn(&CourseSummary) -> String,
) -> Result<Vec<Candidate>, CoreError> {
    let mut candidates = Vec::new();
    for course in courses {
        if let Some(first) = first_lesson(catalog, course.id).await? {
            candidates.push(Candidate {
                lesson_id: first.id,
                reason: reason(course),
                priority,
                strategy: Strategy::ColdStart,
            });
        }
    }
    Ok(candidates)
}

async fn first_lesson(
    catalog: &dyn CourseCatalog,
    course_id: DbId,
) -> Result<Option<LessonSummary>, CoreError> {
    Ok(catalog.course_lessons(course_id).await?.into_iter().next())
}
