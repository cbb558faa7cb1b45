//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod course_repo;
pub mod lesson_repo;
pub mod progress_repo;
pub mod recommendation_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use course_repo::CourseRepo;
pub use lesson_repo::LessonRepo;
pub use progress_repo::ProgressRepo;
pub use recommendation_repo::RecommendationRepo;
pub use user_repo::UserRepo;
